//! Client and product catalog management

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// Fields accepted when creating or updating a client
#[derive(Debug, Clone, Default)]
pub struct ClientDetails {
    pub name: String,
    pub gstin: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Client manager for handling the customer catalog
pub struct ClientManager<S: BillingStorage> {
    pub(crate) storage: S,
    validator: Box<dyn ClientValidator>,
}

impl<S: BillingStorage> ClientManager<S> {
    /// Create a new client manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultClientValidator),
        }
    }

    /// Create a new client manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn ClientValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new client with a generated identifier
    pub async fn create_client(&mut self, details: ClientDetails) -> BillingResult<Client> {
        let now = chrono::Utc::now().naive_utc();
        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: details.name,
            gstin: details.gstin,
            address: details.address,
            city: details.city,
            state: details.state,
            phone: details.phone,
            email: details.email,
            created_at: now,
            updated_at: now,
        };

        self.validator.validate_client(&client)?;
        self.storage.save_client(&client).await?;

        tracing::debug!(client_id = %client.id, name = %client.name, "created client");
        Ok(client)
    }

    /// Get a client by ID
    pub async fn get_client(&self, client_id: &str) -> BillingResult<Option<Client>> {
        self.storage.get_client(client_id).await
    }

    /// Get a client by ID, returning an error if not found
    pub async fn get_client_required(&self, client_id: &str) -> BillingResult<Client> {
        self.storage
            .get_client(client_id)
            .await?
            .ok_or_else(|| BillingError::ClientNotFound(client_id.to_string()))
    }

    /// List all clients
    pub async fn list_clients(&self) -> BillingResult<Vec<Client>> {
        self.storage.list_clients().await
    }

    /// Update an existing client's details
    pub async fn update_client(
        &mut self,
        client_id: &str,
        details: ClientDetails,
    ) -> BillingResult<Client> {
        let mut client = self.get_client_required(client_id).await?;

        client.name = details.name;
        client.gstin = details.gstin;
        client.address = details.address;
        client.city = details.city;
        client.state = details.state;
        client.phone = details.phone;
        client.email = details.email;
        client.updated_at = chrono::Utc::now().naive_utc();

        self.validator.validate_client(&client)?;
        self.storage.update_client(&client).await?;

        Ok(client)
    }

    /// Delete a client
    ///
    /// Invoices referencing the client are left untouched; deletion is
    /// independent and no cascade is modeled.
    pub async fn delete_client(&mut self, client_id: &str) -> BillingResult<()> {
        if self.storage.get_client(client_id).await?.is_none() {
            return Err(BillingError::ClientNotFound(client_id.to_string()));
        }

        self.storage.delete_client(client_id).await?;
        tracing::debug!(client_id, "deleted client");
        Ok(())
    }
}

/// Product manager for the item catalog used when composing line items
pub struct ProductManager<S: BillingStorage> {
    pub(crate) storage: S,
}

impl<S: BillingStorage> ProductManager<S> {
    /// Create a new product manager
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Create a new product with a generated identifier
    pub async fn create_product(
        &mut self,
        name: String,
        hsn_code: String,
        price: BigDecimal,
    ) -> BillingResult<Product> {
        if name.trim().is_empty() {
            return Err(BillingError::Validation(
                "Product name cannot be empty".to_string(),
            ));
        }

        let product = Product::new(Uuid::new_v4().to_string(), name, hsn_code, price);
        self.storage.save_product(&product).await?;

        tracing::debug!(product_id = %product.id, name = %product.name, "created product");
        Ok(product)
    }

    /// Get a product by ID
    pub async fn get_product(&self, product_id: &str) -> BillingResult<Option<Product>> {
        self.storage.get_product(product_id).await
    }

    /// Get a product by ID, returning an error if not found
    pub async fn get_product_required(&self, product_id: &str) -> BillingResult<Product> {
        self.storage
            .get_product(product_id)
            .await?
            .ok_or_else(|| BillingError::ProductNotFound(product_id.to_string()))
    }

    /// List all products
    pub async fn list_products(&self) -> BillingResult<Vec<Product>> {
        self.storage.list_products().await
    }

    /// Search products by name or HSN prefix (autocomplete source)
    pub async fn search_products(&self, term: &str) -> BillingResult<Vec<Product>> {
        self.storage.search_products(term).await
    }

    /// Update a product
    pub async fn update_product(&mut self, product: &Product) -> BillingResult<()> {
        if self.storage.get_product(&product.id).await?.is_none() {
            return Err(BillingError::ProductNotFound(product.id.clone()));
        }

        self.storage.update_product(product).await
    }

    /// Delete a product
    ///
    /// Line items already composed from the product are unaffected, since
    /// they copied its values.
    pub async fn delete_product(&mut self, product_id: &str) -> BillingResult<()> {
        if self.storage.get_product(product_id).await?.is_none() {
            return Err(BillingError::ProductNotFound(product_id.to_string()));
        }

        self.storage.delete_product(product_id).await
    }
}
