//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;

/// Storage abstraction for the billing system
///
/// This trait allows the billing core to work with any storage backend
/// (PostgreSQL, SQLite, a document store, in-memory, etc.) by implementing
/// these methods.
#[async_trait]
pub trait BillingStorage: Send + Sync {
    /// Save a client to storage
    async fn save_client(&mut self, client: &Client) -> BillingResult<()>;

    /// Get a client by ID
    async fn get_client(&self, client_id: &str) -> BillingResult<Option<Client>>;

    /// List all clients
    async fn list_clients(&self) -> BillingResult<Vec<Client>>;

    /// Update a client
    async fn update_client(&mut self, client: &Client) -> BillingResult<()>;

    /// Delete a client (invoices referencing it are left untouched)
    async fn delete_client(&mut self, client_id: &str) -> BillingResult<()>;

    /// Save a product to storage
    async fn save_product(&mut self, product: &Product) -> BillingResult<()>;

    /// Get a product by ID
    async fn get_product(&self, product_id: &str) -> BillingResult<Option<Product>>;

    /// List all products
    async fn list_products(&self) -> BillingResult<Vec<Product>>;

    /// Search products by a case-insensitive name or HSN prefix
    async fn search_products(&self, term: &str) -> BillingResult<Vec<Product>>;

    /// Update a product
    async fn update_product(&mut self, product: &Product) -> BillingResult<()>;

    /// Delete a product
    async fn delete_product(&mut self, product_id: &str) -> BillingResult<()>;

    /// Save an invoice to storage
    async fn save_invoice(&mut self, invoice: &Invoice) -> BillingResult<()>;

    /// Get an invoice by ID
    async fn get_invoice(&self, invoice_id: &str) -> BillingResult<Option<Invoice>>;

    /// List invoices matching the query
    async fn list_invoices(&self, query: &InvoiceQuery) -> BillingResult<Vec<Invoice>>;

    /// Update an invoice
    async fn update_invoice(&mut self, invoice: &Invoice) -> BillingResult<()>;

    /// Delete an invoice
    async fn delete_invoice(&mut self, invoice_id: &str) -> BillingResult<()>;

    /// Save a payment to storage
    async fn save_payment(&mut self, payment: &Payment) -> BillingResult<()>;

    /// Get a payment by ID
    async fn get_payment(&self, payment_id: &str) -> BillingResult<Option<Payment>>;

    /// List payments, optionally restricted to one invoice
    async fn list_payments(&self, invoice_id: Option<&str>) -> BillingResult<Vec<Payment>>;

    /// Delete a payment
    async fn delete_payment(&mut self, payment_id: &str) -> BillingResult<()>;
}

/// Trait for implementing custom client validation rules
pub trait ClientValidator: Send + Sync {
    /// Validate a client before saving
    fn validate_client(&self, client: &Client) -> BillingResult<()>;
}

/// Trait for implementing custom invoice validation rules
pub trait InvoiceValidator: Send + Sync {
    /// Validate an invoice draft before creating or updating an invoice
    fn validate_draft(&self, draft: &InvoiceDraft) -> BillingResult<()>;
}

/// Default client validator with basic rules
pub struct DefaultClientValidator;

impl ClientValidator for DefaultClientValidator {
    fn validate_client(&self, client: &Client) -> BillingResult<()> {
        if client.id.trim().is_empty() {
            return Err(BillingError::Validation(
                "Client ID cannot be empty".to_string(),
            ));
        }

        if client.name.trim().is_empty() {
            return Err(BillingError::Validation(
                "Client name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Default invoice validator with basic rules
pub struct DefaultInvoiceValidator;

impl InvoiceValidator for DefaultInvoiceValidator {
    fn validate_draft(&self, draft: &InvoiceDraft) -> BillingResult<()> {
        if draft.client_id.trim().is_empty() {
            return Err(BillingError::Validation(
                "Invoice must reference a client".to_string(),
            ));
        }

        if draft.items.is_empty() {
            return Err(BillingError::Validation(
                "Invoice must have at least one line item".to_string(),
            ));
        }

        Ok(())
    }
}
