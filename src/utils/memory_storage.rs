//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    clients: Arc<RwLock<HashMap<String, Client>>>,
    products: Arc<RwLock<HashMap<String, Product>>>,
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
    payments: Arc<RwLock<HashMap<String, Payment>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            products: Arc::new(RwLock::new(HashMap::new())),
            invoices: Arc::new(RwLock::new(HashMap::new())),
            payments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.clients.write().unwrap().clear();
        self.products.write().unwrap().clear();
        self.invoices.write().unwrap().clear();
        self.payments.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillingStorage for MemoryStorage {
    async fn save_client(&mut self, client: &Client) -> BillingResult<()> {
        self.clients
            .write()
            .unwrap()
            .insert(client.id.clone(), client.clone());
        Ok(())
    }

    async fn get_client(&self, client_id: &str) -> BillingResult<Option<Client>> {
        Ok(self.clients.read().unwrap().get(client_id).cloned())
    }

    async fn list_clients(&self) -> BillingResult<Vec<Client>> {
        let mut clients: Vec<Client> = self.clients.read().unwrap().values().cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    async fn update_client(&mut self, client: &Client) -> BillingResult<()> {
        if self.clients.read().unwrap().contains_key(&client.id) {
            self.clients
                .write()
                .unwrap()
                .insert(client.id.clone(), client.clone());
            Ok(())
        } else {
            Err(BillingError::ClientNotFound(client.id.clone()))
        }
    }

    async fn delete_client(&mut self, client_id: &str) -> BillingResult<()> {
        if self.clients.write().unwrap().remove(client_id).is_some() {
            Ok(())
        } else {
            Err(BillingError::ClientNotFound(client_id.to_string()))
        }
    }

    async fn save_product(&mut self, product: &Product) -> BillingResult<()> {
        self.products
            .write()
            .unwrap()
            .insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn get_product(&self, product_id: &str) -> BillingResult<Option<Product>> {
        Ok(self.products.read().unwrap().get(product_id).cloned())
    }

    async fn list_products(&self) -> BillingResult<Vec<Product>> {
        let mut products: Vec<Product> = self.products.read().unwrap().values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn search_products(&self, term: &str) -> BillingResult<Vec<Product>> {
        let needle = term.trim().to_lowercase();
        let mut matches: Vec<Product> = self
            .products
            .read()
            .unwrap()
            .values()
            .filter(|product| {
                product.name.to_lowercase().starts_with(&needle)
                    || product.hsn_code.to_lowercase().starts_with(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matches)
    }

    async fn update_product(&mut self, product: &Product) -> BillingResult<()> {
        if self.products.read().unwrap().contains_key(&product.id) {
            self.products
                .write()
                .unwrap()
                .insert(product.id.clone(), product.clone());
            Ok(())
        } else {
            Err(BillingError::ProductNotFound(product.id.clone()))
        }
    }

    async fn delete_product(&mut self, product_id: &str) -> BillingResult<()> {
        if self.products.write().unwrap().remove(product_id).is_some() {
            Ok(())
        } else {
            Err(BillingError::ProductNotFound(product_id.to_string()))
        }
    }

    async fn save_invoice(&mut self, invoice: &Invoice) -> BillingResult<()> {
        self.invoices
            .write()
            .unwrap()
            .insert(invoice.id.clone(), invoice.clone());
        Ok(())
    }

    async fn get_invoice(&self, invoice_id: &str) -> BillingResult<Option<Invoice>> {
        Ok(self.invoices.read().unwrap().get(invoice_id).cloned())
    }

    async fn list_invoices(&self, query: &InvoiceQuery) -> BillingResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self
            .invoices
            .read()
            .unwrap()
            .values()
            .filter(|invoice| query.matches(invoice))
            .cloned()
            .collect();
        invoices.sort_by(|a, b| {
            a.invoice_date
                .cmp(&b.invoice_date)
                .then_with(|| a.invoice_number.cmp(&b.invoice_number))
        });
        Ok(invoices)
    }

    async fn update_invoice(&mut self, invoice: &Invoice) -> BillingResult<()> {
        if self.invoices.read().unwrap().contains_key(&invoice.id) {
            self.invoices
                .write()
                .unwrap()
                .insert(invoice.id.clone(), invoice.clone());
            Ok(())
        } else {
            Err(BillingError::InvoiceNotFound(invoice.id.clone()))
        }
    }

    async fn delete_invoice(&mut self, invoice_id: &str) -> BillingResult<()> {
        if self.invoices.write().unwrap().remove(invoice_id).is_some() {
            Ok(())
        } else {
            Err(BillingError::InvoiceNotFound(invoice_id.to_string()))
        }
    }

    async fn save_payment(&mut self, payment: &Payment) -> BillingResult<()> {
        self.payments
            .write()
            .unwrap()
            .insert(payment.id.clone(), payment.clone());
        Ok(())
    }

    async fn get_payment(&self, payment_id: &str) -> BillingResult<Option<Payment>> {
        Ok(self.payments.read().unwrap().get(payment_id).cloned())
    }

    async fn list_payments(&self, invoice_id: Option<&str>) -> BillingResult<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .payments
            .read()
            .unwrap()
            .values()
            .filter(|payment| invoice_id.is_none_or(|id| payment.invoice_id == id))
            .cloned()
            .collect();
        payments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(payments)
    }

    async fn delete_payment(&mut self, payment_id: &str) -> BillingResult<()> {
        if self.payments.write().unwrap().remove(payment_id).is_some() {
            Ok(())
        } else {
            Err(BillingError::PaymentNotFound(payment_id.to_string()))
        }
    }
}
