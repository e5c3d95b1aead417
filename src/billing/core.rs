//! Main billing orchestrator that coordinates catalogs, invoices and reports

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::billing::{ClientDetails, ClientManager, InvoiceManager, PaymentInput, ProductManager};
use crate::billing::invoices::PaymentReconciliation;
use crate::document::{CompanyProfile, InvoiceDocument};
use crate::reports::{ClientStatement, DashboardSummary, GstSummary, PaymentSummary};
use crate::traits::*;
use crate::types::*;
use crate::utils::cache::QueryCache;

/// Main billing system that orchestrates all invoicing operations
///
/// Listing queries go through a query-keyed cache that is cleared on every
/// invoice or payment mutation, so repeated dashboard refreshes between
/// edits cost one storage scan.
pub struct Billing<S: BillingStorage> {
    clients: ClientManager<S>,
    products: ProductManager<S>,
    invoices: InvoiceManager<S>,
    invoice_cache: QueryCache<InvoiceQuery, Invoice>,
}

impl<S: BillingStorage + Clone> Billing<S> {
    /// Create a new billing system with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            clients: ClientManager::new(storage.clone()),
            products: ProductManager::new(storage.clone()),
            invoices: InvoiceManager::new(storage),
            invoice_cache: QueryCache::new(),
        }
    }

    /// Create a new billing system with custom validators
    pub fn with_validators(
        storage: S,
        client_validator: Box<dyn ClientValidator>,
        invoice_validator: Box<dyn InvoiceValidator>,
    ) -> Self {
        Self {
            clients: ClientManager::with_validator(storage.clone(), client_validator),
            products: ProductManager::new(storage.clone()),
            invoices: InvoiceManager::with_validator(storage, invoice_validator),
            invoice_cache: QueryCache::new(),
        }
    }

    // Client operations
    /// Create a new client
    pub async fn create_client(&mut self, details: ClientDetails) -> BillingResult<Client> {
        self.clients.create_client(details).await
    }

    /// Get a client by ID
    pub async fn get_client(&self, client_id: &str) -> BillingResult<Option<Client>> {
        self.clients.get_client(client_id).await
    }

    /// List all clients
    pub async fn list_clients(&self) -> BillingResult<Vec<Client>> {
        self.clients.list_clients().await
    }

    /// Update a client's details
    pub async fn update_client(
        &mut self,
        client_id: &str,
        details: ClientDetails,
    ) -> BillingResult<Client> {
        self.clients.update_client(client_id, details).await
    }

    /// Delete a client (no cascade to invoices)
    pub async fn delete_client(&mut self, client_id: &str) -> BillingResult<()> {
        self.clients.delete_client(client_id).await
    }

    // Product operations
    /// Create a catalog product
    pub async fn create_product(
        &mut self,
        name: String,
        hsn_code: String,
        price: BigDecimal,
    ) -> BillingResult<Product> {
        self.products.create_product(name, hsn_code, price).await
    }

    /// Get a product by ID
    pub async fn get_product(&self, product_id: &str) -> BillingResult<Option<Product>> {
        self.products.get_product(product_id).await
    }

    /// List all products
    pub async fn list_products(&self) -> BillingResult<Vec<Product>> {
        self.products.list_products().await
    }

    /// Search products by name or HSN prefix
    pub async fn search_products(&self, term: &str) -> BillingResult<Vec<Product>> {
        self.products.search_products(term).await
    }

    /// Update a product
    pub async fn update_product(&mut self, product: &Product) -> BillingResult<()> {
        self.products.update_product(product).await
    }

    /// Delete a product
    pub async fn delete_product(&mut self, product_id: &str) -> BillingResult<()> {
        self.products.delete_product(product_id).await
    }

    // Invoice operations
    /// Create a new invoice from a draft
    pub async fn create_invoice(&mut self, draft: InvoiceDraft) -> BillingResult<Invoice> {
        let invoice = self.invoices.create_invoice(draft).await?;
        self.invoice_cache.invalidate_all();
        Ok(invoice)
    }

    /// Get an invoice by ID
    pub async fn get_invoice(&self, invoice_id: &str) -> BillingResult<Option<Invoice>> {
        self.invoices.get_invoice(invoice_id).await
    }

    /// List invoices matching the query, served from cache when possible
    pub async fn list_invoices(&self, query: &InvoiceQuery) -> BillingResult<Vec<Invoice>> {
        if let Some(cached) = self.invoice_cache.get(query) {
            return Ok(cached);
        }

        let invoices = self.invoices.list_invoices(query).await?;
        self.invoice_cache.put(query.clone(), invoices.clone());
        Ok(invoices)
    }

    /// Update an invoice from an edited draft
    pub async fn update_invoice(
        &mut self,
        invoice_id: &str,
        draft: InvoiceDraft,
    ) -> BillingResult<Invoice> {
        let invoice = self.invoices.update_invoice(invoice_id, draft).await?;
        self.invoice_cache.invalidate_all();
        Ok(invoice)
    }

    /// Cancel an invoice (terminal)
    pub async fn cancel_invoice(&mut self, invoice_id: &str) -> BillingResult<Invoice> {
        let invoice = self.invoices.cancel_invoice(invoice_id).await?;
        self.invoice_cache.invalidate_all();
        Ok(invoice)
    }

    // Payment operations
    /// Record a payment against an invoice
    pub async fn record_payment(
        &mut self,
        input: PaymentInput,
    ) -> BillingResult<(Payment, Invoice)> {
        let result = self.invoices.record_payment(input).await?;
        self.invoice_cache.invalidate_all();
        Ok(result)
    }

    /// List payments recorded against one invoice
    pub async fn list_payments(&self, invoice_id: &str) -> BillingResult<Vec<Payment>> {
        self.invoices.list_payments(invoice_id).await
    }

    /// Compare an invoice's paid amount against its payment records
    pub async fn reconcile_payments(
        &self,
        invoice_id: &str,
    ) -> BillingResult<PaymentReconciliation> {
        self.invoices.reconcile_payments(invoice_id).await
    }

    // Reporting operations
    /// Dashboard summary with statuses resolved as of `today`
    pub async fn dashboard_summary(&self, today: NaiveDate) -> BillingResult<DashboardSummary> {
        let invoices = self.list_invoices(&InvoiceQuery::all()).await?;
        Ok(DashboardSummary::build(&invoices, today))
    }

    /// Billing statement for one client
    pub async fn client_statement(
        &self,
        client_id: &str,
        today: NaiveDate,
    ) -> BillingResult<ClientStatement> {
        let invoices = self
            .list_invoices(&InvoiceQuery::for_client(client_id))
            .await?;
        Ok(ClientStatement::build(client_id, &invoices, today))
    }

    /// GST totals over an invoice-date range
    pub async fn gst_summary(
        &self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> BillingResult<GstSummary> {
        let invoices = self.list_invoices(&InvoiceQuery::all()).await?;
        Ok(GstSummary::build(&invoices, from_date, to_date))
    }

    /// Payment totals by method over a payment-date range
    pub async fn payment_summary(
        &self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> BillingResult<PaymentSummary> {
        let payments = self.invoices.storage.list_payments(None).await?;
        Ok(PaymentSummary::build(&payments, from_date, to_date))
    }

    /// Lay out an invoice document ready for rendering
    pub async fn invoice_document(
        &self,
        invoice_id: &str,
        company: &CompanyProfile,
    ) -> BillingResult<InvoiceDocument> {
        let invoice = self.invoices.get_invoice_required(invoice_id).await?;
        let client = self.clients.get_client_required(&invoice.client_id).await?;
        Ok(InvoiceDocument::compose(company, &client, &invoice))
    }

    /// Number of cached invoice listings (exposed for cache behavior tests)
    pub fn cached_query_count(&self) -> usize {
        self.invoice_cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::gst::TaxRates;
    use crate::utils::memory_storage::MemoryStorage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn items() -> Vec<LineItem> {
        vec![
            LineItem::new(
                "Machined bracket".to_string(),
                "7326".to_string(),
                BigDecimal::from(2),
                BigDecimal::from(500),
            ),
            LineItem::new(
                "Assembly service".to_string(),
                "9988".to_string(),
                BigDecimal::from(1),
                BigDecimal::from(1000),
            ),
        ]
    }

    async fn billing_with_client() -> (Billing<MemoryStorage>, Client) {
        let mut billing = Billing::new(MemoryStorage::new());
        let client = billing
            .create_client(ClientDetails {
                name: "Sharma Industries".to_string(),
                ..ClientDetails::default()
            })
            .await
            .unwrap();
        (billing, client)
    }

    #[tokio::test]
    async fn test_create_invoice_assigns_number_and_totals() {
        let (mut billing, client) = billing_with_client().await;

        let rates = TaxRates::new(
            BigDecimal::from(9),
            BigDecimal::from(9),
            BigDecimal::from(0),
        );
        let draft = InvoiceDraft::new(client.id.clone(), items(), rates, date(2024, 6, 1));
        let invoice = billing.create_invoice(draft).await.unwrap();

        assert_eq!(invoice.invoice_number, "001/2024-25");
        assert_eq!(invoice.status, InvoiceStatus::Unpaid);
        assert_eq!(invoice.totals.subtotal, BigDecimal::from(2000));
        assert_eq!(invoice.totals.total, BigDecimal::from(2360));
    }

    #[tokio::test]
    async fn test_back_dated_invoice_extends_its_own_financial_year() {
        let (mut billing, client) = billing_with_client().await;
        let rates = TaxRates::intra_state(BigDecimal::from(18));

        let draft = InvoiceDraft::new(client.id.clone(), items(), rates.clone(), date(2025, 3, 20));
        let prior_year = billing.create_invoice(draft).await.unwrap();
        assert_eq!(prior_year.invoice_number, "001/2024-25");

        let draft = InvoiceDraft::new(client.id.clone(), items(), rates.clone(), date(2025, 5, 10));
        let current_year = billing.create_invoice(draft).await.unwrap();
        assert_eq!(current_year.invoice_number, "001/2025-26");

        // Back-dated into the prior year: continues that year's sequence,
        // not the current one
        let draft = InvoiceDraft::new(client.id.clone(), items(), rates, date(2025, 3, 28));
        let back_dated = billing.create_invoice(draft).await.unwrap();
        assert_eq!(back_dated.invoice_number, "002/2024-25");
    }

    #[tokio::test]
    async fn test_invoice_numbers_increment_within_year() {
        let (mut billing, client) = billing_with_client().await;
        let rates = TaxRates::intra_state(BigDecimal::from(18));

        for expected in ["001/2024-25", "002/2024-25", "003/2024-25"] {
            let draft = InvoiceDraft::new(
                client.id.clone(),
                items(),
                rates.clone(),
                date(2024, 6, 1),
            );
            let invoice = billing.create_invoice(draft).await.unwrap();
            assert_eq!(invoice.invoice_number, expected);
        }
    }

    #[tokio::test]
    async fn test_list_invoices_is_cached_until_mutation() {
        let (mut billing, client) = billing_with_client().await;
        let rates = TaxRates::intra_state(BigDecimal::from(18));
        let draft = InvoiceDraft::new(client.id.clone(), items(), rates.clone(), date(2024, 6, 1));
        billing.create_invoice(draft).await.unwrap();

        assert_eq!(billing.cached_query_count(), 0);
        billing.list_invoices(&InvoiceQuery::all()).await.unwrap();
        assert_eq!(billing.cached_query_count(), 1);

        // Same query again hits the cache; a different query adds an entry
        billing.list_invoices(&InvoiceQuery::all()).await.unwrap();
        assert_eq!(billing.cached_query_count(), 1);
        billing
            .list_invoices(&InvoiceQuery::for_client(client.id.clone()))
            .await
            .unwrap();
        assert_eq!(billing.cached_query_count(), 2);

        // Any invoice mutation clears all cached listings
        let draft = InvoiceDraft::new(client.id.clone(), items(), rates, date(2024, 6, 2));
        billing.create_invoice(draft).await.unwrap();
        assert_eq!(billing.cached_query_count(), 0);
    }

    #[tokio::test]
    async fn test_create_invoice_for_unknown_client_fails() {
        let mut billing = Billing::new(MemoryStorage::new());
        let rates = TaxRates::intra_state(BigDecimal::from(18));
        let draft = InvoiceDraft::new("missing".to_string(), items(), rates, date(2024, 6, 1));

        let result = billing.create_invoice(draft).await;
        assert!(matches!(result, Err(BillingError::ClientNotFound(_))));
    }
}
