//! Core types and data structures for the billing system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::tax::gst::{InvoiceTotals, TaxRates};

/// Lifecycle status of an invoice
///
/// `Draft`, `Unpaid`, `Paid`, `Partial` and `Canceled` are persisted states.
/// `Overdue` is a presentation-time state derived from the due date and is
/// never written back to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceStatus {
    /// Invoice is being composed and is excluded from financial reports
    Draft,
    /// Invoice has been issued but nothing has been collected against it
    Unpaid,
    /// Invoice is settled in full
    Paid,
    /// One or more payments have been recorded but the total is not covered
    Partial,
    /// Unpaid invoice whose due date has passed (derived, never persisted)
    Overdue,
    /// Invoice was voided; terminal state that blocks further edits
    Canceled,
}

impl InvoiceStatus {
    /// Canonical display string for the status
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Partial => "Partial",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Canceled => "Canceled",
        }
    }

    /// Normalize a raw status string into a canonical status
    ///
    /// Matching is case-insensitive. Anything containing "cancel" maps to
    /// [`InvoiceStatus::Canceled`] so that legacy spellings ("Cancelled",
    /// "canceled") are accepted. Unknown or legacy statuses (e.g. "sent")
    /// normalize to [`InvoiceStatus::Unpaid`]; the date-based resolution in
    /// [`InvoiceStatus::resolve`] treats them identically.
    pub fn from_raw(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "draft" => InvoiceStatus::Draft,
            "paid" => InvoiceStatus::Paid,
            "unpaid" => InvoiceStatus::Unpaid,
            "partial" => InvoiceStatus::Partial,
            "overdue" => InvoiceStatus::Overdue,
            s if s.contains("cancel") => InvoiceStatus::Canceled,
            _ => InvoiceStatus::Unpaid,
        }
    }

    /// Resolve the display status from the persisted status and the due date
    ///
    /// `Paid`, `Draft` and `Canceled` always dominate date-based logic. A
    /// `Partial` invoice keeps its status until the due date passes. `Unpaid`
    /// (including a derived `Overdue` read back from older data) becomes
    /// `Overdue` only when the due date is strictly before `today`; a missing
    /// due date means the invoice is never reported overdue.
    ///
    /// Dates carry no time component, so the comparison is already at day
    /// precision.
    pub fn resolve(self, due_date: Option<NaiveDate>, today: NaiveDate) -> InvoiceStatus {
        match self {
            InvoiceStatus::Paid | InvoiceStatus::Draft | InvoiceStatus::Canceled => self,
            InvoiceStatus::Partial => match due_date {
                Some(due) if due < today => InvoiceStatus::Overdue,
                _ => InvoiceStatus::Partial,
            },
            InvoiceStatus::Unpaid | InvoiceStatus::Overdue => match due_date {
                Some(due) if due < today => InvoiceStatus::Overdue,
                _ => InvoiceStatus::Unpaid,
            },
        }
    }

    /// Whether the invoice counts toward billed revenue
    pub fn is_billable(&self) -> bool {
        !matches!(self, InvoiceStatus::Draft | InvoiceStatus::Canceled)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for InvoiceStatus {
    fn from(raw: String) -> Self {
        InvoiceStatus::from_raw(&raw)
    }
}

impl From<InvoiceStatus> for String {
    fn from(status: InvoiceStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Single line on an invoice
///
/// Line items copy their values out of the product catalog at composition
/// time; they hold no reference back to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Description of the goods or service
    pub description: String,
    /// HSN classification code for the goods
    pub hsn_code: String,
    /// Quantity billed
    pub quantity: BigDecimal,
    /// Rate per unit
    pub rate: BigDecimal,
}

impl LineItem {
    /// Create a new line item
    pub fn new(
        description: String,
        hsn_code: String,
        quantity: BigDecimal,
        rate: BigDecimal,
    ) -> Self {
        Self {
            description,
            hsn_code,
            quantity,
            rate,
        }
    }

    /// Line amount: quantity times rate
    pub fn amount(&self) -> BigDecimal {
        &self.quantity * &self.rate
    }
}

/// A billed customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier for the client
    pub id: String,
    /// Business or contact name
    pub name: String,
    /// GST identification number (15 characters)
    pub gstin: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State (determines intra- vs inter-state GST)
    pub state: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Contact email address
    pub email: Option<String>,
    /// When the client was created
    pub created_at: NaiveDateTime,
    /// When the client was last updated
    pub updated_at: NaiveDateTime,
}

impl Client {
    /// Create a new client with the given identifier and name
    pub fn new(id: String, name: String) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            name,
            gstin: None,
            address: None,
            city: None,
            state: None,
            phone: None,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Catalog product used as a lookup source when composing line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product
    pub id: String,
    /// Product name
    pub name: String,
    /// HSN classification code
    pub hsn_code: String,
    /// Default rate per unit
    pub price: BigDecimal,
    /// When the product was created
    pub created_at: NaiveDateTime,
    /// When the product was last updated
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Create a new product
    pub fn new(id: String, name: String, hsn_code: String, price: BigDecimal) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            name,
            hsn_code,
            price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy this product into a line item with the given quantity
    pub fn to_line_item(&self, quantity: BigDecimal) -> LineItem {
        LineItem::new(
            self.name.clone(),
            self.hsn_code.clone(),
            quantity,
            self.price.clone(),
        )
    }
}

/// Method by which a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Cheque,
    BankTransfer,
    Upi,
    Card,
    Other,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Cheque => "Cheque",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Payment recorded against an invoice
///
/// Multiple payments may accumulate against one invoice. The invoice's own
/// `paid_amount` field is maintained alongside; the reconciliation report
/// surfaces any drift between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for the payment
    pub id: String,
    /// Invoice the payment settles (fully or partially)
    pub invoice_id: String,
    /// Amount paid
    pub amount: BigDecimal,
    /// How the payment was made
    pub method: PaymentMethod,
    /// Bank/UPI/cheque reference, if any
    pub transaction_id: Option<String>,
    /// Date the payment was received
    pub date: NaiveDate,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the payment record was created
    pub created_at: NaiveDateTime,
}

impl Payment {
    /// Create a new payment record
    pub fn new(
        id: String,
        invoice_id: String,
        amount: BigDecimal,
        method: PaymentMethod,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            invoice_id,
            amount,
            method,
            transaction_id: None,
            date,
            notes: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Complete invoice with line items, tax breakup and payment state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier for the invoice
    pub id: String,
    /// Sequential number in `NNN/YYYY-YY` form, unique per financial year
    pub invoice_number: String,
    /// Client being billed
    pub client_id: String,
    /// Ordered line items
    pub items: Vec<LineItem>,
    /// CGST/SGST/IGST percentages applied to the subtotal
    pub tax_rates: TaxRates,
    /// Whether the grand total is rounded to the nearest rupee
    pub round_off: bool,
    /// Computed totals, kept consistent with items and rates on every edit
    pub totals: InvoiceTotals,
    /// Persisted status (Overdue is derived at read time, never stored)
    pub status: InvoiceStatus,
    /// Amount collected so far across all payments
    pub paid_amount: BigDecimal,
    /// Date the invoice was issued
    pub invoice_date: NaiveDate,
    /// Payment due date; absent means the invoice can never go overdue
    pub due_date: Option<NaiveDate>,
    /// Purchase order reference
    pub po_number: Option<String>,
    /// Purchase order date
    pub po_date: Option<NaiveDate>,
    /// Delivery challan reference
    pub dc_number: Option<String>,
    /// Delivery challan date
    pub dc_date: Option<NaiveDate>,
    /// Free-form notes printed on the invoice
    pub notes: Option<String>,
    /// When the invoice was created
    pub created_at: NaiveDateTime,
    /// When the invoice was last updated
    pub updated_at: NaiveDateTime,
}

impl Invoice {
    /// Outstanding balance: total minus amount paid
    pub fn balance_due(&self) -> BigDecimal {
        &self.totals.total - &self.paid_amount
    }

    /// Display status as of `today`, derived from the persisted status and
    /// the due date
    pub fn display_status(&self, today: NaiveDate) -> InvoiceStatus {
        self.status.resolve(self.due_date, today)
    }
}

/// Input for creating or editing an invoice
///
/// The invoice number, totals and payment state are managed by the library;
/// callers supply only the composable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Client being billed
    pub client_id: String,
    /// Ordered line items
    pub items: Vec<LineItem>,
    /// CGST/SGST/IGST percentages
    pub tax_rates: TaxRates,
    /// Whether to round the grand total to the nearest rupee
    pub round_off: bool,
    /// Date the invoice is issued
    pub invoice_date: NaiveDate,
    /// Payment due date
    pub due_date: Option<NaiveDate>,
    /// Purchase order reference
    pub po_number: Option<String>,
    /// Purchase order date
    pub po_date: Option<NaiveDate>,
    /// Delivery challan reference
    pub dc_number: Option<String>,
    /// Delivery challan date
    pub dc_date: Option<NaiveDate>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Create the invoice as a draft instead of issuing it as unpaid
    pub save_as_draft: bool,
}

impl InvoiceDraft {
    /// Create a draft with the required fields; optional references default
    /// to absent
    pub fn new(
        client_id: String,
        items: Vec<LineItem>,
        tax_rates: TaxRates,
        invoice_date: NaiveDate,
    ) -> Self {
        Self {
            client_id,
            items,
            tax_rates,
            round_off: false,
            invoice_date,
            due_date: None,
            po_number: None,
            po_date: None,
            dc_number: None,
            dc_date: None,
            notes: None,
            save_as_draft: false,
        }
    }
}

/// Filter options for listing invoices
///
/// Doubles as the cache key for the query cache, so equality and hashing
/// must cover every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceQuery {
    /// Restrict to invoices for one client
    pub client_id: Option<String>,
    /// Restrict to invoices with this persisted status
    pub status: Option<InvoiceStatus>,
    /// Earliest invoice date (inclusive)
    pub from_date: Option<NaiveDate>,
    /// Latest invoice date (inclusive)
    pub to_date: Option<NaiveDate>,
}

impl InvoiceQuery {
    /// Query matching every invoice
    pub fn all() -> Self {
        Self::default()
    }

    /// Query matching invoices for a single client
    pub fn for_client(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            ..Self::default()
        }
    }

    /// Whether an invoice satisfies this query
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(ref client_id) = self.client_id {
            if &invoice.client_id != client_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if invoice.status != status {
                return false;
            }
        }
        if let Some(from) = self.from_date {
            if invoice.invoice_date < from {
                return false;
            }
        }
        if let Some(to) = self.to_date {
            if invoice.invoice_date > to {
                return false;
            }
        }
        true
    }
}

/// Errors that can occur in the billing system
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Client not found: {0}")]
    ClientNotFound(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),
    #[error("Payment not found: {0}")]
    PaymentNotFound(String),
    #[error("Invoice {0} is canceled and can no longer be modified")]
    InvoiceCanceled(String),
    #[error("Invalid tax rates: {0}")]
    InvalidRates(String),
}

/// Result type for billing operations
pub type BillingResult<T> = Result<T, BillingError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_invoice() -> Invoice {
        let items = vec![LineItem::new(
            "Widget".to_string(),
            "8409".to_string(),
            BigDecimal::from(1),
            BigDecimal::from(100),
        )];
        let rates = TaxRates::intra_state(BigDecimal::from(18));
        let totals = InvoiceTotals::calculate(&items, &rates, false);
        let now = chrono::Utc::now().naive_utc();
        Invoice {
            id: "i1".to_string(),
            invoice_number: "001/2024-25".to_string(),
            client_id: "c1".to_string(),
            items,
            tax_rates: rates,
            round_off: false,
            totals,
            status: InvoiceStatus::Unpaid,
            paid_amount: BigDecimal::from(0),
            invoice_date: date(2024, 5, 1),
            due_date: None,
            po_number: None,
            po_date: None,
            dc_number: None,
            dc_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_from_raw_canonical_and_legacy() {
        assert_eq!(InvoiceStatus::from_raw("Paid"), InvoiceStatus::Paid);
        assert_eq!(InvoiceStatus::from_raw("unpaid"), InvoiceStatus::Unpaid);
        assert_eq!(InvoiceStatus::from_raw("DRAFT"), InvoiceStatus::Draft);
        assert_eq!(
            InvoiceStatus::from_raw("Cancelled"),
            InvoiceStatus::Canceled
        );
        assert_eq!(InvoiceStatus::from_raw("canceled"), InvoiceStatus::Canceled);
        // Legacy/unknown statuses normalize to Unpaid at the boundary
        assert_eq!(InvoiceStatus::from_raw("sent"), InvoiceStatus::Unpaid);
    }

    #[test]
    fn test_unpaid_becomes_overdue_after_due_date() {
        let today = date(2024, 6, 15);
        let status = InvoiceStatus::Unpaid.resolve(Some(date(2024, 6, 14)), today);
        assert_eq!(status, InvoiceStatus::Overdue);
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let today = date(2024, 6, 15);
        let status = InvoiceStatus::Unpaid.resolve(Some(today), today);
        assert_eq!(status, InvoiceStatus::Unpaid);
    }

    #[test]
    fn test_missing_due_date_never_overdue() {
        let today = date(2024, 6, 15);
        assert_eq!(
            InvoiceStatus::Unpaid.resolve(None, today),
            InvoiceStatus::Unpaid
        );
    }

    #[test]
    fn test_paid_and_canceled_dominate_date_logic() {
        let today = date(2024, 6, 15);
        let past_due = Some(date(2020, 1, 1));
        assert_eq!(
            InvoiceStatus::Paid.resolve(past_due, today),
            InvoiceStatus::Paid
        );
        assert_eq!(
            InvoiceStatus::Canceled.resolve(past_due, today),
            InvoiceStatus::Canceled
        );
        assert_eq!(
            InvoiceStatus::Draft.resolve(past_due, today),
            InvoiceStatus::Draft
        );
    }

    #[test]
    fn test_partial_keeps_status_until_due_date_passes() {
        let today = date(2024, 6, 15);
        assert_eq!(
            InvoiceStatus::Partial.resolve(Some(date(2024, 7, 1)), today),
            InvoiceStatus::Partial
        );
        assert_eq!(
            InvoiceStatus::Partial.resolve(Some(date(2024, 6, 1)), today),
            InvoiceStatus::Overdue
        );
    }

    #[test]
    fn test_legacy_sent_status_resolves_overdue_via_normalization() {
        let today = date(2024, 6, 15);
        let status = InvoiceStatus::from_raw("sent").resolve(Some(date(2024, 6, 14)), today);
        assert_eq!(status, InvoiceStatus::Overdue);
    }

    #[test]
    fn test_status_serde_normalizes_raw_strings() {
        let status: InvoiceStatus = serde_json::from_str("\"sent\"").unwrap();
        assert_eq!(status, InvoiceStatus::Unpaid);

        let json = serde_json::to_string(&InvoiceStatus::Canceled).unwrap();
        assert_eq!(json, "\"Canceled\"");
    }

    #[test]
    fn test_invoice_balance_due() {
        let mut invoice = sample_invoice();
        invoice.paid_amount = BigDecimal::from(50);
        assert_eq!(invoice.balance_due(), BigDecimal::from(68)); // 118 - 50
    }

    #[test]
    fn test_invoice_query_matching() {
        let query = InvoiceQuery {
            client_id: Some("c1".to_string()),
            status: None,
            from_date: Some(date(2024, 4, 1)),
            to_date: None,
        };

        let mut invoice = sample_invoice();
        assert!(query.matches(&invoice));

        invoice.invoice_date = date(2024, 3, 1);
        assert!(!query.matches(&invoice));

        invoice.invoice_date = date(2024, 5, 1);
        invoice.client_id = "c2".to_string();
        assert!(!query.matches(&invoice));
    }
}
