//! # Billing Core
//!
//! A GST-compliant invoicing and billing library for small manufacturing
//! businesses: client and product catalogs, invoice lifecycle management,
//! payment tracking, and reporting.
//!
//! ## Features
//!
//! - **GST calculations**: CGST/SGST/IGST breakup with optional round-off of
//!   the grand total
//! - **Invoice lifecycle**: draft, issue, edit, partial and full payments,
//!   terminal cancellation
//! - **Sequential numbering**: `NNN/YYYY-YY` numbers that restart every
//!   Indian financial year
//! - **Amount in words**: Indian-English formatting (crore/lakh/thousand)
//! - **Reporting**: dashboard, per-client statements, GST filing totals,
//!   payment summaries
//! - **Document layout**: printable invoice structure with tax summary and
//!   amount in words
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   storage
//!
//! ## Quick Start
//!
//! ```rust
//! use billing_core::{Billing, InvoiceDraft, LineItem, TaxRates};
//! use billing_core::utils::MemoryStorage;
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! # async fn example() -> billing_core::BillingResult<()> {
//! let mut billing = Billing::new(MemoryStorage::new());
//!
//! let client = billing
//!     .create_client(billing_core::ClientDetails {
//!         name: "Sharma Industries".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let items = vec![LineItem::new(
//!     "Machined bracket".to_string(),
//!     "7326".to_string(),
//!     BigDecimal::from(2),
//!     BigDecimal::from(500),
//! )];
//! let draft = InvoiceDraft::new(
//!     client.id.clone(),
//!     items,
//!     TaxRates::intra_state(BigDecimal::from(18)),
//!     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//! );
//! let invoice = billing.create_invoice(draft).await?;
//! assert_eq!(invoice.invoice_number, "001/2024-25");
//! # Ok(())
//! # }
//! ```

pub mod billing;
pub mod document;
pub mod numbering;
pub mod reports;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;
pub mod words;

// Re-export commonly used types
pub use billing::*;
pub use document::{CompanyProfile, InvoiceDocument};
pub use reports::*;
pub use tax::gst::*;
pub use traits::*;
pub use types::*;

// Re-export the pure helpers for convenience
pub use numbering::{financial_year_label, next_invoice_number};
pub use words::{amount_in_words, rupees_in_words};
