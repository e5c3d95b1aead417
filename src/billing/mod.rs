//! Billing module containing client/product catalogs and invoice processing

pub mod catalog;
pub mod core;
pub mod invoices;

pub use catalog::*;
pub use core::*;
pub use invoices::*;
