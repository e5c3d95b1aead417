//! Derived statistics over invoice and payment collections
//!
//! Every report is a plain fold over the full collection, recomputed on
//! demand. At the expected data volumes (hundreds to low thousands of
//! invoices) a linear scan is sufficient and nothing incremental is
//! maintained. All folds read the canonical invoice fields; there are no
//! fallback chains, so a record either carries its totals or was rejected
//! at the data-access boundary.

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::*;

/// Headline figures for the dashboard
///
/// Draft and canceled invoices are excluded from all monetary figures;
/// status counts use the display status resolved as of `today`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Date the statuses were resolved against
    pub as_of: NaiveDate,
    /// Number of invoices considered (all statuses)
    pub invoice_count: usize,
    /// Sum of grand totals across billable invoices
    pub total_billed: BigDecimal,
    /// Sum of amounts collected across billable invoices
    pub total_collected: BigDecimal,
    /// Balance due across unpaid, partial and overdue invoices
    pub outstanding: BigDecimal,
    /// Balance due across overdue invoices only
    pub overdue_total: BigDecimal,
    /// GST (all components) on fully paid invoices
    pub gst_collected: BigDecimal,
    /// Collected as a percentage of billed; zero when nothing is billed
    pub payment_rate: BigDecimal,
    /// Invoice counts per resolved display status
    pub status_counts: HashMap<InvoiceStatus, usize>,
}

impl DashboardSummary {
    /// Fold a dashboard summary out of the invoice collection
    pub fn build(invoices: &[Invoice], today: NaiveDate) -> Self {
        let zero = BigDecimal::from(0);
        let mut total_billed = zero.clone();
        let mut total_collected = zero.clone();
        let mut outstanding = zero.clone();
        let mut overdue_total = zero.clone();
        let mut gst_collected = zero.clone();
        let mut status_counts: HashMap<InvoiceStatus, usize> = HashMap::new();

        for invoice in invoices {
            let display = invoice.display_status(today);
            *status_counts.entry(display).or_default() += 1;

            if !invoice.status.is_billable() {
                continue;
            }

            total_billed += &invoice.totals.total;
            total_collected += &invoice.paid_amount;

            match display {
                InvoiceStatus::Unpaid | InvoiceStatus::Partial => {
                    outstanding += invoice.balance_due();
                }
                InvoiceStatus::Overdue => {
                    let due = invoice.balance_due();
                    outstanding += &due;
                    overdue_total += due;
                }
                InvoiceStatus::Paid => {
                    gst_collected += invoice.totals.total_tax();
                }
                InvoiceStatus::Draft | InvoiceStatus::Canceled => {}
            }
        }

        let payment_rate = if total_billed == zero {
            zero
        } else {
            (&total_collected * BigDecimal::from(100)) / &total_billed
        };

        Self {
            as_of: today,
            invoice_count: invoices.len(),
            total_billed,
            total_collected,
            outstanding,
            overdue_total,
            gst_collected,
            payment_rate,
            status_counts,
        }
    }
}

/// Per-client billing figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientStatement {
    pub client_id: String,
    pub as_of: NaiveDate,
    /// Billable invoices issued to the client
    pub invoice_count: usize,
    pub total_billed: BigDecimal,
    pub total_collected: BigDecimal,
    pub outstanding: BigDecimal,
    pub overdue_count: usize,
}

impl ClientStatement {
    /// Fold a statement for one client out of the invoice collection
    pub fn build(client_id: &str, invoices: &[Invoice], today: NaiveDate) -> Self {
        let zero = BigDecimal::from(0);
        let mut invoice_count = 0;
        let mut total_billed = zero.clone();
        let mut total_collected = zero.clone();
        let mut outstanding = zero;
        let mut overdue_count = 0;

        for invoice in invoices {
            if invoice.client_id != client_id || !invoice.status.is_billable() {
                continue;
            }

            invoice_count += 1;
            total_billed += &invoice.totals.total;
            total_collected += &invoice.paid_amount;

            match invoice.display_status(today) {
                InvoiceStatus::Overdue => {
                    overdue_count += 1;
                    outstanding += invoice.balance_due();
                }
                InvoiceStatus::Unpaid | InvoiceStatus::Partial => {
                    outstanding += invoice.balance_due();
                }
                _ => {}
            }
        }

        Self {
            client_id: client_id.to_string(),
            as_of: today,
            invoice_count,
            total_billed,
            total_collected,
            outstanding,
            overdue_count,
        }
    }
}

/// GST totals over a date range, for filing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstSummary {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    /// Billable invoices dated inside the range
    pub invoice_count: usize,
    /// Sum of subtotals (value on which tax was charged)
    pub taxable_value: BigDecimal,
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub igst: BigDecimal,
    pub total_tax: BigDecimal,
}

impl GstSummary {
    /// Fold GST totals over invoices dated inside the range (inclusive)
    pub fn build(
        invoices: &[Invoice],
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> Self {
        let zero = BigDecimal::from(0);
        let mut invoice_count = 0;
        let mut taxable_value = zero.clone();
        let mut cgst = zero.clone();
        let mut sgst = zero.clone();
        let mut igst = zero;

        for invoice in invoices {
            if !invoice.status.is_billable() {
                continue;
            }
            if from_date.is_some_and(|from| invoice.invoice_date < from) {
                continue;
            }
            if to_date.is_some_and(|to| invoice.invoice_date > to) {
                continue;
            }

            invoice_count += 1;
            taxable_value += &invoice.totals.subtotal;
            cgst += &invoice.totals.cgst_amount;
            sgst += &invoice.totals.sgst_amount;
            igst += &invoice.totals.igst_amount;
        }

        let total_tax = &cgst + &sgst + &igst;

        Self {
            from_date,
            to_date,
            invoice_count,
            taxable_value,
            cgst,
            sgst,
            igst,
            total_tax,
        }
    }

    /// GST totals for the financial year containing `date` (April 1 to
    /// March 31)
    pub fn for_financial_year(invoices: &[Invoice], date: NaiveDate) -> Self {
        let start_year = if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        };
        let from = NaiveDate::from_ymd_opt(start_year, 4, 1);
        let to = NaiveDate::from_ymd_opt(start_year + 1, 3, 31);
        Self::build(invoices, from, to)
    }
}

/// Collected amounts grouped by payment method over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub payment_count: usize,
    pub total_collected: BigDecimal,
    pub by_method: HashMap<PaymentMethod, BigDecimal>,
}

impl PaymentSummary {
    /// Fold payment totals over payments dated inside the range (inclusive)
    pub fn build(
        payments: &[Payment],
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> Self {
        let mut payment_count = 0;
        let mut total_collected = BigDecimal::from(0);
        let mut by_method: HashMap<PaymentMethod, BigDecimal> = HashMap::new();

        for payment in payments {
            if from_date.is_some_and(|from| payment.date < from) {
                continue;
            }
            if to_date.is_some_and(|to| payment.date > to) {
                continue;
            }

            payment_count += 1;
            total_collected += &payment.amount;
            *by_method
                .entry(payment.method)
                .or_insert_with(|| BigDecimal::from(0)) += &payment.amount;
        }

        Self {
            from_date,
            to_date,
            payment_count,
            total_collected,
            by_method,
        }
    }
}
