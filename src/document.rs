//! Invoice document layout
//!
//! Composes the computed values of an invoice into a printable structure:
//! header parties, line rows, tax summary, round-off and grand total, and
//! the amount in words. Rendering to PDF or HTML is left to the caller; the
//! `Display` implementation produces a plain-text rendition for previews
//! and tests.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Client, Invoice};
use crate::words::rupees_in_words;

/// Seller details printed in the invoice header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub gstin: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// One party block (seller or buyer) in the header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyBlock {
    pub name: String,
    pub gstin: Option<String>,
    pub address_lines: Vec<String>,
}

/// One line row on the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRow {
    pub serial: usize,
    pub description: String,
    pub hsn_code: String,
    pub quantity: BigDecimal,
    pub rate: BigDecimal,
    pub amount: BigDecimal,
}

/// A labeled amount in the totals section (taxes, round-off, grand total)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub amount: BigDecimal,
}

/// Fully laid out invoice ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub po_reference: Option<String>,
    pub dc_reference: Option<String>,
    pub seller: PartyBlock,
    pub buyer: PartyBlock,
    pub rows: Vec<DocumentRow>,
    pub subtotal: BigDecimal,
    /// Tax and round-off rows, in print order; zero-rate taxes and a zero
    /// round-off are omitted
    pub summary_rows: Vec<SummaryRow>,
    pub grand_total: BigDecimal,
    pub amount_in_words: String,
    pub status: String,
    pub notes: Option<String>,
}

impl InvoiceDocument {
    /// Lay out an invoice for the given seller and buyer
    pub fn compose(company: &CompanyProfile, client: &Client, invoice: &Invoice) -> Self {
        let rows = invoice
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| DocumentRow {
                serial: index + 1,
                description: item.description.clone(),
                hsn_code: item.hsn_code.clone(),
                quantity: item.quantity.clone(),
                rate: item.rate.clone(),
                amount: item.amount(),
            })
            .collect();

        let zero = BigDecimal::from(0);
        let mut summary_rows = Vec::new();
        if invoice.tax_rates.cgst != zero {
            summary_rows.push(SummaryRow {
                label: format!("CGST @ {}%", invoice.tax_rates.cgst),
                amount: invoice.totals.cgst_amount.clone(),
            });
        }
        if invoice.tax_rates.sgst != zero {
            summary_rows.push(SummaryRow {
                label: format!("SGST @ {}%", invoice.tax_rates.sgst),
                amount: invoice.totals.sgst_amount.clone(),
            });
        }
        if invoice.tax_rates.igst != zero {
            summary_rows.push(SummaryRow {
                label: format!("IGST @ {}%", invoice.tax_rates.igst),
                amount: invoice.totals.igst_amount.clone(),
            });
        }
        if invoice.totals.round_off_amount != zero {
            summary_rows.push(SummaryRow {
                label: "Round Off".to_string(),
                amount: invoice.totals.round_off_amount.clone(),
            });
        }

        let po_reference = match (&invoice.po_number, invoice.po_date) {
            (Some(number), Some(date)) => Some(format!("{} dated {}", number, date)),
            (Some(number), None) => Some(number.clone()),
            _ => None,
        };
        let dc_reference = match (&invoice.dc_number, invoice.dc_date) {
            (Some(number), Some(date)) => Some(format!("{} dated {}", number, date)),
            (Some(number), None) => Some(number.clone()),
            _ => None,
        };

        Self {
            invoice_number: invoice.invoice_number.clone(),
            invoice_date: invoice.invoice_date,
            due_date: invoice.due_date,
            po_reference,
            dc_reference,
            seller: PartyBlock {
                name: company.name.clone(),
                gstin: company.gstin.clone(),
                address_lines: address_lines(
                    company.address.as_deref(),
                    company.city.as_deref(),
                    company.state.as_deref(),
                ),
            },
            buyer: PartyBlock {
                name: client.name.clone(),
                gstin: client.gstin.clone(),
                address_lines: address_lines(
                    client.address.as_deref(),
                    client.city.as_deref(),
                    client.state.as_deref(),
                ),
            },
            rows,
            subtotal: invoice.totals.subtotal.clone(),
            summary_rows,
            grand_total: invoice.totals.total.clone(),
            amount_in_words: rupees_in_words(&invoice.totals.total),
            status: invoice.status.to_string(),
            notes: invoice.notes.clone(),
        }
    }
}

fn address_lines(address: Option<&str>, city: Option<&str>, state: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(address) = address {
        lines.push(address.to_string());
    }
    match (city, state) {
        (Some(city), Some(state)) => lines.push(format!("{}, {}", city, state)),
        (Some(city), None) => lines.push(city.to_string()),
        (None, Some(state)) => lines.push(state.to_string()),
        (None, None) => {}
    }
    lines
}

impl std::fmt::Display for InvoiceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "TAX INVOICE {}", self.invoice_number)?;
        writeln!(f, "Date: {}", self.invoice_date)?;
        if let Some(due) = self.due_date {
            writeln!(f, "Due:  {}", due)?;
        }
        if let Some(ref po) = self.po_reference {
            writeln!(f, "PO:   {}", po)?;
        }
        if let Some(ref dc) = self.dc_reference {
            writeln!(f, "DC:   {}", dc)?;
        }

        writeln!(f, "\nFrom: {}", self.seller.name)?;
        if let Some(ref gstin) = self.seller.gstin {
            writeln!(f, "GSTIN: {}", gstin)?;
        }
        for line in &self.seller.address_lines {
            writeln!(f, "{}", line)?;
        }

        writeln!(f, "\nBill To: {}", self.buyer.name)?;
        if let Some(ref gstin) = self.buyer.gstin {
            writeln!(f, "GSTIN: {}", gstin)?;
        }
        for line in &self.buyer.address_lines {
            writeln!(f, "{}", line)?;
        }

        writeln!(f, "\n{:<4} {:<30} {:<8} {:>8} {:>10} {:>12}",
            "#", "Description", "HSN", "Qty", "Rate", "Amount")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<4} {:<30} {:<8} {:>8} {:>10} {:>12}",
                row.serial,
                row.description,
                row.hsn_code,
                row.quantity.to_string(),
                row.rate.to_string(),
                row.amount.to_string()
            )?;
        }

        writeln!(f, "\n{:>62} {:>12}", "Subtotal", self.subtotal.to_string())?;
        for row in &self.summary_rows {
            writeln!(f, "{:>62} {:>12}", row.label, row.amount.to_string())?;
        }
        writeln!(
            f,
            "{:>62} {:>12}",
            "Grand Total",
            self.grand_total.to_string()
        )?;
        writeln!(f, "\nAmount in words: {}", self.amount_in_words)?;

        if let Some(ref notes) = self.notes {
            writeln!(f, "\nNotes: {}", notes)?;
        }

        Ok(())
    }
}
