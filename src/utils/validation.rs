//! Validation utilities

use bigdecimal::BigDecimal;

use crate::traits::*;
use crate::types::*;

/// Validate a GSTIN (GST identification number)
///
/// Shape check only: 15 uppercase alphanumeric characters starting with a
/// two-digit state code and ending with the literal `Z` and a check
/// character. The checksum itself is not verified.
pub fn validate_gstin(gstin: &str) -> BillingResult<()> {
    let gstin = gstin.trim();

    if gstin.len() != 15 {
        return Err(BillingError::Validation(
            "GSTIN must be exactly 15 characters".to_string(),
        ));
    }

    if !gstin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(BillingError::Validation(
            "GSTIN can only contain alphanumeric characters".to_string(),
        ));
    }

    if gstin.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(BillingError::Validation(
            "GSTIN must be upper case".to_string(),
        ));
    }

    if !gstin.chars().take(2).all(|c| c.is_ascii_digit()) {
        return Err(BillingError::Validation(
            "GSTIN must start with a two-digit state code".to_string(),
        ));
    }

    if gstin.chars().nth(13) != Some('Z') {
        return Err(BillingError::Validation(
            "GSTIN must have 'Z' as its fourteenth character".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a line item is well formed for issuing
pub fn validate_line_item(item: &LineItem) -> BillingResult<()> {
    if item.description.trim().is_empty() {
        return Err(BillingError::Validation(
            "Line item description cannot be empty".to_string(),
        ));
    }

    let zero = BigDecimal::from(0);
    if item.quantity <= zero {
        return Err(BillingError::Validation(
            "Line item quantity must be positive".to_string(),
        ));
    }

    if item.rate < zero {
        return Err(BillingError::Validation(
            "Line item rate cannot be negative".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced client validator that also checks the GSTIN shape
pub struct EnhancedClientValidator;

impl ClientValidator for EnhancedClientValidator {
    fn validate_client(&self, client: &Client) -> BillingResult<()> {
        DefaultClientValidator.validate_client(client)?;

        if client.name.len() > 200 {
            return Err(BillingError::Validation(
                "Client name cannot exceed 200 characters".to_string(),
            ));
        }

        if let Some(ref gstin) = client.gstin {
            validate_gstin(gstin)?;
        }

        Ok(())
    }
}

/// Enhanced invoice validator with per-item and tax-rate checks
///
/// The calculator itself deliberately passes negative inputs through; this
/// validator is the place where issuing a malformed invoice gets stopped.
pub struct EnhancedInvoiceValidator;

impl InvoiceValidator for EnhancedInvoiceValidator {
    fn validate_draft(&self, draft: &InvoiceDraft) -> BillingResult<()> {
        DefaultInvoiceValidator.validate_draft(draft)?;

        for item in &draft.items {
            validate_line_item(item)?;
        }

        draft.tax_rates.validate()?;

        if let Some(due) = draft.due_date {
            if due < draft.invoice_date {
                return Err(BillingError::Validation(
                    "Due date cannot be before the invoice date".to_string(),
                ));
            }
        }

        Ok(())
    }
}
