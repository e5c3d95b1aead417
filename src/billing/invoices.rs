//! Invoice processing: creation, editing, cancellation and payments

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::numbering;
use crate::tax::gst::InvoiceTotals;
use crate::traits::*;
use crate::types::*;

/// Input for recording a payment against an invoice
#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub invoice_id: String,
    pub amount: BigDecimal,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Comparison of an invoice's paid-amount field against its payment records
///
/// The two are maintained independently, so drift is possible when data is
/// imported or edited outside this library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReconciliation {
    pub invoice_id: String,
    pub invoice_number: String,
    /// Paid amount carried on the invoice itself
    pub recorded_paid_amount: BigDecimal,
    /// Sum of all payment records for the invoice
    pub payments_total: BigDecimal,
    /// `payments_total - recorded_paid_amount`
    pub difference: BigDecimal,
    pub is_consistent: bool,
}

/// Invoice manager handling the invoice lifecycle
pub struct InvoiceManager<S: BillingStorage> {
    pub(crate) storage: S,
    validator: Box<dyn InvoiceValidator>,
}

impl<S: BillingStorage> InvoiceManager<S> {
    /// Create a new invoice manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultInvoiceValidator),
        }
    }

    /// Create a new invoice manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn InvoiceValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new invoice from a draft
    ///
    /// Validates the draft, verifies the client exists, computes the totals
    /// and assigns the next sequential number for the financial year of the
    /// invoice date. The invoice starts as `Draft` or `Unpaid` depending on
    /// `save_as_draft`.
    pub async fn create_invoice(&mut self, draft: InvoiceDraft) -> BillingResult<Invoice> {
        self.validator.validate_draft(&draft)?;

        if self.storage.get_client(&draft.client_id).await?.is_none() {
            return Err(BillingError::ClientNotFound(draft.client_id.clone()));
        }

        let existing = self.storage.list_invoices(&InvoiceQuery::all()).await?;
        let invoice_number = numbering::next_invoice_number(
            existing.iter().map(|invoice| invoice.invoice_number.as_str()),
            draft.invoice_date,
        );

        let totals = InvoiceTotals::calculate(&draft.items, &draft.tax_rates, draft.round_off);
        let status = if draft.save_as_draft {
            InvoiceStatus::Draft
        } else {
            InvoiceStatus::Unpaid
        };

        let now = chrono::Utc::now().naive_utc();
        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            invoice_number,
            client_id: draft.client_id,
            items: draft.items,
            tax_rates: draft.tax_rates,
            round_off: draft.round_off,
            totals,
            status,
            paid_amount: BigDecimal::from(0),
            invoice_date: draft.invoice_date,
            due_date: draft.due_date,
            po_number: draft.po_number,
            po_date: draft.po_date,
            dc_number: draft.dc_number,
            dc_date: draft.dc_date,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };

        self.storage.save_invoice(&invoice).await?;

        tracing::info!(
            invoice_number = %invoice.invoice_number,
            total = %invoice.totals.total,
            status = %invoice.status,
            "created invoice"
        );
        Ok(invoice)
    }

    /// Get an invoice by ID
    pub async fn get_invoice(&self, invoice_id: &str) -> BillingResult<Option<Invoice>> {
        self.storage.get_invoice(invoice_id).await
    }

    /// Get an invoice by ID, returning an error if not found
    pub async fn get_invoice_required(&self, invoice_id: &str) -> BillingResult<Invoice> {
        self.storage
            .get_invoice(invoice_id)
            .await?
            .ok_or_else(|| BillingError::InvoiceNotFound(invoice_id.to_string()))
    }

    /// List invoices matching the query
    pub async fn list_invoices(&self, query: &InvoiceQuery) -> BillingResult<Vec<Invoice>> {
        self.storage.list_invoices(query).await
    }

    /// Update an invoice from an edited draft, recomputing its totals
    ///
    /// Canceled invoices are terminal and refuse edits. The invoice number
    /// and payment history are preserved. If the invoice was `Paid` and the
    /// new total exceeds the amount already collected, the status reverts to
    /// `Unpaid` while `paid_amount` is kept as the partial-payment baseline;
    /// if the new total still fits within the amount paid, it stays `Paid`.
    pub async fn update_invoice(
        &mut self,
        invoice_id: &str,
        draft: InvoiceDraft,
    ) -> BillingResult<Invoice> {
        let previous = self.get_invoice_required(invoice_id).await?;

        if previous.status == InvoiceStatus::Canceled {
            return Err(BillingError::InvoiceCanceled(previous.invoice_number));
        }

        self.validator.validate_draft(&draft)?;

        if self.storage.get_client(&draft.client_id).await?.is_none() {
            return Err(BillingError::ClientNotFound(draft.client_id.clone()));
        }

        let totals = InvoiceTotals::calculate(&draft.items, &draft.tax_rates, draft.round_off);
        let status = if previous.status == InvoiceStatus::Paid {
            if totals.total > previous.paid_amount {
                InvoiceStatus::Unpaid
            } else {
                InvoiceStatus::Paid
            }
        } else {
            previous.status
        };

        let mut updated = previous.clone();
        updated.client_id = draft.client_id;
        updated.items = draft.items;
        updated.tax_rates = draft.tax_rates;
        updated.round_off = draft.round_off;
        updated.totals = totals;
        updated.status = status;
        updated.invoice_date = draft.invoice_date;
        updated.due_date = draft.due_date;
        updated.po_number = draft.po_number;
        updated.po_date = draft.po_date;
        updated.dc_number = draft.dc_number;
        updated.dc_date = draft.dc_date;
        updated.notes = draft.notes;
        updated.updated_at = chrono::Utc::now().naive_utc();

        if let Err(err) = self.storage.update_invoice(&updated).await {
            // Restore the pre-edit snapshot so a failed write leaves no
            // half-applied state behind
            let _ = self.storage.update_invoice(&previous).await;
            return Err(err);
        }

        if previous.status == InvoiceStatus::Paid && updated.status == InvoiceStatus::Unpaid {
            tracing::info!(
                invoice_number = %updated.invoice_number,
                paid_amount = %updated.paid_amount,
                new_total = %updated.totals.total,
                "edited total exceeds amount paid; invoice reverted to Unpaid"
            );
        }

        Ok(updated)
    }

    /// Cancel an invoice
    ///
    /// Terminal and irreversible; canceling an already canceled invoice is
    /// an error.
    pub async fn cancel_invoice(&mut self, invoice_id: &str) -> BillingResult<Invoice> {
        let mut invoice = self.get_invoice_required(invoice_id).await?;

        if invoice.status == InvoiceStatus::Canceled {
            return Err(BillingError::InvoiceCanceled(invoice.invoice_number));
        }

        invoice.status = InvoiceStatus::Canceled;
        invoice.updated_at = chrono::Utc::now().naive_utc();
        self.storage.update_invoice(&invoice).await?;

        tracing::info!(invoice_number = %invoice.invoice_number, "canceled invoice");
        Ok(invoice)
    }

    /// Record a payment against an invoice
    ///
    /// The payment is stored and the invoice's paid amount accumulates; the
    /// status becomes `Paid` once the total is covered, `Partial` otherwise.
    /// Draft and canceled invoices cannot take payments. If updating the
    /// invoice fails after the payment was stored, the payment record is
    /// removed again so the two stay consistent.
    pub async fn record_payment(
        &mut self,
        input: PaymentInput,
    ) -> BillingResult<(Payment, Invoice)> {
        let previous = self.get_invoice_required(&input.invoice_id).await?;

        match previous.status {
            InvoiceStatus::Canceled => {
                return Err(BillingError::InvoiceCanceled(previous.invoice_number));
            }
            InvoiceStatus::Draft => {
                return Err(BillingError::Validation(
                    "Draft invoices cannot take payments; issue the invoice first".to_string(),
                ));
            }
            _ => {}
        }

        if input.amount <= BigDecimal::from(0) {
            return Err(BillingError::Validation(
                "Payment amount must be positive".to_string(),
            ));
        }

        let mut payment = Payment::new(
            Uuid::new_v4().to_string(),
            input.invoice_id,
            input.amount,
            input.method,
            input.date,
        );
        payment.transaction_id = input.transaction_id;
        payment.notes = input.notes;

        self.storage.save_payment(&payment).await?;

        let mut updated = previous.clone();
        updated.paid_amount = &previous.paid_amount + &payment.amount;
        updated.status = if updated.paid_amount >= updated.totals.total {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Partial
        };
        updated.updated_at = chrono::Utc::now().naive_utc();

        if let Err(err) = self.storage.update_invoice(&updated).await {
            // Roll the payment back rather than leaving it orphaned
            let _ = self.storage.delete_payment(&payment.id).await;
            return Err(err);
        }

        tracing::info!(
            invoice_number = %updated.invoice_number,
            amount = %payment.amount,
            method = %payment.method,
            status = %updated.status,
            "recorded payment"
        );
        Ok((payment, updated))
    }

    /// List payments recorded against one invoice
    pub async fn list_payments(&self, invoice_id: &str) -> BillingResult<Vec<Payment>> {
        self.storage.list_payments(Some(invoice_id)).await
    }

    /// Compare an invoice's paid-amount field against its payment records
    pub async fn reconcile_payments(
        &self,
        invoice_id: &str,
    ) -> BillingResult<PaymentReconciliation> {
        let invoice = self.get_invoice_required(invoice_id).await?;
        let payments = self.storage.list_payments(Some(invoice_id)).await?;

        let payments_total: BigDecimal = payments.iter().map(|payment| &payment.amount).sum();
        let difference = &payments_total - &invoice.paid_amount;
        let is_consistent = difference == BigDecimal::from(0);

        if !is_consistent {
            tracing::warn!(
                invoice_number = %invoice.invoice_number,
                recorded = %invoice.paid_amount,
                payments = %payments_total,
                "paid amount does not match payment records"
            );
        }

        Ok(PaymentReconciliation {
            invoice_id: invoice.id,
            invoice_number: invoice.invoice_number,
            recorded_paid_amount: invoice.paid_amount,
            payments_total,
            difference,
            is_consistent,
        })
    }
}
