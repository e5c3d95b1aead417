//! GST (Goods and Services Tax) calculation for Indian invoicing

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};

use crate::types::{BillingError, BillingResult, LineItem};

/// GST percentage components applied to an invoice
///
/// The three components are carried independently. Real GST law treats
/// CGST+SGST and IGST as alternatives, but the data model does not force
/// that; [`TaxRates::validate`] checks it for callers that want the rule
/// enforced while the calculator itself accepts whatever it is given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRates {
    /// CGST rate percentage (Central GST)
    pub cgst: BigDecimal,
    /// SGST rate percentage (State GST)
    pub sgst: BigDecimal,
    /// IGST rate percentage (Integrated GST)
    pub igst: BigDecimal,
}

impl TaxRates {
    /// Create rates with explicit components
    pub fn new(cgst: BigDecimal, sgst: BigDecimal, igst: BigDecimal) -> Self {
        Self { cgst, sgst, igst }
    }

    /// Intra-state rates: the total is split equally into CGST and SGST
    pub fn intra_state(total_rate: BigDecimal) -> Self {
        let half_rate = &total_rate / BigDecimal::from(2);
        Self {
            cgst: half_rate.clone(),
            sgst: half_rate,
            igst: BigDecimal::from(0),
        }
    }

    /// Inter-state rates: the whole rate goes to IGST
    pub fn inter_state(total_rate: BigDecimal) -> Self {
        Self {
            cgst: BigDecimal::from(0),
            sgst: BigDecimal::from(0),
            igst: total_rate,
        }
    }

    /// No tax at all (exempt supplies)
    pub fn exempt() -> Self {
        Self::new(
            BigDecimal::from(0),
            BigDecimal::from(0),
            BigDecimal::from(0),
        )
    }

    /// Combined rate percentage across all components
    pub fn total_rate(&self) -> BigDecimal {
        &self.cgst + &self.sgst + &self.igst
    }

    /// Validate that the rate structure follows GST rules
    ///
    /// Intra-state supplies must split the rate equally between CGST and
    /// SGST; inter-state supplies must carry IGST only. Negative components
    /// are rejected.
    pub fn validate(&self) -> BillingResult<()> {
        let zero = BigDecimal::from(0);

        if self.cgst < zero || self.sgst < zero || self.igst < zero {
            return Err(BillingError::InvalidRates(
                "GST components cannot be negative".to_string(),
            ));
        }

        if self.igst == zero && self.cgst != self.sgst {
            return Err(BillingError::InvalidRates(
                "CGST and SGST rates must be equal for intra-state supplies".to_string(),
            ));
        }

        if self.igst > zero && (self.cgst > zero || self.sgst > zero) {
            return Err(BillingError::InvalidRates(
                "Only IGST should be applicable for inter-state supplies".to_string(),
            ));
        }

        Ok(())
    }
}

/// Computed financial breakup of an invoice
///
/// Invariant: `total = subtotal + cgst_amount + sgst_amount + igst_amount
/// + round_off_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line amounts before tax
    pub subtotal: BigDecimal,
    /// Calculated CGST amount
    pub cgst_amount: BigDecimal,
    /// Calculated SGST amount
    pub sgst_amount: BigDecimal,
    /// Calculated IGST amount
    pub igst_amount: BigDecimal,
    /// Adjustment applied when rounding the grand total (may be negative)
    pub round_off_amount: BigDecimal,
    /// Grand total payable
    pub total: BigDecimal,
}

impl InvoiceTotals {
    /// Calculate totals from line items, tax percentages and the round-off
    /// flag
    ///
    /// Pure and deterministic; safe to call on every edit. Tax amounts are
    /// never rounded individually. When `round_off` is set, only the grand
    /// total is rounded half-up to the nearest rupee and the adjustment is
    /// reported separately. Inputs are not validated: negative quantities or
    /// rates flow straight through to the totals.
    pub fn calculate(items: &[LineItem], rates: &TaxRates, round_off: bool) -> Self {
        let subtotal: BigDecimal = items.iter().map(|item| item.amount()).sum();
        Self::from_taxable_value(subtotal, rates, round_off)
    }

    /// Calculate totals from an already summed taxable value
    pub fn from_taxable_value(subtotal: BigDecimal, rates: &TaxRates, round_off: bool) -> Self {
        let hundred = BigDecimal::from(100);
        let cgst_amount = (&subtotal * &rates.cgst) / &hundred;
        let sgst_amount = (&subtotal * &rates.sgst) / &hundred;
        let igst_amount = (&subtotal * &rates.igst) / &hundred;

        let raw_total = &subtotal + &cgst_amount + &sgst_amount + &igst_amount;
        let (total, round_off_amount) = if round_off {
            let rounded = raw_total.with_scale_round(0, RoundingMode::HalfUp);
            let adjustment = &rounded - &raw_total;
            (rounded, adjustment)
        } else {
            (raw_total, BigDecimal::from(0))
        };

        Self {
            subtotal,
            cgst_amount,
            sgst_amount,
            igst_amount,
            round_off_amount,
            total,
        }
    }

    /// Reverse calculation: derive the taxable value from a tax-inclusive
    /// total
    pub fn reverse_calculate(total_with_tax: BigDecimal, rates: &TaxRates) -> Self {
        let hundred = BigDecimal::from(100);
        let divisor = &hundred + rates.total_rate();
        let subtotal = (&total_with_tax * &hundred) / divisor;
        Self::from_taxable_value(subtotal, rates, false)
    }

    /// Totals of an invoice with no line items
    pub fn empty() -> Self {
        Self::from_taxable_value(BigDecimal::from(0), &TaxRates::exempt(), false)
    }

    /// Combined tax across all components
    pub fn total_tax(&self) -> BigDecimal {
        &self.cgst_amount + &self.sgst_amount + &self.igst_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, rate: i64) -> LineItem {
        LineItem::new(
            "Item".to_string(),
            "8409".to_string(),
            BigDecimal::from(quantity),
            BigDecimal::from(rate),
        )
    }

    #[test]
    fn test_intra_state_rates_split_equally() {
        let rates = TaxRates::intra_state(BigDecimal::from(18));
        assert_eq!(rates.cgst, BigDecimal::from(9));
        assert_eq!(rates.sgst, BigDecimal::from(9));
        assert_eq!(rates.igst, BigDecimal::from(0));
        assert_eq!(rates.total_rate(), BigDecimal::from(18));
        assert!(rates.validate().is_ok());
    }

    #[test]
    fn test_inter_state_rates_use_igst_only() {
        let rates = TaxRates::inter_state(BigDecimal::from(18));
        assert_eq!(rates.cgst, BigDecimal::from(0));
        assert_eq!(rates.sgst, BigDecimal::from(0));
        assert_eq!(rates.igst, BigDecimal::from(18));
        assert!(rates.validate().is_ok());
    }

    #[test]
    fn test_mixed_components_fail_validation() {
        let rates = TaxRates::new(
            BigDecimal::from(9),
            BigDecimal::from(9),
            BigDecimal::from(18),
        );
        assert!(rates.validate().is_err());

        let lopsided = TaxRates::new(
            BigDecimal::from(9),
            BigDecimal::from(6),
            BigDecimal::from(0),
        );
        assert!(lopsided.validate().is_err());
    }

    #[test]
    fn test_worked_example_from_two_items() {
        // 2 x 500 + 1 x 1000 at 9/9/0 without round-off
        let items = vec![item(2, 500), item(1, 1000)];
        let rates = TaxRates::new(
            BigDecimal::from(9),
            BigDecimal::from(9),
            BigDecimal::from(0),
        );

        let totals = InvoiceTotals::calculate(&items, &rates, false);

        assert_eq!(totals.subtotal, BigDecimal::from(2000));
        assert_eq!(totals.cgst_amount, BigDecimal::from(180));
        assert_eq!(totals.sgst_amount, BigDecimal::from(180));
        assert_eq!(totals.igst_amount, BigDecimal::from(0));
        assert_eq!(totals.round_off_amount, BigDecimal::from(0));
        assert_eq!(totals.total, BigDecimal::from(2360));
    }

    #[test]
    fn test_round_off_invariant() {
        // 3 x 333 at 9/9/0: raw total 999 * 1.18 = 1178.82, rounds to 1179
        let items = vec![item(3, 333)];
        let rates = TaxRates::intra_state(BigDecimal::from(18));

        let totals = InvoiceTotals::calculate(&items, &rates, true);

        let reconstructed = &totals.subtotal
            + &totals.cgst_amount
            + &totals.sgst_amount
            + &totals.igst_amount
            + &totals.round_off_amount;
        assert_eq!(reconstructed, totals.total);

        // Rounded total must be integral
        assert_eq!(
            totals.total.with_scale_round(0, RoundingMode::HalfUp),
            totals.total
        );
        assert_eq!(totals.total, BigDecimal::from(1179));
    }

    #[test]
    fn test_round_off_disabled_keeps_raw_total() {
        let items = vec![item(3, 333)];
        let rates = TaxRates::intra_state(BigDecimal::from(18));

        let totals = InvoiceTotals::calculate(&items, &rates, false);

        assert_eq!(totals.round_off_amount, BigDecimal::from(0));
        assert_eq!(totals.total, "1178.82".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn test_negative_inputs_pass_through() {
        let items = vec![item(-2, 500)];
        let rates = TaxRates::intra_state(BigDecimal::from(18));

        let totals = InvoiceTotals::calculate(&items, &rates, false);

        assert_eq!(totals.subtotal, BigDecimal::from(-1000));
        assert_eq!(totals.total, BigDecimal::from(-1180));
    }

    #[test]
    fn test_empty_invoice_totals() {
        let totals = InvoiceTotals::empty();
        assert_eq!(totals.subtotal, BigDecimal::from(0));
        assert_eq!(totals.total, BigDecimal::from(0));
    }

    #[test]
    fn test_reverse_calculation() {
        let rates = TaxRates::intra_state(BigDecimal::from(18));
        let totals = InvoiceTotals::reverse_calculate(BigDecimal::from(1180), &rates);

        assert_eq!(totals.subtotal, BigDecimal::from(1000));
        assert_eq!(totals.total_tax(), BigDecimal::from(180));
        assert_eq!(totals.total, BigDecimal::from(1180));
    }
}
