//! # Purchase Taxes
//!
//! Splits a supply purchase into its net base and IVA.
//!
//! ```text
//! total    = quantity × unit_price        (gross, tax included)
//! subtotal = total × 0.81                 (base imponible)
//! taxes    = total − subtotal             (IVA 19%)
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::{checked_product, Money};
use crate::types::TaxRate;
use crate::validation::validate_positive;

/// Exact purchase figures, before any display rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseTotals {
    #[ts(type = "string")]
    pub subtotal: Decimal,
    #[ts(type = "string")]
    pub taxes: Decimal,
    #[ts(type = "string")]
    pub total: Decimal,
}

/// Purchase figures rounded to cents for display and persistence.
///
/// `taxes` is derived from the rounded parts, so
/// `subtotal + taxes == total` still holds to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseBreakdown {
    pub subtotal: Money,
    pub taxes: Money,
    pub total: Money,
}

impl PurchaseTotals {
    /// Rounds the figures for display.
    pub fn breakdown(&self) -> CoreResult<PurchaseBreakdown> {
        let total = Money::from_decimal(self.total)?;
        let subtotal = Money::from_decimal(self.subtotal)?;
        Ok(PurchaseBreakdown {
            subtotal,
            taxes: total - subtotal,
            total,
        })
    }
}

/// Computes the tax breakdown of a purchase.
///
/// ## Example
/// ```rust
/// use finca_core::purchase::compute_purchase;
/// use finca_core::types::TaxRate;
/// use rust_decimal_macros::dec;
///
/// let totals = compute_purchase(dec!(10), dec!(1000), TaxRate::IVA).unwrap();
/// assert_eq!(totals.total, dec!(10000));
/// assert_eq!(totals.subtotal, dec!(8100));
/// assert_eq!(totals.taxes, dec!(1900));
/// ```
///
/// ## Errors
/// `CoreError::InvalidInput` when quantity or unit price is not positive.
pub fn compute_purchase(
    quantity: Decimal,
    unit_price: Decimal,
    split: TaxRate,
) -> CoreResult<PurchaseTotals> {
    validate_positive("quantity", quantity)?;
    validate_positive("unit price", unit_price)?;

    let total = checked_product(&[quantity, unit_price])?;
    let subtotal = checked_product(&[total, split.net_fraction()])?;

    Ok(PurchaseTotals {
        subtotal: subtotal.normalize(),
        taxes: (total - subtotal).normalize(),
        total: total.normalize(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_purchase() {
        let totals = compute_purchase(dec!(10), dec!(1000), TaxRate::IVA).unwrap();
        assert_eq!(totals.total, dec!(10000));
        assert_eq!(totals.subtotal, dec!(8100));
        assert_eq!(totals.taxes, dec!(1900));
    }

    #[test]
    fn test_parts_add_up_exactly() {
        let cases = [
            (dec!(3), dec!(0.1)),
            (dec!(2.5), dec!(12345.67)),
            (dec!(0.333), dec!(999.99)),
            (dec!(1200), dec!(3.7)),
        ];
        for (q, p) in cases {
            let totals = compute_purchase(q, p, TaxRate::IVA).unwrap();
            assert_eq!(totals.subtotal + totals.taxes, totals.total);
            assert_eq!(totals.total, q * p);
        }
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(matches!(
            compute_purchase(dec!(0), dec!(10), TaxRate::IVA),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_purchase(dec!(5), dec!(-10), TaxRate::IVA),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_breakdown_keeps_parts_consistent() {
        // subtotal 0.08 * 0.81 = 0.0648 -> 0.06, total 0.08, taxes 0.02
        let totals = compute_purchase(dec!(1), dec!(0.08), TaxRate::IVA).unwrap();
        let shown = totals.breakdown().unwrap();
        assert_eq!(shown.total.cents(), 8);
        assert_eq!(shown.subtotal.cents(), 6);
        assert_eq!(shown.taxes.cents(), 2);
        assert_eq!(shown.subtotal + shown.taxes, shown.total);
    }

    #[test]
    fn test_custom_split_rate() {
        let totals = compute_purchase(dec!(1), dec!(100), TaxRate::from_bps(500)).unwrap();
        assert_eq!(totals.subtotal, dec!(95));
        assert_eq!(totals.taxes, dec!(5));
    }

    #[test]
    fn test_same_inputs_same_outputs() {
        let a = compute_purchase(dec!(7), dec!(13.13), TaxRate::IVA).unwrap();
        let b = compute_purchase(dec!(7), dec!(13.13), TaxRate::IVA).unwrap();
        assert_eq!(a, b);
    }
}
