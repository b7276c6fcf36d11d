//! # Sale Revenue
//!
//! Prices a sale of slaughtered animals from their carcass weights and
//! splits the gross amount the same way purchases are split.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sale form                                                             │
//! │                                                                         │
//! │  1. Pick farm ──► farm_carcasses(farm, weights, animals)               │
//! │                   (slaughter weights whose animal lives on the farm)   │
//! │                                                                         │
//! │  2. Tick carcasses ──► selected_weights(candidates, ids)               │
//! │                                                                         │
//! │  3. compute_sale(weights, rules, split)                                │
//! │       total    = price/kg × 1.19 × 1.1 × Σ kg                         │
//! │       subtotal = total × 0.81                                          │
//! │       taxes    = total × 0.19                                          │
//! │       profit   = total − (subtotal + taxes)                            │
//! │                                                                         │
//! │  Editing a stored sale: split_total(typed total, split)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::{checked_product, checked_sum, Money};
use crate::rules::SaleRules;
use crate::types::{Animal, SlaughterWeight, TaxRate};
use crate::validation::{validate_non_negative, validate_positive};

/// Exact sale figures, before any display rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleTotals {
    #[ts(type = "string")]
    pub total: Decimal,
    #[ts(type = "string")]
    pub subtotal: Decimal,
    #[ts(type = "string")]
    pub taxes: Decimal,
    #[ts(type = "string")]
    pub profit: Decimal,
}

/// Sale figures rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleBreakdown {
    pub total: Money,
    pub subtotal: Money,
    pub taxes: Money,
    pub profit: Money,
}

impl SaleTotals {
    /// Rounds the figures for display.
    ///
    /// Total, subtotal and taxes are rounded on their own; profit absorbs
    /// the rounding so the four parts still reconcile.
    pub fn breakdown(&self) -> CoreResult<SaleBreakdown> {
        let total = Money::from_decimal(self.total)?;
        let subtotal = Money::from_decimal(self.subtotal)?;
        let taxes = Money::from_decimal(self.taxes)?;
        Ok(SaleBreakdown {
            total,
            subtotal,
            taxes,
            profit: total - (subtotal + taxes),
        })
    }
}

/// Prices the selected carcasses.
///
/// ## Example
/// ```rust
/// use finca_core::rules::SaleRules;
/// use finca_core::sale::compute_sale;
/// use finca_core::types::TaxRate;
/// use rust_decimal_macros::dec;
///
/// let totals = compute_sale(&[dec!(200)], &SaleRules::default(), TaxRate::IVA).unwrap();
/// assert_eq!(totals.total, dec!(2337350.4));
/// assert_eq!(totals.subtotal + totals.taxes + totals.profit, totals.total);
/// ```
///
/// ## Errors
/// - `ValidationError::Required` when no weight is given
/// - `ValidationError::MustBePositive` when a weight is zero or negative
pub fn compute_sale(weights_kg: &[Decimal], rules: &SaleRules, split: TaxRate) -> CoreResult<SaleTotals> {
    if weights_kg.is_empty() {
        return Err(ValidationError::Required {
            field: "carcass weights".to_string(),
        }
        .into());
    }
    for weight in weights_kg {
        validate_positive("carcass weight", *weight)?;
    }
    rules.validate()?;

    let total_weight = checked_sum(weights_kg)?;
    let total = checked_product(&[
        rules.price_per_kg,
        rules.tax_factor,
        rules.profit_margin,
        total_weight,
    ])?;

    split_gross(total, split)
}

/// Re-splits a sale total typed into the edit form.
///
/// ## Errors
/// `ValidationError::MustNotBeNegative` for a negative total.
pub fn split_total(total: Decimal, split: TaxRate) -> CoreResult<SaleTotals> {
    validate_non_negative("sale total", total)?;
    split_gross(total, split)
}

fn split_gross(total: Decimal, split: TaxRate) -> CoreResult<SaleTotals> {
    let subtotal = checked_product(&[total, split.net_fraction()])?;
    let taxes = checked_product(&[total, split.fraction()])?;

    Ok(SaleTotals {
        total: total.normalize(),
        subtotal: subtotal.normalize(),
        taxes: taxes.normalize(),
        profit: (total - (subtotal + taxes)).normalize(),
    })
}

// =============================================================================
// Carcass Selection
// =============================================================================

/// Slaughter weights whose animal belongs to `farm_id`.
///
/// Weights whose animal is not in `animals` are skipped.
pub fn farm_carcasses<'a>(
    farm_id: i64,
    weights: &'a [SlaughterWeight],
    animals: &[Animal],
) -> Vec<&'a SlaughterWeight> {
    let farm_of: HashMap<&str, i64> = animals
        .iter()
        .map(|a| (a.id.as_str(), a.farm_id))
        .collect();

    weights
        .iter()
        .filter(|w| farm_of.get(w.animal_id.as_str()) == Some(&farm_id))
        .collect()
}

/// Carcass weights of the ticked candidates, in selection order.
///
/// ## Errors
/// - `ValidationError::NotAllowed` for an id that is not a candidate
/// - `ValidationError::Duplicate` for an id ticked twice
pub fn selected_weights(
    candidates: &[&SlaughterWeight],
    selected_ids: &[String],
) -> CoreResult<Vec<Decimal>> {
    let by_id: HashMap<&str, Decimal> = candidates
        .iter()
        .map(|w| (w.id.as_str(), w.carcass_weight_kg))
        .collect();

    let mut seen = HashSet::new();
    let mut weights = Vec::with_capacity(selected_ids.len());
    for id in selected_ids {
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "carcass".to_string(),
                value: id.clone(),
            }
            .into());
        }
        let weight = by_id.get(id.as_str()).ok_or_else(|| ValidationError::NotAllowed {
            field: "carcass".to_string(),
            allowed: candidates.iter().map(|w| w.id.clone()).collect(),
        })?;
        weights.push(*weight);
    }

    Ok(weights)
}

// =============================================================================
// Unit Tests
// =============================================================================
