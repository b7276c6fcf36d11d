//! # Sale Commands

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use finca_core::{Animal, CurrencyFormat, RulesConfig, SaleBreakdown, SaleTotals, SlaughterWeight};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSaleRequest {
    pub farm_id: i64,
    /// Every slaughter weight on record; filtered to the farm here.
    #[serde(default)]
    pub carcasses: Vec<SlaughterWeight>,
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default)]
    pub selected_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResplitSaleRequest {
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleQuoteResponse {
    /// Carcass ids the farm can sell, for the selection list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidate_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight_kg: Option<Decimal>,
    pub totals: SaleTotals,
    pub breakdown: SaleBreakdown,
    pub formatted: FormattedSale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSale {
    pub total: String,
    pub subtotal: String,
    pub taxes: String,
    pub profit: String,
}

impl FormattedSale {
    fn new(breakdown: &SaleBreakdown, currency: &CurrencyFormat) -> Self {
        FormattedSale {
            total: breakdown.total.format(currency),
            subtotal: breakdown.subtotal.format(currency),
            taxes: breakdown.taxes.format(currency),
            profit: breakdown.profit.format(currency),
        }
    }
}

/// Prices the ticked carcasses of one farm.
pub fn quote_sale(request: QuoteSaleRequest, rules: &RulesConfig) -> Result<SaleQuoteResponse, ApiError> {
    let candidates =
        finca_core::farm_carcasses(request.farm_id, &request.carcasses, &request.animals);
    debug!(
        farm_id = request.farm_id,
        candidates = candidates.len(),
        selected = request.selected_ids.len(),
        "Quoting sale"
    );

    let weights = finca_core::selected_weights(&candidates, &request.selected_ids)?;
    let totals = finca_core::compute_sale(&weights, &rules.sale, rules.split_rate())?;
    let breakdown = totals.breakdown()?;

    // compute_sale already summed these without overflow
    let total_weight_kg: Decimal = weights.iter().sum();

    info!(
        farm_id = request.farm_id,
        carcasses = weights.len(),
        total = %totals.total,
        "Sale quoted"
    );
    Ok(SaleQuoteResponse {
        candidate_ids: candidates.iter().map(|w| w.id.clone()).collect(),
        total_weight_kg: Some(total_weight_kg),
        totals,
        breakdown,
        formatted: FormattedSale::new(&breakdown, &rules.currency),
    })
}

/// Re-splits an edited sale total.
pub fn resplit_sale(request: ResplitSaleRequest, rules: &RulesConfig) -> Result<SaleQuoteResponse, ApiError> {
    debug!(total = %request.total, "Re-splitting sale total");

    let totals = finca_core::split_total(request.total, rules.split_rate())?;
    let breakdown = totals.breakdown()?;

    Ok(SaleQuoteResponse {
        candidate_ids: Vec::new(),
        total_weight_kg: None,
        totals,
        breakdown,
        formatted: FormattedSale::new(&breakdown, &rules.currency),
    })
}
