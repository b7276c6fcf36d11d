//! # Purchase Commands

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use finca_core::{PurchaseBreakdown, PurchaseTotals, RulesConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePurchaseRequest {
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePurchaseResponse {
    /// Exact figures, for persistence.
    pub totals: PurchaseTotals,
    /// Rounded to cents.
    pub breakdown: PurchaseBreakdown,
    pub formatted: FormattedPurchase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedPurchase {
    pub subtotal: String,
    pub taxes: String,
    pub total: String,
}

/// Splits a purchase into subtotal and IVA.
pub fn quote_purchase(
    request: QuotePurchaseRequest,
    rules: &RulesConfig,
) -> Result<QuotePurchaseResponse, ApiError> {
    debug!(quantity = %request.quantity, unit_price = %request.unit_price, "Quoting purchase");

    let totals =
        finca_core::compute_purchase(request.quantity, request.unit_price, rules.split_rate())?;
    let breakdown = totals.breakdown()?;

    let currency = &rules.currency;
    let formatted = FormattedPurchase {
        subtotal: breakdown.subtotal.format(currency),
        taxes: breakdown.taxes.format(currency),
        total: breakdown.total.format(currency),
    };

    info!(total = %totals.total, taxes = %totals.taxes, "Purchase quoted");
    Ok(QuotePurchaseResponse {
        totals,
        breakdown,
        formatted,
    })
}
