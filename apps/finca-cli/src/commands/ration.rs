//! # Ration Commands
//!
//! ## Composition Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  current 85% + new 20% = 105%                                          │
//! │                                                                         │
//! │  reject (default) ──► COMPOSITION_EXCEEDED, exit 1, nothing saved      │
//! │  warn             ──► response with "warning", WARN log on stderr      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use finca_core::validation::validate_required;
use finca_core::{
    CompositionPolicy, CoreError, RationIngredient, RulesConfig, Supply, SupplyCategory,
    ValidationError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteIngredientRequest {
    pub ration_id: String,
    pub supply: Supply,
    pub percentage: Decimal,
    /// Every stored ingredient; other rations are ignored for the ceiling
    /// but still count for id generation.
    #[serde(default)]
    pub ingredients: Vec<RationIngredient>,
    #[serde(default)]
    pub editing_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteIngredientResponse {
    pub ingredient_id: String,
    pub estimated_cost: Decimal,
    pub estimated_cost_formatted: String,
    /// Ration dry matter with this ingredient included.
    pub total_percentage: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Prices an ingredient and checks the ration's dry-matter ceiling.
pub fn quote_ingredient(
    request: QuoteIngredientRequest,
    rules: &RulesConfig,
) -> Result<QuoteIngredientResponse, ApiError> {
    let QuoteIngredientRequest {
        ration_id,
        supply,
        percentage,
        ingredients,
        editing_id,
    } = request;
    let ration_id = validate_required("ration", &ration_id).map_err(CoreError::from)?;
    let editing = editing_id.as_deref();
    debug!(%ration_id, supply_id = %supply.id, %percentage, ?editing, "Quoting ingredient");

    if !supply.category.is_feed() {
        return Err(CoreError::from(ValidationError::NotAllowed {
            field: "supply category".to_string(),
            allowed: vec![SupplyCategory::Feed.label().to_string()],
        })
        .into());
    }

    if let Some(id) = editing {
        let known = ingredients
            .iter()
            .any(|i| i.id == id && i.ration_id == ration_id);
        if !known {
            return Err(ApiError::validation(format!(
                "Ingredient {} is not part of ration {}",
                id, ration_id
            )));
        }
    }

    let estimated_cost =
        finca_core::compute_ingredient_cost(supply.unit_price_or_zero(), percentage)?;

    let warning = match finca_core::validate_ingredient(&ingredients, &ration_id, editing, percentage) {
        Ok(()) => None,
        Err(CoreError::Composition(e))
            if rules.ration.composition_policy == CompositionPolicy::Warn =>
        {
            warn!(
                %ration_id,
                current = %e.current,
                projected = %e.projected,
                "Ration dry matter exceeds 100%"
            );
            Some(e.to_string())
        }
        Err(e) => return Err(e.into()),
    };

    // Same sum the composition check just made, so this cannot overflow
    let total_percentage =
        finca_core::ration_percentage(&ingredients, &ration_id, editing)? + percentage;

    let ingredient_id = match editing_id {
        Some(id) => id,
        None => finca_core::next_ingredient_id(ingredients.iter().map(|i| i.id.as_str())),
    };

    let estimated_cost_formatted = finca_core::Money::from_decimal(estimated_cost)?.format(&rules.currency);

    info!(%ingredient_id, %estimated_cost, %total_percentage, "Ingredient quoted");
    Ok(QuoteIngredientResponse {
        ingredient_id,
        estimated_cost,
        estimated_cost_formatted,
        total_percentage,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rust_decimal_macros::dec;

    fn maize(price: Option<Decimal>) -> Supply {
        Supply {
            id: "INS001".to_string(),
            name: "Maíz molido".to_string(),
            category: SupplyCategory::Feed,
            unit: "kg".to_string(),
            unit_price: price,
        }
    }

    fn ingredient(id: &str, ration: &str, pct: Decimal) -> RationIngredient {
        RationIngredient {
            id: id.to_string(),
            ration_id: ration.to_string(),
            supply_id: "INS001".to_string(),
            percentage_dry_matter: pct,
        }
    }

    fn request(percentage: Decimal, editing_id: Option<&str>) -> QuoteIngredientRequest {
        QuoteIngredientRequest {
            ration_id: "RAC1".to_string(),
            supply: maize(Some(dec!(500))),
            percentage,
            ingredients: vec![
                ingredient("ING001", "RAC1", dec!(60)),
                ingredient("ING002", "RAC1", dec!(25)),
                ingredient("ING003", "RAC2", dec!(50)),
            ],
            editing_id: editing_id.map(str::to_string),
        }
    }

    #[test]
    fn test_new_ingredient_fills_ration() {
        let response = quote_ingredient(request(dec!(15), None), &RulesConfig::default()).unwrap();

        assert_eq!(response.ingredient_id, "ING004");
        assert_eq!(response.estimated_cost, dec!(75));
        assert_eq!(response.total_percentage, dec!(100));
        assert_eq!(response.estimated_cost_formatted, "COP$75,00");
        assert!(response.warning.is_none());
    }

    #[test]
    fn test_over_ceiling_rejected_by_default() {
        let err = quote_ingredient(request(dec!(20), None), &RulesConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CompositionExceeded);
        assert_eq!(err.details.unwrap()["projected"], "105");
    }

    #[test]
    fn test_over_ceiling_warns_under_warn_policy() {
        let mut rules = RulesConfig::default();
        rules.ration.composition_policy = CompositionPolicy::Warn;

        let response = quote_ingredient(request(dec!(20), None), &rules).unwrap();
        assert_eq!(response.total_percentage, dec!(105));
        assert!(response.warning.unwrap().contains("100%"));
    }

    #[test]
    fn test_edit_keeps_id_and_replaces_share() {
        let response =
            quote_ingredient(request(dec!(40), Some("ING002")), &RulesConfig::default()).unwrap();
        assert_eq!(response.ingredient_id, "ING002");
        assert_eq!(response.total_percentage, dec!(100));
    }

    #[test]
    fn test_unknown_editing_id() {
        let err =
            quote_ingredient(request(dec!(10), Some("ING003")), &RulesConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_blank_ration_id() {
        let mut req = request(dec!(5), None);
        req.ration_id = "  ".to_string();
        let err = quote_ingredient(req, &RulesConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_non_feed_supply_is_rejected() {
        let mut req = request(dec!(5), None);
        req.supply.category = SupplyCategory::Medicine;
        let err = quote_ingredient(req, &RulesConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_missing_price_costs_nothing() {
        let mut req = request(dec!(10), None);
        req.supply = maize(None);
        let response = quote_ingredient(req, &RulesConfig::default()).unwrap();
        assert_eq!(response.estimated_cost, Decimal::ZERO);
    }
}
