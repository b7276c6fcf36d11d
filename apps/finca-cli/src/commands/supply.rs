//! # Supply & Configuration Commands

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::ApiError;
use finca_core::{CoreError, RulesConfig, SupplyCategory, UnitRule};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyUnitRequest {
    pub category: SupplyCategory,
    /// Unit typed or picked so far; omitted when the form first opens.
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyUnitResponse {
    pub category: SupplyCategory,
    /// Unit to persist, once one is known.
    pub unit: Option<String>,
    pub rule: UnitRule,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowConfigResponse {
    /// Config file that was read, if any.
    pub source: Option<String>,
    pub rules: RulesConfig,
}

/// Resolves the unit field for a supply category.
pub fn supply_unit(request: SupplyUnitRequest) -> Result<SupplyUnitResponse, ApiError> {
    let rule = request.category.unit_rule();
    debug!(category = %request.category, unit = ?request.unit, "Resolving supply unit");

    let unit = match (&request.unit, &rule) {
        (Some(unit), _) => {
            let unit = finca_core::validate_supply_unit(&request.category, unit)
                .map_err(CoreError::from)?;
            Some(unit)
        }
        (None, UnitRule::Fixed(fixed)) => Some(fixed.clone()),
        (None, _) => None,
    };

    Ok(SupplyUnitResponse {
        category: request.category,
        unit,
        rule,
    })
}

/// The effective configuration after file and environment overrides.
pub fn show_config(config: &AppConfig) -> ShowConfigResponse {
    ShowConfigResponse {
        source: config.source.as_ref().map(|p| p.display().to_string()),
        rules: config.rules.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn request(category: &str, unit: Option<&str>) -> SupplyUnitRequest {
        serde_json::from_value(serde_json::json!({ "category": category, "unit": unit })).unwrap()
    }

    #[test]
    fn test_fixed_unit_is_filled_in() {
        let response = supply_unit(request("Agua", None)).unwrap();
        assert_eq!(response.category, SupplyCategory::Water);
        assert_eq!(response.unit.as_deref(), Some("m³"));
        assert_eq!(response.rule, UnitRule::Fixed("m³".to_string()));
    }

    #[test]
    fn test_feed_units() {
        let response = supply_unit(request("Suministros Alimentarios", None)).unwrap();
        assert!(response.unit.is_none());
        assert!(matches!(response.rule, UnitRule::OneOf(_)));

        let response = supply_unit(request("Suministros Alimentarios", Some("ton"))).unwrap();
        assert_eq!(response.unit.as_deref(), Some("ton"));

        let err = supply_unit(request("Suministros Alimentarios", Some("litros"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_other_category_accepts_free_text() {
        let response = supply_unit(request("Herramientas", Some(" caja "))).unwrap();
        assert_eq!(response.unit.as_deref(), Some("caja"));
        assert_eq!(response.rule, UnitRule::Free);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["category"], "Herramientas");
        assert_eq!(json["rule"]["kind"], "free");
    }

    #[test]
    fn test_show_config_reports_source() {
        let config = AppConfig {
            rules: RulesConfig::default(),
            source: Some("/etc/finca/finca.toml".into()),
        };
        let response = show_config(&config);
        assert_eq!(response.source.as_deref(), Some("/etc/finca/finca.toml"));
        assert_eq!(response.rules.currency.code, "COP");
    }
}
