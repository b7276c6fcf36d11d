//! # Rule Configuration
//!
//! Named, injectable values for every constant the rules use.
//!
//! ## Configuration File Format
//! ```toml
//! # finca.toml
//! [tax]
//! iva_rate_bps = 1900          # 19% -> 0.81 net / 0.19 tax split
//!
//! [sale]
//! price_per_kg = 8928          # COP per kg of carcass
//! tax_factor = 1.19
//! profit_margin = 1.1
//!
//! [ration]
//! composition_policy = "reject"  # reject | warn
//!
//! [currency]
//! code = "COP"
//! symbol = "COP$"
//! decimals = 2
//! group_separator = "."
//! decimal_separator = ","
//! ```
//!
//! Every section and field is optional; missing values take the defaults
//! shown above. This module only defines and validates the values. Reading
//! files and environment variables is the caller's job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::types::TaxRate;
use crate::validation::{validate_positive, validate_tax_rate_bps};

// =============================================================================
// Tax Settings
// =============================================================================

/// Gross-amount split settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// IVA in basis points. The net share is `1 - rate`.
    #[serde(default = "default_iva_rate_bps")]
    pub iva_rate_bps: u32,
}

fn default_iva_rate_bps() -> u32 {
    TaxRate::IVA.bps()
}

impl TaxSettings {
    /// The configured rate as a [`TaxRate`].
    pub fn rate(&self) -> TaxRate {
        TaxRate::from_bps(self.iva_rate_bps)
    }
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings {
            iva_rate_bps: default_iva_rate_bps(),
        }
    }
}

// =============================================================================
// Sale Rules
// =============================================================================

/// Constants behind carcass sale pricing.
///
/// ```text
/// total = price_per_kg × tax_factor × profit_margin × Σ carcass kg
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRules {
    /// Price per kilogram of carcass. Default: 8928 (COP).
    #[serde(default = "default_price_per_kg")]
    pub price_per_kg: Decimal,

    /// Tax inclusion factor. Default: 1.19.
    #[serde(default = "default_tax_factor")]
    pub tax_factor: Decimal,

    /// Profit margin factor. Default: 1.1 (10%).
    #[serde(default = "default_profit_margin")]
    pub profit_margin: Decimal,
}

fn default_price_per_kg() -> Decimal {
    Decimal::new(8928, 0)
}

fn default_tax_factor() -> Decimal {
    Decimal::new(119, 2)
}

fn default_profit_margin() -> Decimal {
    Decimal::new(11, 1)
}

impl Default for SaleRules {
    fn default() -> Self {
        SaleRules {
            price_per_kg: default_price_per_kg(),
            tax_factor: default_tax_factor(),
            profit_margin: default_profit_margin(),
        }
    }
}

impl SaleRules {
    /// Validates that every factor is positive.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_positive("sale.price_per_kg", self.price_per_kg)?;
        validate_positive("sale.tax_factor", self.tax_factor)?;
        validate_positive("sale.profit_margin", self.profit_margin)?;
        Ok(())
    }
}

// =============================================================================
// Ration Settings
// =============================================================================

/// What to do when a ration's dry matter would pass 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CompositionPolicy {
    /// Reject the ingredient.
    #[default]
    Reject,

    /// Accept the ingredient and surface a warning.
    Warn,
}

impl fmt::Display for CompositionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositionPolicy::Reject => write!(f, "reject"),
            CompositionPolicy::Warn => write!(f, "warn"),
        }
    }
}

impl FromStr for CompositionPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" | "strict" => Ok(CompositionPolicy::Reject),
            "warn" | "warning" => Ok(CompositionPolicy::Warn),
            _ => Err(ValidationError::NotAllowed {
                field: "ration.composition_policy".to_string(),
                allowed: vec!["reject".to_string(), "warn".to_string()],
            }),
        }
    }
}

/// Ration settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RationSettings {
    #[serde(default)]
    pub composition_policy: CompositionPolicy,
}

// =============================================================================
// Currency Format
// =============================================================================

/// How money is rendered for the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// ISO 4217 code.
    #[serde(default = "default_currency_code")]
    pub code: String,

    /// Prefix shown before amounts.
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    /// Displayed decimals, 0-2.
    #[serde(default = "default_currency_decimals")]
    pub decimals: u8,

    #[serde(default = "default_group_separator")]
    pub group_separator: char,

    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

fn default_currency_code() -> String {
    "COP".to_string()
}

fn default_currency_symbol() -> String {
    "COP$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

fn default_group_separator() -> char {
    '.'
}

fn default_decimal_separator() -> char {
    ','
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            decimals: default_currency_decimals(),
            group_separator: default_group_separator(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

// =============================================================================
// Rules Configuration
// =============================================================================

/// Complete rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub tax: TaxSettings,

    #[serde(default)]
    pub sale: SaleRules,

    #[serde(default)]
    pub ration: RationSettings,

    #[serde(default)]
    pub currency: CurrencyFormat,
}

impl RulesConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_tax_rate_bps(self.tax.iva_rate_bps)?;
        self.sale.validate()?;

        if self.currency.decimals > 2 {
            return Err(ValidationError::OutOfRange {
                field: "currency.decimals".to_string(),
                min: Decimal::ZERO,
                max: Decimal::TWO,
                value: Decimal::from(self.currency.decimals),
            });
        }

        if self.currency.group_separator == self.currency.decimal_separator {
            return Err(ValidationError::Duplicate {
                field: "currency separator".to_string(),
                value: self.currency.group_separator.to_string(),
            });
        }

        Ok(())
    }

    /// The configured split rate.
    pub fn split_rate(&self) -> TaxRate {
        self.tax.rate()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
