//! # CLI Configuration
//!
//! Loads the rule configuration the commands run with.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FINCA_IVA_RATE_BPS=1900                                            │
//! │     FINCA_RATION_POLICY=warn                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/finca-rules/finca.toml (Linux)                           │
//! │     ~/Library/Application Support/co.finca.finca-rules/finca.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     IVA 19%, 8928/kg, ×1.19, ×1.1, reject, COP                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing file is not an error. A file that exists but does not parse,
//! or an environment value that does not parse, is.

use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

use finca_core::{CompositionPolicy, RulesConfig, ValidationError};

/// IVA rate in basis points.
pub const ENV_IVA_RATE_BPS: &str = "FINCA_IVA_RATE_BPS";
/// Sale price per kilogram of carcass.
pub const ENV_PRICE_PER_KG: &str = "FINCA_PRICE_PER_KG";
/// Sale tax inclusion factor.
pub const ENV_TAX_FACTOR: &str = "FINCA_TAX_FACTOR";
/// Sale profit margin factor.
pub const ENV_PROFIT_MARGIN: &str = "FINCA_PROFIT_MARGIN";
/// `reject` or `warn`.
pub const ENV_RATION_POLICY: &str = "FINCA_RATION_POLICY";
/// ISO 4217 currency code.
pub const ENV_CURRENCY_CODE: &str = "FINCA_CURRENCY_CODE";

const CONFIG_FILE_NAME: &str = "finca.toml";

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// App Config
// =============================================================================

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub rules: RulesConfig,

    /// The file that was read, if any.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(config_path, |var| std::env::var(var).ok())
    }

    /// [`AppConfig::load`] with an explicit environment lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading rules config from file");
                config.rules = read_rules(&path)?;
                config.source = Some(path);
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup)?;
        config.rules.validate()?;

        Ok(config)
    }

    /// Platform config path, e.g. `~/.config/finca-rules/finca.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("co", "finca", "finca-rules")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_IVA_RATE_BPS) {
            let bps: u32 = parse_var(ENV_IVA_RATE_BPS, value)?;
            debug!(bps, "Overriding IVA rate from environment");
            self.rules.tax.iva_rate_bps = bps;
        }

        if let Some(value) = lookup(ENV_PRICE_PER_KG) {
            let price: Decimal = parse_var(ENV_PRICE_PER_KG, value)?;
            debug!(%price, "Overriding sale price per kg from environment");
            self.rules.sale.price_per_kg = price;
        }

        if let Some(value) = lookup(ENV_TAX_FACTOR) {
            let factor: Decimal = parse_var(ENV_TAX_FACTOR, value)?;
            debug!(%factor, "Overriding sale tax factor from environment");
            self.rules.sale.tax_factor = factor;
        }

        if let Some(value) = lookup(ENV_PROFIT_MARGIN) {
            let margin: Decimal = parse_var(ENV_PROFIT_MARGIN, value)?;
            debug!(%margin, "Overriding sale profit margin from environment");
            self.rules.sale.profit_margin = margin;
        }

        if let Some(value) = lookup(ENV_RATION_POLICY) {
            let policy: CompositionPolicy = parse_var(ENV_RATION_POLICY, value)?;
            debug!(%policy, "Overriding ration policy from environment");
            self.rules.ration.composition_policy = policy;
        }

        if let Some(value) = lookup(ENV_CURRENCY_CODE) {
            let code = value.trim().to_uppercase();
            if code.is_empty() {
                return Err(ConfigError::InvalidEnv {
                    var: ENV_CURRENCY_CODE.to_string(),
                    value,
                });
            }
            debug!(%code, "Overriding currency code from environment");
            self.rules.currency.code = code;
        }

        Ok(())
    }
}

fn read_rules(path: &Path) -> ConfigResult<RulesConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

fn parse_var<T: FromStr>(var: &str, value: String) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
