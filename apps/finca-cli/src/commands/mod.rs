//! # CLI Commands Module
//!
//! Every command the client can run.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (dispatch)
//! ├── land.rs      ◄─── check-parcel, land-usage
//! ├── purchase.rs  ◄─── quote-purchase
//! ├── sale.rs      ◄─── quote-sale, resplit-sale
//! ├── ration.rs    ◄─── quote-ingredient
//! └── supply.rs    ◄─── supply-unit, show-config
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  request JSON ──► serde_json::from_str::<XxxRequest>                    │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                   xxx(request, &rules) ──► finca-core rule              │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  response JSON ◄── XxxResponse  (or ApiError)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command is a plain function over typed request/response structs, so
//! tests call them directly without going through stdin.

pub mod land;
pub mod purchase;
pub mod ration;
pub mod sale;
pub mod supply;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::error::ApiError;

/// Runs `command` on a raw JSON request.
pub fn execute(command: Command, request: &str, config: &AppConfig) -> Result<Value, ApiError> {
    let rules = &config.rules;
    match command {
        Command::CheckParcel => respond(land::check_parcel(parse(request)?)?),
        Command::LandUsage => respond(land::land_usage(parse(request)?)?),
        Command::QuotePurchase => respond(purchase::quote_purchase(parse(request)?, rules)?),
        Command::QuoteSale => respond(sale::quote_sale(parse(request)?, rules)?),
        Command::ResplitSale => respond(sale::resplit_sale(parse(request)?, rules)?),
        Command::QuoteIngredient => respond(ration::quote_ingredient(parse(request)?, rules)?),
        Command::SupplyUnit => respond(supply::supply_unit(parse(request)?)?),
        Command::ShowConfig => respond(supply::show_config(config)),
    }
}

fn parse<T: DeserializeOwned>(request: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(request)?)
}

fn respond<T: Serialize>(response: T) -> Result<Value, ApiError> {
    serde_json::to_value(response)
        .map_err(|e| ApiError::internal(format!("Failed to serialize response: {}", e)))
}
