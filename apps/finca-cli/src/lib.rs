//! # finca-cli
//!
//! Command-line caller for the farm accounting rules. The browser client
//! (or a script) sends one JSON request and gets one JSON response back.
//!
//! ## Module Organization
//! ```text
//! finca_cli/
//! ├── lib.rs          ◄─── You are here (logging, request I/O, run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── AppConfig: defaults, finca.toml, environment
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch by command
//! │   ├── land.rs     ◄─── Parcel checks, land usage
//! │   ├── purchase.rs ◄─── Purchase IVA split
//! │   ├── sale.rs     ◄─── Carcass sale pricing
//! │   ├── ration.rs   ◄─── Ingredient cost and ration ceiling
//! │   └── supply.rs   ◄─── Supply units, effective config
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ── stderr, RUST_LOG or default filter           │
//! │  2. Load Config ───────── defaults ► finca.toml ► FINCA_* env          │
//! │  3. Read Request ──────── --input FILE or stdin                        │
//! │  4. Execute Command ───── finca-core rule                              │
//! │  5. Print JSON ────────── response or ApiError on stdout               │
//! │  6. Exit ──────────────── 0 ok, 1 rule rejected, 2 unusable input      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use error::{ApiError, ErrorCode};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn,finca_cli=info";

/// Initializes tracing on stderr.
///
/// `RUST_LOG` wins; otherwise `--verbose` selects `debug`.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { DEFAULT_LOG_FILTER })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the parsed command and prints the outcome. Returns the exit code.
pub fn run(cli: &Cli) -> i32 {
    match handle(cli) {
        Ok(response) => {
            debug!(command = ?cli.command, "Command succeeded");
            emit(&response)
        }
        Err(err) => {
            if err.exit_code() == 1 {
                info!(code = ?err.code, "Request rejected: {}", err.message);
            } else {
                warn!(code = ?err.code, "Request failed: {}", err.message);
            }
            match emit(&err) {
                0 => err.exit_code(),
                code => code,
            }
        }
    }
}

/// Loads the configuration, reads the request and executes the command.
pub fn handle(cli: &Cli) -> Result<Value, ApiError> {
    let config = AppConfig::load(cli.config.clone())?;

    let request = if cli.command.reads_request() {
        read_request(cli.input.as_deref())?
    } else {
        String::new()
    };

    commands::execute(cli.command, &request, &config)
}

/// Reads the request body from `input`, or stdin when `None`.
pub fn read_request(input: Option<&Path>) -> Result<String, ApiError> {
    let body = match input {
        Some(path) => {
            debug!(?path, "Reading request from file");
            std::fs::read_to_string(path)?
        }
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            body
        }
    };

    if body.trim().is_empty() {
        return Err(ApiError::input("Request is empty"));
    }
    Ok(body)
}

fn emit<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            ErrorCode::Internal.exit_code()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
