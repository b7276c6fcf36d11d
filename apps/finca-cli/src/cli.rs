//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// finca - Farm accounting and allocation rules.
///
/// Reads one JSON request (from `--input` or stdin), prints one JSON
/// response to stdout. Logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "finca")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Rules configuration file (defaults to the platform config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Request JSON file; stdin when omitted
    #[arg(short, long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Check a parcel draft against the farm's free area
    CheckParcel,

    /// Summarize how much of a farm is assigned to parcels
    LandUsage,

    /// Split a purchase into subtotal and IVA
    QuotePurchase,

    /// Price the selected carcasses of a farm
    QuoteSale,

    /// Re-split a sale total typed into the edit form
    ResplitSale,

    /// Estimate an ingredient's cost and check the ration ceiling
    QuoteIngredient,

    /// Resolve the unit of measure for a supply category
    SupplyUnit,

    /// Print the effective rule configuration
    ShowConfig,
}

impl Command {
    /// True when the command reads a JSON request.
    pub fn reads_request(&self) -> bool {
        !matches!(self, Command::ShowConfig)
    }
}
