//! # finca entry point
//!
//! ```text
//! $ echo '{"quantity": 10, "unitPrice": 1000}' | finca quote-purchase
//! {
//!   "totals": { "subtotal": "8100", "taxes": "1900", "total": "10000" },
//!   ...
//! }
//! ```

use clap::Parser;
use finca_cli::Cli;

fn main() {
    let cli = Cli::parse();
    finca_cli::init_tracing(cli.verbose);

    let code = finca_cli::run(&cli);
    std::process::exit(code);
}
