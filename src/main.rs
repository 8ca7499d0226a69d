//! trainconfig CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate a spec file
//! trainconfig validate train.yaml
//!
//! # JSON report for tooling
//! trainconfig validate train.yaml --json
//! ```

use clap::Parser;
use std::process::ExitCode;
use trainconfig::cli::{init_tracing, run_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
