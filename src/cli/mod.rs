//! Command-line interface
//!
//! ```bash
//! # Check a spec file and print a summary
//! trainconfig validate train.yaml
//!
//! # Machine-readable report
//! trainconfig validate train.yaml --json
//! ```

mod logging;
mod validate;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use logging::{init_tracing, LogLevel};
pub use validate::{run_validate, ValidationReport};

/// Validate training configurations
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "trainconfig")]
#[command(version)]
#[command(about = "Validate training-loop configurations")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate a configuration file without training
    Validate(ValidateArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Log level selected by the global flags
    pub fn log_level(&self) -> LogLevel {
        if self.quiet {
            LogLevel::Quiet
        } else if self.verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }
}

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = cli.log_level();
    match cli.command {
        Command::Validate(args) => run_validate(&args, log_level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["trainconfig", "validate", "train.yaml"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Validate(ValidateArgs { config: PathBuf::from("train.yaml"), json: false })
        );
        assert_eq!(cli.log_level(), LogLevel::Normal);
    }

    #[test]
    fn test_parse_validate_json_verbose() {
        let cli = Cli::try_parse_from(["trainconfig", "-v", "validate", "t.yaml", "--json"]).unwrap();
        let Command::Validate(args) = &cli.command;
        assert!(args.json);
        assert_eq!(cli.log_level(), LogLevel::Verbose);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let cli = Cli::try_parse_from(["trainconfig", "validate", "t.yaml", "-q", "-v"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Quiet);
    }

    #[test]
    fn test_missing_config_argument_rejected() {
        assert!(Cli::try_parse_from(["trainconfig", "validate"]).is_err());
    }
}
