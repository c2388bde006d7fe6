//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::pipeline::{self, Summary};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Iconpack - Generate normalized React icon packages from upstream SVG sets
#[derive(Parser)]
#[command(name = "ipk")]
#[command(about = "Iconpack - Generate normalized React icon packages from upstream SVG sets")]
#[command(version)]
pub struct Cli {
    /// Directory the generated packages live under
    #[arg(long, default_value = "packages", global = true)]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the brand icon package (version pinned to upstream)
    Brand {
        /// Cap the upstream icon library at this major version
        #[arg(long)]
        upstream_major: Option<u64>,
    },
    /// Generate the outline icon package
    Outline,
    /// Generate a symbol icon package for one font weight
    Symbol {
        /// Symbol weight (100-700, in steps of 100)
        #[arg(value_parser = clap::value_parser!(u16).range(100..=700))]
        weight: u16,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Brand { upstream_major } => pipeline::generate_brand(&cli.root, upstream_major),
        Commands::Outline => pipeline::generate_outline(&cli.root),
        Commands::Symbol { weight } => {
            if weight % 100 != 0 {
                eprintln!("Error: weight must be a multiple of 100");
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
            pipeline::generate_symbol(&cli.root, weight)
        }
    };

    match result {
        Ok(Summary { icons, version }) => {
            println!("Generated {} icons, package version {}", icons, version);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_symbol_weight_range_enforced() {
        assert!(Cli::try_parse_from(["ipk", "symbol", "800"]).is_err());
        assert!(Cli::try_parse_from(["ipk", "symbol", "400"]).is_ok());
    }

    #[test]
    fn test_brand_accepts_major_cap() {
        let cli = Cli::try_parse_from(["ipk", "brand", "--upstream-major", "11"]).unwrap();
        match cli.command {
            Commands::Brand { upstream_major } => assert_eq!(upstream_major, Some(11)),
            _ => panic!("expected brand command"),
        }
    }
}
