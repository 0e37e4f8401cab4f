//! CLI command definitions and handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;

pub mod scan;
pub mod settings;

/// Check URLs against VirusTotal
#[derive(Parser)]
#[command(name = "vtscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Config file (defaults to <config dir>/vtscan/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a URL and show the verdict
    Scan(scan::ScanArgs),

    /// View or change the stored VirusTotal API key
    Settings(settings::SettingsArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<ExitCode> {
        let config = Config::load(self.config.as_deref())?;

        match self.command {
            Commands::Scan(args) => scan::execute(args, &config).await,
            Commands::Settings(args) => settings::execute(args, &config).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from(["vtscan", "scan", "http://example.com", "--delay-ms", "500"])
            .unwrap();
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.url, "http://example.com");
                assert_eq!(args.delay_ms, Some(500));
                assert!(!args.json);
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_settings_show_conflicts_with_key() {
        assert!(Cli::try_parse_from(["vtscan", "settings", "--show", "--key", "k"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vtscan", "settings", "--show", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
