//! vtscan CLI - VirusTotal URL checker
//!
//! Submits a URL to VirusTotal and shows whether any engine flags it.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

use commands::Cli;

const QUIET_FILTER: &str = "vtscan=warn,vtscan_core=warn,vtscan_api=warn,vtscan_store=warn";
const VERBOSE_FILTER: &str = "vtscan=debug,vtscan_core=debug,vtscan_api=debug,vtscan_store=debug";

/// Initialize tracing on stderr, plus a plain-text file layer when asked.
///
/// stdout carries the rendered screen, so logs never go there. The returned
/// guard must be held until exit or buffered file lines are lost.
fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let default_filter = if verbose { VERBOSE_FILTER } else { QUIET_FILTER };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let _ = std::fs::create_dir_all(directory);
            let file_name = path.file_name().unwrap_or_else(|| "vtscan.log".as_ref());

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.log_file.as_deref());

    cli.execute().await
}
