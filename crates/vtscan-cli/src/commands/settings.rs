//! Settings screen: the stored VirusTotal API key.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Password;
use vtscan_core::credential::CredentialStore;
use vtscan_core::settings::Notice;
use vtscan_core::SettingsPresenter;

use crate::config::Config;
use crate::output;

#[derive(Args)]
pub struct SettingsArgs {
    /// Save this key without prompting
    #[arg(long)]
    pub key: Option<String>,

    /// Show the stored key (masked) and exit
    #[arg(long, conflicts_with = "key")]
    pub show: bool,
}

pub async fn execute(args: SettingsArgs, config: &Config) -> Result<ExitCode> {
    let store = config.open_store()?;
    let mut presenter = SettingsPresenter::new(store);
    presenter.enter().await;

    println!("{}", "Settings".bold());
    println!();
    if let Some(notice) = presenter.notice() {
        output::print_notice(notice);
    }

    if args.show {
        print_current(&presenter);
        return Ok(ExitCode::SUCCESS);
    }

    let value = match args.key {
        Some(key) => key,
        None => prompt_for_key(&presenter)?,
    };
    presenter.set_input(value);

    let notice = presenter.save().await.clone();
    output::print_notice(&notice);

    Ok(match notice {
        Notice::Success(_) => ExitCode::SUCCESS,
        Notice::Error(_) => ExitCode::FAILURE,
    })
}

fn print_current<S: CredentialStore>(presenter: &SettingsPresenter<S>) {
    let shown = if presenter.input().is_empty() {
        "(not set)".dimmed()
    } else {
        presenter.masked_input().as_str().normal()
    };
    println!("{}: {}", "VirusTotal API Key".bold(), shown);
}

/// Masked prompt. An empty answer keeps the value already in the field.
fn prompt_for_key<S: CredentialStore>(presenter: &SettingsPresenter<S>) -> Result<String> {
    print_current(presenter);
    if !presenter.input().is_empty() {
        println!("{}", "Press Enter to keep the current key.".dimmed());
    }

    let entered: String = Password::new()
        .with_prompt("Enter your VirusTotal API key")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read API key")?;

    Ok(if entered.is_empty() {
        presenter.input().to_string()
    } else {
        entered
    })
}
