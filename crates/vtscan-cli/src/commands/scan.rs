//! Results screen: check one URL.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::debug;
use vtscan_core::results::view::{self, LOADING_TEXT};
use vtscan_core::scan::{ExponentialBackoff, FixedDelay, ScanService, WaitStrategy};
use vtscan_core::{CredentialStore, ResultsPresenter, ResultsState};

use crate::config::Config;
use crate::output;

#[derive(Args)]
pub struct ScanArgs {
    /// URL to check (sent as-is)
    pub url: String,

    /// Milliseconds to wait before fetching the report [default: 3000]
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Report fetches while the analysis is queued; above 1 the delay doubles each time [default: 1]
    #[arg(long)]
    pub max_polls: Option<u32>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: ScanArgs, config: &Config) -> Result<ExitCode> {
    let store = config.open_store()?;
    let client = config.scan_client();

    let delay = config.report_delay(args.delay_ms);
    let max_polls = config.max_polls(args.max_polls);
    let wait: Box<dyn WaitStrategy> = if max_polls <= 1 {
        Box::new(FixedDelay(delay))
    } else {
        Box::new(ExponentialBackoff::new(delay, max_polls))
    };
    debug!(api_base = %client.base_url(), delay_ms = delay.as_millis() as u64, max_polls, "Starting scan");

    let mut presenter = ResultsPresenter::new(store, client, wait, args.url);

    // Ctrl+C tears the screen down; the presenter drops whatever arrives late.
    let teardown = presenter.cancel_handle();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            teardown.cancel();
        }
    });

    let outcome = run_visit(&mut presenter, !args.json).await;
    ctrl_c.abort();

    let Some(state) = outcome else {
        eprintln!("{}", "Scan cancelled".dimmed());
        return Ok(ExitCode::FAILURE);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&json_outcome(presenter.url(), &state))?);
    } else {
        output::print_lines(&view::render(presenter.url(), &state));
    }

    Ok(if succeeded(&state) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Drive the screen to its final state. `None` when it was torn down.
async fn run_visit<S, C, W>(
    presenter: &mut ResultsPresenter<S, C, W>,
    show_spinner: bool,
) -> Option<ResultsState>
where
    S: CredentialStore,
    C: ScanService,
    W: WaitStrategy,
{
    let spinner = show_spinner.then(|| output::spinner(LOADING_TEXT));
    let state = presenter.enter().await.clone();
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    (!presenter.is_torn_down()).then_some(state)
}

/// Only a rendered verdict counts as success.
fn succeeded(state: &ResultsState) -> bool {
    matches!(state, ResultsState::Success(_))
}

fn json_outcome(url: &str, state: &ResultsState) -> serde_json::Value {
    match state {
        ResultsState::Success(report) => serde_json::json!({
            "url": url,
            "verdict": report.verdict(),
            "report": report,
        }),
        ResultsState::Error(message) => serde_json::json!({
            "url": url,
            "error": message,
        }),
        ResultsState::Loading => serde_json::json!({
            "url": url,
            "status": "loading",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use vtscan_core::credential::ApiKey;
    use vtscan_core::scan::{ReportStatus, ScanReport, ScanSubmission};
    use vtscan_core::{MemoryCredentialStore, ScanError, ScanResult};

    /// Answers every scan with a fixed detection count.
    struct CannedService {
        positives: u32,
        fail_submit: bool,
    }

    #[async_trait]
    impl ScanService for CannedService {
        async fn submit(&self, _api_key: &ApiKey, _url: &str) -> ScanResult<ScanSubmission> {
            if self.fail_submit {
                return Err(ScanError::submission("connection refused"));
            }
            Ok(ScanSubmission {
                scan_id: "abc".to_string(),
                permalink: None,
            })
        }

        async fn fetch_report(&self, _api_key: &ApiKey, _scan_id: &str) -> ScanResult<ReportStatus> {
            Ok(ReportStatus::Ready(ScanReport::new(
                self.positives,
                70,
                "http://example.com/",
            )))
        }
    }

    fn presenter(
        store: MemoryCredentialStore,
        positives: u32,
        fail_submit: bool,
    ) -> ResultsPresenter<MemoryCredentialStore, CannedService> {
        let service = CannedService {
            positives,
            fail_submit,
        };
        ResultsPresenter::new(store, service, FixedDelay(Duration::ZERO), "http://example.com")
    }

    #[tokio::test]
    async fn test_safe_verdict_succeeds() {
        let mut screen = presenter(MemoryCredentialStore::with_key("KEY123"), 0, false);
        let state = run_visit(&mut screen, false).await.unwrap();

        assert!(succeeded(&state));
        let json = json_outcome(screen.url(), &state);
        assert_eq!(json["verdict"], "safe");
        assert_eq!(json["report"]["total"], 70);
    }

    #[tokio::test]
    async fn test_malicious_verdict_still_succeeds() {
        let mut screen = presenter(MemoryCredentialStore::with_key("KEY123"), 5, false);
        let state = run_visit(&mut screen, false).await.unwrap();

        assert!(succeeded(&state));
        assert_eq!(json_outcome(screen.url(), &state)["verdict"], "malicious");
    }

    #[tokio::test]
    async fn test_missing_key_fails() {
        let mut screen = presenter(MemoryCredentialStore::new(), 0, false);
        let state = run_visit(&mut screen, false).await.unwrap();

        assert!(!succeeded(&state));
        assert_eq!(
            json_outcome(screen.url(), &state)["error"],
            "Please set your VirusTotal API key in the settings"
        );
    }

    #[tokio::test]
    async fn test_submit_failure_fails() {
        let mut screen = presenter(MemoryCredentialStore::with_key("KEY123"), 0, true);
        let state = run_visit(&mut screen, false).await.unwrap();

        assert!(!succeeded(&state));
        assert_eq!(state, ResultsState::Error("Failed to check URL. Please try again.".into()));
    }

    #[tokio::test]
    async fn test_torn_down_visit_has_no_outcome() {
        let mut screen = presenter(MemoryCredentialStore::with_key("KEY123"), 0, false);
        screen.cancel_handle().cancel();

        assert!(run_visit(&mut screen, false).await.is_none());
    }

    #[test]
    fn test_json_outcome_success() {
        let state = ResultsState::Success(ScanReport::new(5, 70, "http://example.com/"));
        let json = json_outcome("http://example.com", &state);
        assert_eq!(json["verdict"], "malicious");
        assert_eq!(json["report"]["positives"], 5);
        assert_eq!(json["report"]["total"], 70);
        assert_eq!(json["url"], "http://example.com");
    }

    #[test]
    fn test_json_outcome_error() {
        let state = ResultsState::Error("Failed to check URL. Please try again.".into());
        let json = json_outcome("http://example.com", &state);
        assert_eq!(json["error"], "Failed to check URL. Please try again.");
        assert!(json.get("report").is_none());
    }
}
