//! Results screen presenter.
//!
//! One presenter per visit. `enter()` drives `Loading` to exactly one of
//! `Error` or `Success` and the state never moves again; a fresh visit needs a
//! fresh presenter. `teardown()` cancels whatever is still in flight and any
//! late outcome is dropped.

pub mod view;

use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::credential::CredentialStore;
use crate::error::ScanError;
use crate::scan::{run_scan, FixedDelay, ScanReport, ScanService, WaitStrategy};

/// Shown when no API key has been saved.
pub const CREDENTIAL_MISSING_MESSAGE: &str = "Please set your VirusTotal API key in the settings";

/// Shown when the submit or report request fails.
pub const SCAN_FAILED_MESSAGE: &str = "Failed to check URL. Please try again.";

/// Shown when the service answers with something we cannot read.
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "VirusTotal returned an unexpected response. Please try again.";

/// Shown when polling gives up before the analysis finished.
pub const NOT_READY_MESSAGE: &str = "The report is not ready yet. Please try again shortly.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsState {
    Loading,
    Error(String),
    Success(ScanReport),
}

impl ResultsState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResultsState::Loading)
    }
}

/// User-facing message for a failed scan.
pub fn error_message(err: &ScanError) -> &'static str {
    match err {
        ScanError::CredentialMissing => CREDENTIAL_MISSING_MESSAGE,
        ScanError::Submission(_) | ScanError::Report(_) => SCAN_FAILED_MESSAGE,
        ScanError::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE,
        ScanError::ReportNotReady { .. } => NOT_READY_MESSAGE,
        ScanError::Cancelled => "Scan cancelled",
    }
}

pub struct ResultsPresenter<S, C, W = FixedDelay> {
    store: S,
    service: C,
    wait: W,
    url: String,
    state: ResultsState,
    cancel: CancelToken,
}

impl<S, C, W> ResultsPresenter<S, C, W>
where
    S: CredentialStore,
    C: ScanService,
    W: WaitStrategy,
{
    pub fn new(store: S, service: C, wait: W, url: impl Into<String>) -> Self {
        Self {
            store,
            service,
            wait,
            url: url.into(),
            state: ResultsState::Loading,
            cancel: CancelToken::new(),
        }
    }

    /// The URL this visit is checking, as it was handed to the screen.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> &ResultsState {
        &self.state
    }

    /// A handle that tears the screen down from another task.
    pub fn cancel_handle(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run the visit. Calling again after a terminal state is a no-op.
    pub async fn enter(&mut self) -> &ResultsState {
        if self.state.is_terminal() || self.is_torn_down() {
            return &self.state;
        }

        let next = self.check_url().await;
        match next {
            Some(next) if !self.is_torn_down() => self.state = next,
            _ => info!(url = %self.url, "Results screen torn down, dropping outcome"),
        }
        &self.state
    }

    async fn check_url(&self) -> Option<ResultsState> {
        let api_key = match self.store.get().await {
            Ok(Some(key)) if !key.is_empty() => key,
            Ok(_) => {
                info!("No API key configured, skipping scan");
                return Some(ResultsState::Error(CREDENTIAL_MISSING_MESSAGE.to_string()));
            }
            Err(e) => {
                warn!(error = %e, "Failed to read API key");
                return Some(ResultsState::Error(CREDENTIAL_MISSING_MESSAGE.to_string()));
            }
        };

        match run_scan(&self.service, &self.wait, &api_key, &self.url, &self.cancel).await {
            Ok(report) => Some(ResultsState::Success(report)),
            Err(ScanError::Cancelled) => None,
            Err(e) => {
                warn!(url = %self.url, error = %e, "URL check failed");
                Some(ResultsState::Error(error_message(&e).to_string()))
            }
        }
    }
}
