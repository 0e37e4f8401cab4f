//! VirusTotal HTTP client.
//!
//! Submits URLs with a form-encoded POST to `/url/scan` and reads reports with
//! a GET to `/url/report`, both authenticated by the `apikey` parameter.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use vtscan_core::credential::ApiKey;
use vtscan_core::scan::{ReportStatus, ScanService, ScanSubmission};
use vtscan_core::{ScanError, ScanResult};

use crate::wire::{parse_report_response, parse_submit_response};

/// Default VirusTotal v2 API root.
pub const DEFAULT_API_BASE: &str = "https://www.virustotal.com/vtapi/v2";

/// Environment variable overriding the API root.
pub const API_BASE_ENV: &str = "VTSCAN_API_BASE";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which request a failure belongs to.
#[derive(Clone, Copy)]
enum Stage {
    Submit,
    Report,
}

impl Stage {
    fn error(self, msg: String) -> ScanError {
        match self {
            Stage::Submit => ScanError::Submission(msg),
            Stage::Report => ScanError::Report(msg),
        }
    }
}

/// VirusTotal URL scan client.
#[derive(Clone)]
pub struct VirusTotalClient {
    base_url: String,
    client: reqwest::Client,
}

impl VirusTotalClient {
    /// Create a client against `base_url` with a request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client using `VTSCAN_API_BASE` if set, otherwise the public API.
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_BASE_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        debug!(base_url = %base_url, "VirusTotal client initialized");
        Self::new(&base_url, DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_body(&self, stage: Stage, response: reqwest::Response) -> ScanResult<String> {
        let status = response.status();
        // The v2 API signals an exceeded request quota with an empty 204.
        if status == reqwest::StatusCode::NO_CONTENT {
            return Err(stage.error("request rate limit exceeded (HTTP 204)".to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "VirusTotal API error");
            return Err(stage.error(format!("HTTP {}: {}", status, body.trim())));
        }
        response
            .text()
            .await
            .map_err(|e| stage.error(format!("failed to read response body: {e}")))
    }
}

impl Default for VirusTotalClient {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl ScanService for VirusTotalClient {
    async fn submit(&self, api_key: &ApiKey, url: &str) -> ScanResult<ScanSubmission> {
        let endpoint = format!("{}/url/scan", self.base_url);
        debug!(endpoint = %endpoint, url = %url, "Submitting URL");

        let response = self
            .client
            .post(&endpoint)
            .form(&[("apikey", api_key.as_str()), ("url", url)])
            .send()
            .await
            .map_err(|e| Stage::Submit.error(format!("failed to reach VirusTotal: {e}")))?;

        let body = self.read_body(Stage::Submit, response).await?;
        parse_submit_response(&body)
    }

    async fn fetch_report(&self, api_key: &ApiKey, scan_id: &str) -> ScanResult<ReportStatus> {
        let endpoint = format!("{}/url/report", self.base_url);
        debug!(endpoint = %endpoint, scan_id = %scan_id, "Fetching report");

        let response = self
            .client
            .get(&endpoint)
            .query(&[("apikey", api_key.as_str()), ("resource", scan_id)])
            .send()
            .await
            .map_err(|e| Stage::Report.error(format!("failed to reach VirusTotal: {e}")))?;

        let body = self.read_body(Stage::Report, response).await?;
        parse_report_response(&body)
    }
}
