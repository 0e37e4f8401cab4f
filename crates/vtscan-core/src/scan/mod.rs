//! URL scanning: the service port and the wait-then-fetch sequence.
//!
//! A scan is submit → wait → report. The wait is delegated to a
//! [`WaitStrategy`]; every network call and every sleep races a
//! [`CancelToken`] so a torn-down screen leaves nothing running.

pub mod model;
pub mod wait;

#[cfg(test)]
pub(crate) mod fake;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::credential::ApiKey;
use crate::error::{ScanError, ScanResult};
pub use model::{ReportStatus, ScanReport, ScanSubmission, Verdict};
pub use wait::{ExponentialBackoff, FixedDelay, WaitStrategy};

/// The external scanning service.
#[async_trait]
pub trait ScanService: Send + Sync {
    /// Register `url` for analysis.
    async fn submit(&self, api_key: &ApiKey, url: &str) -> ScanResult<ScanSubmission>;

    /// Fetch the report for a prior submission.
    async fn fetch_report(&self, api_key: &ApiKey, scan_id: &str) -> ScanResult<ReportStatus>;
}

#[async_trait]
impl<T: ScanService + ?Sized> ScanService for std::sync::Arc<T> {
    async fn submit(&self, api_key: &ApiKey, url: &str) -> ScanResult<ScanSubmission> {
        (**self).submit(api_key, url).await
    }

    async fn fetch_report(&self, api_key: &ApiKey, scan_id: &str) -> ScanResult<ReportStatus> {
        (**self).fetch_report(api_key, scan_id).await
    }
}

/// Submit `url`, wait as `wait` dictates, and fetch the report.
///
/// Polling only continues while the service says the report is pending;
/// transport and status failures end the scan immediately.
pub async fn run_scan<S, W>(
    service: &S,
    wait: &W,
    api_key: &ApiKey,
    url: &str,
    cancel: &CancelToken,
) -> ScanResult<ScanReport>
where
    S: ScanService + ?Sized,
    W: WaitStrategy + ?Sized,
{
    if cancel.is_cancelled() {
        return Err(ScanError::Cancelled);
    }

    let submission = until_cancelled(cancel, service.submit(api_key, url)).await?;
    info!(scan_id = %submission.scan_id, "URL submitted");

    let mut attempt = 0;
    while let Some(delay) = wait.delay_for(attempt) {
        debug!(attempt, delay_ms = delay.as_millis() as u64, "Waiting before report fetch");
        sleep_or_cancel(delay, cancel).await?;

        match until_cancelled(cancel, service.fetch_report(api_key, &submission.scan_id)).await? {
            ReportStatus::Ready(report) => {
                info!(
                    positives = report.positives,
                    total = report.total,
                    "Report received"
                );
                return Ok(report);
            }
            ReportStatus::Pending => debug!(attempt, "Report still pending"),
        }
        attempt += 1;
    }

    Err(ScanError::ReportNotReady { attempts: attempt })
}

async fn until_cancelled<T>(
    cancel: &CancelToken,
    fut: impl Future<Output = ScanResult<T>>,
) -> ScanResult<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ScanError::Cancelled),
        result = fut => result,
    }
}

async fn sleep_or_cancel(delay: Duration, cancel: &CancelToken) -> ScanResult<()> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ScanError::Cancelled),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}
