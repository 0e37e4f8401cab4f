//! VirusTotal v2 response bodies.
//!
//! Only the fields vtscan reads are declared; everything else in the body is
//! ignored.

use serde::Deserialize;
use vtscan_core::scan::{ReportStatus, ScanReport, ScanSubmission};
use vtscan_core::{ScanError, ScanResult};

/// `response_code` for a URL that is queued for analysis.
pub const RESPONSE_QUEUED: i64 = -2;

/// `response_code` for a resource the service has no record of yet.
pub const RESPONSE_NOT_FOUND: i64 = 0;

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    scan_id: Option<String>,
    permalink: Option<String>,
    verbose_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReportResponse {
    response_code: Option<i64>,
    positives: Option<u32>,
    total: Option<u32>,
    url: Option<String>,
    scan_date: Option<String>,
    permalink: Option<String>,
    verbose_msg: Option<String>,
}

/// Parse the body returned by `POST /url/scan`.
pub fn parse_submit_response(body: &str) -> ScanResult<ScanSubmission> {
    let resp: SubmitResponse = serde_json::from_str(body)
        .map_err(|e| ScanError::malformed(format!("submit response is not valid JSON: {e}")))?;

    match resp.scan_id {
        Some(scan_id) if !scan_id.is_empty() => Ok(ScanSubmission {
            scan_id,
            permalink: resp.permalink,
        }),
        _ => Err(ScanError::malformed(format!(
            "submit response has no scan_id{}",
            detail(resp.verbose_msg.as_deref())
        ))),
    }
}

/// Parse the body returned by `GET /url/report`.
///
/// A body with both counts is a finished report. Without them, a queued or
/// not-found `response_code` means the analysis is still pending.
pub fn parse_report_response(body: &str) -> ScanResult<ReportStatus> {
    let resp: ReportResponse = serde_json::from_str(body)
        .map_err(|e| ScanError::malformed(format!("report response is not valid JSON: {e}")))?;

    match (resp.positives, resp.total) {
        (Some(positives), Some(total)) => Ok(ReportStatus::Ready(ScanReport {
            positives,
            total,
            url: resp.url.unwrap_or_default(),
            scan_date: resp.scan_date,
            permalink: resp.permalink,
        })),
        _ => match resp.response_code {
            Some(RESPONSE_QUEUED) | Some(RESPONSE_NOT_FOUND) => Ok(ReportStatus::Pending),
            code => Err(ScanError::malformed(format!(
                "report has no detection counts (response_code {:?}){}",
                code,
                detail(resp.verbose_msg.as_deref())
            ))),
        },
    }
}

fn detail(msg: Option<&str>) -> String {
    msg.map(|m| format!(": {m}")).unwrap_or_default()
}
