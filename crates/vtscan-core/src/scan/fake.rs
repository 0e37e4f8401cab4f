//! Scripted in-memory scan service for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ReportStatus, ScanService, ScanSubmission};
use crate::credential::ApiKey;
use crate::error::{ScanError, ScanResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Submit { api_key: String, url: String },
    Report { api_key: String, scan_id: String },
}

#[derive(Default)]
pub struct FakeScanService {
    submit: Mutex<Option<ScanResult<ScanSubmission>>>,
    reports: Mutex<VecDeque<ScanResult<ReportStatus>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeScanService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submission(self, scan_id: &str) -> Self {
        *self.submit.lock().unwrap() = Some(Ok(ScanSubmission {
            scan_id: scan_id.to_string(),
            permalink: None,
        }));
        self
    }

    pub fn with_submit_error(self, err: ScanError) -> Self {
        *self.submit.lock().unwrap() = Some(Err(err));
        self
    }

    pub fn with_report(self, status: ReportStatus) -> Self {
        self.reports.lock().unwrap().push_back(Ok(status));
        self
    }

    pub fn with_report_error(self, err: ScanError) -> Self {
        self.reports.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn report_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Report { .. }))
            .count()
    }
}

#[async_trait]
impl ScanService for FakeScanService {
    async fn submit(&self, api_key: &ApiKey, url: &str) -> ScanResult<ScanSubmission> {
        self.calls.lock().unwrap().push(Call::Submit {
            api_key: api_key.as_str().to_string(),
            url: url.to_string(),
        });
        self.submit
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ScanError::submission("no scripted submission")))
    }

    async fn fetch_report(&self, api_key: &ApiKey, scan_id: &str) -> ScanResult<ReportStatus> {
        self.calls.lock().unwrap().push(Call::Report {
            api_key: api_key.as_str().to_string(),
            scan_id: scan_id.to_string(),
        });
        self.reports
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScanError::report("no scripted report")))
    }
}
