//! Scan domain models.

use serde::{Deserialize, Serialize};

/// Acknowledgment of a submitted URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSubmission {
    pub scan_id: String,
    pub permalink: Option<String>,
}

/// Analysis outcome for a submitted URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub positives: u32,
    pub total: u32,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

impl ScanReport {
    pub fn new(positives: u32, total: u32, url: impl Into<String>) -> Self {
        Self {
            positives,
            total,
            url: url.into(),
            scan_date: None,
            permalink: None,
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_positives(self.positives)
    }
}

/// Outcome of a single report fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    Ready(ScanReport),
    /// The service has queued the URL but has no result yet.
    Pending,
}

/// Binary label derived from the detection count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Malicious,
}

impl Verdict {
    pub fn from_positives(positives: u32) -> Self {
        if positives > 0 {
            Verdict::Malicious
        } else {
            Verdict::Safe
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Safe => "Safe",
            Verdict::Malicious => "Malicious",
        }
    }
}
