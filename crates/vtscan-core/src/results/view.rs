//! Rendering of the results screen into styled lines.
//!
//! The front end decides how each [`Emphasis`] looks; this module only decides
//! what is on screen.

use super::ResultsState;
use crate::scan::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Title,
    Muted,
    /// Work in progress; front ends draw a spinner.
    Busy,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Line {
    fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }
}

/// Loading status text.
pub const LOADING_TEXT: &str = "Analyzing URL...";

pub fn render(url: &str, state: &ResultsState) -> Vec<Line> {
    match state {
        ResultsState::Loading => vec![Line::new(LOADING_TEXT, Emphasis::Busy)],
        ResultsState::Error(message) => vec![Line::new(message.as_str(), Emphasis::Danger)],
        ResultsState::Success(report) => {
            let verdict = report.verdict();
            let verdict_emphasis = match verdict {
                Verdict::Safe => Emphasis::Success,
                Verdict::Malicious => Emphasis::Danger,
            };

            let mut lines = vec![
                Line::new("Scan Results", Emphasis::Title),
                Line::new(format!("URL: {}", url), Emphasis::Plain),
                Line::new(
                    format!("Detections: {} / {}", report.positives, report.total),
                    Emphasis::Plain,
                ),
                Line::new(format!("Status: {}", verdict.label()), verdict_emphasis),
            ];
            if let Some(date) = &report.scan_date {
                lines.push(Line::new(format!("Scanned: {}", date), Emphasis::Muted));
            }
            if let Some(link) = &report.permalink {
                lines.push(Line::new(format!("Report: {}", link), Emphasis::Muted));
            }
            lines
        }
    }
}
