//! # vtscan API
//!
//! VirusTotal v2 URL endpoints behind the [`ScanService`] port: form-encoded
//! submission to `/url/scan` and report lookup on `/url/report`.
//!
//! [`ScanService`]: vtscan_core::ScanService

pub mod client;
pub mod wire;

pub use client::{VirusTotalClient, API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
