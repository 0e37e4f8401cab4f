//! CLI configuration: optional TOML file, environment, then flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use vtscan_api::{VirusTotalClient, API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
use vtscan_core::scan::wait::DEFAULT_REPORT_DELAY;
use vtscan_store::{FileCredentialStore, STORAGE_ENV};

/// Settings read from `config.toml`. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// VirusTotal API root.
    pub api_base: Option<String>,
    /// Key-value storage file holding the API key.
    pub storage_path: Option<PathBuf>,
    /// Delay before the first report fetch.
    pub delay_ms: Option<u64>,
    /// Report fetches before giving up.
    pub max_polls: Option<u32>,
    /// Per-request HTTP timeout.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load `explicit` (which must exist), or the default file if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vtscan").join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// API root: `VTSCAN_API_BASE`, then the file, then the public API.
    pub fn api_base(&self) -> String {
        std::env::var(API_BASE_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_base.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn report_delay(&self, flag: Option<u64>) -> Duration {
        flag.or(self.delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REPORT_DELAY)
    }

    pub fn max_polls(&self, flag: Option<u32>) -> u32 {
        flag.or(self.max_polls).unwrap_or(1)
    }

    pub fn scan_client(&self) -> VirusTotalClient {
        VirusTotalClient::new(&self.api_base(), self.timeout())
    }

    /// Storage file: `VTSCAN_STORAGE`, then the file, then the platform default.
    pub fn open_store(&self) -> Result<FileCredentialStore> {
        if std::env::var_os(STORAGE_ENV).is_none() {
            if let Some(path) = &self.storage_path {
                return Ok(FileCredentialStore::new(path));
            }
        }
        FileCredentialStore::default_location().context("Failed to locate API key storage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config = Config::parse(
            r#"
            api_base = "http://127.0.0.1:9000/vtapi/v2"
            storage_path = "/tmp/vtscan/storage.json"
            delay_ms = 1500
            max_polls = 4
            timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base.as_deref(), Some("http://127.0.0.1:9000/vtapi/v2"));
        assert_eq!(config.report_delay(None), Duration::from_millis(1500));
        assert_eq!(config.max_polls(None), 4);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.report_delay(None), Duration::from_millis(3000));
        assert_eq!(config.max_polls(None), 1);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config::parse("delay_ms = 1500\nmax_polls = 4").unwrap();
        assert_eq!(config.report_delay(Some(10)), Duration::from_millis(10));
        assert_eq!(config.max_polls(Some(1)), 1);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::parse("api_key = \"oops\"").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = 3\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }
}
