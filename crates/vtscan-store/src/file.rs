//! JSON file store with atomic replacement.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use vtscan_core::credential::{ApiKey, CredentialStore, API_KEY_ENTRY};
use vtscan_core::{StoreError, StoreResult};

/// Environment variable overriding the storage file location.
pub const STORAGE_ENV: &str = "VTSCAN_STORAGE";

type Entries = BTreeMap<String, String>;

/// Key-value entries persisted as one JSON object in a file.
///
/// Writes land in a sibling temporary file that is renamed over the target,
/// so readers see either the old entries or the new ones.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Open the store at `$VTSCAN_STORAGE`, or `<data dir>/vtscan/storage.json`.
    pub fn default_location() -> StoreResult<Self> {
        if let Ok(path) = std::env::var(STORAGE_ENV) {
            if !path.is_empty() {
                return Ok(Self::new(path));
            }
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| StoreError::unavailable("no platform data directory"))?;
        Ok(Self::new(data_dir.join("vtscan").join("storage.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read one entry.
    pub async fn get_item(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self.read_entries().await?.remove(name))
    }

    /// Write one entry, keeping the others. An unreadable file is replaced.
    pub async fn set_item(&self, name: &str, value: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = match self.read_entries().await {
            Err(StoreError::Corrupt(e)) => {
                warn!(path = %self.path.display(), error = %e, "Storage file is corrupt, replacing it");
                Entries::new()
            }
            other => other?,
        };
        entries.insert(name.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn read_entries(&self) -> StoreResult<Entries> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Entries::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: &Entries) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.temp_path();
        let body = serde_json::to_vec_pretty(entries)?;

        let mut file = tokio::fs::File::create(&tmp).await?;
        let written: std::io::Result<()> = async {
            file.write_all(&body).await?;
            file.sync_all().await
        }
        .await;
        drop(file);

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(path = %self.path.display(), entries = entries.len(), "Storage written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "storage.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> StoreResult<Option<ApiKey>> {
        Ok(self.get_item(API_KEY_ENTRY).await?.map(ApiKey::new))
    }

    async fn set(&self, value: &str) -> StoreResult<()> {
        self.set_item(API_KEY_ENTRY, value).await
    }
}
