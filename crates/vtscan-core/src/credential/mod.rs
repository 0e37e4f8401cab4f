//! Credential storage port.
//!
//! Both presenters receive a [`CredentialStore`] by injection. The store holds
//! exactly one entry, the VirusTotal API key, under [`API_KEY_ENTRY`].

pub mod model;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreResult;
pub use model::ApiKey;

/// Name of the persisted key-value entry holding the API key.
pub const API_KEY_ENTRY: &str = "virusTotalApiKey";

/// Persistent storage for the API key.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the stored key. `Ok(None)` if it was never set.
    async fn get(&self) -> StoreResult<Option<ApiKey>>;

    /// Persist `value`, overwriting any prior key.
    async fn set(&self, value: &str) -> StoreResult<()>;
}

#[async_trait]
impl<S: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<S> {
    async fn get(&self) -> StoreResult<Option<ApiKey>> {
        (**self).get().await
    }

    async fn set(&self, value: &str) -> StoreResult<()> {
        (**self).set(value).await
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    value: RwLock<Option<ApiKey>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value`.
    pub fn with_key(value: &str) -> Self {
        Self {
            value: RwLock::new(Some(ApiKey::new(value))),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> StoreResult<Option<ApiKey>> {
        Ok(self.value.read().await.clone())
    }

    async fn set(&self, value: &str) -> StoreResult<()> {
        *self.value.write().await = Some(ApiKey::new(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_returns_none() {
        let store = MemoryCredentialStore::new();
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryCredentialStore::with_key("old");
        store.set("new").await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(ApiKey::new("new")));
    }

    #[tokio::test]
    async fn test_arc_delegates() {
        let store = std::sync::Arc::new(MemoryCredentialStore::new());
        store.set("KEY123").await.unwrap();
        let shared = store.clone();
        assert_eq!(shared.get().await.unwrap().unwrap().as_str(), "KEY123");
    }
}
