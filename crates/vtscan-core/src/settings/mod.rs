//! Settings screen presenter: one masked input bound to the stored API key.

use tracing::{info, warn};

use crate::credential::CredentialStore;
use crate::credential::model::mask;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load API key";
pub const SAVE_SUCCEEDED_MESSAGE: &str = "API key saved successfully";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save API key";

/// Outcome notice shown to the user after a load or save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub struct SettingsPresenter<S> {
    store: S,
    input: String,
    notice: Option<Notice>,
}

impl<S: CredentialStore> SettingsPresenter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            input: String::new(),
            notice: None,
        }
    }

    /// Populate the input from storage. A missing or empty key leaves it empty.
    pub async fn enter(&mut self) {
        match self.store.get().await {
            Ok(Some(key)) if !key.is_empty() => self.input = key.as_str().to_string(),
            Ok(_) => self.input.clear(),
            Err(e) => {
                warn!(error = %e, "Failed to load API key");
                self.notice = Some(Notice::Error(LOAD_FAILED_MESSAGE.to_string()));
            }
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The input as a secure text field shows it.
    pub fn masked_input(&self) -> String {
        mask(&self.input)
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Persist the current input as-is. No format check, no remote check.
    pub async fn save(&mut self) -> &Notice {
        let notice = match self.store.set(&self.input).await {
            Ok(()) => {
                info!("API key saved");
                Notice::Success(SAVE_SUCCEEDED_MESSAGE.to_string())
            }
            Err(e) => {
                warn!(error = %e, "Failed to save API key");
                Notice::Error(SAVE_FAILED_MESSAGE.to_string())
            }
        };
        self.notice.insert(notice)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}
