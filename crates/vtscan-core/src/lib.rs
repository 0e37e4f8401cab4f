//! vtscan Core Library
//!
//! Domain models, storage and scan ports, and the screen presenters for the
//! URL reputation checker.

pub mod cancel;
pub mod credential;
pub mod error;
pub mod results;
pub mod scan;
pub mod settings;

pub use cancel::CancelToken;
pub use credential::{CredentialStore, MemoryCredentialStore};
pub use error::{ScanError, ScanResult, StoreError, StoreResult};
pub use results::{ResultsPresenter, ResultsState};
pub use scan::{run_scan, ScanService};
pub use settings::{Notice, SettingsPresenter};
