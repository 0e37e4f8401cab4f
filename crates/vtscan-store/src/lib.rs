//! vtscan Storage Layer
//!
//! Local key-value storage backing the [`CredentialStore`] port. The store is
//! a small JSON object of string entries; the API key is one of them.
//!
//! [`CredentialStore`]: vtscan_core::CredentialStore

pub mod file;

pub use file::{FileCredentialStore, STORAGE_ENV};
