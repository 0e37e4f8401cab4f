//! Credential domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A VirusTotal API key. Opaque; never validated.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Masked form for display: bullets, with the last four characters
    /// visible once the key is long enough that this reveals little.
    pub fn masked(&self) -> String {
        mask(&self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Mask a secret for display.
pub fn mask(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 8 {
        return "•".repeat(len);
    }
    let tail: String = secret.chars().skip(len - 4).collect();
    format!("{}{}", "•".repeat(len - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("super-secret-key");
        assert_eq!(format!("{:?}", key), "ApiKey(<redacted>)");
    }

    #[test]
    fn test_mask_short_key_fully() {
        assert_eq!(mask("KEY123"), "••••••");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_mask_long_key_keeps_tail() {
        assert_eq!(ApiKey::new("0123456789abcdef").masked(), "••••••••••••cdef");
    }
}
