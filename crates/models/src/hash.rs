//! Content identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a full content key in hex characters (a 32-byte SHA-256 digest).
pub const KEY_LEN: usize = 64;

/// Error returned when text is not a full content key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("key {0:?} has {1} characters, expected 64")]
    Length(String, usize),

    #[error("key {0:?} is not hexadecimal")]
    NotHex(String),
}

/// Identifier shared by items and accounts.
///
/// Locally derived keys are always [`KEY_LEN`] hex characters. Identifiers
/// taken from wire documents may be shorter (the last path segment of a
/// remote IRI), so no length is enforced here; use [`Hash::parse_key`] when a
/// full key is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, std::hash::Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hash(String);

impl Hash {
    /// Wrap an identifier without validation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse a full 64 character hex key.
    pub fn parse_key(value: &str) -> Result<Self, KeyError> {
        if value.len() != KEY_LEN {
            return Err(KeyError::Length(value.to_string(), value.len()));
        }
        if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(KeyError::NotHex(value.to_string()));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    /// Whether this is a complete locally derived key.
    #[must_use]
    pub fn is_full_key(&self) -> bool {
        Self::parse_key(&self.0).is_ok()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// First `n` characters, or the whole identifier when it is not longer.
    ///
    /// Prefixes are presentational only: two keys may share a short prefix.
    #[must_use]
    pub fn prefix(&self, n: usize) -> &str {
        self.0.get(..n).unwrap_or(&self.0)
    }

    #[must_use]
    pub fn hash8(&self) -> &str {
        self.prefix(8)
    }

    #[must_use]
    pub fn hash16(&self) -> &str {
        self.prefix(16)
    }

    #[must_use]
    pub fn hash32(&self) -> &str {
        self.prefix(32)
    }

    #[must_use]
    pub fn hash64(&self) -> &str {
        self.prefix(KEY_LEN)
    }

    /// Short form used in user-facing links.
    #[must_use]
    pub fn short(&self) -> &str {
        self.hash8()
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Hash {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Hash {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Hash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FULL: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

    #[test]
    fn test_prefixes_of_full_key() {
        let hash = Hash::parse_key(FULL).unwrap();

        for n in [8, 16, 32, 64] {
            let prefix = hash.prefix(n);
            assert_eq!(prefix.len(), n);
            assert!(hash.hash64().starts_with(prefix));
        }
        assert_eq!(hash.hash8(), "9f86d081");
        assert_eq!(hash.short(), hash.hash8());
    }

    #[test]
    fn test_prefix_of_short_identifier_is_whole() {
        let hash = Hash::from("abc123");
        assert_eq!(hash.hash8(), "abc123");
        assert_eq!(hash.hash32(), "abc123");
        assert_eq!(hash.hash64(), "abc123");
        assert!(!hash.is_full_key());
    }

    #[test]
    fn test_parse_key_rejects_wrong_length() {
        assert_eq!(
            Hash::parse_key("abcd"),
            Err(KeyError::Length("abcd".to_string(), 4))
        );
        let long = format!("{FULL}00");
        assert!(matches!(Hash::parse_key(&long), Err(KeyError::Length(_, 66))));
    }

    #[test]
    fn test_parse_key_rejects_non_hex() {
        let bad = FULL.replace('9', "z");
        assert!(matches!(Hash::parse_key(&bad), Err(KeyError::NotHex(_))));
    }

    #[test]
    fn test_parse_key_normalizes_case() {
        let upper = FULL.to_uppercase();
        assert_eq!(Hash::parse_key(&upper).unwrap().as_str(), FULL);
    }
}
