//! Accounts.

use std::fmt;

use chrono::{DateTime, Utc};
use littr_common::KEY_ID_RSA;

use crate::{Flags, Hash};

/// Handle of the anonymous actor.
pub const ANONYMOUS_HANDLE: &str = "anonymous";

/// Key material attached to an account.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccountKey {
    /// Algorithm id, e.g. `id-rsa`.
    pub id: String,
    /// Public key PEM.
    pub public: String,
    /// Private key PEM, only present for local accounts.
    pub private: Option<String>,
}

impl AccountKey {
    /// RSA key material from a PEM pair.
    #[must_use]
    pub fn rsa(public: impl Into<String>, private: impl Into<String>) -> Self {
        Self {
            id: KEY_ID_RSA.to_string(),
            public: public.into(),
            private: Some(private.into()),
        }
    }
}

impl fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountKey")
            .field("id", &self.id)
            .field("public", &self.public)
            .field("private", &self.private.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Remote bookkeeping for an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountMetadata {
    pub key: Option<AccountKey>,
    /// Remote profile URL.
    pub url: Option<String>,
}

/// An author or actor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// Local numeric id; `0` for accounts only known remotely.
    pub id: i64,
    pub hash: Hash,
    pub handle: String,
    pub email: String,
    pub score: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub flags: Flags,
    pub metadata: Option<AccountMetadata>,
}

impl Account {
    /// The unauthenticated actor. Never used to sign requests.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            handle: ANONYMOUS_HANDLE.to_string(),
            ..Self::default()
        }
    }

    /// Weak reference carrying only a handle.
    #[must_use]
    pub fn with_handle(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            ..Self::default()
        }
    }

    /// Weak reference carrying only an identifier.
    #[must_use]
    pub fn with_hash(hash: Hash) -> Self {
        Self {
            hash,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.hash.is_empty() && (self.handle.is_empty() || self.handle == ANONYMOUS_HANDLE)
    }

    #[must_use]
    pub fn key(&self) -> Option<&AccountKey> {
        self.metadata.as_ref().and_then(|m| m.key.as_ref())
    }

    /// Identifier used in URLs: the hash when known, otherwise the handle.
    #[must_use]
    pub fn url_id(&self) -> &str {
        if self.hash.is_empty() {
            &self.handle
        } else {
            self.hash.as_str()
        }
    }

    /// Local profile link.
    #[must_use]
    pub fn local_link(&self) -> String {
        let handle = if self.handle.is_empty() {
            ANONYMOUS_HANDLE
        } else {
            &self.handle
        };
        format!("/~{handle}")
    }

    /// Remote profile URL if known, otherwise the local link.
    #[must_use]
    pub fn permalink(&self) -> String {
        self.metadata
            .as_ref()
            .and_then(|m| m.url.clone())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.local_link())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_sentinel() {
        assert!(Account::anonymous().is_anonymous());
        assert!(Account::default().is_anonymous());
        assert!(!Account::with_handle("alice").is_anonymous());
        assert!(!Account::with_hash(Hash::from("abc")).is_anonymous());
    }

    #[test]
    fn test_url_id_prefers_hash() {
        let mut account = Account::with_handle("alice");
        assert_eq!(account.url_id(), "alice");
        account.hash = Hash::from("a1b2");
        assert_eq!(account.url_id(), "a1b2");
    }

    #[test]
    fn test_permalink() {
        let mut account = Account::with_handle("alice");
        assert_eq!(account.permalink(), "/~alice");
        assert_eq!(Account::default().local_link(), "/~anonymous");

        account.metadata = Some(AccountMetadata {
            key: None,
            url: Some("https://remote.example/~alice".to_string()),
        });
        assert_eq!(account.permalink(), "https://remote.example/~alice");
    }

    #[test]
    fn test_key_debug_redacts_private_material() {
        let key = AccountKey::rsa("PUBLIC", "SECRET");
        let printed = format!("{key:?}");
        assert!(!printed.contains("SECRET"));
        assert!(printed.contains("<redacted>"));
    }
}
