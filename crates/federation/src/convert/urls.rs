//! Endpoint URLs.

use url::Url;

use crate::error::{FederationError, FederationResult};

/// Builds URLs under the federation endpoint's base.
#[derive(Clone, Debug)]
pub struct UrlConfig {
    base_url: Url,
}

impl UrlConfig {
    /// Create a new URL config.
    ///
    /// # Errors
    ///
    /// Fails when `base_url` cannot take path segments (e.g. `mailto:`).
    pub fn new(base_url: Url) -> FederationResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(FederationError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        Ok(Self { base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// All items: `/outbox`.
    #[must_use]
    pub fn outbox_url(&self) -> Url {
        self.endpoint(&["outbox"])
    }

    /// One item: `/outbox/{key}`.
    #[must_use]
    pub fn item_url(&self, key: &str) -> Url {
        self.endpoint(&["outbox", key])
    }

    /// All accounts: `/accounts`.
    #[must_use]
    pub fn accounts_url(&self) -> Url {
        self.endpoint(&["accounts"])
    }

    /// One account: `/accounts/{id}`, by hash or handle.
    #[must_use]
    pub fn account_url(&self, id: &str) -> Url {
        self.endpoint(&["accounts", id])
    }

    /// Items created by an account: `/accounts/{id}/outbox`.
    #[must_use]
    pub fn account_outbox_url(&self, id: &str) -> Url {
        self.endpoint(&["accounts", id, "outbox"])
    }

    /// Votes of an account: `/accounts/{id}/liked`.
    #[must_use]
    pub fn account_liked_url(&self, id: &str) -> Url {
        self.endpoint(&["accounts", id, "liked"])
    }

    /// One account's vote on one item: `/accounts/{id}/liked/{item}`.
    #[must_use]
    pub fn account_vote_url(&self, id: &str, item: &str) -> Url {
        self.endpoint(&["accounts", id, "liked", item])
    }

    /// All votes: `/liked`.
    #[must_use]
    pub fn liked_url(&self) -> Url {
        self.endpoint(&["liked"])
    }

    /// Votes on one item: `/liked/{item}`.
    #[must_use]
    pub fn liked_item_url(&self, item: &str) -> Url {
        self.endpoint(&["liked", item])
    }

    /// Public key id of an account.
    #[must_use]
    pub fn public_key_url(&self, id: &str) -> String {
        format!("{}#main-key", self.account_url(id))
    }
}
