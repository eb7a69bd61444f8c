//! Content items.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use url::Url;

use crate::{Account, Hash, ThreadPath};

/// MIME type of items whose data is a link.
pub const MIME_TYPE_URL: &str = "application/url";

/// Item and account flag bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    pub const NONE: Self = Self(0);
    pub const DELETED: Self = Self(1);

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub const fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

/// Remote bookkeeping for an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemMetadata {
    /// Identifier the item was published under on the federation endpoint.
    /// Its presence means the item has been federated before.
    pub id: Option<Url>,
    /// Canonical URL.
    pub url: Option<String>,
}

/// A content node: a top level submission or a reply.
#[derive(Debug, Clone, Default)]
pub struct Item {
    /// Content key, derived once by [`crate::ContentAddresser`].
    pub key: Hash,
    pub title: String,
    pub mime_type: String,
    /// Body text, or a URL when [`Item::is_link`].
    pub data: String,
    pub score: i64,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub submitted_by: Option<Account>,
    /// Ancestor keys; empty for thread roots.
    pub path: ThreadPath,
    /// Direct parent when known without a path (remote items).
    pub parent: Option<Hash>,
    /// Thread root when known without a path (remote items).
    pub op: Option<Hash>,
    pub flags: Flags,
    pub metadata: Option<ItemMetadata>,
    pub full_path: OnceCell<Vec<u8>>,
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.title == other.title
            && self.mime_type == other.mime_type
            && self.data == other.data
            && self.score == other.score
            && self.submitted_at == other.submitted_at
            && self.updated_at == other.updated_at
            && self.submitted_by == other.submitted_by
            && self.path == other.path
            && self.parent == other.parent
            && self.op == other.op
            && self.flags == other.flags
            && self.metadata == other.metadata
    }
}

impl Item {
    /// Weak reference carrying only a key.
    #[must_use]
    pub fn with_key(key: Hash) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    /// Short hash used in links.
    #[must_use]
    pub fn hash(&self) -> &str {
        self.key.hash8()
    }

    /// Whether this item starts a thread.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path.is_root() && self.parent.is_none()
    }

    /// Direct parent, from the path or the remote reference.
    #[must_use]
    pub fn parent_hash(&self) -> Option<Hash> {
        self.path.parent_hash().or_else(|| self.parent.clone())
    }

    /// Thread root, from the path or the remote reference.
    #[must_use]
    pub fn op_hash(&self) -> Option<Hash> {
        self.path.root_hash().or_else(|| self.op.clone())
    }

    /// Path including this item's own key.
    ///
    /// Computed once per instance after the key is known.
    #[must_use]
    pub fn full_path(&self) -> Vec<u8> {
        if self.key.is_empty() {
            return self.path.full_path(&self.key);
        }
        self.full_path
            .get_or_init(|| self.path.full_path(&self.key))
            .clone()
    }

    /// Text posts have a `text/*` MIME type.
    #[must_use]
    pub fn is_self(&self) -> bool {
        self.mime_type.split('/').next() == Some("text")
    }

    #[must_use]
    pub fn is_link(&self) -> bool {
        self.mime_type == MIME_TYPE_URL
    }

    /// Host of a link item.
    #[must_use]
    pub fn domain(&self) -> Option<String> {
        if !self.is_link() {
            return None;
        }
        Url::parse(&self.data)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.flags.contains(Flags::DELETED)
    }

    pub const fn delete(&mut self) {
        self.flags.insert(Flags::DELETED);
    }

    pub const fn undelete(&mut self) {
        self.flags.remove(Flags::DELETED);
    }

    /// Remote identifier assigned by a previous save, if any.
    #[must_use]
    pub fn remote_id(&self) -> Option<&Url> {
        self.metadata.as_ref().and_then(|m| m.id.as_ref())
    }

    /// Local link to this item.
    #[must_use]
    pub fn local_link(&self) -> String {
        match &self.submitted_by {
            Some(author) => format!("{}/{}", author.local_link(), self.key.short()),
            None => format!("/i/{}", self.key.short()),
        }
    }

    /// Canonical URL for text items when known, otherwise the local link.
    #[must_use]
    pub fn permalink(&self) -> String {
        if !self.is_link()
            && let Some(url) = self.metadata.as_ref().and_then(|m| m.url.as_ref())
            && !url.is_empty()
        {
            return url.clone();
        }
        self.local_link()
    }
}
