//! Thread paths.
//!
//! An item's path is the dot-joined chain of its ancestors' keys, thread root
//! first. Root items have an empty path. Paths are fixed when an item is
//! created and never re-parented.

use crate::Hash;

const SEPARATOR: u8 = b'.';

/// Ancestor chain of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadPath(Vec<u8>);

impl ThreadPath {
    /// Path of a thread root.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Wrap raw dot-joined path bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Path of a reply to an item whose own path is `parent_path` and key is
    /// `parent_key`.
    #[must_use]
    pub fn child_of(parent_path: &Self, parent_key: &Hash) -> Self {
        Self(parent_path.full_path(parent_key))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether this is the path of a thread root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of ancestors.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Ancestor keys, thread root first.
    pub fn segments(&self) -> impl Iterator<Item = Hash> + '_ {
        self.0
            .split(|b| *b == SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(|segment| Hash::new(String::from_utf8_lossy(segment)))
    }

    /// Direct parent: the last ancestor. `None` for a root.
    ///
    /// On a depth-1 path this is also the thread root; check [`Self::depth`]
    /// when the two must be told apart.
    #[must_use]
    pub fn parent_hash(&self) -> Option<Hash> {
        self.segments().last()
    }

    /// Thread origin: the first ancestor. `None` for a root.
    #[must_use]
    pub fn root_hash(&self) -> Option<Hash> {
        self.segments().next()
    }

    /// This path with `key` appended.
    #[must_use]
    pub fn full_path(&self, key: &Hash) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.0.len() + 1 + key.as_bytes().len());
        full.extend_from_slice(&self.0);
        if !full.is_empty() {
            full.push(SEPARATOR);
        }
        full.extend_from_slice(key.as_bytes());
        full
    }
}
