//! Content addressing.
//!
//! An item's key is the hex SHA-256 digest of its data, its timestamp in
//! nanoseconds since the epoch, its thread path, and its author's numeric id,
//! concatenated in that order.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{Hash, Item, ThreadPath};

/// Derives content keys for newly created items.
pub struct ContentAddresser;

impl ContentAddresser {
    /// Derive and store the key of `item`.
    ///
    /// When `updated_at` is unset the current time is used and written back
    /// into the item, so deriving again (e.g. on a retried save) yields the
    /// same key.
    pub fn derive_key(item: &mut Item) -> Hash {
        let timestamp = *item.updated_at.get_or_insert_with(Utc::now);
        let author = item.submitted_by.as_ref().map_or(0, |account| account.id);

        item.key = Self::content_key(item.data.as_bytes(), timestamp, &item.path, author);
        debug!(key = %item.key, author, "Derived item key");
        item.key.clone()
    }

    /// Key for the given content, timestamp, path and author id.
    #[must_use]
    pub fn content_key(
        data: &[u8],
        timestamp: DateTime<Utc>,
        path: &ThreadPath,
        author: i64,
    ) -> Hash {
        // Outside the i64 nanosecond range (years 1677..2262) the timestamp
        // contributes zero.
        let nanos = timestamp.timestamp_nanos_opt().unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.update(nanos.to_string().as_bytes());
        hasher.update(path.as_bytes());
        hasher.update(author.to_string().as_bytes());

        Hash::new(hex::encode(hasher.finalize()))
    }
}
