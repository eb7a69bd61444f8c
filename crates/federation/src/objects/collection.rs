//! Ordered collections.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Collection container types.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ApCollectionType {
    OrderedCollection,
    OrderedCollectionPage,
}

/// A page of results.
///
/// Entries stay undecoded so that one malformed entry cannot fail the whole
/// collection; callers decode them one at a time.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApOrderedCollection {
    #[serde(rename = "type")]
    pub kind: ApCollectionType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Url>,

    #[serde(default)]
    pub total_items: u64,

    #[serde(default)]
    pub ordered_items: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<Url>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Url>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Url>,
}

impl ApOrderedCollection {
    /// Capacity for decoded results: the declared total, bounded by the
    /// entries actually present.
    #[must_use]
    pub fn expected_len(&self) -> usize {
        usize::try_from(self.total_items)
            .unwrap_or(usize::MAX)
            .min(self.ordered_items.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_collection() {
        let collection: ApOrderedCollection = serde_json::from_str(
            r#"{
                "type": "OrderedCollection",
                "id": "http://localhost/api/outbox",
                "totalItems": 10,
                "orderedItems": [{"type": "Note"}, "garbage"],
                "next": "http://localhost/api/outbox?page=2"
            }"#,
        )
        .unwrap();

        assert_eq!(collection.total_items, 10);
        assert_eq!(collection.ordered_items.len(), 2);
        assert_eq!(collection.expected_len(), 2);
        assert!(collection.next.is_some());
    }

    #[test]
    fn test_missing_items_default_to_empty() {
        let collection: ApOrderedCollection =
            serde_json::from_str(r#"{"type":"OrderedCollectionPage"}"#).unwrap();
        assert_eq!(collection.kind, ApCollectionType::OrderedCollectionPage);
        assert_eq!(collection.expected_len(), 0);
    }
}
