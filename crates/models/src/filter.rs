//! Load filters.
//!
//! Filters are built and defaulted by the caller, then serialised into the
//! query string of federation requests. Multi-valued fields repeat their key;
//! empty lists and zero counts are left out. An empty string inside a list is
//! kept (`inReplyTo=` selects top level items).

use littr_common::MAX_CONTENT_ITEMS;
use url::{Url, form_urlencoded};
use validator::Validate;

use crate::Hash;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 500;

/// A filter that can be rendered as query parameters.
pub trait QueryFilter {
    /// Query parameters in a stable order.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// Append the parameters to `url`.
    fn append_to(&self, url: &mut Url) {
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(pairs);
    }

    /// Encoded query string without the leading `?`.
    fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }
}

fn push_all<T: ToString>(pairs: &mut Vec<(&'static str, String)>, name: &'static str, values: &[T]) {
    pairs.extend(values.iter().map(|v| (name, v.to_string())));
}

fn push_count(pairs: &mut Vec<(&'static str, String)>, name: &'static str, value: u32) {
    if value > 0 {
        pairs.push((name, value.to_string()));
    }
}

/// Filter for items.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct LoadItemsFilter {
    pub key: Vec<String>,
    pub attributed_to: Vec<Hash>,
    pub in_reply_to: Vec<String>,
    pub context: Vec<String>,
    pub media_type: Vec<String>,
    pub item_type: Vec<String>,
    pub url: Vec<String>,
    pub deleted: Vec<bool>,
    pub federated: Vec<bool>,
    pub private: Vec<bool>,
    #[validate(range(min = 1, max = 500))]
    pub max_items: u32,
    #[validate(range(min = 1))]
    pub page: u32,
}

impl Default for LoadItemsFilter {
    fn default() -> Self {
        Self {
            key: Vec::new(),
            attributed_to: Vec::new(),
            in_reply_to: Vec::new(),
            context: Vec::new(),
            media_type: Vec::new(),
            item_type: Vec::new(),
            url: Vec::new(),
            deleted: Vec::new(),
            federated: Vec::new(),
            private: Vec::new(),
            max_items: MAX_CONTENT_ITEMS,
            page: 1,
        }
    }
}

impl LoadItemsFilter {
    /// Filter selecting one item by key.
    #[must_use]
    pub fn by_key(key: impl Into<String>) -> Self {
        Self {
            key: vec![key.into()],
            max_items: 1,
            ..Self::default()
        }
    }
}

impl QueryFilter for LoadItemsFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_all(&mut pairs, "key", &self.key);
        push_all(&mut pairs, "attributedTo", &self.attributed_to);
        push_all(&mut pairs, "inReplyTo", &self.in_reply_to);
        push_all(&mut pairs, "context", &self.context);
        push_all(&mut pairs, "mediaType", &self.media_type);
        push_all(&mut pairs, "type", &self.item_type);
        push_all(&mut pairs, "url", &self.url);
        push_all(&mut pairs, "deleted", &self.deleted);
        push_all(&mut pairs, "federated", &self.federated);
        push_all(&mut pairs, "private", &self.private);
        push_count(&mut pairs, "maxItems", self.max_items);
        push_count(&mut pairs, "page", self.page);
        pairs
    }
}

/// Filter for votes.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct LoadVotesFilter {
    pub item_key: Vec<String>,
    pub attributed_to: Vec<Hash>,
    pub vote_type: Vec<String>,
    #[validate(range(min = 1, max = 500))]
    pub max_items: u32,
    #[validate(range(min = 1))]
    pub page: u32,
}

impl Default for LoadVotesFilter {
    fn default() -> Self {
        Self {
            item_key: Vec::new(),
            attributed_to: Vec::new(),
            vote_type: Vec::new(),
            max_items: MAX_CONTENT_ITEMS,
            page: 1,
        }
    }
}

impl LoadVotesFilter {
    /// Filter selecting the vote on one item.
    #[must_use]
    pub fn by_item(item_key: impl Into<String>) -> Self {
        Self {
            item_key: vec![item_key.into()],
            max_items: 1,
            ..Self::default()
        }
    }
}

impl QueryFilter for LoadVotesFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_all(&mut pairs, "itemKey", &self.item_key);
        push_all(&mut pairs, "attributedTo", &self.attributed_to);
        push_all(&mut pairs, "type", &self.vote_type);
        push_count(&mut pairs, "maxItems", self.max_items);
        push_count(&mut pairs, "page", self.page);
        pairs
    }
}

/// Filter for accounts.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct LoadAccountsFilter {
    pub key: Vec<String>,
    pub handle: Vec<String>,
    pub deleted: Vec<bool>,
    #[validate(range(min = 1, max = 500))]
    pub max_items: u32,
    #[validate(range(min = 1))]
    pub page: u32,
}

impl Default for LoadAccountsFilter {
    fn default() -> Self {
        Self {
            key: Vec::new(),
            handle: Vec::new(),
            deleted: Vec::new(),
            max_items: MAX_CONTENT_ITEMS,
            page: 1,
        }
    }
}

impl LoadAccountsFilter {
    /// Filter selecting one account by handle.
    #[must_use]
    pub fn by_handle(handle: impl Into<String>) -> Self {
        Self {
            handle: vec![handle.into()],
            max_items: 1,
            ..Self::default()
        }
    }
}

impl QueryFilter for LoadAccountsFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_all(&mut pairs, "key", &self.key);
        push_all(&mut pairs, "handle", &self.handle);
        push_all(&mut pairs, "deleted", &self.deleted);
        push_count(&mut pairs, "maxItems", self.max_items);
        push_count(&mut pairs, "page", self.page);
        pairs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_items_filter_query() {
        let filter = LoadItemsFilter::default();
        assert_eq!(filter.to_query_string(), "maxItems=50&page=1");
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn test_repeated_keys_and_empty_values() {
        let filter = LoadItemsFilter {
            attributed_to: vec![Hash::from("a1"), Hash::from("b2")],
            in_reply_to: vec![String::new()],
            deleted: vec![false],
            max_items: 0,
            page: 0,
            ..LoadItemsFilter::default()
        };
        assert_eq!(
            filter.to_query_string(),
            "attributedTo=a1&attributedTo=b2&inReplyTo=&deleted=false"
        );
    }

    #[test]
    fn test_append_to_url() {
        let mut url = Url::parse("http://localhost/api/liked").unwrap();
        LoadVotesFilter {
            attributed_to: vec![Hash::from("abc")],
            vote_type: vec!["Like".to_string()],
            ..LoadVotesFilter::default()
        }
        .append_to(&mut url);

        assert_eq!(
            url.as_str(),
            "http://localhost/api/liked?attributedTo=abc&type=Like&maxItems=50&page=1"
        );
    }

    #[test]
    fn test_empty_filter_leaves_url_untouched() {
        let mut url = Url::parse("http://localhost/api/accounts").unwrap();
        LoadAccountsFilter {
            max_items: 0,
            page: 0,
            ..LoadAccountsFilter::default()
        }
        .append_to(&mut url);
        assert_eq!(url.as_str(), "http://localhost/api/accounts");
    }

    #[test]
    fn test_validation_bounds() {
        let too_many = LoadItemsFilter {
            max_items: MAX_PAGE_SIZE + 1,
            ..LoadItemsFilter::default()
        };
        assert!(too_many.validate().is_err());

        let no_page = LoadVotesFilter {
            page: 0,
            ..LoadVotesFilter::default()
        };
        assert!(no_page.validate().is_err());
    }

    #[test]
    fn test_single_target_constructors() {
        assert_eq!(LoadItemsFilter::by_key("abc").key, vec!["abc"]);
        assert_eq!(LoadVotesFilter::by_item("abc").item_key, vec!["abc"]);
        assert_eq!(LoadAccountsFilter::by_handle("alice").handle, vec!["alice"]);
    }
}
