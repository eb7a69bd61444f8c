//! Content objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{ApReference, LangString};

/// Object types that translate into items.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ApObjectType {
    Article,
    Note,
    Page,
    Document,
}

impl ApObjectType {
    /// Wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::Note => "Note",
            Self::Page => "Page",
            Self::Document => "Document",
        }
    }

    /// Parse a declared wire type.
    #[must_use]
    pub fn from_wire(kind: &str) -> Option<Self> {
        match kind {
            "Article" => Some(Self::Article),
            "Note" => Some(Self::Note),
            "Page" => Some(Self::Page),
            "Document" => Some(Self::Document),
            _ => None,
        }
    }
}

/// An item as it travels on the wire.
///
/// `score` and `key` are littr extensions carried alongside the standard
/// vocabulary. `key` is the content key the item was derived under; it lets
/// the endpoint file a new item before it has an `id`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApObject {
    #[serde(rename = "type")]
    pub kind: ApObjectType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Url>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LangString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<LangString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributed_to: Option<ApReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<ApReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ApReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ApObject {
    /// Create an empty object of the given type.
    #[must_use]
    pub const fn new(kind: ApObjectType) -> Self {
        Self {
            kind,
            id: None,
            name: None,
            content: None,
            media_type: None,
            published: None,
            updated: None,
            attributed_to: None,
            in_reply_to: None,
            context: None,
            url: None,
            score: None,
            key: None,
        }
    }

    /// Whether this object was published under an identifier before.
    #[must_use]
    pub const fn has_id(&self) -> bool {
        self.id.is_some()
    }
}
