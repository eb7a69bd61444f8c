//! References to other documents.

use serde::{Deserialize, Serialize};
use url::Url;

/// A link to another document: a bare IRI or an embedded document with an id.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ApReference {
    Link(Url),
    Embedded(EmbeddedRef),
}

/// The identifying part of an embedded document. Other fields are ignored.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct EmbeddedRef {
    pub id: Url,
}

impl ApReference {
    #[must_use]
    pub const fn id(&self) -> &Url {
        match self {
            Self::Link(url) => url,
            Self::Embedded(embedded) => &embedded.id,
        }
    }

    /// Last non-empty path segment of the referenced IRI.
    #[must_use]
    pub fn last_segment(&self) -> Option<&str> {
        last_segment(self.id())
    }
}

impl From<Url> for ApReference {
    fn from(url: Url) -> Self {
        Self::Link(url)
    }
}

/// Last non-empty path segment of `url`.
#[must_use]
pub fn last_segment(url: &Url) -> Option<&str> {
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_link_and_embedded() {
        let link: ApReference =
            serde_json::from_str(r#""http://localhost/api/outbox/abc123""#).unwrap();
        assert_eq!(link.last_segment(), Some("abc123"));

        let embedded: ApReference = serde_json::from_str(
            r#"{"id":"http://localhost/api/accounts/alice/","type":"Person","name":"alice"}"#,
        )
        .unwrap();
        assert!(matches!(embedded, ApReference::Embedded(_)));
        assert_eq!(embedded.last_segment(), Some("alice"));
    }

    #[test]
    fn test_root_url_has_no_segment() {
        let url = Url::parse("http://localhost/").unwrap();
        assert_eq!(last_segment(&url), None);
    }
}
