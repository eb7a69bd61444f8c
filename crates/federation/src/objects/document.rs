//! Closed union of wire documents.

use serde_json::Value;

use super::{ApObject, ApObjectType, ApOrderedCollection};
use crate::activities::{CreateActivity, DislikeActivity, LikeActivity, UpdateActivity};
use crate::actors::ApPerson;
use crate::error::{FederationError, FederationResult};

/// Any document the federation endpoint returns, keyed by its declared `type`.
#[derive(Clone, Debug, PartialEq)]
pub enum ApDocument {
    Object(ApObject),
    Person(ApPerson),
    Create(CreateActivity),
    Update(UpdateActivity),
    Like(LikeActivity),
    Dislike(DislikeActivity),
    Collection(ApOrderedCollection),
}

impl ApDocument {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> FederationResult<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Decode a JSON value by dispatching on its `type` field.
    ///
    /// # Errors
    ///
    /// [`FederationError::UnknownType`] for a type outside the union and
    /// [`FederationError::Decode`] when the type is missing or the document
    /// does not have the shape its type declares.
    pub fn from_value(value: Value) -> FederationResult<Self> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| FederationError::Decode("document has no type".to_string()))?
            .to_string();

        if ApObjectType::from_wire(&kind).is_some() {
            return Ok(Self::Object(serde_json::from_value(value)?));
        }

        match kind.as_str() {
            "Person" => Ok(Self::Person(serde_json::from_value(value)?)),
            "Create" => Ok(Self::Create(serde_json::from_value(value)?)),
            "Update" => Ok(Self::Update(serde_json::from_value(value)?)),
            "Like" => Ok(Self::Like(serde_json::from_value(value)?)),
            "Dislike" => Ok(Self::Dislike(serde_json::from_value(value)?)),
            "OrderedCollection" | "OrderedCollectionPage" => {
                Ok(Self::Collection(serde_json::from_value(value)?))
            }
            _ => Err(FederationError::UnknownType(kind)),
        }
    }

    /// Declared wire type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Object(object) => object.kind.as_str(),
            Self::Person(_) => "Person",
            Self::Create(_) => "Create",
            Self::Update(_) => "Update",
            Self::Like(_) => "Like",
            Self::Dislike(_) => "Dislike",
            Self::Collection(_) => "OrderedCollection",
        }
    }

    /// The content object of this document: the object itself, or the one
    /// wrapped by a Create or Update.
    #[must_use]
    pub fn into_object(self) -> Option<ApObject> {
        match self {
            Self::Object(object) => Some(object),
            Self::Create(create) => Some(create.object),
            Self::Update(update) => Some(update.object),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_on_type() {
        let cases = [
            (json!({"type": "Article"}), "Article"),
            (json!({"type": "Page"}), "Page"),
            (
                json!({"type": "Person", "id": "http://localhost/api/accounts/alice"}),
                "Person",
            ),
            (
                json!({"type": "Like", "object": "http://localhost/api/outbox/abc"}),
                "Like",
            ),
            (
                json!({"type": "Dislike", "object": "http://localhost/api/outbox/abc"}),
                "Dislike",
            ),
            (
                json!({"type": "Create", "actor": "http://localhost/api/accounts/alice", "object": {"type": "Note"}}),
                "Create",
            ),
            (json!({"type": "OrderedCollection", "totalItems": 0}), "OrderedCollection"),
        ];

        for (value, kind) in cases {
            assert_eq!(ApDocument::from_value(value).unwrap().kind(), kind);
        }
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let err = ApDocument::from_value(json!({"type": "Announce"})).unwrap_err();
        assert!(matches!(err, FederationError::UnknownType(kind) if kind == "Announce"));
    }

    #[test]
    fn test_missing_type_and_bad_shape() {
        assert!(matches!(
            ApDocument::from_value(json!({"name": "no type"})),
            Err(FederationError::Decode(_))
        ));
        assert!(matches!(
            ApDocument::from_value(json!({"type": "Like"})),
            Err(FederationError::Decode(_))
        ));
        assert!(matches!(
            ApDocument::from_slice(b"not json"),
            Err(FederationError::Decode(_))
        ));
    }

    #[test]
    fn test_into_object_unwraps_activities() {
        let create = ApDocument::from_value(json!({
            "type": "Create",
            "actor": "http://localhost/api/accounts/alice",
            "object": {"type": "Article", "name": "Title"}
        }))
        .unwrap();
        let object = create.into_object().unwrap();
        assert_eq!(object.kind, ApObjectType::Article);

        let person = ApDocument::from_value(json!({
            "type": "Person",
            "id": "http://localhost/api/accounts/alice"
        }))
        .unwrap();
        assert!(person.into_object().is_none());
    }
}
