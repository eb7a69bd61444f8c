//! `ActivityPub` Person actor.

use activitypub_federation::kinds::actor::PersonType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::objects::LangString;

/// `ActivityPub` Person actor.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApPerson {
    #[serde(rename = "type")]
    pub kind: PersonType,
    pub id: Url,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LangString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbox: Option<Url>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbox: Option<Url>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<Url>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<ApPublicKey>,

    // littr extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

/// `ActivityPub` public key.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApPublicKey {
    pub id: String,
    pub owner: Url,
    pub public_key_pem: String,
}

impl ApPerson {
    /// Create a new Person actor.
    #[must_use]
    pub const fn new(id: Url) -> Self {
        Self {
            kind: PersonType::Person,
            id,
            name: None,
            preferred_username: None,
            inbox: None,
            outbox: None,
            liked: None,
            url: None,
            published: None,
            public_key: None,
            score: None,
        }
    }

    /// Id of the key requests by this actor are signed with.
    #[must_use]
    pub fn key_id(&self) -> String {
        self.public_key
            .as_ref()
            .map_or_else(|| format!("{}#main-key", self.id), |key| key.id.clone())
    }

    /// Display name, falling back to the preferred username.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_ref()
            .and_then(LangString::first)
            .or(self.preferred_username.as_deref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_person() {
        let person: ApPerson = serde_json::from_str(
            r#"{
                "type": "Person",
                "id": "http://localhost/api/accounts/alice",
                "name": {"en": "alice"},
                "publicKey": {
                    "id": "http://localhost/api/accounts/alice#main-key",
                    "owner": "http://localhost/api/accounts/alice",
                    "publicKeyPem": "-----BEGIN PUBLIC KEY-----"
                },
                "score": 12
            }"#,
        )
        .unwrap();

        assert_eq!(person.display_name(), Some("alice"));
        assert_eq!(person.key_id(), "http://localhost/api/accounts/alice#main-key");
        assert_eq!(person.score, Some(12));
    }

    #[test]
    fn test_key_id_without_public_key() {
        let mut person = ApPerson::new(Url::parse("http://localhost/api/accounts/bob").unwrap());
        person.preferred_username = Some("bob".to_string());

        assert_eq!(person.key_id(), "http://localhost/api/accounts/bob#main-key");
        assert_eq!(person.display_name(), Some("bob"));
    }
}
