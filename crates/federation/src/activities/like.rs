//! Like and Dislike activities (votes).

use activitypub_federation::kinds::activity::{DislikeType, LikeType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::objects::{ACTIVITY_STREAMS_CONTEXT, ApReference};

/// `ActivityPub` vote activity. The kind marker fixes the direction.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteActivity<K> {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub ld_context: Option<Value>,
    #[serde(rename = "type")]
    pub kind: K,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ApReference>,
    pub object: ApReference,

    /// Some endpoints attribute the vote instead of naming an actor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributed_to: Option<ApReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

/// A positive vote.
pub type LikeActivity = VoteActivity<LikeType>;

/// A negative vote.
pub type DislikeActivity = VoteActivity<DislikeType>;

/// Vote weight carried by an activity kind.
pub trait VoteDirection {
    const WEIGHT: i32;
}

impl VoteDirection for LikeType {
    const WEIGHT: i32 = 1;
}

impl VoteDirection for DislikeType {
    const WEIGHT: i32 = -1;
}

impl<K> VoteActivity<K> {
    /// Create a vote activity.
    #[must_use]
    pub fn new(kind: K, id: Url, actor: Url, object: Url) -> Self {
        Self {
            ld_context: Some(Value::from(ACTIVITY_STREAMS_CONTEXT)),
            kind,
            id: Some(id),
            actor: Some(ApReference::Link(actor)),
            object: ApReference::Link(object),
            attributed_to: None,
            published: None,
        }
    }

    /// The voting actor, from `actor` or `attributedTo`.
    #[must_use]
    pub fn voter(&self) -> Option<&ApReference> {
        self.actor.as_ref().or(self.attributed_to.as_ref())
    }
}

impl<K: VoteDirection> VoteActivity<K> {
    #[must_use]
    pub const fn weight(&self) -> i32 {
        K::WEIGHT
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_like_wire_format() {
        let like = LikeActivity::new(
            LikeType::Like,
            Url::parse("http://localhost/api/accounts/alice/liked/abc").unwrap(),
            Url::parse("http://localhost/api/accounts/alice").unwrap(),
            Url::parse("http://localhost/api/outbox/abc").unwrap(),
        );
        let json = serde_json::to_value(&like).unwrap();

        assert_eq!(json["type"], "Like");
        assert_eq!(json["@context"], ACTIVITY_STREAMS_CONTEXT);
        assert_eq!(json["object"], "http://localhost/api/outbox/abc");
        assert!(json.get("attributedTo").is_none());
    }

    #[test]
    fn test_voter_falls_back_to_attribution() {
        let dislike: DislikeActivity = serde_json::from_str(
            r#"{
                "type": "Dislike",
                "attributedTo": "http://localhost/api/accounts/bob",
                "object": "http://localhost/api/outbox/abc"
            }"#,
        )
        .unwrap();

        assert_eq!(dislike.voter().and_then(ApReference::last_segment), Some("bob"));
        assert_eq!(dislike.weight(), -1);
    }
}
