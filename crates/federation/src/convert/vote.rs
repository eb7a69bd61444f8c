//! Vote <-> Like/Dislike conversion.

use activitypub_federation::kinds::activity::{DislikeType, LikeType};
use littr_models::{Account, Hash, Item, Vote};

use crate::activities::{VoteActivity, VoteDirection};
use crate::error::{FederationError, FederationResult};
use crate::objects::{ApDocument, ApReference};

use super::urls::UrlConfig;

/// Extension trait for converting Vote to a Like or Dislike.
pub trait VoteToActivity {
    /// Build the vote activity: Like for a positive weight, Dislike for a
    /// negative one. A zero weight is not a vote and fails.
    fn to_activity(&self, config: &UrlConfig) -> FederationResult<ApDocument>;
}

impl VoteToActivity for Vote {
    fn to_activity(&self, config: &UrlConfig) -> FederationResult<ApDocument> {
        let author = self
            .submitted_by
            .as_ref()
            .ok_or_else(|| FederationError::Translation("vote has no author".to_string()))?;
        let item = self
            .item
            .as_ref()
            .filter(|item| !item.key.is_empty() || item.remote_id().is_some())
            .ok_or_else(|| FederationError::Translation("vote target has no item identifier".to_string()))?;

        let id = config.account_vote_url(author.url_id(), vote_target_key(item));
        let actor = config.account_url(author.url_id());
        let object = item
            .remote_id()
            .cloned()
            .unwrap_or_else(|| config.item_url(item.key.as_str()));

        let document = match self.weight.signum() {
            1 => {
                let mut like = VoteActivity::new(LikeType::Like, id, actor, object);
                like.published = self.submitted_at;
                ApDocument::Like(like)
            }
            -1 => {
                let mut dislike = VoteActivity::new(DislikeType::Dislike, id, actor, object);
                dislike.published = self.submitted_at;
                ApDocument::Dislike(dislike)
            }
            _ => {
                return Err(FederationError::Translation(
                    "a zero weight vote has no activity".to_string(),
                ));
            }
        };

        Ok(document)
    }
}

/// Key segment used in per item vote URLs.
pub fn vote_target_key(item: &Item) -> &str {
    if item.key.is_empty() {
        item.remote_id()
            .and_then(crate::objects::last_segment)
            .unwrap_or_default()
    } else {
        item.key.as_str()
    }
}

/// Extension trait for vote activities.
pub trait ApVoteExt {
    /// Convert to a Vote whose item and author are weak references.
    fn to_vote(&self) -> FederationResult<Vote>;
}

impl<K: VoteDirection> ApVoteExt for VoteActivity<K> {
    fn to_vote(&self) -> FederationResult<Vote> {
        let item_key = self
            .object
            .last_segment()
            .ok_or_else(|| FederationError::Translation("vote target has no item identifier".to_string()))?;

        Ok(Vote {
            submitted_by: self
                .voter()
                .and_then(ApReference::last_segment)
                .map(|id| Account::with_hash(Hash::from(id))),
            item: Some(Item::with_key(Hash::from(item_key))),
            weight: self.weight(),
            submitted_at: self.published,
            ..Vote::default()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;

    fn urls() -> UrlConfig {
        UrlConfig::new(Url::parse("http://localhost/api").unwrap()).unwrap()
    }

    fn vote(weight: i32) -> Vote {
        Vote {
            submitted_by: Some(Account::with_handle("alice")),
            item: Some(Item::with_key(Hash::from("abc123"))),
            weight,
            ..Vote::default()
        }
    }

    #[test]
    fn test_weight_sign_selects_activity() {
        assert!(matches!(vote(1).to_activity(&urls()).unwrap(), ApDocument::Like(_)));
        assert!(matches!(vote(5).to_activity(&urls()).unwrap(), ApDocument::Like(_)));
        assert!(matches!(vote(-1).to_activity(&urls()).unwrap(), ApDocument::Dislike(_)));
        assert!(matches!(
            vote(0).to_activity(&urls()),
            Err(FederationError::Translation(_))
        ));
    }

    #[test]
    fn test_activity_addresses() {
        let ApDocument::Like(like) = vote(1).to_activity(&urls()).unwrap() else {
            panic!("expected a Like");
        };
        assert_eq!(
            like.id.unwrap().as_str(),
            "http://localhost/api/accounts/alice/liked/abc123"
        );
        assert_eq!(like.object.id().as_str(), "http://localhost/api/outbox/abc123");
    }

    #[test]
    fn test_like_and_dislike_weights() {
        let like: crate::activities::LikeActivity = serde_json::from_value(json!({
            "type": "Like",
            "actor": "http://localhost/api/accounts/alice",
            "object": "http://localhost/api/outbox/abc123"
        }))
        .unwrap();
        let vote = like.to_vote().unwrap();
        assert_eq!(vote.weight, 1);
        assert_eq!(vote.item.unwrap().key.as_str(), "abc123");
        assert_eq!(vote.submitted_by.unwrap().hash.as_str(), "alice");

        let dislike: crate::activities::DislikeActivity = serde_json::from_value(json!({
            "type": "Dislike",
            "object": {"id": "http://localhost/api/outbox/abc123", "type": "Article"}
        }))
        .unwrap();
        let vote = dislike.to_vote().unwrap();
        assert_eq!(vote.weight, -1);
        assert!(vote.submitted_by.is_none());
    }

    #[test]
    fn test_vote_without_item_fails() {
        let vote = Vote {
            submitted_by: Some(Account::with_handle("alice")),
            weight: 1,
            ..Vote::default()
        };
        assert!(matches!(
            vote.to_activity(&urls()),
            Err(FederationError::Translation(_))
        ));
    }
}
