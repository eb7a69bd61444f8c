//! Conversion between domain entities and `ActivityPub` documents.
//!
//! The per-type conversions are extension traits; [`ActivityTranslator`]
//! bundles them behind the [`UrlConfig`] they need and adds the document and
//! collection level rules.

#![allow(missing_docs)]

mod account;
mod item;
mod urls;
mod vote;

pub use account::{AccountToApPerson, ApPersonExt};
pub use item::{ApObjectExt, ItemToApObject};
pub use urls::UrlConfig;
pub use vote::{ApVoteExt, VoteToActivity, vote_target_key};

use littr_models::{Account, Item, Vote};
use serde_json::Value;
use tracing::warn;

use crate::activities::{CreateActivity, UpdateActivity};
use crate::actors::ApPerson;
use crate::error::{FederationError, FederationResult};
use crate::objects::{ApDocument, ApOrderedCollection};

/// Translates between wire documents and domain entities.
///
/// Stateless apart from the endpoint URLs; every call produces fresh values.
#[derive(Clone, Debug)]
pub struct ActivityTranslator {
    urls: UrlConfig,
}

impl ActivityTranslator {
    #[must_use]
    pub const fn new(urls: UrlConfig) -> Self {
        Self { urls }
    }

    #[must_use]
    pub const fn urls(&self) -> &UrlConfig {
        &self.urls
    }

    /// Object, or Create/Update wrapping one, to Item.
    pub fn item_from_document(&self, document: ApDocument) -> FederationResult<Item> {
        let kind = document.kind();
        document
            .into_object()
            .ok_or_else(|| FederationError::Translation(format!("{kind} is not an item")))?
            .to_item()
    }

    /// Like or Dislike to Vote. Any other document is rejected.
    pub fn vote_from_document(&self, document: ApDocument) -> FederationResult<Vote> {
        match document {
            ApDocument::Like(like) => like.to_vote(),
            ApDocument::Dislike(dislike) => dislike.to_vote(),
            other => Err(FederationError::Translation(format!(
                "{} is not a vote",
                other.kind()
            ))),
        }
    }

    /// Person to Account.
    pub fn account_from_document(&self, document: ApDocument) -> FederationResult<Account> {
        match document {
            ApDocument::Person(person) => person.to_account(),
            other => Err(FederationError::Translation(format!(
                "{} is not an actor",
                other.kind()
            ))),
        }
    }

    /// Actor document for an account, used for signing and attribution.
    #[must_use]
    pub fn actor_for(&self, account: &Account) -> ApPerson {
        account.to_ap_person(&self.urls)
    }

    /// Activity persisting `item`: Update when the item already has a remote
    /// id, Create otherwise.
    pub fn activity_for_item(&self, item: &Item) -> FederationResult<ApDocument> {
        let author = item
            .submitted_by
            .as_ref()
            .ok_or_else(|| FederationError::Translation(format!("item {} has no author", item.key)))?;
        let actor = self.urls.account_url(author.url_id());
        let object = item.to_ap_object(&self.urls);

        if object.has_id() {
            Ok(ApDocument::Update(UpdateActivity::new(actor, object)))
        } else {
            Ok(ApDocument::Create(CreateActivity::new(actor, object)))
        }
    }

    /// Like or Dislike for `vote`.
    pub fn activity_for_vote(&self, vote: &Vote) -> FederationResult<ApDocument> {
        vote.to_activity(&self.urls)
    }

    /// Translate every entry of `collection` with `translate`.
    ///
    /// Entries that fail to decode or translate are logged and skipped; the
    /// rest keep their order.
    pub fn decode_collection<T, F>(&self, collection: ApOrderedCollection, translate: F) -> Vec<T>
    where
        F: Fn(&Self, ApDocument) -> FederationResult<T>,
    {
        let mut decoded = Vec::with_capacity(collection.expected_len());
        for (index, entry) in collection.ordered_items.into_iter().enumerate() {
            match self.decode_entry(entry, &translate) {
                Ok(value) => decoded.push(value),
                Err(err) => warn!(index, error = %err, "Skipping collection entry"),
            }
        }
        decoded
    }

    fn decode_entry<T, F>(&self, entry: Value, translate: &F) -> FederationResult<T>
    where
        F: Fn(&Self, ApDocument) -> FederationResult<T>,
    {
        let document = ApDocument::from_value(entry)?;
        translate(self, document)
    }
}
