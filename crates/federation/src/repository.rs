//! Federation repository.
//!
//! Loads and persists items, votes and accounts against a single federation
//! endpoint. Every call performs its own signed round trip; nothing is cached.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use littr_common::{Config, FederationConfig};
use littr_models::{
    Account, AccountStore, ContentAddresser, Hash, Item, LoadAccountsFilter, LoadItemsFilter,
    LoadVotesFilter, QueryFilter, Vote,
};
use reqwest::{Method, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use crate::client::{ApClient, ApResponse};
use crate::convert::{ActivityTranslator, UrlConfig, vote_target_key};
use crate::error::{FederationError, FederationResult};
use crate::objects::{ApDocument, ApOrderedCollection, last_segment};
use crate::signature::RequestSigner;

/// Domain facing load and save operations.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Load the single item named by the filter's first key.
    ///
    /// Any status other than `200` fails with
    /// [`FederationError::RemoteStatus`]; its reason follows the status, so a
    /// `404` is [`FederationError::is_not_found`] while a `500` is a remote
    /// internal error.
    async fn load_item(&self, filter: LoadItemsFilter) -> FederationResult<Item>;

    /// Load a page of items. Entries that fail to translate are skipped.
    async fn load_items(&self, filter: LoadItemsFilter) -> FederationResult<Vec<Item>>;

    /// Create or update an item and return the endpoint's copy.
    async fn save_item(&self, item: Item) -> FederationResult<Item>;

    /// Load the vote on the filter's first item key.
    async fn load_vote(&self, filter: LoadVotesFilter) -> FederationResult<Vote>;

    /// Load votes keyed by item. Later entries for the same item win.
    async fn load_votes(&self, filter: LoadVotesFilter) -> FederationResult<HashMap<Hash, Vote>>;

    /// Record a vote. A zero weight is not a vote.
    async fn save_vote(&self, vote: Vote) -> FederationResult<Vote>;

    /// Load the account named by the filter's first handle.
    async fn load_account(&self, filter: LoadAccountsFilter) -> FederationResult<Account>;

    /// Load a page of accounts. Entries that fail to translate are skipped.
    async fn load_accounts(&self, filter: LoadAccountsFilter) -> FederationResult<Vec<Account>>;

    /// Persist an account in the local store.
    async fn save_account(&self, account: Account) -> FederationResult<Account>;
}

/// [`Repository`] backed by a federation endpoint.
///
/// The acting account is fixed per value: [`Self::with_account`] returns a
/// new repository, so concurrent callers never swap the signer of another
/// call.
#[derive(Clone)]
pub struct FederationRepository {
    client: ApClient,
    translator: ActivityTranslator,
    signer: RequestSigner,
    store: Arc<dyn AccountStore>,
    account: Arc<Account>,
    default_page_size: u32,
}

impl FederationRepository {
    /// Create a repository acting as the anonymous account.
    pub fn new(
        config: &FederationConfig,
        user_agent: impl Into<String>,
        store: Arc<dyn AccountStore>,
    ) -> FederationResult<Self> {
        let translator = ActivityTranslator::new(UrlConfig::new(config.base_url.clone())?);
        let client = ApClient::new(config, user_agent)?;

        info!(base_url = %config.base_url, "Federation repository ready");

        Ok(Self {
            client,
            signer: RequestSigner::new(translator.clone()),
            translator,
            store,
            account: Arc::new(Account::anonymous()),
            default_page_size: config.default_page_size,
        })
    }

    /// Create a repository from the application configuration.
    pub fn from_config(config: &Config, store: Arc<dyn AccountStore>) -> FederationResult<Self> {
        Self::new(&config.federation, config.instance.user_agent(), store)
    }

    /// Same repository acting as `account`.
    #[must_use]
    pub fn with_account(&self, account: Account) -> Self {
        Self {
            account: Arc::new(account),
            ..self.clone()
        }
    }

    /// The acting account.
    #[must_use]
    pub fn account(&self) -> &Account {
        &self.account
    }

    #[must_use]
    pub const fn translator(&self) -> &ActivityTranslator {
        &self.translator
    }

    /// Build, sign and send a request.
    ///
    /// A request that cannot be signed is sent unsigned; the endpoint decides
    /// whether that is acceptable.
    async fn send(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> FederationResult<ApResponse> {
        let mut request = self.client.build(method, url, body)?;

        if let Err(err) = self.signer.sign(&mut request, &self.account) {
            warn!(
                account = %self.account.handle,
                method = %request.method(),
                url = %request.url(),
                error = %err,
                "Unable to sign request, sending unsigned"
            );
        }

        self.client.execute(request).await
    }

    async fn get(&self, url: Url) -> FederationResult<ApResponse> {
        self.send(Method::GET, url, None).await
    }

    async fn get_collection(&self, url: Url) -> FederationResult<ApOrderedCollection> {
        let response = self.get(url).await?.ensure_ok()?;
        match response.document()? {
            ApDocument::Collection(collection) => Ok(collection),
            other => Err(FederationError::Decode(format!(
                "expected an ordered collection, got {}",
                other.kind()
            ))),
        }
    }

    const fn page_size(&self, requested: u32) -> u32 {
        if requested == 0 {
            self.default_page_size
        } else {
            requested
        }
    }
}

fn first_non_empty<T: AsRef<str>>(values: &[T]) -> Option<&str> {
    values
        .first()
        .map(AsRef::as_ref)
        .filter(|value| !value.is_empty())
}

#[async_trait]
impl Repository for FederationRepository {
    async fn load_item(&self, mut filter: LoadItemsFilter) -> FederationResult<Item> {
        let key = first_non_empty(&filter.key)
            .ok_or_else(|| FederationError::InvalidFilter("loading an item requires a key".to_string()))?
            .to_string();

        filter.key.clear();
        filter.attributed_to.clear();
        filter.max_items = 1;

        let mut url = self.translator.urls().item_url(&key);
        filter.append_to(&mut url);

        let response = self.get(url).await?.ensure_ok()?;
        let item = self.translator.item_from_document(response.document()?)?;

        debug!(item = %item.key, "Loaded item");
        Ok(item)
    }

    async fn load_items(&self, mut filter: LoadItemsFilter) -> FederationResult<Vec<Item>> {
        filter.max_items = self.page_size(filter.max_items);

        let mut url = self.translator.urls().outbox_url();
        filter.append_to(&mut url);

        let collection = self.get_collection(url).await?;
        let declared = collection.total_items;
        let items = self
            .translator
            .decode_collection(collection, ActivityTranslator::item_from_document);

        debug!(declared, loaded = items.len(), "Loaded items");
        Ok(items)
    }

    async fn save_item(&self, mut item: Item) -> FederationResult<Item> {
        if item.key.is_empty() && item.remote_id().is_none() {
            ContentAddresser::derive_key(&mut item);
        }

        let activity = self.translator.activity_for_item(&item)?;
        let (method, url, body) = match &activity {
            ApDocument::Update(update) => {
                let url = update.object.id.clone().ok_or_else(|| {
                    FederationError::Translation("update without an object id".to_string())
                })?;
                (Method::PUT, url, serde_json::to_vec(update)?)
            }
            ApDocument::Create(create) => {
                let author = item.submitted_by.as_ref().map_or("", Account::url_id);
                let url = self.translator.urls().account_outbox_url(author);
                (Method::POST, url, serde_json::to_vec(create)?)
            }
            other => {
                return Err(FederationError::Translation(format!(
                    "{} cannot persist an item",
                    other.kind()
                )));
            }
        };

        debug!(item = %item.key, method = %method, url = %url, "Saving item");
        let response = self.send(method, url, Some(body)).await?;

        match response.status {
            StatusCode::CREATED => {
                let key = response.location_key().ok_or_else(|| {
                    FederationError::Decode("created response has no Location".to_string())
                })?;
                info!(item = %key, "Created item");
                self.load_item(LoadItemsFilter::by_key(key)).await
            }
            StatusCode::OK | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => {
                if !response.is_empty() {
                    return self.translator.item_from_document(response.document()?);
                }
                // The create carried the content key, so a new item can be
                // refetched under it.
                let key = item
                    .remote_id()
                    .and_then(last_segment)
                    .unwrap_or(item.key.as_str())
                    .to_string();
                self.load_item(LoadItemsFilter::by_key(key)).await
            }
            status => Err(FederationError::remote_status(status)),
        }
    }

    async fn load_vote(&self, mut filter: LoadVotesFilter) -> FederationResult<Vote> {
        let item_key = first_non_empty(&filter.item_key)
            .ok_or_else(|| FederationError::InvalidFilter("loading a vote requires an item key".to_string()))?
            .to_string();

        let urls = self.translator.urls();
        let mut url = match first_non_empty(&filter.attributed_to) {
            Some(author) => urls.account_vote_url(author, &item_key),
            None => urls.liked_item_url(&item_key),
        };
        filter.item_key.clear();
        filter.attributed_to.clear();
        filter.max_items = 1;
        filter.append_to(&mut url);

        let response = self.get(url).await?.ensure_ok()?;
        self.translator.vote_from_document(response.document()?)
    }

    async fn load_votes(&self, mut filter: LoadVotesFilter) -> FederationResult<HashMap<Hash, Vote>> {
        filter.max_items = self.page_size(filter.max_items);

        let mut url = self.translator.urls().liked_url();
        filter.append_to(&mut url);

        let collection = self.get_collection(url).await?;
        let mut votes = HashMap::with_capacity(collection.expected_len());
        for vote in self
            .translator
            .decode_collection(collection, ActivityTranslator::vote_from_document)
        {
            if let Some(key) = vote.item.as_ref().map(|item| item.key.clone()) {
                votes.insert(key, vote);
            }
        }

        debug!(loaded = votes.len(), "Loaded votes");
        Ok(votes)
    }

    async fn save_vote(&self, vote: Vote) -> FederationResult<Vote> {
        let activity = self.translator.activity_for_vote(&vote)?;

        let author = vote.submitted_by.as_ref().map_or("", Account::url_id);
        let item_key = vote.item.as_ref().map_or("", vote_target_key);
        let url = self.translator.urls().account_vote_url(author, item_key);

        let body = match &activity {
            ApDocument::Like(like) => serde_json::to_vec(like)?,
            ApDocument::Dislike(dislike) => serde_json::to_vec(dislike)?,
            other => {
                return Err(FederationError::Translation(format!(
                    "{} is not a vote",
                    other.kind()
                )));
            }
        };

        debug!(weight = vote.weight, url = %url, "Saving vote");
        let response = self.send(Method::PUT, url, Some(body)).await?;

        match response.status {
            StatusCode::OK | StatusCode::CREATED => self.translator.vote_from_document(activity),
            status => Err(FederationError::remote_status(status)),
        }
    }

    async fn load_account(&self, filter: LoadAccountsFilter) -> FederationResult<Account> {
        let handle = first_non_empty(&filter.handle)
            .ok_or_else(|| FederationError::InvalidFilter("loading an account requires a handle".to_string()))?;

        let url = self.translator.urls().account_url(handle);
        let response = self.get(url).await?.ensure_ok()?;
        let account = self.translator.account_from_document(response.document()?)?;

        debug!(account = %account.handle, "Loaded account");
        Ok(account)
    }

    async fn load_accounts(&self, mut filter: LoadAccountsFilter) -> FederationResult<Vec<Account>> {
        filter.max_items = self.page_size(filter.max_items);

        let mut url = self.translator.urls().accounts_url();
        filter.append_to(&mut url);

        let collection = self.get_collection(url).await?;
        Ok(self
            .translator
            .decode_collection(collection, ActivityTranslator::account_from_document))
    }

    async fn save_account(&self, account: Account) -> FederationResult<Account> {
        Ok(self.store.save_account(account).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use littr_models::MemoryAccountStore;

    fn repository() -> FederationRepository {
        let config = FederationConfig::new(Url::parse("http://127.0.0.1:9/api").unwrap());
        FederationRepository::new(&config, "test-0.1.0", Arc::new(MemoryAccountStore::new())).unwrap()
    }

    #[test]
    fn test_with_account_leaves_original_untouched() {
        let anonymous = repository();
        let alice = anonymous.with_account(Account::with_handle("alice"));

        assert!(anonymous.account().is_anonymous());
        assert_eq!(alice.account().handle, "alice");
    }

    #[test]
    fn test_page_size_defaults() {
        let repo = repository();
        assert_eq!(repo.page_size(0), 50);
        assert_eq!(repo.page_size(10), 10);
    }

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty(&["a".to_string()]), Some("a"));
        assert_eq!(first_non_empty(&[String::new()]), None);
        assert_eq!(first_non_empty::<String>(&[]), None);
        assert_eq!(first_non_empty(&[Hash::from("h")]), Some("h"));
    }

    #[tokio::test]
    async fn test_save_account_uses_local_store() {
        let repo = repository();
        let saved = repo.save_account(Account::with_handle("alice")).await.unwrap();
        assert_eq!(saved.id, 1);

        let err = repo.save_account(Account::default()).await.unwrap_err();
        assert!(matches!(err, FederationError::AccountStore(_)));
    }
}
