//! Local account store.
//!
//! Account persistence stays local; the federation repository only forwards
//! saves to whatever store it was built with.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use littr_common::{AppError, AppResult};
use tokio::sync::RwLock;
use tracing::debug;

use crate::Account;

/// Persistence seam for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert or update an account, returning the stored version.
    async fn save_account(&self, account: Account) -> AppResult<Account>;

    /// Look an account up by handle.
    async fn find_by_handle(&self, handle: &str) -> AppResult<Option<Account>>;
}

/// In-memory store keyed by handle.
#[derive(Debug)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
    next_id: AtomicI64,
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl MemoryAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn save_account(&self, mut account: Account) -> AppResult<Account> {
        if account.handle.is_empty() {
            return Err(AppError::Validation("account handle is required".to_string()));
        }

        let mut accounts = self.accounts.write().await;
        let now = Utc::now();
        match accounts.get(&account.handle) {
            Some(existing) => {
                account.id = existing.id;
                account.created_at = existing.created_at;
            }
            None => {
                account.id = self.next_id.fetch_add(1, Ordering::Relaxed);
                account.created_at = Some(account.created_at.unwrap_or(now));
            }
        }
        account.updated_at = Some(now);

        debug!(handle = %account.handle, id = account.id, "Saved account");
        accounts.insert(account.handle.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_handle(&self, handle: &str) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(handle).cloned())
    }
}
