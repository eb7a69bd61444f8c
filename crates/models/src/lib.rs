//! Domain model for littr.
//!
//! - **Items**: content nodes addressed by a SHA-256 content key and placed in
//!   a reply tree by their [`ThreadPath`]
//! - **Accounts**: authors and actors, including the anonymous sentinel
//! - **Votes**: a single signed weight from one account toward one item
//! - **Filters**: load filters serialised to federation query strings
//! - **Store**: the local account store seam

pub mod account;
pub mod content;
pub mod filter;
pub mod hash;
pub mod item;
pub mod path;
pub mod store;
pub mod vote;

pub use account::{ANONYMOUS_HANDLE, Account, AccountKey, AccountMetadata};
pub use content::ContentAddresser;
pub use filter::{LoadAccountsFilter, LoadItemsFilter, LoadVotesFilter, QueryFilter};
pub use hash::{Hash, KEY_LEN, KeyError};
pub use item::{Flags, Item, ItemMetadata, MIME_TYPE_URL};
pub use path::ThreadPath;
pub use store::{AccountStore, MemoryAccountStore};
pub use vote::Vote;
