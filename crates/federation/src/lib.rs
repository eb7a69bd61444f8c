//! ActivityPub federation for littr.
//!
//! This crate mirrors littr content to and from a federation endpoint:
//!
//! - **Objects**: the closed set of wire documents ([`ApDocument`])
//! - **Activities**: Create, Update, Like, Dislike
//! - **Actors**: Person actor implementation
//! - **Convert**: [`ActivityTranslator`] between documents and domain entities
//! - **Signature**: HTTP signatures for outgoing requests ([`RequestSigner`])
//! - **Repository**: [`FederationRepository`], the load/save contract
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use littr_common::Config;
//! use littr_federation::{FederationRepository, Repository};
//! use littr_models::{LoadItemsFilter, MemoryAccountStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let repository = FederationRepository::from_config(&config, Arc::new(MemoryAccountStore::new()))?;
//!
//! let items = repository.load_items(LoadItemsFilter::default()).await?;
//! println!("loaded {} items", items.len());
//! # Ok(())
//! # }
//! ```

pub mod activities;
pub mod actors;
pub mod client;
pub mod convert;
pub mod error;
pub mod objects;
pub mod repository;
pub mod signature;

pub use activities::*;
pub use actors::*;
pub use client::{ApClient, ApResponse};
pub use convert::*;
pub use error::{FederationError, FederationResult, RemoteStatusReason};
pub use objects::*;
pub use repository::{FederationRepository, Repository};
pub use signature::{
    HttpSigner, HttpVerifier, RequestSigner, SignatureComponents, SignatureError, calculate_digest,
    verify_digest,
};
