//! Common utilities and shared types for littr.
//!
//! This crate provides foundational components used across the littr crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Cryptography**: RSA key material for signed federation requests
//! - **Telemetry**: `tracing` subscriber installation
//!
//! # Example
//!
//! ```no_run
//! use littr_common::{AppResult, Config, telemetry};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     telemetry::init_tracing(&config.logging);
//!     println!("federating with {}", config.federation.base_url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod telemetry;

pub use self::config::{Config, FederationConfig, InstanceConfig, LoggingConfig, MAX_CONTENT_ITEMS};
pub use crypto::{KEY_ID_ECDSA, KEY_ID_RSA, RsaKeypair, generate_rsa_keypair};
pub use error::{AppError, AppResult};
