//! Cryptographic utilities for signed federation requests.
//!
//! Account key material is stored as PEM text tagged with an algorithm id
//! (`id-rsa`, `id-ecdsa`). Only RSA keys can currently sign requests.
//!
//! # Examples
//!
//! ```
//! use littr_common::crypto::{generate_rsa_keypair, parse_private_key, parse_public_key};
//!
//! let keypair = generate_rsa_keypair().expect("Failed to generate keypair");
//!
//! assert!(keypair.public_key_pem.contains("BEGIN PUBLIC KEY"));
//! assert!(keypair.private_key_pem.contains("BEGIN PRIVATE KEY"));
//!
//! let _private = parse_private_key(&keypair.private_key_pem).expect("Failed to parse");
//! let _public = parse_public_key(&keypair.public_key_pem).expect("Failed to parse");
//! ```

use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding},
};

use crate::{AppError, AppResult};

/// Key id tagging RSA key material.
pub const KEY_ID_RSA: &str = "id-rsa";

/// Key id tagging ECDSA key material.
pub const KEY_ID_ECDSA: &str = "id-ecdsa";

/// RSA key pair used to sign outgoing requests.
#[derive(Debug, Clone)]
pub struct RsaKeypair {
    /// Public key in PEM format (SPKI encoding).
    pub public_key_pem: String,
    /// Private key in PEM format (PKCS#8 encoding).
    pub private_key_pem: String,
}

/// Default RSA key size (2048 bits).
const RSA_KEY_SIZE: usize = 2048;

/// Generate a new 2048-bit RSA key pair.
///
/// The private key uses PKCS#8 encoding and the public key uses SPKI encoding.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if key generation or PEM encoding fails.
pub fn generate_rsa_keypair() -> AppResult<RsaKeypair> {
    let mut rng = rand::thread_rng();

    let private_key = RsaPrivateKey::new(&mut rng, RSA_KEY_SIZE)
        .map_err(|e| AppError::Internal(format!("Failed to generate RSA key: {e}")))?;

    let public_key = RsaPublicKey::from(&private_key);

    let private_key_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| AppError::Internal(format!("Failed to encode private key: {e}")))?
        .to_string();

    let public_key_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| AppError::Internal(format!("Failed to encode public key: {e}")))?;

    Ok(RsaKeypair {
        public_key_pem,
        private_key_pem,
    })
}

/// Parse a PKCS#8 PEM encoded RSA private key.
pub fn parse_private_key(pem: &str) -> AppResult<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .map_err(|e| AppError::Internal(format!("Failed to parse private key: {e}")))
}

/// Parse an SPKI PEM encoded RSA public key.
pub fn parse_public_key(pem: &str) -> AppResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .map_err(|e| AppError::Internal(format!("Failed to parse public key: {e}")))
}
