//! HTTP Signature implementation for federation requests.
//!
//! Implements draft-cavage-http-signatures (`rsa-sha256`) for signing
//! outgoing requests and verifying signed ones.

use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use littr_common::{KEY_ID_RSA, crypto::parse_private_key};
use littr_models::Account;
use pkcs8::{DecodePrivateKey, DecodePublicKey};
use reqwest::Request;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs1v15::{SigningKey, VerifyingKey},
};
use sha2::{Digest, Sha256};
use signature::{SignatureEncoding, Signer, Verifier};
use tracing::{debug, warn};
use url::Url;

use crate::convert::ActivityTranslator;
use crate::error::{FederationError, FederationResult};

/// HTTP Signature error.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Signing failed: {0}")]
    SigningFailed(String),
    #[error("Verification failed: {0}")]
    VerificationFailed(String),
    #[error("Missing header: {0}")]
    MissingHeader(String),
    #[error("Invalid signature header")]
    InvalidSignatureHeader,
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

fn header_value(value: &str) -> Result<HeaderValue, SignatureError> {
    HeaderValue::from_str(value).map_err(|e| SignatureError::SigningFailed(e.to_string()))
}

/// Host as sent in the `Host` header: with the port when it is not the
/// scheme's default.
fn host_header(url: &Url) -> Result<String, SignatureError> {
    let host = url
        .host_str()
        .ok_or_else(|| SignatureError::InvalidUrl("No host in URL".to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

fn request_target(method: &str, url: &Url) -> String {
    let query = url.query().map_or(String::new(), |q| format!("?{q}"));
    format!("{} {}{query}", method.to_lowercase(), url.path())
}

/// HTTP Signature signer for outgoing requests.
pub struct HttpSigner {
    private_key: RsaPrivateKey,
    key_id: String,
}

impl HttpSigner {
    /// Create a new HTTP signer from a PEM-encoded private key.
    pub fn new(private_key_pem: &str, key_id: String) -> Result<Self, SignatureError> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(private_key_pem)
            .map_err(|e| SignatureError::InvalidPrivateKey(e.to_string()))?;

        Ok(Self::from_key(private_key, key_id))
    }

    /// Create a new HTTP signer from a parsed key.
    #[must_use]
    pub const fn from_key(private_key: RsaPrivateKey, key_id: String) -> Self {
        Self {
            private_key,
            key_id,
        }
    }

    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Sign an HTTP request and return the signature headers.
    ///
    /// Signs `(request-target)`, `host`, `date` and, when a body is present,
    /// `digest`.
    pub fn sign_request(
        &self,
        method: &str,
        url: &Url,
        body: Option<&[u8]>,
    ) -> Result<HeaderMap, SignatureError> {
        let host = host_header(url)?;
        let target = request_target(method, url);
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let digest = body.map(calculate_digest);

        let mut signed_headers = vec!["(request-target)", "host", "date"];
        if digest.is_some() {
            signed_headers.push("digest");
        }

        let signing_string = signed_headers
            .iter()
            .map(|header| {
                let value = match *header {
                    "(request-target)" => target.as_str(),
                    "host" => host.as_str(),
                    "date" => date.as_str(),
                    _ => digest.as_deref().unwrap_or_default(),
                };
                format!("{header}: {value}")
            })
            .collect::<Vec<_>>()
            .join("\n");

        debug!(signing_string = %signing_string, "Signing string");

        let signing_key = SigningKey::<Sha256>::new(self.private_key.clone());
        let signature_bytes = signing_key
            .try_sign(signing_string.as_bytes())
            .map_err(|e| SignatureError::SigningFailed(e.to_string()))?;
        let signature = BASE64.encode(signature_bytes.to_bytes());

        let signature_header = format!(
            "keyId=\"{}\",algorithm=\"rsa-sha256\",headers=\"{}\",signature=\"{}\"",
            self.key_id,
            signed_headers.join(" "),
            signature
        );

        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::HOST, header_value(&host)?);
        headers.insert(reqwest::header::DATE, header_value(&date)?);
        if let Some(ref d) = digest {
            headers.insert(HeaderName::from_static("digest"), header_value(d)?);
        }
        headers.insert(HeaderName::from_static("signature"), header_value(&signature_header)?);

        Ok(headers)
    }

    /// Sign `request` in place.
    pub fn sign(&self, request: &mut Request) -> Result<(), SignatureError> {
        let body = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .map(<[u8]>::to_vec);
        let headers = self.sign_request(request.method().as_str(), request.url(), body.as_deref())?;
        request.headers_mut().extend(headers);
        Ok(())
    }
}

/// Signs outgoing requests on behalf of the acting account.
#[derive(Clone, Debug)]
pub struct RequestSigner {
    translator: ActivityTranslator,
}

impl RequestSigner {
    #[must_use]
    pub const fn new(translator: ActivityTranslator) -> Self {
        Self { translator }
    }

    /// Sign `request` as `account`.
    ///
    /// The anonymous account never signs, so this succeeds without touching
    /// the request.
    ///
    /// # Errors
    ///
    /// [`FederationError::UnsupportedKey`] for key material that is not RSA,
    /// [`FederationError::InvalidKey`] when the account has no usable private
    /// key.
    pub fn sign(&self, request: &mut Request, account: &Account) -> FederationResult<()> {
        if account.is_anonymous() {
            return Ok(());
        }

        let key = account.key().ok_or_else(|| {
            FederationError::InvalidKey(format!("account {} has no key", account.handle))
        })?;
        if key.id != KEY_ID_RSA {
            return Err(FederationError::UnsupportedKey(key.id.clone()));
        }
        let pem = key.private.as_deref().ok_or_else(|| {
            FederationError::InvalidKey(format!("account {} has no private key", account.handle))
        })?;
        let private_key =
            parse_private_key(pem).map_err(|e| FederationError::InvalidKey(e.to_string()))?;

        let actor = self.translator.actor_for(account);
        HttpSigner::from_key(private_key, actor.key_id()).sign(request)?;

        debug!(
            account = %account.handle,
            method = %request.method(),
            url = %request.url(),
            "Signed request"
        );
        Ok(())
    }
}

/// HTTP Signature verifier for incoming requests.
pub struct HttpVerifier;

impl HttpVerifier {
    /// Parse the Signature header into components.
    pub fn parse_signature_header(header: &str) -> Result<SignatureComponents, SignatureError> {
        let mut key_id = None;
        let mut algorithm = None;
        let mut headers_list = None;
        let mut signature = None;

        for part in header.split(',') {
            if let Some((key, value)) = part.trim().split_once('=') {
                let value = value.trim_matches('"');
                match key {
                    "keyId" => key_id = Some(value.to_string()),
                    "algorithm" => algorithm = Some(value.to_string()),
                    "headers" => headers_list = Some(value.to_string()),
                    "signature" => signature = Some(value.to_string()),
                    _ => {}
                }
            }
        }

        Ok(SignatureComponents {
            key_id: key_id.ok_or(SignatureError::InvalidSignatureHeader)?,
            algorithm: algorithm.unwrap_or_else(|| "rsa-sha256".to_string()),
            headers: headers_list
                .unwrap_or_else(|| "date".to_string())
                .split(' ')
                .map(String::from)
                .collect(),
            signature: signature.ok_or(SignatureError::InvalidSignatureHeader)?,
        })
    }

    /// Verify an HTTP signature using the given public key.
    ///
    /// `target` is the path plus query of the request; `headers` are keyed
    /// by lowercase name.
    pub fn verify(
        public_key_pem: &str,
        components: &SignatureComponents,
        method: &str,
        target: &str,
        headers: &HashMap<String, String>,
    ) -> Result<bool, SignatureError> {
        let public_key = RsaPublicKey::from_public_key_pem(public_key_pem)
            .map_err(|e| SignatureError::InvalidPublicKey(e.to_string()))?;

        let mut signing_parts = Vec::with_capacity(components.headers.len());
        for header in &components.headers {
            let value = match header.as_str() {
                "(request-target)" => format!("{} {target}", method.to_lowercase()),
                h => headers
                    .get(h)
                    .ok_or_else(|| SignatureError::MissingHeader(h.to_string()))?
                    .clone(),
            };
            signing_parts.push(format!("{header}: {value}"));
        }
        let signing_string = signing_parts.join("\n");

        debug!(signing_string = %signing_string, "Verifying signing string");

        let signature_bytes = BASE64
            .decode(&components.signature)
            .map_err(|e| SignatureError::VerificationFailed(e.to_string()))?;

        let verifying_key = VerifyingKey::<Sha256>::new(public_key);
        let signature = rsa::pkcs1v15::Signature::try_from(signature_bytes.as_slice())
            .map_err(|e| SignatureError::VerificationFailed(e.to_string()))?;

        match verifying_key.verify(signing_string.as_bytes(), &signature) {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(error = %e, "Signature verification failed");
                Ok(false)
            }
        }
    }

    /// Verify a signed request as it would arrive: signature, and the body
    /// digest when one is present.
    pub fn verify_request(public_key_pem: &str, request: &Request) -> Result<bool, SignatureError> {
        let header = request
            .headers()
            .get("signature")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SignatureError::MissingHeader("signature".to_string()))?;
        let components = Self::parse_signature_header(header)?;

        let headers: HashMap<String, String> = request
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        if let (Some(body), Some(digest)) = (
            request.body().and_then(reqwest::Body::as_bytes),
            headers.get("digest"),
        ) && !verify_digest(body, digest)
        {
            warn!("Digest does not match body");
            return Ok(false);
        }

        let target = request_target(request.method().as_str(), request.url());
        let target = target.split_once(' ').map_or("", |(_, t)| t);

        Self::verify(
            public_key_pem,
            &components,
            request.method().as_str(),
            target,
            &headers,
        )
    }
}

/// Parsed signature header components.
#[derive(Debug, Clone)]
pub struct SignatureComponents {
    pub key_id: String,
    pub algorithm: String,
    pub headers: Vec<String>,
    pub signature: String,
}

/// Calculate SHA-256 digest of a body.
#[must_use]
pub fn calculate_digest(body: &[u8]) -> String {
    let hash = Sha256::digest(body);
    format!("SHA-256={}", BASE64.encode(hash))
}

/// Verify that a digest header matches the body.
#[must_use]
pub fn verify_digest(body: &[u8], digest_header: &str) -> bool {
    calculate_digest(body) == digest_header
}
