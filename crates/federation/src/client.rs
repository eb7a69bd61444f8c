//! HTTP transport for federation requests.
//!
//! Builds requests against the federation endpoint and executes them,
//! reading every response body to the end before returning.

use std::time::Duration;

use bytes::Bytes;
use littr_common::FederationConfig;
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{Client, Method, Request, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::error::{FederationError, FederationResult};
use crate::objects::{ACTIVITY_CONTENT_TYPE, ApDocument};

const ACCEPT_ACTIVITY: &str = "application/activity+json, application/ld+json, application/json";

/// Shared HTTP transport.
#[derive(Clone, Debug)]
pub struct ApClient {
    client: Client,
    user_agent: String,
}

impl ApClient {
    /// Create a new client with the configured timeouts.
    pub fn new(config: &FederationConfig, user_agent: impl Into<String>) -> FederationResult<Self> {
        let user_agent = user_agent.into();
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(user_agent.clone())
            .build()?;

        Ok(Self { client, user_agent })
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Build a request. A body is sent as an activity document.
    pub fn build(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> FederationResult<Request> {
        let mut builder = self.client.request(method, url).header(ACCEPT, ACCEPT_ACTIVITY);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, ACTIVITY_CONTENT_TYPE).body(body);
        }
        Ok(builder.build()?)
    }

    /// Execute a request and read the whole response.
    pub async fn execute(&self, request: Request) -> FederationResult<ApResponse> {
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.client.execute(request).await.map_err(|e| {
            warn!(method = %method, url = %url, error = %e, "Request failed");
            FederationError::Transport(e)
        })?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        debug!(method = %method, url = %url, status = %status, bytes = body.len(), "Received response");

        Ok(ApResponse {
            status,
            location,
            body,
        })
    }
}

/// A fully read response.
#[derive(Debug, Clone)]
pub struct ApResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Bytes,
}

impl ApResponse {
    /// Fail unless the status is `200 OK`.
    pub fn ensure_ok(self) -> FederationResult<Self> {
        if self.status == StatusCode::OK {
            Ok(self)
        } else {
            Err(FederationError::remote_status(self.status))
        }
    }

    /// Decode the body as a wire document.
    pub fn document(&self) -> FederationResult<ApDocument> {
        ApDocument::from_slice(&self.body)
    }

    /// Whether the body is empty or whitespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Last path segment of the `Location` header.
    #[must_use]
    pub fn location_key(&self) -> Option<&str> {
        let location = self.location.as_deref()?;
        let path = location.split(['?', '#']).next().unwrap_or_default();
        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}
