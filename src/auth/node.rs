//! Identity node token source
//!
//! Asks the internal API of a local identity node to obtain a service access
//! token on behalf of a subject. The node performs the actual exchange with
//! the remote authorization server.

use super::source::TokenSource;
use super::types::{Token, TokenResponse};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Supplies additional credentials presented when requesting a token
pub trait CredentialProvider: Send + Sync {
    /// Credentials to include, as opaque JSON documents
    fn credentials(&self) -> Vec<Value>;
}

/// Fixed list of credentials
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub Vec<Value>);

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Vec<Value> {
        self.0.clone()
    }
}

#[derive(Debug, Serialize)]
struct ServiceAccessTokenRequest<'a> {
    authorization_server: &'a str,
    scope: &'a str,
    token_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    credentials: Option<Vec<Value>>,
}

/// Obtains service access tokens through an identity node
#[derive(Clone)]
pub struct NodeTokenSource {
    api_url: String,
    subject: String,
    http_client: Client,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl NodeTokenSource {
    /// Create a token source for `subject` using the node API at `api_url`
    pub fn new(api_url: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            subject: subject.into(),
            http_client: Client::new(),
            credentials: None,
        }
    }

    /// Use a custom HTTP client to talk to the node
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Present additional credentials with every token request
    #[must_use]
    pub fn credentials(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credentials = Some(Arc::new(provider));
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/internal/auth/v2/{}/request-service-access-token",
            self.api_url.trim_end_matches('/'),
            self.subject
        )
    }
}

#[async_trait]
impl TokenSource for NodeTokenSource {
    async fn token(
        &self,
        authorization_server: &Url,
        resource: &Url,
        scope: &str,
    ) -> Result<Token> {
        if self.subject.is_empty() {
            return Err(Error::token_source("subject is required"));
        }

        let body = ServiceAccessTokenRequest {
            authorization_server: authorization_server.as_str(),
            scope,
            token_type: "Bearer",
            credentials: self.credentials.as_ref().map(|p| p.credentials()),
        };

        let endpoint = self.endpoint();
        debug!(%endpoint, %resource, "Requesting service access token from node");

        let response = self.http_client.post(&endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::token_source(format!(
                "failed service access token response (status={status}): {body}"
            )));
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(token_response.into_token())
    }
}

impl std::fmt::Debug for NodeTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeTokenSource")
            .field("api_url", &self.api_url)
            .field("subject", &self.subject)
            .field("has_credentials", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}
