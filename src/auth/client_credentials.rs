//! OAuth2 client credentials token source

use super::source::TokenSource;
use super::types::{Token, TokenResponse};
use crate::error::{Error, Result};
use crate::metadata::MetadataLoader;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Requests tokens with the OAuth2 client credentials grant
///
/// Without an explicit token endpoint, the endpoint is read from the
/// authorization server's RFC 8414 metadata on every request.
#[derive(Debug, Clone)]
pub struct ClientCredentialsTokenSource {
    client_id: String,
    client_secret: String,
    token_url: Option<String>,
    http_client: Client,
    loader: MetadataLoader,
}

impl ClientCredentialsTokenSource {
    /// Create a new client credentials token source
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::with_client(client_id, client_secret, Client::new())
    }

    /// Create a token source with a custom HTTP client
    pub fn with_client(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        http_client: Client,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: None,
            loader: MetadataLoader::with_client(http_client.clone()),
            http_client,
        }
    }

    /// Use a fixed token endpoint instead of authorization server metadata
    #[must_use]
    pub fn token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = Some(token_url.into());
        self
    }

    async fn resolve_token_url(&self, authorization_server: &Url) -> Result<String> {
        if let Some(url) = &self.token_url {
            return Ok(url.clone());
        }

        let metadata = self
            .loader
            .load_authorization_server(authorization_server)
            .await?;
        metadata.token_endpoint.ok_or_else(|| {
            Error::token_source(format!(
                "authorization server {authorization_server} does not advertise a token endpoint"
            ))
        })
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsTokenSource {
    async fn token(
        &self,
        authorization_server: &Url,
        resource: &Url,
        scope: &str,
    ) -> Result<Token> {
        let token_url = self.resolve_token_url(authorization_server).await?;
        debug!(%token_url, %resource, "Requesting client credentials token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", scope),
            ("resource", resource.as_str()),
        ];

        let response = self
            .http_client
            .post(&token_url)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::token_source(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(token_response.into_token())
    }
}
