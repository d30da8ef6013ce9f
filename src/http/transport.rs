//! Authenticating transport
//!
//! Sends a request unmodified. On `401 Unauthorized` it locates the
//! authorization server, acquires a token and re-sends the request exactly
//! once with `Authorization: <token_type> <access_token>`. Whatever the retry
//! yields is returned, including another `401`.

use super::config::{RequestOptions, TransportConfig};
use super::sender::HttpSender;
use crate::auth::{Token, TokenSource};
use crate::error::{Error, Result};
use crate::locator::{LocatorChain, UnauthorizedResponse};
use crate::metadata::MetadataLoader;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, Request, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// HTTP transport that authenticates against OAuth2 protected resources
///
/// Holds no per-request state, so one instance can serve concurrent callers.
#[derive(Clone)]
pub struct AuthenticatingTransport {
    sender: Arc<dyn HttpSender>,
    token_source: Arc<dyn TokenSource>,
    locators: LocatorChain,
    loader: MetadataLoader,
    config: TransportConfig,
}

impl AuthenticatingTransport {
    /// Create a transport using discovery and a default HTTP client
    pub fn new(token_source: impl TokenSource + 'static, config: TransportConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            sender: Arc::new(client.clone()),
            token_source: Arc::new(token_source),
            locators: LocatorChain::discovery(),
            loader: MetadataLoader::with_client(client),
            config,
        })
    }

    /// Replace the underlying transport
    #[must_use]
    pub fn with_sender(mut self, sender: impl HttpSender + 'static) -> Self {
        self.sender = Arc::new(sender);
        self
    }

    /// Replace the authorization server locators
    #[must_use]
    pub fn with_locators(mut self, locators: LocatorChain) -> Self {
        self.locators = locators;
        self
    }

    /// Replace the metadata loader
    #[must_use]
    pub fn with_metadata_loader(mut self, loader: MetadataLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Get the transport config
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Send a GET request with default options
    pub async fn get(&self, url: &str) -> Result<Response> {
        let request = Request::new(Method::GET, Url::parse(url)?);
        self.send(&request, &RequestOptions::default()).await
    }

    /// Send a request with default options
    pub async fn execute(&self, request: &Request) -> Result<Response> {
        self.send(request, &RequestOptions::default()).await
    }

    /// Send a request, authenticating and retrying once on `401`
    ///
    /// The caller's request is never modified; the transport sends clones of
    /// it. Its body must therefore be buffered, streaming bodies are rejected
    /// with [`Error::UnbufferedBody`] before anything is sent.
    pub async fn send(&self, request: &Request, options: &RequestOptions) -> Result<Response> {
        let timeout = options.timeout.unwrap_or(self.config.timeout);
        tokio::time::timeout(timeout, self.round_trip(request, options))
            .await
            .unwrap_or_else(|_| {
                warn!(url = %request.url(), ?timeout, "Request deadline elapsed");
                Err(Error::Timeout {
                    timeout_ms: timeout_ms(timeout),
                })
            })
    }

    async fn round_trip(&self, request: &Request, options: &RequestOptions) -> Result<Response> {
        let first = self.prepare(request)?;
        let response = self.sender.send(first).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            debug!(
                url = %request.url(),
                status = response.status().as_u16(),
                "Passing response through"
            );
            return Ok(response);
        }

        // The 401 itself is discarded; only its challenge headers are needed
        let headers = response.headers().clone();
        drop(response);
        let token = self.authenticate(request.url(), &headers, options).await?;

        let mut retry = self.prepare(request)?;
        let value = HeaderValue::from_str(&token.authorization_value()).map_err(|e| {
            Error::token_acquisition(
                request.url().as_str(),
                Error::token_source(format!("token is not a valid header value: {e}")),
            )
        })?;
        retry.headers_mut().insert(AUTHORIZATION, value);

        debug!(url = %request.url(), "Retrying request with access token");
        self.sender.send(retry).await
    }

    /// Locate the authorization server for a `401` response
    pub async fn discover(
        &self,
        request_url: &Url,
        headers: &HeaderMap,
        options: &RequestOptions,
    ) -> Result<Url> {
        let mut unauthorized = UnauthorizedResponse::new(request_url.clone(), headers.clone());
        if let Some(resource_uri) = &options.resource_uri {
            unauthorized = unauthorized.with_resource_uri(resource_uri.clone());
        }

        self.locators
            .locate(&self.loader, &unauthorized)
            .await
            .map_err(|e| {
                warn!(url = %request_url, error = %e, "Authorization server discovery failed");
                Error::discovery(request_url.as_str(), e)
            })
    }

    async fn authenticate(
        &self,
        request_url: &Url,
        headers: &HeaderMap,
        options: &RequestOptions,
    ) -> Result<Token> {
        let authorization_server = self.discover(request_url, headers, options).await?;

        let scope = options.scope.as_deref().unwrap_or(&self.config.scope);
        if scope.is_empty() {
            return Err(Error::token_acquisition(
                request_url.as_str(),
                Error::MissingScope,
            ));
        }

        info!(
            resource = %request_url,
            %authorization_server,
            scope,
            "Acquiring access token"
        );
        self.token_source
            .token(&authorization_server, request_url, scope)
            .await
            .map_err(|e| {
                warn!(url = %request_url, error = %e, "Token acquisition failed");
                Error::token_acquisition(request_url.as_str(), e)
            })
    }

    /// Clone the caller's request and add default headers it lacks
    fn prepare(&self, request: &Request) -> Result<Request> {
        let mut request = request.try_clone().ok_or(Error::UnbufferedBody)?;

        for (key, value) in &self.config.default_headers {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    request.headers_mut().entry(name).or_insert(value);
                }
                _ => warn!(header = %key, "Skipping invalid default header"),
            }
        }
        Ok(request)
    }
}

impl std::fmt::Debug for AuthenticatingTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatingTransport")
            .field("config", &self.config)
            .field("locators", &self.locators)
            .finish_non_exhaustive()
    }
}

fn timeout_ms(timeout: Duration) -> u64 {
    timeout.as_millis() as u64
}
