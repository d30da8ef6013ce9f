//! Locator types

use crate::error::Result;
use crate::metadata::MetadataLoader;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, WWW_AUTHENTICATE};
use url::Url;

/// The parts of a failed exchange a locator may inspect
#[derive(Debug, Clone)]
pub struct UnauthorizedResponse {
    /// URL of the request that was rejected
    pub request_url: Url,
    /// Resource URI hint the caller attached to the request
    pub resource_uri: Option<Url>,
    /// Headers of the `401` response
    pub headers: HeaderMap,
}

impl UnauthorizedResponse {
    /// Create a new unauthorized response description
    pub fn new(request_url: Url, headers: HeaderMap) -> Self {
        Self {
            request_url,
            resource_uri: None,
            headers,
        }
    }

    /// Attach a resource URI hint
    #[must_use]
    pub fn with_resource_uri(mut self, resource_uri: Url) -> Self {
        self.resource_uri = Some(resource_uri);
        self
    }

    /// Value of the `WWW-Authenticate` header, if present and valid UTF-8
    pub fn www_authenticate(&self) -> Option<&str> {
        self.headers
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Strategy determining the authorization server for a rejected request
///
/// Returns `Ok(None)` when the strategy does not apply.
#[async_trait]
pub trait AuthorizationServerLocator: Send + Sync {
    /// Determine the authorization server URL
    async fn locate(
        &self,
        loader: &MetadataLoader,
        response: &UnauthorizedResponse,
    ) -> Result<Option<Url>>;
}
