//! Authorization server locator implementations

use super::types::{AuthorizationServerLocator, UnauthorizedResponse};
use crate::challenge::{parse_challenge_parameters, RESOURCE_METADATA_PARAM};
use crate::error::{Error, Result};
use crate::metadata::{
    well_known_url, MetadataLoader, ProtectedResourceMetadata, PROTECTED_RESOURCE_METADATA_PATH,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use url::Url;

// ============================================================================
// Static
// ============================================================================

/// Always names the same authorization server, without any discovery
#[derive(Debug, Clone)]
pub struct StaticLocator {
    url: Url,
}

impl StaticLocator {
    /// Create a new static locator
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}

#[async_trait]
impl AuthorizationServerLocator for StaticLocator {
    async fn locate(
        &self,
        _loader: &MetadataLoader,
        _response: &UnauthorizedResponse,
    ) -> Result<Option<Url>> {
        Ok(Some(self.url.clone()))
    }
}

// ============================================================================
// Protected Resource Metadata
// ============================================================================

/// Discovers the authorization server from protected resource metadata
///
/// The metadata document is located through, in order:
/// - the resource URI hint attached to the request
/// - the `resource_metadata` parameter of the `WWW-Authenticate` challenge
///
/// The document must list exactly one authorization server.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtectedResourceMetadataLocator;

#[async_trait]
impl AuthorizationServerLocator for ProtectedResourceMetadataLocator {
    async fn locate(
        &self,
        loader: &MetadataLoader,
        response: &UnauthorizedResponse,
    ) -> Result<Option<Url>> {
        let Some(metadata_url) = metadata_url(response)? else {
            debug!(
                url = %response.request_url,
                "No protected resource metadata location available"
            );
            return Ok(None);
        };

        let metadata: ProtectedResourceMetadata = loader.load(metadata_url.as_str()).await?;

        // Multiple servers have no tie-break rule, so they are rejected
        let [server] = metadata.authorization_servers.as_slice() else {
            return Err(Error::AmbiguousAuthorizationServer {
                count: metadata.authorization_servers.len(),
            });
        };

        let server = Url::parse(server)?;
        debug!(%metadata_url, authorization_server = %server, "Located authorization server");
        Ok(Some(server))
    }
}

/// Determine where the protected resource metadata of a rejected request lives
///
/// A `resource_metadata` challenge value may be relative; it is resolved
/// against the URL of the rejected request.
pub fn metadata_url(response: &UnauthorizedResponse) -> Result<Option<Url>> {
    if let Some(resource_uri) = &response.resource_uri {
        return well_known_url(resource_uri, PROTECTED_RESOURCE_METADATA_PATH).map(Some);
    }

    let Some(header) = response.www_authenticate() else {
        return Ok(None);
    };

    match parse_challenge_parameters(header).get(RESOURCE_METADATA_PARAM) {
        Some(value) => Ok(Some(response.request_url.join(value)?)),
        None => Ok(None),
    }
}

// ============================================================================
// Chain
// ============================================================================

/// Ordered list of locators; the first one naming a server wins
#[derive(Clone, Default)]
pub struct LocatorChain {
    locators: Vec<Arc<dyn AuthorizationServerLocator>>,
}

impl LocatorChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain with only protected resource metadata discovery
    pub fn discovery() -> Self {
        Self::new().with(ProtectedResourceMetadataLocator)
    }

    /// Chain with a single fixed authorization server
    pub fn fixed(url: Url) -> Self {
        Self::new().with(StaticLocator::new(url))
    }

    /// Append a locator to the chain
    #[must_use]
    pub fn with(mut self, locator: impl AuthorizationServerLocator + 'static) -> Self {
        self.locators.push(Arc::new(locator));
        self
    }

    /// Append a shared locator to the chain
    #[must_use]
    pub fn with_arc(mut self, locator: Arc<dyn AuthorizationServerLocator>) -> Self {
        self.locators.push(locator);
        self
    }

    /// Number of locators in the chain
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    /// Check if the chain has no locators
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Run the locators in order
    ///
    /// A locator error stops the chain. If every locator declines, the result
    /// is [`Error::AuthorizationServerNotFound`].
    pub async fn locate(
        &self,
        loader: &MetadataLoader,
        response: &UnauthorizedResponse,
    ) -> Result<Url> {
        for locator in &self.locators {
            if let Some(url) = locator.locate(loader, response).await? {
                return Ok(url);
            }
        }
        Err(Error::AuthorizationServerNotFound)
    }
}

impl std::fmt::Debug for LocatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocatorChain")
            .field("locators", &self.locators.len())
            .finish()
    }
}
