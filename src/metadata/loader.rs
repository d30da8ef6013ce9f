//! Metadata loader
//!
//! Each call performs exactly one GET. There is no retry and no caching, so
//! repeated discovery against the same resource fetches the document again.

use super::types::{AuthorizationServerMetadata, AUTHORIZATION_SERVER_METADATA_PATH};
use crate::error::{Error, Result};
use bytes::BytesMut;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::{ParseError, Url};

/// Maximum number of body bytes read from a metadata response (1 MiB)
pub const MAX_METADATA_SIZE: usize = 1 << 20;

/// Loads JSON metadata documents over plain (unauthenticated) HTTP
#[derive(Debug, Clone, Default)]
pub struct MetadataLoader {
    client: Client,
}

impl MetadataLoader {
    /// Create a loader with a default HTTP client
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch `url` and decode the body into `T`
    pub async fn load<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "Fetching metadata");

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::metadata_transport(url, e))?;

        let status = response.status();
        let body = read_limited(&mut response, MAX_METADATA_SIZE)
            .await
            .map_err(|e| Error::metadata_transport(url, e))?;

        if !status.is_success() {
            return Err(Error::metadata_fetch(
                url,
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        serde_json::from_slice(&body).map_err(|source| Error::MetadataParse {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch the RFC 8414 metadata of an authorization server
    pub async fn load_authorization_server(
        &self,
        issuer: &Url,
    ) -> Result<AuthorizationServerMetadata> {
        let url = well_known_url(issuer, AUTHORIZATION_SERVER_METADATA_PATH)?;
        self.load(url.as_str()).await
    }
}

/// Append `/.well-known/<document>` to the path of `base`
pub fn well_known_url(base: &Url, document: &str) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| Error::InvalidUrl(ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend([".well-known", document]);
    Ok(url)
}

/// Read at most `limit` bytes of the body; anything beyond is dropped
async fn read_limited(response: &mut Response, limit: usize) -> reqwest::Result<BytesMut> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = response.chunk().await? {
        let remaining = limit - buf.len();
        if chunk.len() >= remaining {
            buf.extend_from_slice(&chunk[..remaining]);
            break;
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}
