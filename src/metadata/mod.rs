//! Metadata module
//!
//! Fetches and decodes the JSON metadata documents used during discovery.
//!
//! # Overview
//!
//! - `MetadataLoader` - plain GET, size-bounded read, status check, JSON decode
//! - `ProtectedResourceMetadata` - document published by a resource server
//! - `AuthorizationServerMetadata` - document published by an authorization server

mod loader;
mod types;

pub use loader::{well_known_url, MetadataLoader, MAX_METADATA_SIZE};
pub use types::{
    AuthorizationServerMetadata, ProtectedResourceMetadata, AUTHORIZATION_SERVER_METADATA_PATH,
    PROTECTED_RESOURCE_METADATA_PATH,
};

#[cfg(test)]
mod tests;
