//! Authorization server locator module
//!
//! Supports: static authorization server, protected resource metadata discovery
//!
//! # Overview
//!
//! When a resource server answers `401 Unauthorized`, the transport asks a
//! `LocatorChain` which authorization server to obtain a token from. Each
//! strategy in the chain either names a server, declines (`None`) or fails.
//! The first strategy naming a server wins.

mod strategies;
mod types;

pub use strategies::{metadata_url, LocatorChain, ProtectedResourceMetadataLocator, StaticLocator};
pub use types::{AuthorizationServerLocator, UnauthorizedResponse};
