//! Metadata document types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Well-known document name for protected resource metadata
pub const PROTECTED_RESOURCE_METADATA_PATH: &str = "oauth-protected-resource";

/// Well-known document name for authorization server metadata
pub const AUTHORIZATION_SERVER_METADATA_PATH: &str = "oauth-authorization-server";

/// Metadata about a protected resource (draft-ietf-oauth-resource-metadata)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedResourceMetadata {
    /// Resource identifier of the protected resource
    #[serde(default)]
    pub resource: String,

    /// Issuer identifiers of the authorization servers usable with this resource
    #[serde(default)]
    pub authorization_servers: Vec<String>,

    /// Supported ways of presenting a bearer token: `header`, `body`, `query`
    #[serde(default)]
    pub bearer_methods_supported: BTreeSet<String>,

    /// Scopes the resource advertises, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes_supported: Option<Vec<String>>,
}

/// Metadata about an OAuth2 authorization server (RFC 8414)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationServerMetadata {
    /// Issuer identifier
    #[serde(default)]
    pub issuer: String,

    /// URL of the authorization endpoint
    #[serde(default)]
    pub authorization_endpoint: String,

    /// URL of the token endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_endpoint: Option<String>,
}
