//! Error types for bearer-client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for bearer-client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Request body cannot be buffered for retry (streaming bodies are not supported)")]
    UnbufferedBody,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Discovery Errors
    // ============================================================================
    #[error("metadata fetch (url={url}): {message}")]
    MetadataFetch {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("metadata parse (url={url}): {source}")]
    MetadataParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected exactly one authorization server, got {count}")]
    AmbiguousAuthorizationServer { count: usize },

    #[error("could not determine authorization server")]
    AuthorizationServerNotFound,

    #[error("OAuth2 authorization server discovery (resource={resource}): {source}")]
    Discovery {
        resource: String,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // Token Errors
    // ============================================================================
    #[error("OAuth2 token request (resource={resource}): {source}")]
    TokenAcquisition {
        resource: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Token source error: {message}")]
    TokenSource { message: String },

    #[error("scope is required")]
    MissingScope,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a metadata fetch error
    pub fn metadata_fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MetadataFetch {
            url: url.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a metadata fetch error caused by a transport failure
    pub fn metadata_transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::MetadataFetch {
            url: url.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a token source error
    pub fn token_source(message: impl Into<String>) -> Self {
        Self::TokenSource {
            message: message.into(),
        }
    }

    /// Wrap a locator failure with the resource it was run for
    pub fn discovery(resource: impl Into<String>, source: Error) -> Self {
        Self::Discovery {
            resource: resource.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a token source failure with the resource it was requested for
    pub fn token_acquisition(resource: impl Into<String>, source: Error) -> Self {
        Self::TokenAcquisition {
            resource: resource.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error was raised while locating the authorization server
    pub fn is_discovery(&self) -> bool {
        matches!(self, Error::Discovery { .. })
    }

    /// Check if this error was raised while acquiring a token
    pub fn is_token_acquisition(&self) -> bool {
        matches!(self, Error::TokenAcquisition { .. })
    }
}

/// Result type alias for bearer-client
pub type Result<T> = std::result::Result<T, Error>;
