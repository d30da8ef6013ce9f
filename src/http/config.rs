//! Transport and per-request configuration

use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Configuration for the authenticating transport
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Scope requested when a request carries no override
    pub scope: String,
    /// Deadline for a whole exchange, including discovery and the retry
    pub timeout: Duration,
    /// User agent of the default HTTP client
    pub user_agent: String,
    /// Headers added to every request that does not already carry them
    pub default_headers: HashMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            scope: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: format!("bearer-client/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl TransportConfig {
    /// Create a new config builder
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Builder for transport config
#[derive(Default)]
pub struct TransportConfigBuilder {
    config: TransportConfig,
}

impl TransportConfigBuilder {
    /// Set the default scope
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.config.scope = scope.into();
        self
    }

    /// Set the exchange timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> TransportConfig {
        self.config
    }
}

/// Hints attached to a single request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Resource URI whose well-known metadata locates the authorization server
    pub resource_uri: Option<Url>,
    /// Scope overriding the transport default
    pub scope: Option<String>,
    /// Deadline overriding the transport default
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Create empty request options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resource URI hint
    #[must_use]
    pub fn resource_uri(mut self, resource_uri: Url) -> Self {
        self.resource_uri = Some(resource_uri);
        self
    }

    /// Override the scope
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Override the timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
