//! Client configuration loaded from YAML
//!
//! ```yaml
//! scope: read write
//! timeout_seconds: 10
//! token_source:
//!   type: node
//!   api_url: http://localhost:8081
//!   subject: did:web:example.com
//! ```

use crate::auth::{ClientCredentialsTokenSource, NodeTokenSource, StaticTokenSource, Token};
use crate::error::{Error, Result};
use crate::http::{AuthenticatingTransport, TransportConfig};
use crate::locator::LocatorChain;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Default scope requested for every resource
    #[serde(default)]
    pub scope: String,

    /// Fixed authorization server; discovery is used when absent
    #[serde(default)]
    pub authorization_server: Option<String>,

    /// Deadline for one exchange, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Where access tokens come from
    pub token_source: TokenSourceConfig,
}

fn default_timeout_seconds() -> u64 {
    30
}

// ============================================================================
// Token Source Config
// ============================================================================

/// Token source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenSourceConfig {
    /// Identity node internal API
    Node {
        /// Base URL of the node's internal API
        api_url: String,
        /// Subject the token is requested for
        subject: String,
    },

    /// OAuth2 client credentials grant
    ClientCredentials {
        /// Token endpoint; discovered from the authorization server when absent
        #[serde(default)]
        token_url: Option<String>,
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
    },

    /// Fixed token
    Static {
        /// Access token value
        access_token: String,
        /// Token type
        #[serde(default = "default_token_type")]
        token_type: String,
    },
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl ClientConfig {
    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse and validate a YAML document
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be greater than zero"));
        }

        if let Some(server) = &self.authorization_server {
            Url::parse(server).map_err(|e| {
                Error::config(format!("invalid authorization_server '{server}': {e}"))
            })?;
        }

        match &self.token_source {
            TokenSourceConfig::Node { api_url, subject } => {
                if subject.is_empty() {
                    return Err(Error::config("token_source.subject is required"));
                }
                Url::parse(api_url).map_err(|e| {
                    Error::config(format!("invalid token_source.api_url '{api_url}': {e}"))
                })?;
            }
            TokenSourceConfig::ClientCredentials {
                token_url,
                client_id,
                ..
            } => {
                if client_id.is_empty() {
                    return Err(Error::config("token_source.client_id is required"));
                }
                if let Some(token_url) = token_url {
                    Url::parse(token_url).map_err(|e| {
                        Error::config(format!(
                            "invalid token_source.token_url '{token_url}': {e}"
                        ))
                    })?;
                }
            }
            TokenSourceConfig::Static { access_token, .. } => {
                if access_token.is_empty() {
                    return Err(Error::config("token_source.access_token is required"));
                }
            }
        }

        Ok(())
    }

    /// Transport settings described by this config
    pub fn transport_config(&self) -> TransportConfig {
        let mut builder = TransportConfig::builder()
            .scope(&self.scope)
            .timeout(Duration::from_secs(self.timeout_seconds));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    /// Locator chain described by this config
    pub fn locators(&self) -> Result<LocatorChain> {
        match &self.authorization_server {
            Some(server) => Ok(LocatorChain::fixed(Url::parse(server)?)),
            None => Ok(LocatorChain::discovery()),
        }
    }

    /// Build an authenticating transport from this config
    pub fn build_transport(&self) -> Result<AuthenticatingTransport> {
        let config = self.transport_config();

        let transport = match &self.token_source {
            TokenSourceConfig::Node { api_url, subject } => {
                AuthenticatingTransport::new(NodeTokenSource::new(api_url, subject), config)?
            }
            TokenSourceConfig::ClientCredentials {
                token_url,
                client_id,
                client_secret,
            } => {
                let mut source = ClientCredentialsTokenSource::new(client_id, client_secret);
                if let Some(token_url) = token_url {
                    source = source.token_url(token_url);
                }
                AuthenticatingTransport::new(source, config)?
            }
            TokenSourceConfig::Static {
                access_token,
                token_type,
            } => AuthenticatingTransport::new(
                StaticTokenSource::new(Token::new(access_token, token_type, None)),
                config,
            )?,
        };

        Ok(transport.with_locators(self.locators()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NODE_CONFIG: &str = r"
scope: read write
timeout_seconds: 10
token_source:
  type: node
  api_url: http://localhost:8081
  subject: did:web:example.com
";

    #[test]
    fn test_parse_node_config() {
        let config = ClientConfig::from_str(NODE_CONFIG).unwrap();

        assert_eq!(config.scope, "read write");
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.authorization_server.is_none());
        assert!(matches!(
            config.token_source,
            TokenSourceConfig::Node { ref subject, .. } if subject == "did:web:example.com"
        ));

        let transport = config.transport_config();
        assert_eq!(transport.scope, "read write");
        assert_eq!(transport.timeout, Duration::from_secs(10));
        assert_eq!(config.locators().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_client_credentials_config() {
        let yaml = r"
scope: api
authorization_server: https://auth.example.com
user_agent: my-agent/2.0
token_source:
  type: client_credentials
  client_id: my-client
  client_secret: my-secret
";
        let config = ClientConfig::from_str(yaml).unwrap();

        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.transport_config().user_agent, "my-agent/2.0");
        assert!(matches!(
            config.token_source,
            TokenSourceConfig::ClientCredentials { token_url: None, .. }
        ));
        assert!(config.build_transport().is_ok());
    }

    #[test]
    fn test_parse_static_config_defaults_token_type() {
        let yaml = r"
token_source:
  type: static
  access_token: abc
";
        let config = ClientConfig::from_str(yaml).unwrap();

        assert!(config.scope.is_empty());
        assert!(matches!(
            config.token_source,
            TokenSourceConfig::Static { ref token_type, .. } if token_type == "Bearer"
        ));
    }

    #[test]
    fn test_missing_token_source_is_yaml_error() {
        let err = ClientConfig::from_str("scope: read").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_unknown_token_source_type() {
        let yaml = r"
token_source:
  type: kerberos
";
        assert!(matches!(
            ClientConfig::from_str(yaml).unwrap_err(),
            Error::Yaml(_)
        ));
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            (
                "token_source: {type: node, api_url: 'http://localhost', subject: ''}",
                "token_source.subject is required",
            ),
            (
                "token_source: {type: node, api_url: 'not a url', subject: s}",
                "invalid token_source.api_url",
            ),
            (
                "timeout_seconds: 0\ntoken_source: {type: static, access_token: t}",
                "timeout_seconds must be greater than zero",
            ),
            (
                "authorization_server: '::'\ntoken_source: {type: static, access_token: t}",
                "invalid authorization_server",
            ),
            (
                "token_source: {type: client_credentials, client_id: '', client_secret: s}",
                "token_source.client_id is required",
            ),
            (
                "token_source: {type: static, access_token: ''}",
                "token_source.access_token is required",
            ),
        ];

        for (yaml, expected) in cases {
            let err = ClientConfig::from_str(yaml).unwrap_err();
            assert!(matches!(err, Error::Config { .. }), "{yaml}: {err}");
            assert!(err.to_string().contains(expected), "{yaml}: {err}");
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(NODE_CONFIG.as_bytes()).unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scope, "read write");
        assert!(config.build_transport().is_ok());
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::from_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
