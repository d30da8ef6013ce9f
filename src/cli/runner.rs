//! CLI runner - executes commands

use crate::challenge::{challenge_scheme, parse_challenge_parameters};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{RequestOptions, TransportConfig};
use crate::locator::{LocatorChain, UnauthorizedResponse};
use crate::metadata::MetadataLoader;
use reqwest::{Client, Method, Request, StatusCode};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Get {
                url,
                scope,
                resource_uri,
            } => self.get(url, scope.as_deref(), resource_uri.as_deref()).await,
            Commands::Discover { url, resource_uri } => {
                self.discover(url, resource_uri.as_deref()).await
            }
            Commands::ParseChallenge { header } => {
                self.output_message(&challenge_message(header));
                Ok(())
            }
        }
    }

    /// Load the client config named on the command line
    fn load_config(&self) -> Result<Option<ClientConfig>> {
        self.cli
            .config
            .as_ref()
            .map(ClientConfig::from_file)
            .transpose()
    }

    /// Fetch a resource through the authenticating transport
    async fn get(&self, url: &str, scope: Option<&str>, resource_uri: Option<&str>) -> Result<()> {
        let config = self
            .load_config()?
            .ok_or_else(|| Error::config("--config is required to fetch a resource"))?;
        let transport = config.build_transport()?;

        let mut options = RequestOptions::new();
        if let Some(scope) = scope {
            options = options.scope(scope);
        }
        if let Some(resource_uri) = resource_uri {
            options = options.resource_uri(Url::parse(resource_uri)?);
        }

        let request = Request::new(Method::GET, Url::parse(url)?);
        let response = transport.send(&request, &options).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        self.output_message(&json!({
            "type": "RESPONSE",
            "url": url,
            "status": status,
            "body": body
        }));

        Ok(())
    }

    /// Probe a resource without credentials and locate its authorization server
    async fn discover(&self, url: &str, resource_uri: Option<&str>) -> Result<()> {
        let config = self.load_config()?;
        let (transport_config, locators) = match &config {
            Some(config) => (config.transport_config(), config.locators()?),
            None => (TransportConfig::default(), LocatorChain::discovery()),
        };

        let client = Client::builder()
            .user_agent(&transport_config.user_agent)
            .timeout(transport_config.timeout)
            .build()?;

        let request_url = Url::parse(url)?;
        let response = client.get(request_url.clone()).send().await?;
        let status = response.status();

        if status != StatusCode::UNAUTHORIZED {
            debug!(%url, status = status.as_u16(), "Resource did not ask for authentication");
            self.output_message(&json!({
                "type": "DISCOVERY",
                "url": url,
                "status": status.as_u16(),
                "authorization_server": Value::Null
            }));
            return Ok(());
        }

        let mut unauthorized = UnauthorizedResponse::new(request_url, response.headers().clone());
        if let Some(resource_uri) = resource_uri {
            unauthorized = unauthorized.with_resource_uri(Url::parse(resource_uri)?);
        }

        let loader = MetadataLoader::with_client(client);
        let authorization_server = locators
            .locate(&loader, &unauthorized)
            .await
            .map_err(|e| Error::discovery(url, e))?;

        self.output_message(&json!({
            "type": "DISCOVERY",
            "url": url,
            "status": status.as_u16(),
            "authorization_server": authorization_server.as_str()
        }));

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Render a challenge header as a message with sorted parameters
pub(crate) fn challenge_message(header: &str) -> Value {
    let parameters: BTreeMap<String, String> =
        parse_challenge_parameters(header).into_iter().collect();

    json!({
        "type": "CHALLENGE",
        "scheme": challenge_scheme(header),
        "parameters": parameters
    })
}
