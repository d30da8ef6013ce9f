//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// OAuth2 bearer client CLI
#[derive(Parser, Debug)]
#[command(name = "bearer-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a protected resource, authenticating on 401
    Get {
        /// Resource URL
        url: String,

        /// Scope overriding the configured one
        #[arg(long)]
        scope: Option<String>,

        /// Resource URI whose metadata locates the authorization server
        #[arg(long)]
        resource_uri: Option<String>,
    },

    /// Locate the authorization server protecting a resource
    Discover {
        /// Resource URL
        url: String,

        /// Resource URI whose metadata locates the authorization server
        #[arg(long)]
        resource_uri: Option<String>,
    },

    /// Print the parameters of a WWW-Authenticate header value
    ParseChallenge {
        /// Header value, e.g. `Bearer realm="api", scope="read"`
        header: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
