//! CLI module
//!
//! Command-line interface for the authenticating client.
//!
//! # Commands
//!
//! - `get` - Fetch a resource through the authenticating transport
//! - `discover` - Locate the authorization server of a resource
//! - `parse-challenge` - Show the parameters of a `WWW-Authenticate` value

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
