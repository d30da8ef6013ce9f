//! # bearer-client
//!
//! An HTTP client transport that authenticates against OAuth2 protected
//! resources on demand.
//!
//! Requests go out unauthenticated. When a resource answers
//! `401 Unauthorized`, the transport locates the authorization server
//! protecting it (RFC 9728 protected resource metadata, or a fixed server),
//! asks a [`TokenSource`](auth::TokenSource) for an access token and re-sends
//! the request once with an `Authorization` header.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bearer_client::auth::NodeTokenSource;
//! use bearer_client::http::{AuthenticatingTransport, TransportConfig};
//!
//! #[tokio::main]
//! async fn main() -> bearer_client::Result<()> {
//!     let tokens = NodeTokenSource::new("http://localhost:8081", "did:web:example.com");
//!     let config = TransportConfig::builder().scope("read").build();
//!     let transport = AuthenticatingTransport::new(tokens, config)?;
//!
//!     let response = transport.get("https://resource.example.com/data").await?;
//!     println!("{}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   AuthenticatingTransport                    │
//! │   send(request) → 401? → locate → token → retry once         │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────┬───────────────┴──────┬─────────────┬──────────┐
//! │  Challenge  │      Locator         │  Metadata   │   Auth   │
//! ├─────────────┼──────────────────────┼─────────────┼──────────┤
//! │ WWW-Authn   │ Static               │ Well-known  │ Node     │
//! │ parameters  │ Resource metadata    │ JSON loader │ Client   │
//! │             │ Chain                │             │ creds    │
//! └─────────────┴──────────────────────┴─────────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// `WWW-Authenticate` challenge parsing
pub mod challenge;

/// OAuth2 metadata documents and their loader
pub mod metadata;

/// Authorization server locators
pub mod locator;

/// Access tokens and token sources
pub mod auth;

/// Authenticating HTTP transport
pub mod http;

/// YAML client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{Token, TokenSource};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{AuthenticatingTransport, RequestOptions, TransportConfig};
pub use locator::{AuthorizationServerLocator, LocatorChain};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
