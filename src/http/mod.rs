//! HTTP module
//!
//! Provides the authenticating transport and the delegate it sends through.
//!
//! # Features
//!
//! - **Pass-through**: every response other than `401` is returned untouched
//! - **Discovery**: a `401` runs the authorization server locator chain
//! - **Single retry**: the request is re-sent once with an `Authorization` header
//! - **Deadline**: one timeout bounds both sends, discovery and token acquisition

mod config;
mod sender;
mod transport;

pub use config::{RequestOptions, TransportConfig, TransportConfigBuilder};
pub use sender::HttpSender;
pub use transport::AuthenticatingTransport;
