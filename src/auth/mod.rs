//! Authentication module
//!
//! Supports: static tokens, OAuth2 client credentials, identity node service tokens
//!
//! The `TokenSource` trait is the seam between the authenticating transport
//! and whatever issues bearer tokens. Tokens are never cached here; every
//! `401` leads to a fresh acquisition.

mod client_credentials;
mod node;
mod source;
mod types;

pub use client_credentials::ClientCredentialsTokenSource;
pub use node::{CredentialProvider, NodeTokenSource, StaticCredentials};
pub use source::{StaticTokenSource, TokenSource};
pub use types::{Token, TokenResponse};
