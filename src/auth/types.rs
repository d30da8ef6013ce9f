//! Token types

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Bearer token issued by an authorization server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The access token
    pub access_token: String,
    /// Token type, e.g. `Bearer`
    pub token_type: String,
    /// When the token expires, if known
    pub expiry: Option<DateTime<Utc>>,
}

impl Token {
    /// Create a new token
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        expiry: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            expiry,
        }
    }

    /// Create a `Bearer` token without expiry
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new(access_token, "Bearer", None)
    }

    /// Create a token that expires in N seconds from now
    ///
    /// A lifetime too large to represent leaves the expiry unknown.
    pub fn expires_in(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        seconds: i64,
    ) -> Self {
        let expiry = chrono::Duration::try_seconds(seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));
        Self::new(access_token, token_type, expiry)
    }

    /// Value for the `Authorization` header: `<token_type> <access_token>`
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Check if the token is past its expiry
    pub fn is_expired(&self) -> bool {
        self.expiry.is_some_and(|expiry| Utc::now() >= expiry)
    }
}

/// Token endpoint response (RFC 6749 section 5.1)
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The access token
    pub access_token: String,
    /// Token type; `Bearer` when omitted
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenResponse {
    /// Convert into a token, computing the expiry from `expires_in`
    pub fn into_token(self) -> Token {
        match self.expires_in {
            Some(secs) => Token::expires_in(self.access_token, self.token_type, secs),
            None => Token::new(self.access_token, self.token_type, None),
        }
    }
}
