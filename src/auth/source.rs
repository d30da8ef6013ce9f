//! Token source trait

use super::types::Token;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Issues bearer tokens for a resource
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Acquire a token from `authorization_server` for `resource` with `scope`
    async fn token(&self, authorization_server: &Url, resource: &Url, scope: &str)
        -> Result<Token>;
}

#[async_trait]
impl<T: TokenSource + ?Sized> TokenSource for Arc<T> {
    async fn token(
        &self,
        authorization_server: &Url,
        resource: &Url,
        scope: &str,
    ) -> Result<Token> {
        (**self).token(authorization_server, resource, scope).await
    }
}

/// Always hands out the same token
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: Token,
}

impl StaticTokenSource {
    /// Create a new static token source
    pub fn new(token: Token) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(
        &self,
        _authorization_server: &Url,
        _resource: &Url,
        _scope: &str,
    ) -> Result<Token> {
        Ok(self.token.clone())
    }
}
