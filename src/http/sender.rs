//! Underlying transport delegate

use crate::error::Result;
use async_trait::async_trait;
use reqwest::{Client, Request, Response};

/// Sends a single HTTP request
///
/// The authenticating transport forwards through this trait, so tests can
/// substitute a double without network I/O. `reqwest::Client` is the default.
#[async_trait]
pub trait HttpSender: Send + Sync {
    /// Send the request and return the response, whatever its status
    async fn send(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl HttpSender for Client {
    async fn send(&self, request: Request) -> Result<Response> {
        Ok(self.execute(request).await?)
    }
}

#[async_trait]
impl<T: HttpSender + ?Sized> HttpSender for std::sync::Arc<T> {
    async fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request).await
    }
}
