//! Transport abstraction.

use crate::{FetchError, Request, Response};
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can answer a [`Request`].
///
/// Implemented by the in-memory backend; a real HTTP client would be
/// another implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for the response.
    ///
    /// Non-2xx statuses are returned as `Ok`; only failures to obtain a
    /// response at all are errors.
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}
