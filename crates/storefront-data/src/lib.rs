//! REST plumbing for the storefront.
//!
//! This crate provides:
//! - `Request` / `Response` - HTTP-shaped messages with JSON helpers
//! - `Transport` - the seam a backend implements
//! - `ApiClient` - JSON calls under a base path, with timeout and retry
//! - `RetryPolicy` - Retry strategies

mod client;
mod error;
mod request;
mod response;
mod retry;
mod transport;

pub use client::ApiClient;
pub use error::FetchError;
pub use request::{Method, Request};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryPolicy};
pub use transport::Transport;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, FetchError, Method, Request, Response, RetryPolicy, Transport};
}
