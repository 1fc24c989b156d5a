//! JSON API client.

use crate::{FetchError, Method, Request, Response, RetryPolicy, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the storefront REST API.
///
/// Paths passed to the helpers are relative to the base path, so
/// `get_json("items")` issues `GET /<base>/items`.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_path: String,
    retry: RetryPolicy,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_path", &self.base_path)
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client over `transport` with the default `api` base path.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_path: "api".to_string(),
            retry: RetryPolicy::none(),
            timeout: None,
        }
    }

    /// Set the base path prepended to every request.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into().trim_matches('/').to_string();
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fail requests that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configured base path.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Build a request for `path` under the base path.
    pub fn request(&self, method: Method, path: &str) -> Request {
        let path = path.trim_matches('/');
        if self.base_path.is_empty() {
            Request::new(method, path)
        } else {
            Request::new(method, format!("{}/{}", self.base_path, path))
        }
    }

    /// `GET` and decode a JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        self.execute(self.request(Method::Get, path)).await?.json()
    }

    /// `GET` with query parameters and decode a JSON body.
    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let request = query
            .iter()
            .fold(self.request(Method::Get, path), |req, (k, v)| req.query(*k, *v));
        self.execute(request).await?.json()
    }

    /// `POST` a JSON body and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::Post, path).json(body)?;
        self.execute(request).await?.json()
    }

    /// `PUT` a JSON body and decode the JSON response.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::Put, path).json(body)?;
        self.execute(request).await?.json()
    }

    /// `DELETE`, discarding any body.
    pub async fn delete(&self, path: &str) -> Result<(), FetchError> {
        self.execute(self.request(Method::Delete, path)).await?;
        Ok(())
    }

    /// Send a request, applying the timeout and retry policy, and turn
    /// non-2xx statuses into errors.
    pub async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        let mutating = request.method.is_mutating();
        let mut attempt = 0;

        loop {
            match self.send_once(request.clone()).await {
                Ok(response) => {
                    debug!(request = %request, status = response.status, "api call");
                    return Ok(response);
                }
                Err(err) if self.retry.should_retry(&err, mutating, attempt) => {
                    let delay = self.retry.backoff.delay_for_attempt(attempt);
                    warn!(
                        request = %request,
                        error = %err,
                        attempt = attempt + 1,
                        ?delay,
                        "retrying api call"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(err) => {
                    debug!(request = %request, error = %err, "api call failed");
                    return Err(err);
                }
            }
        }
    }

    async fn send_once(&self, request: Request) -> Result<Response, FetchError> {
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.send(request))
                .await
                .map_err(|_| FetchError::Timeout)??,
            None => self.transport.send(request).await?,
        };
        response.error_for_status()
    }
}
