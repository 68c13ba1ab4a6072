//! Core traits for testability and abstraction.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// A single request to the task API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, e.g. `/tasks/3`. Absolute paths are resolved against the
    /// configured base URL by the transport.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// A `GET` request without a body.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::GET, path: path.into(), body: None }
    }

    /// A `POST` request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::POST, path: path.into(), body: Some(body) }
    }

    /// A `PATCH` request with a JSON body.
    #[must_use]
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::PATCH, path: path.into(), body: Some(body) }
    }

    /// A `DELETE` request without a body.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::DELETE, path: path.into(), body: None }
    }
}

/// Trait for sending requests to the task API.
///
/// This trait abstracts the network layer for testability. The production
/// implementation is [`crate::transport::HttpTransport`]; tests use
/// [`crate::testing::MockTransport`].
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send a request and return the decoded JSON response body.
    ///
    /// An empty response body is returned as `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Unreachable`] when no response was received and
    /// [`crate::Error::Server`] when the server answered with a non-success status.
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// Trait for durable key-value slots.
///
/// This trait abstracts preference storage for testability. The production
/// implementation uses `SQLite`, while tests use an in-memory store.
pub trait SlotStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    fn read_slot(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    fn write_slot(&self, key: &str, value: &str) -> Result<()>;
}
