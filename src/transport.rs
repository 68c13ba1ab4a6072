//! HTTP transport for the task API.
//!
//! Resolves absolute request paths against the configured base URL and
//! normalizes failures into two kinds: no response at all
//! ([`Error::Unreachable`]) and a non-success status ([`Error::Server`]).
//! Every failure is logged before it is returned.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::traits::{ApiRequest, ApiTransport};
use async_trait::async_trait;
use serde_json::Value;

/// reqwest-backed [`ApiTransport`].
///
/// No timeout and no retry: a request runs until the server answers or the
/// connection fails.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the configured API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, &config.api_base_url))
    }

    /// Create a transport around an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self { client, base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// The base URL absolute paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a request path: paths starting with `/` get the base URL
    /// prepended, anything else is used verbatim.
    #[must_use]
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            path.to_string()
        }
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = self.resolve_url(&request.path);
        tracing::debug!(method = %request.method, %url, "sending API request");

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = Error::Unreachable;
                tracing::error!(
                    method = %request.method,
                    path = %request.path,
                    cause = %e,
                    "[API Error] {err}"
                );
                return Err(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let err = Error::Server {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            };
            tracing::error!(method = %request.method, path = %request.path, "[API Error] {err}");
            return Err(err);
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
