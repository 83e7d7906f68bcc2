//! reqwest-backed transport
//!
//! Sends one request per call and returns the parsed JSON body. No retries
//! and no status translation beyond "non-2xx is an error": the remote
//! service's own error payload is carried verbatim in
//! [`TransportError::Status`].

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{BoxFuture, Method, Request, Result, Transport, TransportError, resolve_url};

/// HTTP transport rooted at a fixed base URI.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_uri: String,
}

impl HttpTransport {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_uri: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_uri, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_uri: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Http(format!("building HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_uri))
    }

    /// Wrap an existing reqwest client (shared connection pool, custom TLS).
    pub fn with_client(client: reqwest::Client, base_uri: impl Into<String>) -> Self {
        Self {
            client,
            base_uri: base_uri.into(),
        }
    }

    #[instrument(skip_all, fields(method = %method, path = %path))]
    async fn execute(&self, method: Method, path: &str, request: Request) -> Result<Value> {
        let url = resolve_url(&self.base_uri, path)?;
        let verb = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(verb, &url).headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "request failed");
            TransportError::Http(format!("{method} {url}: {e}"))
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Http(format!("reading response body: {e}")))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "remote service returned an error");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|e| TransportError::InvalidResponse(format!("response is not JSON: {e}")))
    }
}

impl Transport for HttpTransport {
    fn base_uri(&self) -> &str {
        &self.base_uri
    }

    fn send<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        request: Request,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(self.execute(method, path, request))
    }
}
