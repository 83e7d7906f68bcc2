//! Transport abstraction for the join.me REST API
//!
//! The client crate never talks to the network directly. It assembles a
//! [`Request`] (headers plus an optional JSON body) and hands it to a
//! [`Transport`] together with an HTTP method and a path. `HttpTransport`
//! is the reqwest-backed implementation; tests substitute their own.
//!
//! Paths are either relative to the transport's base URI (`/meetings`) or
//! absolute URLs (the OAuth token endpoint lives on a different host).

pub mod http;

pub use http::HttpTransport;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use reqwest::header::HeaderMap;
use serde_json::Value;
use url::Url;

/// Boxed future returned by transport operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors surfaced by a transport. Callers propagate these unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("remote service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// HTTP verbs used by the join.me API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request descriptor: everything a transport needs besides method and path.
///
/// `body` is already serialized JSON. Header values carrying credentials are
/// expected to be marked sensitive so `Debug` output stays clean.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Outbound side of the client: one call, one request, one parsed response.
///
/// Uses `Pin<Box<dyn Future>>` return types so the client can hold an
/// `Arc<dyn Transport>`.
pub trait Transport: Send + Sync {
    /// Base URI relative paths are resolved against.
    fn base_uri(&self) -> &str;

    /// Issue a single request and return the parsed JSON response.
    fn send<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        request: Request,
    ) -> BoxFuture<'a, Result<Value>>;

    fn get<'a>(&'a self, path: &'a str, request: Request) -> BoxFuture<'a, Result<Value>> {
        self.send(Method::Get, path, request)
    }

    fn post<'a>(&'a self, path: &'a str, request: Request) -> BoxFuture<'a, Result<Value>> {
        self.send(Method::Post, path, request)
    }

    fn patch<'a>(&'a self, path: &'a str, request: Request) -> BoxFuture<'a, Result<Value>> {
        self.send(Method::Patch, path, request)
    }

    fn delete<'a>(&'a self, path: &'a str, request: Request) -> BoxFuture<'a, Result<Value>> {
        self.send(Method::Delete, path, request)
    }
}

/// Resolve `path` against `base_uri`.
///
/// Absolute `http(s)://` paths are returned as-is. Relative paths are joined
/// onto the base URI's path with exactly one `/` between the two; the base's
/// query is kept and its fragment dropped.
pub fn resolve_url(base_uri: &str, path: &str) -> Result<String> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return Ok(path.to_string());
    }
    let mut url = Url::parse(base_uri)
        .map_err(|e| TransportError::InvalidUrl(format!("base URI {base_uri:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(TransportError::InvalidUrl(format!(
            "base URI must be an http:// or https:// URL, got: {base_uri}"
        )));
    }

    let joined = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url.set_fragment(None);
    Ok(url.into())
}
