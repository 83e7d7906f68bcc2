//! Authenticated request assembly
//!
//! Every API call carries the same three headers: the bearer token, a JSON
//! content type and the client's User-Agent. [`RequestBuilder`] holds that
//! template and stamps out [`Request`] descriptors from it, optionally with
//! extra headers and a serialized body. Building a request never mutates the
//! template, so per-call headers cannot leak into later calls.

use common::Secret;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::Serialize;
use transport::Request;

use crate::constants;
use crate::error::{Error, Result};

/// Header template for one client instance.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    headers: HeaderMap,
}

impl RequestBuilder {
    /// Build the template for `token`.
    ///
    /// The Authorization value is marked sensitive so it never shows up in
    /// `Debug` output of the template or of built requests.
    pub fn new(token: &Secret<String>) -> Result<Self> {
        let bearer = Secret::new(format!("Bearer {}", token.expose()));
        let mut authorization = HeaderValue::from_str(bearer.expose()).map_err(|_| {
            Error::InvalidHeader("bearer token contains characters not allowed in a header".into())
        })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));

        Ok(Self { headers })
    }

    /// The fixed headers every request starts from.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A request with the fixed headers and no body.
    pub fn build(&self) -> Request {
        Request {
            headers: self.headers.clone(),
            body: None,
        }
    }

    /// A request with the fixed headers and `body` serialized as JSON.
    pub fn build_json<B: Serialize + ?Sized>(&self, body: &B) -> Result<Request> {
        let body = serde_json::to_string(body).map_err(|e| Error::Serialize(e.to_string()))?;
        Ok(Request {
            headers: self.headers.clone(),
            body: Some(body),
        })
    }

    /// A bodiless request with `extra` headers layered over the fixed ones.
    ///
    /// Header names are case-insensitive on the wire and are sent lowercase.
    pub fn build_with_headers(&self, extra: &[(&str, &str)]) -> Result<Request> {
        let mut request = self.build();
        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidHeader(format!("header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidHeader(format!("header {name}: {e}")))?;
            request.headers.insert(name, value);
        }
        Ok(request)
    }
}
