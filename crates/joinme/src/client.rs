//! Client instance and factory
//!
//! A [`Client`] owns a configuration snapshot, the request template built
//! from its bearer token, and a shared transport. It is immutable after
//! construction; per-call overrides never touch the stored configuration.
//!
//! [`ClientFactory`] replaces process-wide mutable defaults: it holds one
//! defaults [`Configuration`] and snapshots `defaults.merge(options)` into
//! every client it builds. Swapping the defaults produces a new factory, so
//! clients already built keep the configuration they were created with.

use std::fmt;
use std::sync::Arc;

use common::Secret;
use serde_json::Value;
use transport::{HttpTransport, Method, Request, Transport};

use crate::config::{Configuration, Options};
use crate::error::Result;
use crate::request::RequestBuilder;

/// Authenticated join.me API client.
pub struct Client {
    config: Configuration,
    requests: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client for `token` over an injected transport.
    pub fn new(
        token: impl Into<String>,
        config: Configuration,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let token = Secret::new(token.into());
        let requests = RequestBuilder::new(&token)?;
        tracing::debug!(base_uri = %config.base_uri, "created join.me client");
        Ok(Self {
            config,
            requests,
            transport,
        })
    }

    /// Create a client backed by [`HttpTransport`] rooted at `config.base_uri`.
    pub fn with_http(token: impl Into<String>, config: Configuration) -> Result<Self> {
        let transport = HttpTransport::new(config.base_uri.clone())?;
        Self::new(token, config, Arc::new(transport))
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Effective options of this client.
    pub fn options_snapshot(&self) -> Options {
        self.config.options_snapshot()
    }

    pub fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    pub(crate) async fn send(&self, method: Method, path: &str, request: Request) -> Result<Value> {
        tracing::debug!(%method, path, "sending request");
        Ok(self.transport.send(method, path, request).await?)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("transport_base_uri", &self.transport.base_uri())
            .finish_non_exhaustive()
    }
}

/// Builds clients from a fixed set of defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientFactory {
    defaults: Configuration,
}

impl ClientFactory {
    pub fn new(defaults: Configuration) -> Self {
        Self { defaults }
    }

    /// Factory whose defaults are the provider defaults adjusted by `f`.
    pub fn configure(f: impl FnOnce(&mut Configuration)) -> Self {
        Self::new(Configuration::default().configure(f))
    }

    pub fn defaults(&self) -> &Configuration {
        &self.defaults
    }

    /// A new factory with `overrides` merged into the defaults.
    pub fn with_defaults(&self, overrides: &Options) -> Self {
        Self::new(self.defaults.merge(overrides))
    }

    /// Build a client whose configuration is `defaults.merge(options)`.
    pub fn client(
        &self,
        token: impl Into<String>,
        options: &Options,
        transport: Arc<dyn Transport>,
    ) -> Result<Client> {
        Client::new(token, self.defaults.merge(options), transport)
    }

    /// Like [`ClientFactory::client`], over an [`HttpTransport`].
    pub fn http_client(&self, token: impl Into<String>, options: &Options) -> Result<Client> {
        Client::with_http(token, self.defaults.merge(options))
    }
}
