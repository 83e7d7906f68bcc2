//! OAuth token exchange and authorization URLs
//!
//! Handles the two token endpoint interactions:
//! 1. Authorization code exchange (completing the code flow)
//! 2. Token refresh
//!
//! Both POST a JSON body to `auth_refresh_token_uri` with different grant
//! types. The token endpoint lives on `secure.join.me`, not the API host, so
//! the absolute URI is handed to the transport as the path.
//!
//! Every credential in a request is taken from the per-call [`Overrides`]
//! when given, else from the client's configuration. Missing credentials are
//! sent as `null`; the provider decides whether that is acceptable.

use common::Secret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::client::Client;
use crate::error::{Error, Result};
use transport::Method;

/// Per-call overrides for the OAuth operations.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub client_id: Option<String>,
    pub client_secret: Option<Secret<String>>,
    pub redirect_uri: Option<String>,
    pub code: Option<String>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub response_type: Option<String>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client_id(mut self, value: impl Into<String>) -> Self {
        self.client_id = Some(value.into());
        self
    }

    pub fn client_secret(mut self, value: impl Into<String>) -> Self {
        self.client_secret = Some(Secret::new(value.into()));
        self
    }

    pub fn redirect_uri(mut self, value: impl Into<String>) -> Self {
        self.redirect_uri = Some(value.into());
        self
    }

    pub fn code(mut self, value: impl Into<String>) -> Self {
        self.code = Some(value.into());
        self
    }

    pub fn refresh_token(mut self, value: impl Into<String>) -> Self {
        self.refresh_token = Some(value.into());
        self
    }

    pub fn scope(mut self, value: impl Into<String>) -> Self {
        self.scope = Some(value.into());
        self
    }

    pub fn response_type(mut self, value: impl Into<String>) -> Self {
        self.response_type = Some(value.into());
        self
    }
}

/// Body of an authorization code exchange, in wire order.
#[derive(Debug, Serialize)]
struct AuthorizationCodeGrant<'a> {
    client_id: Option<&'a str>,
    client_secret: Option<&'a str>,
    redirect_uri: Option<&'a str>,
    code: &'a str,
    grant_type: &'static str,
}

/// Body of a refresh token exchange, in wire order.
#[derive(Debug, Serialize)]
struct RefreshTokenGrant<'a> {
    client_id: Option<&'a str>,
    client_secret: Option<&'a str>,
    refresh_token: &'a str,
    grant_type: &'static str,
}

/// Typed view of a token endpoint response.
///
/// The exchange operations return the raw JSON; decode it with
/// [`TokenResponse::from_value`] when the typed fields are wanted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| Error::InvalidTokenResponse(e.to_string()))
    }
}

impl Client {
    /// Exchange an authorization code for an access/refresh token pair.
    ///
    /// Returns the token endpoint's JSON unmodified.
    pub async fn exchange_authorization_code(
        &self,
        code: &str,
        overrides: &Overrides,
    ) -> Result<Value> {
        debug!("exchanging authorization code");
        let request = self
            .requests()
            .build_json(&self.authorization_code_grant(code, overrides))?;
        self.send(Method::Post, &self.config().auth_refresh_token_uri, request)
            .await
    }

    /// Exchange a refresh token for a new access token.
    pub async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
        overrides: &Overrides,
    ) -> Result<Value> {
        debug!("refreshing access token");
        let request = self
            .requests()
            .build_json(&self.refresh_token_grant(refresh_token, overrides))?;
        self.send(Method::Post, &self.config().auth_refresh_token_uri, request)
            .await
    }

    /// Authorization URL for the code flow: `response_type` is always `code`.
    pub fn build_authorization_url(&self, overrides: &Overrides) -> Result<String> {
        self.authorization_url(overrides, "code")
    }

    /// Authorization URL whose `response_type` comes from the overrides or
    /// the configured `response_type` (`token` by default).
    pub fn build_authorize_url(&self, overrides: &Overrides) -> Result<String> {
        let response_type = overrides
            .response_type
            .as_deref()
            .unwrap_or(&self.config().response_type);
        self.authorization_url(overrides, response_type)
    }

    fn authorization_code_grant<'a>(
        &'a self,
        code: &'a str,
        overrides: &'a Overrides,
    ) -> AuthorizationCodeGrant<'a> {
        AuthorizationCodeGrant {
            client_id: self.client_id(overrides),
            client_secret: self.client_secret(overrides),
            redirect_uri: self.redirect_uri(overrides),
            code: overrides.code.as_deref().unwrap_or(code),
            grant_type: "authorization_code",
        }
    }

    fn refresh_token_grant<'a>(
        &'a self,
        refresh_token: &'a str,
        overrides: &'a Overrides,
    ) -> RefreshTokenGrant<'a> {
        RefreshTokenGrant {
            client_id: self.client_id(overrides),
            client_secret: self.client_secret(overrides),
            refresh_token: overrides.refresh_token.as_deref().unwrap_or(refresh_token),
            grant_type: "refresh_token",
        }
    }

    /// `auth_uri` with its query replaced by the authorization parameters.
    fn authorization_url(&self, overrides: &Overrides, response_type: &str) -> Result<String> {
        let auth_uri = &self.config().auth_uri;
        let mut url = Url::parse(auth_uri)
            .map_err(|e| Error::InvalidUri(format!("auth_uri {auth_uri:?}: {e}")))?;

        let params = [
            (
                "scope",
                Some(
                    overrides
                        .scope
                        .as_deref()
                        .unwrap_or(&self.config().default_scopes),
                ),
            ),
            ("redirect_uri", self.redirect_uri(overrides)),
            ("client_id", self.client_id(overrides)),
            ("response_type", Some(response_type)),
        ];

        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                match value {
                    Some(value) => query.append_pair(key, value),
                    None => query.append_key_only(key),
                };
            }
        }
        Ok(url.to_string())
    }

    fn client_id<'a>(&'a self, overrides: &'a Overrides) -> Option<&'a str> {
        overrides
            .client_id
            .as_deref()
            .or(self.config().client_id.as_deref())
    }

    fn client_secret<'a>(&'a self, overrides: &'a Overrides) -> Option<&'a str> {
        overrides
            .client_secret
            .as_ref()
            .or(self.config().client_secret.as_ref())
            .map(|s| s.expose().as_str())
    }

    fn redirect_uri<'a>(&'a self, overrides: &'a Overrides) -> Option<&'a str> {
        overrides
            .redirect_uri
            .as_deref()
            .or(self.config().redirect_uri.as_deref())
    }
}
