//! Client configuration
//!
//! [`Configuration`] is the resolved set of eight recognized settings a client
//! runs with. [`Options`] is the overrides record: every field optional, used
//! for constructor options, for process-wide defaults loaded from a file, and
//! as the plain snapshot returned by [`Configuration::options_snapshot`].
//!
//! There is no global mutable state. "Set the defaults once at startup" is a
//! [`Configuration`] value (or a [`crate::ClientFactory`] holding one) built
//! at startup and handed to each client; every client keeps its own copy.
//!
//! Nothing here checks that client credentials are present. A client without
//! a client id or secret is valid until the provider rejects its requests.

use std::path::{Path, PathBuf};

use common::Secret;
use serde::Deserialize;

use crate::constants::{
    AUTH_REFRESH_TOKEN_URI, AUTH_URI, BASE_URI, CLIENT_SECRET_ENV, CONFIG_PATH_ENV,
    DEFAULT_CONFIG_FILE, DEFAULT_SCOPES, RESPONSE_TYPE,
};

/// Recognized option keys, in canonical order.
pub const OPTION_KEYS: [&str; 8] = [
    "base_uri",
    "default_scopes",
    "redirect_uri",
    "client_id",
    "client_secret",
    "auth_uri",
    "auth_refresh_token_uri",
    "response_type",
];

/// Resolved configuration of one client.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub base_uri: String,
    pub default_scopes: String,
    pub redirect_uri: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<Secret<String>>,
    pub auth_uri: String,
    pub auth_refresh_token_uri: String,
    pub response_type: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            base_uri: BASE_URI.to_string(),
            default_scopes: DEFAULT_SCOPES.to_string(),
            redirect_uri: None,
            client_id: None,
            client_secret: None,
            auth_uri: AUTH_URI.to_string(),
            auth_refresh_token_uri: AUTH_REFRESH_TOKEN_URI.to_string(),
            response_type: RESPONSE_TYPE.to_string(),
        }
    }
}

impl Configuration {
    /// Apply `f` to a copy and return it. Convenience for startup defaults:
    ///
    /// ```ignore
    /// let defaults = Configuration::default().configure(|c| {
    ///     c.client_id = Some("my-app".into());
    ///     c.redirect_uri = Some("https://example.com/callback".into());
    /// });
    /// ```
    pub fn configure(mut self, f: impl FnOnce(&mut Configuration)) -> Self {
        f(&mut self);
        self
    }

    /// Per-field merge: a value present in `overrides` wins.
    pub fn merge(&self, overrides: &Options) -> Configuration {
        Configuration {
            base_uri: pick(&overrides.base_uri, &self.base_uri),
            default_scopes: pick(&overrides.default_scopes, &self.default_scopes),
            redirect_uri: overrides
                .redirect_uri
                .clone()
                .or_else(|| self.redirect_uri.clone()),
            client_id: overrides.client_id.clone().or_else(|| self.client_id.clone()),
            client_secret: overrides
                .client_secret
                .clone()
                .or_else(|| self.client_secret.clone()),
            auth_uri: pick(&overrides.auth_uri, &self.auth_uri),
            auth_refresh_token_uri: pick(
                &overrides.auth_refresh_token_uri,
                &self.auth_refresh_token_uri,
            ),
            response_type: pick(&overrides.response_type, &self.response_type),
        }
    }

    /// The effective configuration as an [`Options`] record.
    pub fn options_snapshot(&self) -> Options {
        Options {
            base_uri: Some(self.base_uri.clone()),
            default_scopes: Some(self.default_scopes.clone()),
            redirect_uri: self.redirect_uri.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            auth_uri: Some(self.auth_uri.clone()),
            auth_refresh_token_uri: Some(self.auth_refresh_token_uri.clone()),
            response_type: Some(self.response_type.clone()),
        }
    }
}

fn pick(overridden: &Option<String>, current: &str) -> String {
    overridden.clone().unwrap_or_else(|| current.to_string())
}

/// Overrides for any of the eight recognized settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub base_uri: Option<String>,
    pub default_scopes: Option<String>,
    pub redirect_uri: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<Secret<String>>,
    pub auth_uri: Option<String>,
    pub auth_refresh_token_uri: Option<String>,
    pub response_type: Option<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_uri(mut self, value: impl Into<String>) -> Self {
        self.base_uri = Some(value.into());
        self
    }

    pub fn with_default_scopes(mut self, value: impl Into<String>) -> Self {
        self.default_scopes = Some(value.into());
        self
    }

    pub fn with_redirect_uri(mut self, value: impl Into<String>) -> Self {
        self.redirect_uri = Some(value.into());
        self
    }

    pub fn with_client_id(mut self, value: impl Into<String>) -> Self {
        self.client_id = Some(value.into());
        self
    }

    pub fn with_client_secret(mut self, value: impl Into<String>) -> Self {
        self.client_secret = Some(Secret::new(value.into()));
        self
    }

    pub fn with_auth_uri(mut self, value: impl Into<String>) -> Self {
        self.auth_uri = Some(value.into());
        self
    }

    pub fn with_auth_refresh_token_uri(mut self, value: impl Into<String>) -> Self {
        self.auth_refresh_token_uri = Some(value.into());
        self
    }

    pub fn with_response_type(mut self, value: impl Into<String>) -> Self {
        self.response_type = Some(value.into());
        self
    }

    /// Key/value view in [`OPTION_KEYS`] order.
    ///
    /// The client secret is exposed here; do not log the result.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 8] {
        [
            (OPTION_KEYS[0], self.base_uri.as_deref()),
            (OPTION_KEYS[1], self.default_scopes.as_deref()),
            (OPTION_KEYS[2], self.redirect_uri.as_deref()),
            (OPTION_KEYS[3], self.client_id.as_deref()),
            (
                OPTION_KEYS[4],
                self.client_secret.as_ref().map(|s| s.expose().as_str()),
            ),
            (OPTION_KEYS[5], self.auth_uri.as_deref()),
            (OPTION_KEYS[6], self.auth_refresh_token_uri.as_deref()),
            (OPTION_KEYS[7], self.response_type.as_deref()),
        ]
    }

    /// Parse options from TOML without consulting the environment.
    ///
    /// A `client_secret_file` key, when present, takes precedence over an
    /// inline `client_secret`.
    pub fn from_toml_str(contents: &str) -> common::Result<Self> {
        Self::parse(contents, None)
    }

    /// Load options from a TOML file.
    ///
    /// Client secret resolution order:
    /// 1. `JOINME_CLIENT_SECRET` env var
    /// 2. `client_secret_file` path from the file
    /// 3. inline `client_secret`
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| common::Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let env_secret = std::env::var(CLIENT_SECRET_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty());
        let options = Self::parse(&contents, env_secret)?;
        tracing::debug!(path = %path.display(), "loaded client options");
        Ok(options)
    }

    /// Resolve the options file path from a CLI arg or `JOINME_CONFIG`.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    fn parse(contents: &str, env_secret: Option<String>) -> common::Result<Self> {
        let file: OptionsFile = toml::from_str(contents)?;

        for (key, value) in [
            ("base_uri", &file.base_uri),
            ("redirect_uri", &file.redirect_uri),
            ("auth_uri", &file.auth_uri),
            ("auth_refresh_token_uri", &file.auth_refresh_token_uri),
        ] {
            if let Some(uri) = value {
                if !uri.starts_with("http://") && !uri.starts_with("https://") {
                    return Err(common::Error::InvalidUri {
                        key,
                        value: uri.clone(),
                    });
                }
            }
        }

        let client_secret = match env_secret {
            Some(secret) => Some(Secret::new(secret)),
            None => match file.client_secret_file {
                Some(ref secret_file) => {
                    let secret = std::fs::read_to_string(secret_file).map_err(|source| {
                        common::Error::SecretFile {
                            path: secret_file.clone(),
                            source,
                        }
                    })?;
                    let secret = secret.trim().to_owned();
                    if secret.is_empty() {
                        file.client_secret
                    } else {
                        Some(Secret::new(secret))
                    }
                }
                None => file.client_secret,
            },
        };

        Ok(Options {
            base_uri: file.base_uri,
            default_scopes: file.default_scopes,
            redirect_uri: file.redirect_uri,
            client_id: file.client_id,
            client_secret,
            auth_uri: file.auth_uri,
            auth_refresh_token_uri: file.auth_refresh_token_uri,
            response_type: file.response_type,
        })
    }
}

/// On-disk shape of the options file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsFile {
    base_uri: Option<String>,
    default_scopes: Option<String>,
    redirect_uri: Option<String>,
    client_id: Option<String>,
    client_secret: Option<Secret<String>>,
    /// Path to a file containing the client secret
    client_secret_file: Option<PathBuf>,
    auth_uri: Option<String>,
    auth_refresh_token_uri: Option<String>,
    response_type: Option<String>,
}
