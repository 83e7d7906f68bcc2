//! join.me API defaults
//!
//! Endpoint and scope values every client starts from unless the integrator
//! overrides them. Client id, client secret and redirect URI have no
//! default; they belong to the integrator's registered application.

/// REST API root for meetings and user resources
pub const BASE_URI: &str = "https://api.join.me/v1/";

/// Authorization endpoint the user's browser is redirected to
pub const AUTH_URI: &str = "https://secure.join.me/api/public/v1/auth/oauth2";

/// Token endpoint for code exchange and token refresh
pub const AUTH_REFRESH_TOKEN_URI: &str = "https://secure.join.me/api/public/v1/auth/token";

/// Scopes requested when the caller does not name any
pub const DEFAULT_SCOPES: &str = "user_info scheduler start_meeting";

/// `response_type` used by the generic authorize URL (implicit flow)
pub const RESPONSE_TYPE: &str = "token";

/// User-Agent sent with every API request
pub const USER_AGENT: &str = "X-JOINME-CLIENT";

/// Env var that supplies the client secret when loading options from a file
pub const CLIENT_SECRET_ENV: &str = "JOINME_CLIENT_SECRET";

/// Env var naming the options file
pub const CONFIG_PATH_ENV: &str = "JOINME_CONFIG";

/// Options file used when neither a CLI path nor `JOINME_CONFIG` is given
pub const DEFAULT_CONFIG_FILE: &str = "joinme.toml";
