//! join.me REST API client library
//!
//! Wraps the join.me v1 API: OAuth token exchange and authorization URLs,
//! meeting scheduling and control, and the user profile. Responses are
//! returned as `serde_json::Value` exactly as the service sent them.
//!
//! Typical flow:
//! 1. Build a [`ClientFactory`] from provider defaults, optionally loading
//!    an [`Options`] file via [`Options::load`]
//! 2. Create a [`Client`] per bearer token with `factory.http_client(..)`
//! 3. Send users to [`Client::build_authorization_url`] and exchange the
//!    returned code with [`Client::exchange_authorization_code`]
//! 4. Call meeting operations such as [`Client::schedule_meeting`]
//!
//! Clients never mutate shared state, so one can be used from many tasks
//! at once.

pub mod client;
pub mod config;
pub mod constants;
pub mod date;
pub mod error;
pub mod meetings;
pub mod oauth;
pub mod request;

#[cfg(test)]
mod testing;

pub use client::{Client, ClientFactory};
pub use config::{Configuration, Options};
pub use date::{DateInput, Strictness, normalize, normalize_lenient, normalize_strict};
pub use error::{Error, Result};
pub use meetings::{MeetingUpdate, StartMeeting};
pub use oauth::{Overrides, TokenResponse};
pub use request::RequestBuilder;
pub use transport::{HttpTransport, Method, Request, Transport, TransportError};
