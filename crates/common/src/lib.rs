//! Credential holder and options-file errors shared by the join.me crates

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
