//! Errors from loading client options

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an options file into usable settings.
#[derive(Error, Debug)]
pub enum Error {
    #[error("reading {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("parsing options: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{key} must start with http:// or https://, got: {value}")]
    InvalidUri { key: &'static str, value: String },

    #[error("reading client_secret_file {}: {source}", .path.display())]
    SecretFile { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn read_error_names_the_file() {
        let err = Error::Read {
            path: PathBuf::from("/etc/joinme.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "reading /etc/joinme.toml: no such file");
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_uri_names_the_key() {
        let err = Error::InvalidUri {
            key: "auth_uri",
            value: "secure.join.me".into(),
        };
        assert_eq!(
            err.to_string(),
            "auth_uri must start with http:// or https://, got: secure.join.me"
        );
    }

    #[test]
    fn toml_error_converts() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("client_id = ");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
