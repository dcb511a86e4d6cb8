//! Credentials and endpoint configuration.

use std::error;
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::token::Token;

pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1";

/// Configuration of a [`Client`](crate::Client), usually read from a `credential.json` file:
///
/// ```json
/// {
///     "consumer_key": "...",
///     "consumer_secret": "...",
///     "access_key": "...",
///     "access_secret": "..."
/// }
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_key: String,
    pub access_secret: String,
    /// Base URL of the REST API, without a trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

/// An error occurred while loading a [`Config`].
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_owned()
}

impl Config {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_key: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Config {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_key: access_key.into(),
            access_secret: access_secret.into(),
            api_base: default_api_base(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        serde_json::from_reader(reader).map_err(ConfigError::Json)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(ConfigError::Io)?;
        Config::from_reader(BufReader::new(file))
    }

    /// Makes an OAuth token out of the consumer and access credentials.
    pub fn token(&self) -> Token {
        Token::new(
            self.consumer_key.clone(),
            self.consumer_secret.clone(),
            self.access_key.clone(),
            self.access_secret.clone(),
        )
    }

    pub(crate) fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            ConfigError::Io(ref e) => Some(e),
            ConfigError::Json(ref e) => Some(e),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigError::Io(ref e) => write!(f, "failed to read configuration: {}", e),
            ConfigError::Json(ref e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_reader() {
        let json = r#"{
            "consumer_key": "ck",
            "consumer_secret": "cs",
            "access_key": "ak",
            "access_secret": "as"
        }"#;
        let config = Config::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.api_base(), DEFAULT_API_BASE);

        let token = config.token();
        assert_eq!(token.client.identifier(), "ck");
        assert_eq!(token.client.secret(), "cs");
        assert_eq!(token.token.identifier(), "ak");
        assert_eq!(token.token.secret(), "as");
    }

    #[test]
    fn api_base_override() {
        let json = r#"{
            "consumer_key": "ck",
            "consumer_secret": "cs",
            "access_key": "ak",
            "access_secret": "as",
            "api_base": "http://localhost:8080/1.1/"
        }"#;
        let config = Config::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.api_base(), "http://localhost:8080/1.1");
    }

    #[test]
    fn missing_field() {
        match Config::from_reader(r#"{"consumer_key": "ck"}"#.as_bytes()) {
            Err(ConfigError::Json(_)) => {}
            r => panic!("{:?}", r),
        }
    }
}
