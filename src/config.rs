use std::env;
use std::fmt;
use thiserror::Error;

pub const API_KEY_VAR: &str = "API_KEY";
pub const API_BASE_VAR: &str = "CHATPPT_API_BASE";
pub const DEFAULT_API_BASE: &str = "https://saas.api.yoo-ai.com";
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    MissingCredential(&'static str),
}

/// Bearer token forwarded on every outgoing request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    header_value: String,
}

impl Credential {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_value(env::var(API_KEY_VAR).ok())
    }

    pub fn from_value(token: Option<String>) -> Result<Self, ConfigError> {
        match token {
            Some(token) if !token.trim().is_empty() => Ok(Self {
                header_value: format!("Bearer {token}"),
            }),
            _ => Err(ConfigError::MissingCredential(API_KEY_VAR)),
        }
    }

    pub fn header_value(&self) -> &str {
        &self.header_value
    }
}

// Keeps the token out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(Bearer ***)")
    }
}

pub fn normalize_base_url(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
