use std::path::Path;

use serde_json::Value;

use crate::error::{ClientError, ClientResult};

pub const KEY_HEADER: &str = "x-rapidapi-key";
pub const HOST_HEADER: &str = "x-rapidapi-host";

/// RapidAPI key pair sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_host: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: api_host.into(),
        }
    }

    /// `RAPIDAPI_KEY` / `RAPIDAPI_HOST`.
    pub fn from_env() -> ClientResult<Self> {
        let api_key = std::env::var("RAPIDAPI_KEY").map_err(|_| ClientError::MissingEnv("RAPIDAPI_KEY"))?;
        let api_host = std::env::var("RAPIDAPI_HOST").map_err(|_| ClientError::MissingEnv("RAPIDAPI_HOST"))?;
        Ok(Self::new(api_key, api_host))
    }

    /// Parse a keys file: a JSON object holding both header values.
    pub fn from_json_str(body: &str) -> ClientResult<Self> {
        let value: Value = serde_json::from_str(body)?;
        let object = value
            .as_object()
            .ok_or_else(|| ClientError::InvalidCredentials("keys file is not a JSON object".to_string()))?;

        let field = |name: &str| -> ClientResult<String> {
            object
                .get(name)
                .and_then(Value::as_str)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ClientError::InvalidCredentials(format!("missing `{name}`")))
        };

        Ok(Self::new(field(KEY_HEADER)?, field(HOST_HEADER)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> ClientResult<Self> {
        let body = std::fs::read_to_string(path)?;
        Self::from_json_str(&body)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("api_host", &self.api_host)
            .finish()
    }
}
