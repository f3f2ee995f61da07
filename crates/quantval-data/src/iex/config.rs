//! Connection settings for IEX Cloud.

use crate::error::{DataError, Result};

/// Environment variable holding the API token.
pub const TOKEN_VAR: &str = "IEX_CLOUD_TOKEN";

/// Environment variable overriding the API base URL.
pub const BASE_URL_VAR: &str = "IEX_BASE_URL";

/// Default API base URL (the sandbox environment).
pub const DEFAULT_BASE_URL: &str = "https://sandbox.iexapis.com/stable";

/// IEX Cloud connection settings.
#[derive(Clone)]
pub struct IexConfig {
    /// API token sent with every request
    pub token: String,
    /// Base URL without trailing slash
    pub base_url: String,
}

impl std::fmt::Debug for IexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IexConfig")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl IexConfig {
    /// Create a configuration for the default base URL.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load settings from the environment, reading a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                DataError::Config(format!("{TOKEN_VAR} environment variable required"))
            })?;

        let config = Self::new(token.trim());
        Ok(match lookup(BASE_URL_VAR).filter(|u| !u.trim().is_empty()) {
            Some(url) => config.with_base_url(url.trim()),
            None => config,
        })
    }
}
