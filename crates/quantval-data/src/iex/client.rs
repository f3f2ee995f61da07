//! HTTP client for the IEX Cloud batch endpoint.

use super::config::IexConfig;
use super::response::{BATCH_TYPES, parse_batch_response};
use crate::error::{DataError, Result};
use crate::provider::QuoteProvider;
use crate::quote::RawQuote;
use std::collections::HashMap;
use tracing::debug;

/// IEX Cloud quote and fundamentals provider.
///
/// Each [`QuoteProvider::fetch_batch`] call issues exactly one
/// `GET {base_url}/stock/market/batch` request. There is no retry.
#[derive(Debug, Clone)]
pub struct IexCloudProvider {
    client: reqwest::Client,
    config: IexConfig,
}

impl IexCloudProvider {
    /// Create a provider with a fresh HTTP client.
    pub fn new(config: IexConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("quantval/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a provider reusing an existing HTTP client.
    pub const fn with_client(client: reqwest::Client, config: IexConfig) -> Self {
        Self { client, config }
    }

    /// Create a provider from environment settings.
    pub fn from_env() -> Result<Self> {
        Self::new(IexConfig::from_env()?)
    }

    /// URL of the batch endpoint.
    pub fn batch_url(&self) -> String {
        format!("{}/stock/market/batch", self.config.base_url)
    }

    async fn request_batch(&self, symbols: &[String]) -> Result<HashMap<String, RawQuote>> {
        if let Some(bad) = symbols.iter().find(|s| s.is_empty() || s.contains(',')) {
            return Err(DataError::InvalidSymbol(bad.clone()));
        }

        let joined = symbols.join(",");
        debug!(count = symbols.len(), "Requesting IEX batch");

        let response = self
            .client
            .get(self.batch_url())
            .query(&[
                ("symbols", joined.as_str()),
                ("types", BATCH_TYPES),
                ("token", self.config.token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await);
            return Err(DataError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;
        parse_batch_response(&body)
    }
}

/// Body of a failed response, or a note that it could not be read.
fn error_body<E: std::fmt::Display>(body: std::result::Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}

impl QuoteProvider for IexCloudProvider {
    async fn fetch_batch(&self, symbols: &[String]) -> Result<HashMap<String, RawQuote>> {
        if symbols.is_empty() {
            return Ok(HashMap::new());
        }
        self.request_batch(symbols).await
    }
}
