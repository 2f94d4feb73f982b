use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::MisterError;

#[derive(Clone, Debug)]
pub struct MisterClient {
    pub(crate) http: Client,
    pub(crate) base_url: String,
}

impl MisterClient {
    pub fn new(config: &AppConfig) -> Result<Self, MisterError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client for a backend at `base_url` with no request timeout.
    pub fn connect(base_url: &str) -> Result<Self, MisterError> {
        Self::new(&AppConfig::with_base_url(base_url))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Rejects non-2xx responses, carrying the backend's `message`/`error` field
/// when there is one, then decodes the body.
pub(crate) async fn json_body<T: DeserializeOwned>(resp: Response) -> Result<T, MisterError> {
    let status = resp.status();
    if !status.is_success() {
        let body: serde_json::Value = resp.json().await.unwrap_or_default();
        let message = body["message"]
            .as_str()
            .or_else(|| body["error"].as_str())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"))
            .to_string();
        return Err(MisterError::ApiError {
            status: status.as_u16(),
            message,
        });
    }
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
