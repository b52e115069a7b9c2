use super::CallError;
use crate::config::Config;
use crate::{Error, Result};
use reqwest::Url;
use serde_json::Value;

/// Thin reqwest wrapper carrying the provider endpoint and credentials.
///
/// Request timeout defaults to 5s (see [`Config`]); the provider
/// authenticates with `Authorization: x-api-key <key>`. Response status
/// codes are deliberately not consulted here — the provider reports
/// failures inside its JSON envelope and the drivers interpret that.
pub struct NicTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NicTransport {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| Error::configuration(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url_for(&self, path: &str) -> std::result::Result<Url, CallError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| CallError::RequestConstruction(e.to_string()))
    }

    /// POST a JSON body and return the decoded JSON response body.
    pub async fn post_json(
        &self,
        path: &str,
        body: &Value,
    ) -> std::result::Result<Value, CallError> {
        let url = self.url_for(path)?;
        let resp = self
            .client
            .post(url)
            .header("Authorization", format!("x-api-key {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(CallError::Decoding)
    }

    /// GET a path and return the decoded JSON response body.
    pub async fn get_json(&self, path: &str) -> std::result::Result<Value, CallError> {
        let url = self.url_for(path)?;
        let resp = self
            .client
            .get(url)
            .header("Authorization", format!("x-api-key {}", self.api_key))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(CallError::Decoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> NicTransport {
        NicTransport::new(&Config::new("https://nic.example.com/", "secret")).unwrap()
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let t = transport();
        let url = t.url_for("/public-api/products").unwrap();
        assert_eq!(url.as_str(), "https://nic.example.com/public-api/products");
    }

    #[test]
    fn test_bad_base_url_is_request_construction_error() {
        let t = NicTransport::new(&Config::new("nic.example.com", "secret")).unwrap();
        let err = t.url_for("/x").unwrap_err();
        assert_eq!(err.to_string(), "Failed to create request");
    }
}
