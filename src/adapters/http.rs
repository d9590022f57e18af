use crate::config::ApiSettings;
use crate::domain::ports::{ArtApi, QueryParam};
use crate::utils::error::{AicError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;

/// Header the AIC API asks clients to identify themselves with.
pub const AIC_USER_AGENT_HEADER: &str = "aic-user-agent";

#[derive(Debug, Clone)]
pub struct AicClient {
    base_url: String,
    client: Client,
}

impl AicClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&settings.user_agent).map_err(|e| {
            AicError::invalid("api.user_agent", &settings.user_agent, e.to_string())
        })?;
        headers.insert(AIC_USER_AGENT_HEADER, user_agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| AicError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl ArtApi for AicClient {
    async fn fetch(&self, endpoint: &str, params: &[QueryParam]) -> Result<serde_json::Value> {
        let url = self.endpoint_url(endpoint);
        let query: Vec<(&str, &str)> = params
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
            .collect();

        tracing::info!("Making request to {} with params: {:?}", url, query);
        let response = match self.client.get(&url).query(&query).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Request error: {}", e);
                return Err(AicError::HttpError(e));
            }
        };

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!("HTTP error {}: {}", status.as_u16(), body);
            return Err(AicError::ApiStatusError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
