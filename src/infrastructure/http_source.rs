// HTTP occupancy source implementation
use crate::application::occupancy_source::{LoadError, OccupancySource};
use crate::domain::location::LocationRecord;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpOccupancySource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOccupancySource {
    pub fn new(endpoint: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OccupancySource for HttpOccupancySource {
    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, LoadError> {
        tracing::debug!("fetching occupancy from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::Status { status, body });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| LoadError::Decode(e.to_string()))
    }
}
