use crate::core::{Band, BandSource, ConfigProvider};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Reads the band list from the catalogue's JSON endpoint.
pub struct HttpBandSource {
    client: Client,
    url: String,
}

impl HttpBandSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;
        Ok(Self {
            client,
            url: config.bands_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl BandSource for HttpBandSource {
    async fn fetch_bands(&self) -> Result<Vec<Band>> {
        tracing::debug!("Making API request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(ClientError::BadStatus {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let bands: Vec<Band> = serde_json::from_str(&body)?;
        tracing::debug!("Fetched {} band(s)", bands.len());
        Ok(bands)
    }
}
