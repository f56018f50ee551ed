use anyhow::{Result, anyhow};
use reqwest::{Client, header::{HeaderMap, HeaderValue, ACCEPT}};
use tracing::debug;

use crate::models::Config;
use super::PageFetcher;

/// Plain HTTP client for historical-data pages
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Create a new page client
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml"));

        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for PageClient {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("Making request to: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow!("Page request failed with status {}: {}", status, url));
        }

        let body = response.text().await?;
        debug!("Page received: {} bytes", body.len());
        Ok(body)
    }
}
