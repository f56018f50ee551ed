use anyhow::Result;

pub mod page_client;
pub use page_client::PageClient;

/// Source of raw HTML pages
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}
