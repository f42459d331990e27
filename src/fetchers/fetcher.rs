use crate::error::Result;
use crate::results::Page;
use async_trait::async_trait;
use url::Url;

/// Retrieves the HTML body behind a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the raw body; a non-2xx status or transport failure is an error
    async fn fetch(&self, url: &Url) -> Result<String>;

    /// Fetch and normalize into a `Page`. Implementations that follow
    /// redirects record the final URL, so links resolve against it.
    async fn fetch_page(&self, url: &Url) -> Result<Page> {
        let raw_html = self.fetch(url).await?;
        Ok(Page::new(url.clone(), raw_html))
    }
}
