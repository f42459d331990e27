use super::Fetcher;
use crate::config::FetchConfig;
use crate::error::{Result, ScoutError};
use crate::results::Page;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use std::time::Duration;
use url::Url;

/// Plain GET fetcher that presents itself as a desktop browser
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (USER_AGENT, &config.user_agent),
            (ACCEPT, &config.accept),
            (ACCEPT_LANGUAGE, &config.accept_language),
            (REFERER, &config.referer),
        ] {
            let value = HeaderValue::from_str(value).map_err(|_| {
                ScoutError::Config(format!("invalid value for header {}: {:?}", name, value))
            })?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScoutError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET `url`, returning the URL reached after redirects and the body
    async fn get(&self, url: &Url) -> Result<(Url, String)> {
        let start = std::time::Instant::now();
        ::log::debug!("GET {}", url);

        let network = |e: reqwest::Error| ScoutError::Network {
            url: url.to_string(),
            message: if e.is_timeout() {
                "request timed out".to_string()
            } else {
                e.to_string()
            },
        };

        let response = self.client.get(url.clone()).send().await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            ::log::warn!("GET {} returned {}", url, status);
            return Err(ScoutError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        if &final_url != url {
            ::log::debug!("{} redirected to {}", url, final_url);
        }

        let body = response.text().await.map_err(network)?;
        ::log::debug!(
            "Fetched {} ({} bytes) in {:.2} seconds",
            final_url,
            body.len(),
            start.elapsed().as_secs_f64()
        );
        Ok((final_url, body))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let (_, body) = self.get(url).await?;
        Ok(body)
    }

    async fn fetch_page(&self, url: &Url) -> Result<Page> {
        let (final_url, raw_html) = self.get(url).await?;
        Ok(Page::new(final_url, raw_html))
    }
}
