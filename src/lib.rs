pub mod config;
pub mod error;
pub mod extractor;
pub mod fetchers;
pub mod filter;
pub mod locator;
pub mod oracle;
pub mod parsers;
pub mod results;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use config::{Policy, ScoutConfig};
pub use error::{Result, ScoutError};
pub use oracle::{OpenAiOracle, Oracle};
pub use results::{Status, WorkflowResult};
pub use workflow::{LogProgress, Progress, ProgressSink, Workflow, WorkflowState};

use extractor::FormExtractor;
use fetchers::{Fetcher, HttpFetcher};
use filter::LinkFilter;
use locator::LinkLocator;
use std::sync::Arc;

/// Main builder for a login-scouting workflow
pub struct Scout {
    config: ScoutConfig,
    oracle: Arc<dyn Oracle>,
    fetcher: Option<Arc<dyn Fetcher>>,
    progress: Arc<dyn ProgressSink>,
}

impl Scout {
    /// Create a new Scout builder around the given oracle
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self {
            config: ScoutConfig::default(),
            oracle,
            fetcher: None,
            progress: Arc::new(LogProgress),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ScoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = ScoutConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self> {
        let config = ScoutConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Choose between locate-first and extract-first
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Set the page fetch timeout
    pub fn with_fetch_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.fetch.timeout_secs = timeout_seconds;
        self
    }

    /// Use a custom fetcher instead of the HTTP one built from config
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Receive progress notifications
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// Assemble the workflow, compiling locator patterns and the HTTP client
    pub fn build(self) -> Result<Workflow> {
        let fetcher: Arc<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(&self.config.fetch)?),
        };

        let max_chars = self.config.oracle.max_input_chars;
        let locator = LinkLocator::new(
            LinkFilter::new(&self.config.locator)?,
            Arc::clone(&self.oracle),
            max_chars,
        );
        let extractor = FormExtractor::new(Arc::clone(&self.oracle), max_chars);

        ::log::debug!("Built workflow with policy {:?}", self.config.policy);
        Ok(Workflow::new(
            self.config.policy,
            fetcher,
            locator,
            extractor,
            self.progress,
        ))
    }

    /// Build and run once
    pub async fn run(self, start_url: &str) -> Result<WorkflowResult> {
        let workflow = self.build()?;
        Ok(workflow.run(start_url).await)
    }
}
