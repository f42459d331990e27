use crate::config::Policy;
use crate::error::{Result, ScoutError};
use crate::extractor::FormExtractor;
use crate::fetchers::Fetcher;
use crate::locator::LinkLocator;
use crate::results::{Extraction, Located, WorkflowResult};
use crate::utils::{parse_url, resolve_url};
use std::sync::Arc;

/// Stage reached by a workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Init,
    FetchedStart,
    Located,
    FetchedTarget,
    Done,
}

/// A human-readable notification emitted on each state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub state: WorkflowState,
    pub message: String,
}

/// Observer for progress notifications. Sinks cannot affect the run.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, progress: &Progress);
}

/// Writes progress to the `log` facade
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn notify(&self, progress: &Progress) {
        ::log::info!("[{:?}] {}", progress.state, progress.message);
    }
}

/// Start page → (optional) login page → authentication snippet.
///
/// At most two pages are fetched per run. Every page is normalized before
/// the oracle sees it, and a located link is resolved against the page it
/// was found on.
pub struct Workflow {
    policy: Policy,
    fetcher: Arc<dyn Fetcher>,
    locator: LinkLocator,
    extractor: FormExtractor,
    progress: Arc<dyn ProgressSink>,
}

impl Workflow {
    pub fn new(
        policy: Policy,
        fetcher: Arc<dyn Fetcher>,
        locator: LinkLocator,
        extractor: FormExtractor,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            policy,
            fetcher,
            locator,
            extractor,
            progress,
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Run once for `start_url`. Failures are reported in the result, not raised.
    pub async fn run(&self, start_url: &str) -> WorkflowResult {
        let mut resolved_url = start_url.to_string();

        match self.execute(start_url, &mut resolved_url).await {
            Ok(snippet) => {
                self.emit(WorkflowState::Done, "Authentication snippet extracted");
                WorkflowResult::success(snippet, resolved_url)
            }
            Err(e) => {
                ::log::error!("Workflow for {} failed: {}", start_url, e);
                self.emit(WorkflowState::Done, format!("Failed: {}", e));
                WorkflowResult::failure(e.to_string(), resolved_url)
            }
        }
    }

    /// `resolved_url` tracks the last page fetched successfully
    async fn execute(&self, start_url: &str, resolved_url: &mut String) -> Result<String> {
        self.emit(
            WorkflowState::Init,
            format!("Scanning main page: {}", start_url),
        );
        let start = parse_url(start_url)?;

        let page = self.fetcher.fetch_page(&start).await?;
        self.emit(
            WorkflowState::FetchedStart,
            format!("Fetched main page: {}", page.url),
        );

        if self.policy == Policy::ExtractFirst {
            match self.extractor.extract(&page.normalized_html).await? {
                Extraction::Found(snippet) => return Ok(snippet),
                Extraction::NotFound => {
                    ::log::info!("No form on {}, looking for a login link", page.url);
                }
            }
        }

        let link = match self
            .locator
            .locate(&page.raw_html, &page.normalized_html)
            .await?
        {
            Located::Found(link) => link,
            Located::NotFound => return Err(ScoutError::LocatorNotFound(page.url.to_string())),
        };

        let target = resolve_url(&page.url, &link)?;
        self.emit(
            WorkflowState::Located,
            format!("Entry point identified: {}", target),
        );

        let target_page = self.fetcher.fetch_page(&target).await?;
        *resolved_url = target_page.url.to_string();
        self.emit(
            WorkflowState::FetchedTarget,
            format!("Extracting authentication module from {}", target_page.url),
        );

        match self.extractor.extract(&target_page.normalized_html).await? {
            Extraction::Found(snippet) => Ok(snippet),
            Extraction::NotFound => Err(ScoutError::ExtractorNotFound(target_page.url.to_string())),
        }
    }

    fn emit(&self, state: WorkflowState, message: impl Into<String>) {
        self.progress.notify(&Progress {
            state,
            message: message.into(),
        });
    }
}
