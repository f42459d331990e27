use crate::parsers::html;
use serde::{Deserialize, Serialize};
use url::Url;

/// A fetched page together with its noise-stripped form
#[derive(Debug, Clone)]
pub struct Page {
    /// URL the page was fetched from
    pub url: Url,

    /// Body exactly as served
    pub raw_html: String,

    /// Body with scripts, styles, images and metadata removed
    pub normalized_html: String,
}

impl Page {
    /// Create a page, normalizing its HTML once up front
    pub fn new(url: Url, raw_html: String) -> Self {
        let normalized_html = html::normalize(&raw_html);
        ::log::debug!(
            "Normalized {}: {} -> {} bytes",
            url,
            raw_html.len(),
            normalized_html.len()
        );
        Self {
            url,
            raw_html,
            normalized_html,
        }
    }
}

/// Outcome of searching a page for its login entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    /// Link as written on the page; may be relative
    Found(String),
    NotFound,
}

/// Outcome of isolating the authentication form on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(String),
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

/// Final, caller-facing result of one workflow run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub status: Status,

    /// The extracted HTML on success, a human-readable reason on failure
    pub snippet_or_message: String,

    /// Last URL that was fetched successfully, or the start URL
    pub resolved_url: String,
}

impl WorkflowResult {
    pub fn success(snippet: String, resolved_url: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            snippet_or_message: snippet,
            resolved_url: resolved_url.into(),
        }
    }

    pub fn failure(message: String, resolved_url: impl Into<String>) -> Self {
        Self {
            status: Status::Failure,
            snippet_or_message: message,
            resolved_url: resolved_url.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
