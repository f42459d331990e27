//! Deterministic stand-ins for the network-facing traits.

use crate::error::{Result, ScoutError};
use crate::fetchers::Fetcher;
use crate::oracle::Oracle;
use crate::results::Page;
use crate::workflow::{Progress, ProgressSink};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use url::Url;

/// Oracle that replays scripted responses in order and records prompts
pub struct ScriptedOracle {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    fail: bool,
}

impl ScriptedOracle {
    pub fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(str::to_string).collect()),
            prompts: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// Every call fails as if the completion service were down
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(vec![])
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(ScoutError::Oracle("service unavailable".to_string()));
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ScoutError::Oracle("no scripted response left".to_string()))
    }
}

/// Fetcher serving canned bodies or statuses per URL
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, std::result::Result<String, u16>>,
    redirects: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    /// Serve `to` when `from` is requested, as a followed redirect would
    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.redirects.insert(from.to_string(), to.to_string());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let (_, body) = self.serve(url)?;
        Ok(body)
    }

    async fn fetch_page(&self, url: &Url) -> Result<Page> {
        let (final_url, body) = self.serve(url)?;
        Ok(Page::new(final_url, body))
    }
}

impl StubFetcher {
    fn serve(&self, url: &Url) -> Result<(Url, String)> {
        self.fetched.lock().unwrap().push(url.to_string());
        let final_url = match self.redirects.get(url.as_str()) {
            Some(to) => Url::parse(to).unwrap(),
            None => url.clone(),
        };
        let body = self.lookup(&final_url)?;
        Ok((final_url, body))
    }

    fn lookup(&self, url: &Url) -> Result<String> {
        match self.pages.get(url.as_str()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(ScoutError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(ScoutError::Network {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

/// Progress sink that keeps every notification
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Progress>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<Progress> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn notify(&self, progress: &Progress) {
        self.events.lock().unwrap().push(progress.clone());
    }
}
