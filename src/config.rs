use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Order in which the workflow tries extraction and link location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// Always look for a login link on the start page, then extract on the target
    #[default]
    LocateFirst,
    /// Try to extract on the start page, fall back to locating a login link
    ExtractFirst,
}

/// Top-level configuration for a scouting run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub policy: Policy,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub oracle: OracleConfig,

    #[serde(default)]
    pub locator: LocatorConfig,
}

/// Settings for outbound page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    #[serde(default = "default_referer")]
    pub referer: String,
}

/// Settings for the chat-completion oracle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub temperature: f32,

    /// HTML sent to the oracle is cut to this many characters
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    #[serde(default = "default_oracle_timeout")]
    pub timeout_secs: u64,
}

/// Heuristic data for the rule-based locator tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Substrings that mark an embedded absolute URL as a login endpoint
    #[serde(default = "default_url_markers")]
    pub url_markers: Vec<String>,

    /// Embedded URLs whose path ends with one of these are static assets
    #[serde(default = "default_asset_extensions")]
    pub asset_extensions: Vec<String>,

    /// Matched case-insensitively against anchor href and text
    #[serde(default = "default_link_keywords")]
    pub link_keywords: Vec<String>,

    /// An anchor whose href contains one of these is never chosen
    #[serde(default = "default_trap_terms")]
    pub trap_terms: Vec<String>,
}

impl ScoutConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
            referer: default_referer(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: 0.0,
            max_input_chars: default_max_input_chars(),
            timeout_secs: default_oracle_timeout(),
        }
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            url_markers: default_url_markers(),
            asset_extensions: default_asset_extensions(),
            link_keywords: default_link_keywords(),
            trap_terms: default_trap_terms(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    12
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36".to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
        .to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_referer() -> String {
    "https://www.google.com/".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_input_chars() -> usize {
    80_000
}

fn default_oracle_timeout() -> u64 {
    60
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_url_markers() -> Vec<String> {
    strings(&["auth/login", "myaccount", "signin", "account/login", "/login"])
}

fn default_asset_extensions() -> Vec<String> {
    strings(&[".js", ".css", ".png", ".jpg"])
}

fn default_link_keywords() -> Vec<String> {
    strings(&["log in", "login", "sign in", "signin", "my account", "auth"])
}

fn default_trap_terms() -> Vec<String> {
    strings(&["logout", "help", "search", "newsletter"])
}
