use clap::{Parser, ValueEnum};
use login_scout::Policy;
use std::path::PathBuf;

const SUGGESTED_SITES: &str = "Suggested test sites:
  https://www.amazon.com/
  https://stackoverflow.com/questions
  https://edition.cnn.com/
  https://www.box.com/home
  https://news.yahoo.com";

#[derive(Parser, Debug)]
#[command(name = "login-scout")]
#[command(about = "Finds a site's login page and extracts its authentication form HTML")]
#[command(version)]
#[command(after_help = SUGGESTED_SITES)]
pub struct Args {
    /// Website URL to start from
    pub url: String,

    /// Whether to look for a login link first or try the start page first
    #[arg(short, long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Page fetch timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Completion model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long)]
    pub base_url: Option<String>,

    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    LocateFirst,
    ExtractFirst,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::LocateFirst => Policy::LocateFirst,
            PolicyArg::ExtractFirst => Policy::ExtractFirst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "login-scout",
            "https://site.com",
            "--policy",
            "extract-first",
            "--timeout",
            "5",
            "--api-key",
            "sk-test",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.url, "https://site.com");
        assert_eq!(args.policy.map(Policy::from), Some(Policy::ExtractFirst));
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.api_key, "sk-test");
        assert!(args.json);
        assert!(args.config.is_none());
    }
}
