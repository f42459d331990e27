use crate::config::LocatorConfig;
use crate::error::Result;
use crate::parsers::html::{self, Anchor};
use regex::Regex;
use url::Url;

/// Rule-based login link detection, compiled from a `LocatorConfig`
#[derive(Debug)]
pub struct LinkFilter {
    embedded_url_regex: Option<Regex>,
    asset_extensions: Vec<String>,
    link_keywords: Vec<String>,
    trap_terms: Vec<String>,
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self::new(&LocatorConfig::default()).expect("Default locator patterns should be valid")
    }
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: &LocatorConfig) -> Result<Self> {
        let markers = config
            .url_markers
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>();

        // A quoted absolute URL with a marker somewhere after the scheme
        let embedded_url_regex = if markers.is_empty() {
            None
        } else {
            let pattern = format!(
                r#"["'](https?://[^\s"'<>]+(?:{})[^\s"'<>]*?)["']"#,
                markers.join("|")
            );
            Some(Regex::new(&pattern)?)
        };

        Ok(Self {
            embedded_url_regex,
            asset_extensions: lowercase(&config.asset_extensions),
            link_keywords: lowercase(&config.link_keywords),
            trap_terms: lowercase(&config.trap_terms),
        })
    }

    /// Pattern tier: first quoted login URL in the raw source that is not a static asset
    pub fn find_embedded_url(&self, raw_html: &str) -> Option<String> {
        self.embedded_url_regex
            .as_ref()?
            .captures_iter(raw_html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .find(|candidate| {
                let asset = self.is_static_asset(candidate);
                if asset {
                    ::log::debug!("Skipping embedded asset URL: {}", candidate);
                }
                !asset
            })
            .map(str::to_string)
    }

    /// Structural tier: first anchor that looks like a login link and is not a trap
    pub fn find_login_anchor(&self, normalized_html: &str) -> Option<String> {
        html::anchors(normalized_html)
            .into_iter()
            .find(|anchor| self.matches_anchor(anchor))
            .map(|anchor| anchor.href)
    }

    /// Check a single anchor against the keyword and trap lists
    pub fn matches_anchor(&self, anchor: &Anchor) -> bool {
        let href = anchor.href.to_lowercase();
        let text = anchor.text.to_lowercase();

        let keyword = self
            .link_keywords
            .iter()
            .any(|kw| href.contains(kw.as_str()) || text.contains(kw.as_str()));
        if !keyword {
            return false;
        }

        if let Some(trap) = self.trap_terms.iter().find(|t| href.contains(t.as_str())) {
            ::log::debug!("Rejecting trap link {} (matched '{}')", anchor.href, trap);
            return false;
        }

        true
    }

    /// Judge by the path extension, so `/login.jsp` is not mistaken for `.js`
    fn is_static_asset(&self, candidate: &str) -> bool {
        let path = match Url::parse(candidate) {
            Ok(url) => url.path().to_lowercase(),
            Err(_) => candidate.to_lowercase(),
        };
        self.asset_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
    }
}

fn lowercase(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(href: &str, text: &str) -> Anchor {
        Anchor {
            href: href.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_embedded_url_in_script() {
        let filter = LinkFilter::default();
        let raw = r#"<html><head><script>window.__cfg = {"auth": "https://x.com/account/login/abc"};</script></head><body></body></html>"#;

        assert_eq!(
            filter.find_embedded_url(raw).as_deref(),
            Some("https://x.com/account/login/abc")
        );
    }

    #[test]
    fn test_embedded_url_single_quotes() {
        let filter = LinkFilter::default();
        let raw = "<script>var u = 'https://www.site.com/ap/signin?openid=1';</script>";

        assert_eq!(
            filter.find_embedded_url(raw).as_deref(),
            Some("https://www.site.com/ap/signin?openid=1")
        );
    }

    #[test]
    fn test_embedded_url_skips_assets() {
        let filter = LinkFilter::default();
        let raw = r#"<link href="https://cdn.site.com/signin/bundle.css">
            <script src="https://cdn.site.com/login/app.js"></script>
            <img src="https://cdn.site.com/myaccount/avatar.PNG">
            <a href="https://site.com/myaccount/home">Account</a>"#;

        assert_eq!(
            filter.find_embedded_url(raw).as_deref(),
            Some("https://site.com/myaccount/home")
        );
    }

    #[test]
    fn test_embedded_url_first_match_wins() {
        let filter = LinkFilter::default();
        let raw = r#""https://site.com/signin" "https://site.com/auth/login""#;

        assert_eq!(
            filter.find_embedded_url(raw).as_deref(),
            Some("https://site.com/signin")
        );
    }

    #[test]
    fn test_embedded_url_requires_absolute_quoted_url() {
        let filter = LinkFilter::default();

        assert!(filter.find_embedded_url(r#"<a href="/login">Log in</a>"#).is_none());
        assert!(filter.find_embedded_url("https://site.com/login unquoted").is_none());
        assert!(filter.find_embedded_url(r#""https://site.com/about""#).is_none());
    }

    #[test]
    fn test_jsp_is_not_an_asset() {
        let filter = LinkFilter::default();
        let raw = r#""https://site.com/login.jsp""#;

        assert_eq!(
            filter.find_embedded_url(raw).as_deref(),
            Some("https://site.com/login.jsp")
        );
    }

    #[test]
    fn test_anchor_keywords() {
        let filter = LinkFilter::default();

        assert!(filter.matches_anchor(&anchor("/login", "Log In")));
        assert!(filter.matches_anchor(&anchor("/account", "My Account")));
        assert!(filter.matches_anchor(&anchor("/u/session", "SIGN IN")));
        assert!(filter.matches_anchor(&anchor("/oauth/start", "Continue")));
        assert!(!filter.matches_anchor(&anchor("/about", "About us")));
    }

    #[test]
    fn test_anchor_traps() {
        let filter = LinkFilter::default();

        assert!(!filter.matches_anchor(&anchor("/help/signin-issues", "Trouble signing in?")));
        assert!(!filter.matches_anchor(&anchor("/logout", "Log out")));
        assert!(!filter.matches_anchor(&anchor("/newsletter/signin", "Sign in")));
        // Traps are only checked against the href
        assert!(filter.matches_anchor(&anchor("/login", "Login or get help")));
    }

    #[test]
    fn test_find_login_anchor_skips_traps() {
        let filter = LinkFilter::default();
        let html = r#"<body>
            <a href="/help/signin-issues">Trouble signing in?</a>
            <a href="/login">Log In</a>
            <a href="/signin">Sign in</a>
        </body>"#;

        assert_eq!(filter.find_login_anchor(html).as_deref(), Some("/login"));
    }

    #[test]
    fn test_custom_config() {
        let config = LocatorConfig {
            url_markers: vec!["connexion".to_string()],
            asset_extensions: vec![],
            link_keywords: vec!["se connecter".to_string()],
            trap_terms: vec!["aide".to_string()],
        };
        let filter = LinkFilter::new(&config).unwrap();

        assert_eq!(
            filter.find_embedded_url(r#""https://site.fr/connexion""#).as_deref(),
            Some("https://site.fr/connexion")
        );
        assert!(filter.find_embedded_url(r#""https://site.fr/login""#).is_none());
        assert!(filter.matches_anchor(&anchor("/compte", "Se connecter")));
        assert!(!filter.matches_anchor(&anchor("/aide/compte", "Se connecter")));
    }

    #[test]
    fn test_empty_markers_match_nothing() {
        let config = LocatorConfig {
            url_markers: vec![],
            ..LocatorConfig::default()
        };
        let filter = LinkFilter::new(&config).unwrap();
        assert!(filter.find_embedded_url(r#""https://site.com/login""#).is_none());
    }
}
