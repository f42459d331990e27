use crate::error::Result;
use crate::filter::LinkFilter;
use crate::oracle::{Answer, Oracle, prompts};
use crate::results::Located;
use crate::utils::truncate_chars;
use std::sync::Arc;

/// Which tier produced a login link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Pattern,
    Structural,
    Oracle,
}

/// Finds a page's login entry point, cheapest tier first
pub struct LinkLocator {
    filter: LinkFilter,
    oracle: Arc<dyn Oracle>,
    max_input_chars: usize,
}

impl LinkLocator {
    pub fn new(filter: LinkFilter, oracle: Arc<dyn Oracle>, max_input_chars: usize) -> Self {
        Self {
            filter,
            oracle,
            max_input_chars,
        }
    }

    /// Run the rule-based tiers only.
    ///
    /// The pattern tier scans `raw_html` because inline scripts, which often
    /// carry the real auth endpoint, are gone from `normalized_html`.
    pub fn locate_by_rules(&self, raw_html: &str, normalized_html: &str) -> Option<(Tier, String)> {
        if let Some(url) = self.filter.find_embedded_url(raw_html) {
            return Some((Tier::Pattern, url));
        }
        self.filter
            .find_login_anchor(normalized_html)
            .map(|href| (Tier::Structural, href))
    }

    /// Run all three tiers, falling back to the oracle
    pub async fn locate(&self, raw_html: &str, normalized_html: &str) -> Result<Located> {
        if let Some((tier, link)) = self.locate_by_rules(raw_html, normalized_html) {
            ::log::info!("{:?} tier found login link: {}", tier, link);
            return Ok(Located::Found(link));
        }

        ::log::debug!("Rule-based tiers found nothing, asking the oracle");
        let html = truncate_chars(normalized_html, self.max_input_chars);
        let response = self.oracle.complete(&prompts::locate_login_link(html)).await?;

        Ok(match Answer::from_response(&response) {
            Answer::Found(link) => {
                ::log::info!("{:?} tier found login link: {}", Tier::Oracle, link);
                Located::Found(link)
            }
            Answer::NotFound => Located::NotFound,
        })
    }
}
