use crate::error::Result;
use crate::oracle::{Answer, Oracle, prompts};
use crate::results::Extraction;
use crate::utils::truncate_chars;
use std::sync::Arc;

/// Asks the oracle to cut the authentication form out of a page.
///
/// There is no rule-based pass here: form boundaries vary too much between
/// sites for a keyword rule to be trusted.
pub struct FormExtractor {
    oracle: Arc<dyn Oracle>,
    max_input_chars: usize,
}

impl FormExtractor {
    pub fn new(oracle: Arc<dyn Oracle>, max_input_chars: usize) -> Self {
        Self {
            oracle,
            max_input_chars,
        }
    }

    pub async fn extract(&self, normalized_html: &str) -> Result<Extraction> {
        let html = truncate_chars(normalized_html, self.max_input_chars);
        let response = self.oracle.complete(&prompts::extract_auth_snippet(html)).await?;

        Ok(match Answer::from_response(&response) {
            Answer::Found(snippet) => {
                ::log::debug!("Oracle returned a {} byte snippet", snippet.len());
                Extraction::Found(snippet)
            }
            Answer::NotFound => Extraction::NotFound,
        })
    }
}
