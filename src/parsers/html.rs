use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Elements that never carry a visible login form
static NOISE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script, style, svg, img, noscript, meta, link").expect("valid noise selector")
});

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// An anchor element with its href and flattened visible text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

/// Strips noise elements and serializes the remaining tree.
///
/// The parser is permissive, so malformed input yields a best-effort document
/// rather than an error.
pub fn normalize(raw_html: &str) -> String {
    let mut doc = Html::parse_document(raw_html);

    let noise: Vec<_> = doc.select(&NOISE_SELECTOR).map(|el| el.id()).collect();
    ::log::trace!("Removing {} noise elements", noise.len());

    for id in noise {
        // Nested noise (e.g. a script inside an svg) is already gone with its parent
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }

    doc.html()
}

/// Lists every anchor with an href, in document order
pub fn anchors(html: &str) -> Vec<Anchor> {
    let doc = Html::parse_document(html);

    let anchors = doc
        .select(&ANCHOR_SELECTOR)
        .filter_map(|el| {
            let href = el.value().attr("href")?;
            let text = el
                .text()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            Some(Anchor {
                href: href.to_string(),
                text,
            })
        })
        .collect::<Vec<_>>();

    ::log::debug!("HTML parser found {} anchors", anchors.len());
    anchors
}
