// ABOUTME: Parsed HTML document wrapper around scraper: parsing, serialization and CSS queries.
// ABOUTME: Unparsable selectors match nothing instead of failing.

use scraper::{ElementRef, Html, Selector};

/// A parsed document together with its canonical serialization.
///
/// Parsing never fails; malformed markup yields html5ever's best-effort tree,
/// and fragments are placed inside an `<html><head></head><body>` shell.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Html,
    html: String,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        let tree = Html::parse_document(markup);
        let html = tree.html();
        Self { tree, html }
    }

    /// The whole document serialized back to markup.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn tree(&self) -> &Html {
        &self.tree
    }

    /// All elements matching `css`, in document order.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.tree.select(&selector).collect(),
            Err(e) => {
                log::warn!("ignoring unparsable selector {:?}: {:?}", css, e);
                Vec::new()
            }
        }
    }
}
