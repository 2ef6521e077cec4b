// ABOUTME: Attribute resolution: reads text, inner HTML or literal attributes off matched nodes.
// ABOUTME: Missing attributes and empty text are skipped rather than reported.

//! Attribute resolution.
//!
//! Key behaviors:
//! - `text` (any case): text content with whitespace runs collapsed to single
//!   spaces and trimmed. Empty text is skipped.
//! - `html` (any case): serialized inner markup. Always present on a matched
//!   element; an empty string is kept.
//! - Any other name: the literal attribute. A missing attribute is skipped,
//!   an empty attribute value is kept.
//! - For several nodes, each node's values are produced in request order and
//!   the nodes are concatenated in node order.

use scraper::ElementRef;

use crate::extractors::descriptor::{HTML, TEXT};

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the requested values from every node, node-major.
pub fn collect_values(nodes: &[ElementRef<'_>], names: &[String]) -> Vec<String> {
    nodes
        .iter()
        .flat_map(|node| node_values(*node, names))
        .collect()
}

/// Extracts the requested values from one node, in request order.
pub fn node_values(node: ElementRef<'_>, names: &[String]) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| resolve_attribute(node, name))
        .collect()
}

/// Resolves a single requested name against a node.
pub fn resolve_attribute(node: ElementRef<'_>, name: &str) -> Option<String> {
    if name.eq_ignore_ascii_case(TEXT) {
        let text = normalize_whitespace(&node.text().collect::<String>());
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    } else if name.eq_ignore_ascii_case(HTML) {
        Some(node.inner_html())
    } else {
        literal_attribute(node, name).map(String::from)
    }
}

// html5ever lowercases attribute names while parsing.
fn literal_attribute<'a>(node: ElementRef<'a>, name: &str) -> Option<&'a str> {
    let element = node.value();
    element.attr(name).or_else(|| {
        if name.chars().any(|c| c.is_ascii_uppercase()) {
            element.attr(&name.to_ascii_lowercase())
        } else {
            None
        }
    })
}
