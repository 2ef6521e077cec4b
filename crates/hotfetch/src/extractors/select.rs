// ABOUTME: Selector resolution: turns one or many CSS selectors into the ordered nodes to read.
// ABOUTME: Handles first/last selection, selector-order concatenation, reverse and limit.

//! Selector resolution.
//!
//! Key behaviors:
//! - A single selector in [`MatchMode::First`] yields at most one node: the
//!   first match, or the last match when `reverse` is set. `limit` is ignored.
//! - In [`MatchMode::All`] the full match sequence is kept.
//! - A selector list always behaves as `All`. Each selector's matches are kept
//!   in document order and the groups are concatenated in list order, so
//!   selector order wins over document order. Overlapping selectors can repeat
//!   a node.
//! - `reverse` is applied before `limit`, so a limit of N on a reversed
//!   sequence keeps the last N nodes, last first.

use scraper::ElementRef;

use crate::dom::Document;
use crate::extractors::descriptor::{ExtractOptions, SelectorSpec};
use crate::extractors::shape::MatchMode;

/// Resolves the nodes a descriptor reads from.
pub fn resolve_nodes<'a>(
    doc: &'a Document,
    selector: &SelectorSpec,
    options: &ExtractOptions,
    mode: MatchMode,
) -> Vec<ElementRef<'a>> {
    match (selector, mode) {
        (SelectorSpec::One(css), MatchMode::First) => {
            let matches = doc.select(css);
            let node = if options.reverse {
                matches.last()
            } else {
                matches.first()
            };
            node.copied().into_iter().collect()
        }
        (SelectorSpec::One(css), MatchMode::All) => apply_options(doc.select(css), options),
        (SelectorSpec::Many(list), _) => {
            let nodes: Vec<ElementRef<'a>> =
                list.iter().flat_map(|css| doc.select(css)).collect();
            apply_options(nodes, options)
        }
    }
}

fn apply_options<T>(mut nodes: Vec<T>, options: &ExtractOptions) -> Vec<T> {
    if options.reverse {
        nodes.reverse();
    }
    if let Some(limit) = options.effective_limit() {
        nodes.truncate(limit);
    }
    nodes
}
