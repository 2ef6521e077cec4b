// ABOUTME: Document model for the extraction engine, backed by scraper's HTML tree.
// ABOUTME: Re-exports Document, the parsed tree plus its canonical serialization.

//! Parsed HTML documents.
//!
//! Parsing, serialization and CSS matching are delegated to `scraper`. Node
//! level reads (text, inner HTML, attributes) go straight through
//! `scraper::ElementRef`.

mod document;

pub use document::Document;
