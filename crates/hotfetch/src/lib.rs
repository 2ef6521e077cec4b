// ABOUTME: Main library entry point for HotFetch, a declarative HTML data extractor.
// ABOUTME: Re-exports the public API: HotFetch, descriptors, options and the LoadError type.

//! HotFetch - extract keyed data from HTML with declarative descriptors.
//!
//! Load a document from markup or a URL, then describe each output key with a
//! CSS selector (or a list of them), the attributes to read, and optional
//! ordering, limiting and post-processing.
//!
//! # Example
//!
//! ```no_run
//! use hotfetch::{Descriptor, HotFetch, LoadError, Request};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LoadError> {
//!     let mut hf = HotFetch::new();
//!     hf.load_from_url("https://example.com/").await?;
//!     let result = hf.extract([
//!         ("title", Request::from(Descriptor::new("h1"))),
//!         ("links", Descriptor::new("a").get("href").wrapped()),
//!     ]);
//!     println!("{}", serde_json::Value::Object(result));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod options;
pub mod resource;

pub use crate::client::{Extracted, HotFetch};
pub use crate::error::{ErrorCode, LoadError};
pub use crate::extractors::descriptor::{
    AttributeSpec, Callback, Descriptor, ExtractOptions, Request, SelectorSpec,
};
pub use crate::extractors::shape::RequestShape;
pub use crate::options::{HotFetchBuilder, Options};
pub use crate::resource::{is_valid_url, FetchOptions};
