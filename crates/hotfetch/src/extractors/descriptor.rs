// ABOUTME: Extraction descriptor data models: selector specs, attribute specs, options and callbacks.
// ABOUTME: A Request is a bare descriptor or a one-element list wrapping one; wrapping asks for arrays.

//! Declarative extraction requests.
//!
//! A caller describes each output key with a [`Descriptor`]. Descriptors are
//! deserializable from JSON, so the same shapes work from code and from files:
//!
//! ```json
//! {
//!   "title": { "selector": "h1" },
//!   "links": [{ "selector": "a", "get": "href", "options": { "limit": 5 } }],
//!   "meta": { "selector": ".title", "get": ["class", "data-temp"] }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::extractors::shape::RequestShape;

/// One CSS selector, or an ordered list of them.
///
/// With several selectors the matches are grouped by selector in list order,
/// each group in document order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SelectorSpec {
    One(String),
    Many(Vec<String>),
}

impl SelectorSpec {
    pub fn is_many(&self) -> bool {
        matches!(self, SelectorSpec::Many(_))
    }
}

impl From<&str> for SelectorSpec {
    fn from(css: &str) -> Self {
        SelectorSpec::One(css.to_string())
    }
}

impl From<String> for SelectorSpec {
    fn from(css: String) -> Self {
        SelectorSpec::One(css)
    }
}

impl From<Vec<String>> for SelectorSpec {
    fn from(list: Vec<String>) -> Self {
        SelectorSpec::Many(list)
    }
}

impl From<Vec<&str>> for SelectorSpec {
    fn from(list: Vec<&str>) -> Self {
        SelectorSpec::Many(list.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SelectorSpec {
    fn from(list: [&str; N]) -> Self {
        SelectorSpec::Many(list.iter().map(|s| s.to_string()).collect())
    }
}

/// Name of the pseudo-attribute holding whitespace-collapsed text content.
pub const TEXT: &str = "text";
/// Name of the pseudo-attribute holding serialized inner markup.
pub const HTML: &str = "html";

/// One attribute name, or an ordered list of them.
///
/// `text` and `html` are pseudo-attributes; every other name is a literal
/// attribute lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttributeSpec {
    One(String),
    Many(Vec<String>),
}

impl AttributeSpec {
    pub fn is_many(&self) -> bool {
        matches!(self, AttributeSpec::Many(_))
    }

    /// The requested names in order.
    pub fn names(&self) -> &[String] {
        match self {
            AttributeSpec::One(name) => std::slice::from_ref(name),
            AttributeSpec::Many(names) => names,
        }
    }
}

impl Default for AttributeSpec {
    fn default() -> Self {
        AttributeSpec::One(TEXT.to_string())
    }
}

impl From<&str> for AttributeSpec {
    fn from(name: &str) -> Self {
        AttributeSpec::One(name.to_string())
    }
}

impl From<String> for AttributeSpec {
    fn from(name: String) -> Self {
        AttributeSpec::One(name)
    }
}

impl From<Vec<String>> for AttributeSpec {
    fn from(names: Vec<String>) -> Self {
        AttributeSpec::Many(names)
    }
}

impl From<Vec<&str>> for AttributeSpec {
    fn from(names: Vec<&str>) -> Self {
        AttributeSpec::Many(names.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AttributeSpec {
    fn from(names: [&str; N]) -> Self {
        AttributeSpec::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

/// Ordering and truncation applied to the matched nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractOptions {
    /// Keep at most this many nodes, counted after `reverse`. Zero means no limit.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Reverse node order before limiting.
    #[serde(default)]
    pub reverse: bool,
}

impl ExtractOptions {
    /// The limit that actually truncates, ignoring a zero limit.
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|n| *n > 0)
    }
}

/// Post-processing transform applied once to a key's shaped value.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn(Value) -> Value + Send + Sync>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Callback(Arc::new(f))
    }

    pub fn call(&self, value: Value) -> Value {
        (self.0)(value)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Extraction request for a single output key.
#[derive(Debug, Clone, Deserialize)]
pub struct Descriptor {
    pub selector: SelectorSpec,
    /// Attributes to read from each node. Defaults to `text`.
    #[serde(default)]
    pub get: Option<AttributeSpec>,
    #[serde(default)]
    pub options: ExtractOptions,
    /// Only settable from code.
    #[serde(skip)]
    pub callback: Option<Callback>,
}

impl Descriptor {
    pub fn new(selector: impl Into<SelectorSpec>) -> Self {
        Self {
            selector: selector.into(),
            get: None,
            options: ExtractOptions::default(),
            callback: None,
        }
    }

    /// Set the attribute (or attributes) to read.
    pub fn get(mut self, attributes: impl Into<AttributeSpec>) -> Self {
        self.get = Some(attributes.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.options.limit = Some(limit);
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.options.reverse = reverse;
        self
    }

    pub fn callback<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.callback = Some(Callback::new(f));
        self
    }

    /// Wrap this descriptor so its key always yields an array.
    pub fn wrapped(self) -> Request {
        Request::Wrapped(self)
    }

    /// The effective attribute spec, `text` when none was given.
    pub fn attributes(&self) -> AttributeSpec {
        self.get.clone().unwrap_or_default()
    }
}

/// A descriptor as it appears in the descriptor mapping.
///
/// In JSON, `{...}` is [`Request::Single`] and `[{...}]` is [`Request::Wrapped`].
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawRequest")]
pub enum Request {
    Single(Descriptor),
    Wrapped(Descriptor),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRequest {
    Wrapped([Descriptor; 1]),
    Single(Descriptor),
}

impl From<RawRequest> for Request {
    fn from(raw: RawRequest) -> Self {
        match raw {
            RawRequest::Wrapped([descriptor]) => Request::Wrapped(descriptor),
            RawRequest::Single(descriptor) => Request::Single(descriptor),
        }
    }
}

impl From<Descriptor> for Request {
    fn from(descriptor: Descriptor) -> Self {
        Request::Single(descriptor)
    }
}

impl Request {
    pub fn descriptor(&self) -> &Descriptor {
        match self {
            Request::Single(d) | Request::Wrapped(d) => d,
        }
    }

    pub fn is_wrapped(&self) -> bool {
        matches!(self, Request::Wrapped(_))
    }

    pub fn shape(&self) -> RequestShape {
        RequestShape::of(self)
    }
}
