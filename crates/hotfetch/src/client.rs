// ABOUTME: The HotFetch engine: owns the current document and runs descriptor extraction against it.
// ABOUTME: Provides load_html(), async load_from_url() and extract() over a descriptor mapping.

use std::borrow::Borrow;

use scraper::Html;
use serde_json::{Map, Value};

use crate::dom::Document;
use crate::error::LoadError;
use crate::extractors::attributes::collect_values;
use crate::extractors::descriptor::Request;
use crate::extractors::select::resolve_nodes;
use crate::options::{HotFetchBuilder, Options};
use crate::resource::{fetch, parse_http_url, FetchOptions};

/// Extraction output: one value per requested key.
pub type Extracted = Map<String, Value>;

/// Loads one document at a time and extracts keyed data from it.
///
/// An engine holds a single "current document". Every load replaces it
/// wholesale. Extraction only reads it, so `extract` takes `&self` and
/// returns the same output for the same descriptors until the next load.
/// Use one engine per concurrent task.
pub struct HotFetch {
    opts: Options,
    http_client: reqwest::Client,
    document: Option<Document>,
}

impl HotFetch {
    /// Create a new HotFetchBuilder for configuring the engine.
    pub fn builder() -> HotFetchBuilder {
        HotFetchBuilder::new()
    }

    /// Create an engine with default options and no document loaded.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create an engine with the given options.
    pub fn with_options(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self {
            opts,
            http_client,
            document: None,
        }
    }

    /// Parse `markup` as the current document and return its serialization.
    ///
    /// Fragments come back wrapped in `<html><head></head><body>`.
    pub fn load_html(&mut self, markup: &str) -> String {
        let document = Document::parse(markup);
        log::debug!(
            "loaded document: {} bytes in, {} bytes serialized",
            markup.len(),
            document.html().len()
        );
        let html = document.html().to_string();
        self.document = Some(document);
        html
    }

    /// Fetch `url` and load its body as the current document.
    ///
    /// Fails with an InvalidUrl error, without any request, unless `url` is an
    /// absolute http or https URL. The current document is left untouched on
    /// failure.
    pub async fn load_from_url(&mut self, url: &str) -> Result<String, LoadError> {
        let fetch_opts = FetchOptions {
            max_content_length: self.opts.max_content_length,
            ..Default::default()
        };
        self.load_from_url_with(url, &fetch_opts).await
    }

    /// Like [`HotFetch::load_from_url`], with per-request headers and size cap.
    ///
    /// Headers in `fetch_opts` override engine headers with the same name. The
    /// smaller of the two size caps applies.
    pub async fn load_from_url_with(
        &mut self,
        url: &str,
        fetch_opts: &FetchOptions,
    ) -> Result<String, LoadError> {
        let parsed = parse_http_url(url, "LoadFromUrl").inspect_err(|e| {
            log::warn!("{}", e);
        })?;

        let mut headers = self.opts.headers.clone();
        headers.extend(fetch_opts.headers.clone());
        let max_content_length = fetch_opts
            .max_content_length
            .min(self.opts.max_content_length);
        let opts = FetchOptions {
            headers,
            max_content_length,
        };

        let fetched = fetch(&self.http_client, &parsed, &opts).await?;
        Ok(self.load_html(&fetched.text()))
    }

    /// The serialization of the current document, or `""` before any load.
    pub fn html(&self) -> &str {
        self.document.as_ref().map_or("", Document::html)
    }

    /// The current parsed tree, for callers running their own queries.
    pub fn document(&self) -> Option<&Html> {
        self.document.as_ref().map(Document::tree)
    }

    /// Extracts every key of `descriptors` from the current document.
    ///
    /// Keys are resolved independently. Before any load every key resolves
    /// against an empty document.
    pub fn extract<I, K, R>(&self, descriptors: I) -> Extracted
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: Borrow<Request>,
    {
        descriptors
            .into_iter()
            .map(|(key, request)| {
                let key = key.into();
                let value = self.extract_one(&key, request.borrow());
                (key, value)
            })
            .collect()
    }

    fn extract_one(&self, key: &str, request: &Request) -> Value {
        let descriptor = request.descriptor();
        let shape = request.shape();

        let nodes = match &self.document {
            Some(doc) => resolve_nodes(
                doc,
                &descriptor.selector,
                &descriptor.options,
                shape.match_mode(),
            ),
            None => Vec::new(),
        };
        let attributes = descriptor.attributes();
        let values = collect_values(&nodes, attributes.names());
        log::debug!(
            "key {:?}: {:?}, {} node(s), {} value(s)",
            key,
            shape,
            nodes.len(),
            values.len()
        );

        let shaped = shape.shape_values(values);
        match &descriptor.callback {
            Some(callback) => callback.call(shaped),
            None => shaped,
        }
    }
}

impl Default for HotFetch {
    fn default() -> Self {
        Self::new()
    }
}
