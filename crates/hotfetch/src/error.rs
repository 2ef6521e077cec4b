// ABOUTME: Error types for document loading: the ErrorCode enum and the LoadError struct.
// ABOUTME: Only URL validation and network fetch can fail; extraction itself is total.

use std::fmt;

/// Error codes representing the two ways a document load can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The URL is malformed or does not use http/https. Raised before any request.
    InvalidUrl,
    /// The HTTP collaborator failed (transport error, bad status, oversized body).
    Fetch,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
        };
        write!(f, "{}", s)
    }
}

/// The error type for load operations.
///
/// `source` carries the underlying failure untouched. For transport failures it
/// downcasts to `reqwest::Error`.
#[derive(Debug, thiserror::Error)]
pub struct LoadError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hotfetch: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl LoadError {
    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidUrl,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Fetch,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns the underlying HTTP client error, if the failure came from one.
    pub fn http_error(&self) -> Option<&reqwest::Error> {
        self.source.as_ref()?.downcast_ref::<reqwest::Error>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_op_url_and_code() {
        let err = LoadError::invalid_url("ftp://x", "LoadFromUrl", None);
        assert_eq!(err.to_string(), "hotfetch: LoadFromUrl ftp://x: invalid URL");
    }

    #[test]
    fn display_appends_source() {
        let err = LoadError::fetch(
            "http://example.com",
            "Fetch",
            Some(anyhow::anyhow!("HTTP status 404")),
        );
        assert_eq!(
            err.to_string(),
            "hotfetch: Fetch http://example.com: fetch error: HTTP status 404"
        );
        assert!(err.is_fetch());
        assert!(!err.is_invalid_url());
        assert!(err.http_error().is_none());
    }
}
