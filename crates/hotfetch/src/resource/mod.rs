// ABOUTME: Resource handling: URL validation and HTTP fetching of remote documents.
// ABOUTME: Enforces http/https URLs, rejects error statuses and oversized bodies, decodes charsets.

use std::collections::HashMap;

use url::Url;

use crate::error::LoadError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub max_content_length: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            max_content_length: MAX_CONTENT_LENGTH,
        }
    }
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchResult {
    /// Decode the body as text, using the charset from the content-type header if any.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Parses `url` and checks that it is an absolute http or https URL.
pub fn parse_http_url(url: &str, op: &str) -> Result<Url, LoadError> {
    if url.is_empty() {
        return Err(LoadError::invalid_url(url, op, None));
    }

    let parsed = Url::parse(url).map_err(|e| {
        LoadError::invalid_url(url, op, Some(anyhow::anyhow!("malformed URL: {}", e)))
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(LoadError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("scheme must be http or https")),
        )),
    }
}

/// Returns true if `url` is an absolute http or https URL.
pub fn is_valid_url(url: &str) -> bool {
    parse_http_url(url, "Validate").is_ok()
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

/// Fetch a resource from an already validated URL.
///
/// Transport failures and error statuses keep the `reqwest::Error` as the
/// error source.
pub async fn fetch(
    client: &reqwest::Client,
    url: &Url,
    opts: &FetchOptions,
) -> Result<FetchResult, LoadError> {
    let url_str = url.as_str();
    log::debug!("fetching {}", url_str);

    let mut request = client.get(url.clone());
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| LoadError::fetch(url_str, "Fetch", Some(anyhow::Error::new(e))))?;

    let response = response
        .error_for_status()
        .map_err(|e| LoadError::fetch(url_str, "Fetch", Some(anyhow::Error::new(e))))?;

    if let Some(len) = response.content_length() {
        if len as usize > opts.max_content_length {
            return Err(LoadError::fetch(
                url_str,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response
        .bytes()
        .await
        .map_err(|e| LoadError::fetch(url_str, "Fetch", Some(anyhow::Error::new(e))))?;

    if body.len() > opts.max_content_length {
        return Err(LoadError::fetch(
            url_str,
            "Fetch",
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    log::debug!(
        "fetched {} bytes from {} (status {})",
        body.len(),
        final_url,
        status
    );

    Ok(FetchResult {
        status,
        url: url_str.to_string(),
        final_url,
        content_type,
        body: body.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use httpmock::prelude::*;

    fn create_test_client() -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent("test-agent")
            .build()
            .unwrap()
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("https://example.com/path?q=1"));
        assert!(is_valid_url("http://localhost:8080/"));
        assert!(!is_valid_url("not valid"));
        assert!(!is_valid_url("not a valid url"));
        assert!(!is_valid_url("ftp://google.com/"));
        assert!(!is_valid_url("ftp://x"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_parse_http_url_reports_op() {
        let err = parse_http_url("ftp://x", "LoadFromUrl").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUrl);
        assert_eq!(err.op, "LoadFromUrl");
        assert_eq!(err.url, "ftp://x");
    }

    #[test]
    fn test_extract_charset() {
        assert_eq!(
            extract_charset("text/html; charset=ISO-8859-1"),
            Some("iso-8859-1".to_string())
        );
        assert_eq!(
            extract_charset("text/html; charset=\"utf-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(extract_charset("text/html"), None);
    }

    #[test]
    fn test_decode_body_uses_header_charset() {
        // "café" in windows-1252
        let body = [0x63, 0x61, 0x66, 0xe9];
        assert_eq!(
            decode_body(&body, Some("text/html; charset=windows-1252")),
            "café"
        );
    }

    #[tokio::test]
    async fn test_fetch_ok_utf8() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/test");
            then.status(200)
                .header("content-type", "text/plain; charset=utf-8")
                .body("hello");
        });

        let client = create_test_client();
        let url = parse_http_url(&server.url("/test"), "Fetch").unwrap();

        let result = fetch(&client, &url, &FetchOptions::default()).await;
        mock.assert();

        let result = result.expect("fetch should succeed");
        assert_eq!(result.status, 200);
        assert_eq!(result.text(), "hello");
    }

    #[tokio::test]
    async fn test_fetch_sends_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/auth").header("x-token", "secret");
            then.status(200).body("ok");
        });

        let client = create_test_client();
        let url = parse_http_url(&server.url("/auth"), "Fetch").unwrap();
        let mut opts = FetchOptions::default();
        opts.headers.insert("x-token".to_string(), "secret".to_string());

        let result = fetch(&client, &url, &opts).await;
        mock.assert();
        assert_eq!(result.unwrap().text(), "ok");
    }

    #[tokio::test]
    async fn test_fetch_error_status_rejected() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/notfound");
            then.status(404).body("not found");
        });

        let client = create_test_client();
        let url = parse_http_url(&server.url("/notfound"), "Fetch").unwrap();

        let result = fetch(&client, &url, &FetchOptions::default()).await;
        mock.assert();

        let err = result.expect_err("should fail on 404");
        assert_eq!(err.code, ErrorCode::Fetch);
        let http = err.http_error().expect("reqwest error kept as source");
        assert_eq!(http.status().map(|s| s.as_u16()), Some(404));
    }

    #[tokio::test]
    async fn test_fetch_content_too_large() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/big");
            then.status(200).body("0123456789abcdef");
        });

        let client = create_test_client();
        let url = parse_http_url(&server.url("/big"), "Fetch").unwrap();
        let opts = FetchOptions {
            max_content_length: 8,
            ..Default::default()
        };

        let err = fetch(&client, &url, &opts)
            .await
            .expect_err("should reject oversized body");
        assert!(err.is_fetch());
        assert!(err.to_string().contains("content too large"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_keeps_reqwest_error() {
        // Nothing listens on port 1.
        let client = create_test_client();
        let url = parse_http_url("http://127.0.0.1:1/", "Fetch").unwrap();

        let err = fetch(&client, &url, &FetchOptions::default())
            .await
            .expect_err("should fail to connect");
        assert!(err.is_fetch());
        assert!(err.http_error().is_some());
    }
}
