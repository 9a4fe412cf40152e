//! Filename extraction from HTTP response headers and URLs

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::normalize::{self, latin1_to_string};
use super::rfc2047;

static RFC2231_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)filename\*=(?P<charset>[^']*)'(?P<lang>[^']*)'(?P<value>[^;]+)")
        .expect("RFC 2231 pattern is valid")
});

static SIMPLE_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)filename\s*=\s*"?([^";]+)"?"#).expect("filename pattern is valid")
});

/// Response headers with case-insensitive lookup.
///
/// Values are kept as Latin-1 decoded text so that raw UTF-8 filename bytes
/// survive as mojibake for the normalizer to repair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: BTreeMap<String, String>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header; the first value for a name wins.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.entries
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Advertised body size, 0 when absent or unparsable
    pub fn content_length(&self) -> u64 {
        self.get("content-length")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn from_header_map(map: &reqwest::header::HeaderMap) -> Self {
        let mut headers = Self::new();
        for (name, value) in map {
            headers.insert(name.as_str(), latin1_to_string(value.as_bytes()));
        }
        headers
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name.as_ref(), value);
        }
        headers
    }
}

/// Infer a filename from response headers, falling back to the URL path.
///
/// Priority: RFC 2231 `filename*=`, then plain `filename=`, then the last URL
/// path segment. Empty results count as no result.
pub fn extract_filename(headers: &ResponseHeaders, url: &str) -> Option<String> {
    let from_header = headers
        .get("content-disposition")
        .and_then(filename_from_disposition);

    from_header
        .or_else(|| filename_from_url(url))
        .filter(|name| !name.is_empty())
}

/// Parse a `Content-Disposition` value.
pub fn filename_from_disposition(disposition: &str) -> Option<String> {
    if let Some(caps) = RFC2231_FILENAME.captures(disposition) {
        let charset = caps.name("charset").map_or("", |m| m.as_str());
        let raw = caps
            .name("value")
            .map_or("", |m| m.as_str())
            .trim()
            .trim_matches('"');
        let bytes = urlencoding::decode_binary(raw.as_bytes());
        return Some(
            rfc2047::decode_charset(charset, &bytes)
                .unwrap_or_else(|| normalize::normalize(bytes.as_ref())),
        );
    }

    let caps = SIMPLE_FILENAME.captures(disposition)?;
    let name = caps.get(1)?.as_str().trim().trim_matches('"');

    if rfc2047::is_encoded(name) {
        if let Some(decoded) = rfc2047::decode(name) {
            return Some(normalize::normalize(&decoded));
        }
    }

    Some(normalize::normalize(name))
}

/// Last path segment of a URL, normalized
pub fn filename_from_url(url: &str) -> Option<String> {
    let path = url_path(url);
    let name = path.trim_end_matches('/').rsplit('/').next()?;
    if name.is_empty() {
        return None;
    }
    Some(normalize::normalize(name))
}

fn url_path(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Reduce a candidate to a bare file name that is safe to join to a directory.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next()?.trim();
    match base {
        "" | "." | ".." => None,
        _ => Some(base.replace(':', "_")),
    }
}
