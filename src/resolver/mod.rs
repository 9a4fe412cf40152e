//! Download link resolution
//!
//! - [`forum`]: finds the file-host link on a forum post
//! - [`drive`]: turns a file-host viewer link into a direct download

pub mod drive;
pub mod forum;

use tracing::{info, warn};

use crate::error::{Result, link};
use crate::http::HttpTransport;

pub use forum::LinkResolver;

/// How a link was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOrigin {
    /// Used exactly as given
    Passthrough,
    /// An anchor pointing straight at the file host
    Anchor,
    /// The `url` parameter of a redirect-wrapper anchor
    RedirectWrapper,
    /// A URL found in the page text
    PageText,
    /// Rewritten into a direct-download URL
    DirectDownload,
}

/// A URL together with where it came from.
///
/// `resolved_from`, when set, is the previous step in the resolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub url: String,
    pub resolved_from: Option<String>,
    pub via: LinkOrigin,
}

impl ResolvedLink {
    pub fn passthrough(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            resolved_from: None,
            via: LinkOrigin::Passthrough,
        }
    }
}

/// Check that a source is an absolute http(s) URL
pub fn validate_source(source: &str) -> Result<()> {
    match url::Url::parse(source) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(link::invalid_url(source)),
    }
}

/// Whether resolving `source` produced nothing better than the forum page itself
pub fn is_unresolved_forum(source: &str, link: &ResolvedLink) -> bool {
    forum::is_forum_url(source) && link.url == source
}

/// Resolve a source URL into the URL that should actually be downloaded.
///
/// Forum posts are scanned for their file-host link (falling back to the
/// original URL when none is found) and file-host viewer links are converted
/// to direct downloads.
pub fn resolve_download_url<T: HttpTransport>(transport: &T, source: &str) -> ResolvedLink {
    let mut link = ResolvedLink::passthrough(source);

    if forum::is_forum_url(source) {
        info!(url = source, "Forum link detected, parsing page");
        match LinkResolver::new(transport).resolve(source) {
            Some(found) => link = found,
            None => warn!(url = source, "Could not resolve forum page, using URL as-is"),
        }
    }

    if drive::is_file_host_url(&link.url) {
        let direct = drive::to_direct_download(&link.url);
        if direct != link.url {
            link = ResolvedLink {
                url: direct,
                resolved_from: Some(link.url),
                via: LinkOrigin::DirectDownload,
            };
        }
    }

    link
}
