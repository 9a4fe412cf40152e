//! Forum page link resolution
//!
//! Bahamut forum posts wrap outbound links in `ref.gamer.com.tw/redir.php?url=...`.
//! The resolver scans the post's anchors for a Google Drive link, looking
//! through one layer of that wrapper, and falls back to a text search.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, error, info, info_span, warn};
use url::Url;

use super::drive::is_file_host_url;
use super::{LinkOrigin, ResolvedLink};
use crate::http::HttpTransport;

/// Hosts whose pages are forum posts rather than files
pub const FORUM_HOSTS: &[&str] = &["gamer.com.tw", "bahamut.com.tw"];

const REDIRECT_HOST: &str = "ref.gamer.com.tw";
const REDIRECT_PATH: &str = "redir.php";

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

static DRIVE_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://drive\.google\.com/[^\s<>"{}|\\^`\[\]]+"#)
        .expect("drive text pattern is valid")
});

/// Whether a URL is a forum post that needs resolving
pub fn is_forum_url(url: &str) -> bool {
    FORUM_HOSTS.iter().any(|host| url.contains(host))
}

/// Resolves forum posts to the file-host link they advertise
pub struct LinkResolver<'a, T: HttpTransport> {
    transport: &'a T,
}

impl<'a, T: HttpTransport> LinkResolver<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetch a forum page and find its file-host link.
    ///
    /// Network failures are logged and reported as `None`.
    pub fn resolve(&self, forum_url: &str) -> Option<ResolvedLink> {
        let _span = info_span!("resolve", url = forum_url).entered();

        let html = match self.transport.get_text(forum_url) {
            Ok(html) => html,
            Err(e) => {
                error!("Failed to fetch forum page: {e}");
                return None;
            }
        };

        let base = Url::parse(forum_url).ok();
        let found = find_file_host_link(&html, base.as_ref());
        match &found {
            Some(link) => info!(url = %link.url, via = ?link.via, "Found file-host link"),
            None => warn!("No file-host link on forum page"),
        }

        found.map(|link| ResolvedLink {
            resolved_from: link.resolved_from.or_else(|| Some(forum_url.to_string())),
            ..link
        })
    }
}

/// Find the first file-host link in an HTML document.
///
/// Anchors are scanned in document order; the first direct link or unwrapped
/// redirect wins. Relative hrefs are resolved against `base` when given.
pub fn find_file_host_link(html: &str, base: Option<&Url>) -> Option<ResolvedLink> {
    let document = Html::parse_document(html);

    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        // A wrapper's encoded payload already contains the host token, so the
        // wrapper is unwrapped before the direct check.
        if let Some(target) = unwrap_redirect(href, base) {
            if is_file_host_url(&target) {
                debug!(wrapper = href, target = %target, "Unwrapped redirect link");
                return Some(ResolvedLink {
                    url: target,
                    resolved_from: Some(href.to_string()),
                    via: LinkOrigin::RedirectWrapper,
                });
            }
        }

        if is_file_host_url(href) {
            return Some(ResolvedLink {
                url: href.to_string(),
                resolved_from: None,
                via: LinkOrigin::Anchor,
            });
        }
    }

    let text: String = document.root_element().text().collect();
    DRIVE_IN_TEXT.find(&text).map(|m| ResolvedLink {
        url: m.as_str().to_string(),
        resolved_from: None,
        via: LinkOrigin::PageText,
    })
}

/// Destination of a redirect-wrapper link, percent-decoded.
///
/// Returns `None` for hrefs that are not wrappers or carry no `url` parameter.
pub fn unwrap_redirect(href: &str, base: Option<&Url>) -> Option<String> {
    let parsed = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };

    let is_wrapper = parsed.path().contains(REDIRECT_PATH)
        || parsed.host_str().is_some_and(|host| host.contains(REDIRECT_HOST));
    if !is_wrapper {
        return None;
    }

    let (_, value) = parsed.query_pairs().find(|(key, _)| key == "url")?;
    if value.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(&urlencoding::decode_binary(value.as_bytes())).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::fake::{CannedResponse, FakeTransport};

    const FORUM: &str = "https://forum.gamer.com.tw/C.php?bsn=80911&snA=76";

    #[test]
    fn test_redirect_wrapped_drive_link() {
        let html = r#"<html><body>
            <a href="https://ref.gamer.com.tw/redir.php?url=https%3A%2F%2Fdrive.google.com%2Ffile%2Fd%2FABC123%2Fview">link</a>
        </body></html>"#;
        let link = find_file_host_link(html, None).unwrap();
        assert_eq!(link.url, "https://drive.google.com/file/d/ABC123/view");
        assert_eq!(link.via, LinkOrigin::RedirectWrapper);
        assert!(link.resolved_from.unwrap().contains("redir.php"));
    }

    #[test]
    fn test_direct_anchor() {
        let html = r#"<a href="https://example.com">x</a>
            <a href="https://drive.google.com/file/d/DIRECT/view">drive</a>"#;
        let link = find_file_host_link(html, None).unwrap();
        assert_eq!(link.url, "https://drive.google.com/file/d/DIRECT/view");
        assert_eq!(link.via, LinkOrigin::Anchor);
    }

    #[test]
    fn test_first_anchor_in_document_order_wins() {
        let html = r#"
            <a href="https://ref.gamer.com.tw/redir.php?url=https%3A%2F%2Fdrive.google.com%2Ffile%2Fd%2FFIRST%2Fview">1</a>
            <a href="https://drive.google.com/file/d/SECOND/view">2</a>
            <a href="https://docs.google.com/uc?id=THIRD">3</a>"#;
        let link = find_file_host_link(html, None).unwrap();
        assert_eq!(link.url, "https://drive.google.com/file/d/FIRST/view");
    }

    #[test]
    fn test_redirect_to_other_host_is_skipped() {
        let html = r#"
            <a href="https://ref.gamer.com.tw/redir.php?url=https%3A%2F%2Fexample.com%2Fx">other</a>
            <a href="https://docs.google.com/uc?id=LATER">docs</a>"#;
        let link = find_file_host_link(html, None).unwrap();
        assert_eq!(link.url, "https://docs.google.com/uc?id=LATER");
    }

    #[test]
    fn test_relative_redirect_with_base() {
        let base = Url::parse(FORUM).unwrap();
        let html = r#"<a href="/redir.php?url=https%3A%2F%2Fdrive.google.com%2Fopen%3Fid%3DREL">x</a>"#;
        let link = find_file_host_link(html, Some(&base)).unwrap();
        assert_eq!(link.url, "https://drive.google.com/open?id=REL");
    }

    #[test]
    fn test_double_encoded_redirect_payload() {
        let html = r#"<a href="https://ref.gamer.com.tw/redir.php?url=https%253A%252F%252Fdrive.google.com%252Ffile%252Fd%252FDBL%252Fview">x</a>"#;
        let link = find_file_host_link(html, None).unwrap();
        assert_eq!(link.url, "https://drive.google.com/file/d/DBL/view");
    }

    #[test]
    fn test_text_fallback() {
        let html = r#"<div>下載：https://drive.google.com/file/d/TEXT99/view?usp=sharing 感謝</div>"#;
        let link = find_file_host_link(html, None).unwrap();
        assert_eq!(
            link.url,
            "https://drive.google.com/file/d/TEXT99/view?usp=sharing"
        );
        assert_eq!(link.via, LinkOrigin::PageText);
    }

    #[test]
    fn test_no_link() {
        let html = r#"<a href="https://example.com">nothing</a><p>no links here</p>"#;
        assert!(find_file_host_link(html, None).is_none());
    }

    #[test]
    fn test_unwrap_redirect_requires_url_param() {
        assert_eq!(
            unwrap_redirect("https://ref.gamer.com.tw/redir.php?target=x", None),
            None
        );
        assert_eq!(
            unwrap_redirect("https://example.com/page?url=https%3A%2F%2Fa.b", None),
            None
        );
    }

    #[test]
    fn test_resolve_fetches_and_records_provenance() {
        let transport = FakeTransport::new().with_get(
            FORUM,
            CannedResponse::ok(
                r#"<a href="https://drive.google.com/file/d/NET1/view">x</a>"#.as_bytes(),
            ),
        );
        let link = LinkResolver::new(&transport).resolve(FORUM).unwrap();
        assert_eq!(link.url, "https://drive.google.com/file/d/NET1/view");
        assert_eq!(link.resolved_from.as_deref(), Some(FORUM));
        assert_eq!(transport.count("GET"), 1);
    }

    #[test]
    fn test_resolve_network_failure_is_none() {
        let transport = FakeTransport::new();
        assert!(LinkResolver::new(&transport).resolve(FORUM).is_none());
    }

    #[test]
    fn test_resolve_error_status_is_none() {
        let transport = FakeTransport::new().with_get(FORUM, CannedResponse::status(503));
        assert!(LinkResolver::new(&transport).resolve(FORUM).is_none());
    }

    #[test]
    fn test_is_forum_url() {
        assert!(is_forum_url(FORUM));
        assert!(!is_forum_url("https://drive.google.com/file/d/x"));
    }
}
