//! Google Drive viewer URL to direct-download URL conversion

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

/// Host used for direct downloads regardless of the viewer host
pub const DIRECT_DOWNLOAD_HOST: &str = "drive.google.com";

/// Domain tokens that identify a file-host link
pub const FILE_HOST_TOKENS: &[&str] = &["drive.google.com", "docs.google.com"];

/// Identifier patterns, tried in order
static FILE_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"/file/d/([a-zA-Z0-9_-]+)", r"(?:\?|&)id=([a-zA-Z0-9_-]+)", r"/d/([a-zA-Z0-9_-]+)"]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("file id pattern is valid"))
        .collect()
});

/// Whether a URL points at the file host
pub fn is_file_host_url(url: &str) -> bool {
    FILE_HOST_TOKENS.iter().any(|token| url.contains(token))
}

/// Extract the file identifier from a viewer URL.
///
/// The URL is percent-decoded once first, which unwraps links that were
/// encoded a second time by a redirect wrapper.
pub fn extract_file_id(url: &str) -> Option<String> {
    let decoded = String::from_utf8_lossy(&urlencoding::decode_binary(url.as_bytes())).into_owned();
    debug!(decoded = %decoded, "Decoded file-host URL");

    FILE_ID_PATTERNS.iter().find_map(|pattern| {
        let id = pattern.captures(&decoded)?.get(1)?.as_str().to_string();
        debug!(pattern = pattern.as_str(), id = %id, "Extracted file id");
        Some(id)
    })
}

/// Convert a viewer URL into a direct-download URL.
///
/// Never fails: a URL without a recognizable identifier is returned as-is.
pub fn to_direct_download(url: &str) -> String {
    match extract_file_id(url) {
        Some(id) => {
            let direct = format!("https://{DIRECT_DOWNLOAD_HOST}/uc?export=download&id={id}");
            info!(id = %id, url = %direct, "Converted to direct download URL");
            direct
        }
        None => {
            warn!(url, "Could not find a file id, using the URL unchanged");
            url.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_d_view_url() {
        assert_eq!(
            to_direct_download("https://drive.google.com/file/d/ABC123/view"),
            "https://drive.google.com/uc?export=download&id=ABC123"
        );
    }

    #[test]
    fn test_file_d_with_query() {
        assert_eq!(
            to_direct_download("https://drive.google.com/file/d/1a-B_c/view?usp=drive_link"),
            "https://drive.google.com/uc?export=download&id=1a-B_c"
        );
    }

    #[test]
    fn test_open_id_url() {
        assert_eq!(
            to_direct_download("https://drive.google.com/open?id=XYZ789"),
            "https://drive.google.com/uc?export=download&id=XYZ789"
        );
    }

    #[test]
    fn test_ampersand_id() {
        assert_eq!(
            to_direct_download("https://drive.google.com/uc?export=download&id=Q1"),
            "https://drive.google.com/uc?export=download&id=Q1"
        );
    }

    #[test]
    fn test_docs_d_url_uses_drive_host() {
        assert_eq!(
            to_direct_download("https://docs.google.com/uc/d/DOC42/edit"),
            "https://drive.google.com/uc?export=download&id=DOC42"
        );
    }

    #[test]
    fn test_file_d_takes_priority_over_id_param() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/FIRST/view?id=SECOND"),
            Some("FIRST".to_string())
        );
    }

    #[test]
    fn test_double_encoded_url() {
        assert_eq!(
            to_direct_download("https%3A%2F%2Fdrive.google.com%2Ffile%2Fd%2FENC1%2Fview"),
            "https://drive.google.com/uc?export=download&id=ENC1"
        );
    }

    #[test]
    fn test_unmatched_url_passes_through_unchanged() {
        let url = "https://drive.google.com/drive/folders%20x";
        assert_eq!(to_direct_download(url), url);
    }

    #[test]
    fn test_conversion_is_idempotent_on_unmatched_input() {
        for url in [
            "https://example.com/pack.zip",
            "",
            "not a url",
            "https://drive.google.com/",
        ] {
            let once = to_direct_download(url);
            assert_eq!(to_direct_download(&once), once);
        }
    }

    #[test]
    fn test_is_file_host_url() {
        assert!(is_file_host_url("https://drive.google.com/file/d/x"));
        assert!(is_file_host_url("https://docs.google.com/uc?id=x"));
        assert!(!is_file_host_url("https://forum.gamer.com.tw/C.php"));
    }
}
