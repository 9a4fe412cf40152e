//! Resolve command implementation

use crate::cli::ResolveArgs;
use crate::commands::Context;
use crate::error::{Result, link};
use crate::http::HttpTransport;
use crate::resolver::{self, ResolvedLink};

/// Run resolve command
pub fn run(ctx: &Context, args: ResolveArgs) -> Result<()> {
    let transport = ctx.transport(ctx.timeout(args.timeout))?;
    let resolved = resolve(&transport, &args.url)?;
    println!("{}", resolved.url);
    Ok(())
}

fn resolve<T: HttpTransport>(transport: &T, url: &str) -> Result<ResolvedLink> {
    resolver::validate_source(url)?;
    let resolved = resolver::resolve_download_url(transport, url);
    if resolver::is_unresolved_forum(url, &resolved) {
        return Err(link::not_found(url));
    }
    if let Some(from) = &resolved.resolved_from {
        tracing::info!(from = %from, via = ?resolved.via, "Resolved");
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslatorError;
    use crate::http::fake::{CannedResponse, FakeTransport};

    #[test]
    fn test_resolve_drive_link_without_network() {
        let transport = FakeTransport::new();
        let link = resolve(&transport, "https://drive.google.com/file/d/abc123/view").unwrap();
        assert_eq!(
            link.url,
            "https://drive.google.com/uc?export=download&id=abc123"
        );
        assert_eq!(transport.count(""), 0);
    }

    #[test]
    fn test_resolve_forum_without_link() {
        let forum = "https://forum.gamer.com.tw/C.php?bsn=80911&snA=76";
        let transport = FakeTransport::new()
            .with_get(forum, CannedResponse::ok(b"<p>no links</p>".to_vec()));
        assert!(matches!(
            resolve(&transport, forum),
            Err(TranslatorError::LinkNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_invalid_url() {
        let transport = FakeTransport::new();
        assert!(matches!(
            resolve(&transport, "drive.google.com/file/d/abc"),
            Err(TranslatorError::InvalidUrl { .. })
        ));
    }
}
