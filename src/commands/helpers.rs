//! Command helper utilities

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::FetchArgs;
use crate::config::TranslatorConfig;
use crate::download::{DownloadRequest, DownloadedArtifact, Downloader};
use crate::error::{Result, TranslatorError};
use crate::http::{HttpTransport, ReqwestTransport};
use crate::progress::{self, ProgressReporter};
use crate::resolver;

/// Resolve game directory from optional argument
///
/// If a game directory is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_game_dir(game_dir: Option<PathBuf>) -> Result<PathBuf> {
    match game_dir {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| TranslatorError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}

/// Settings every command runs with
#[derive(Debug, Clone)]
pub struct Context {
    pub game_root: PathBuf,
    pub config: TranslatorConfig,
    pub quiet: bool,
}

impl Context {
    pub fn new(game_root: PathBuf, config: TranslatorConfig, quiet: bool) -> Self {
        Self {
            game_root,
            config,
            quiet,
        }
    }

    pub fn download_dir(&self) -> PathBuf {
        self.config.download_dir(&self.game_root)
    }

    pub fn progress(&self) -> Box<dyn ProgressReporter> {
        progress::reporter(self.quiet)
    }

    /// Timeout from the flag, falling back to the config
    pub fn timeout(&self, flag: Option<u64>) -> Duration {
        flag.map_or_else(|| self.config.timeout(), Duration::from_secs)
    }

    pub fn transport(&self, timeout: Duration) -> Result<ReqwestTransport> {
        ReqwestTransport::new(timeout, &self.config.user_agent)
    }

    /// Download request for the given flags
    pub fn download_request(&self, fetch: &FetchArgs) -> DownloadRequest {
        DownloadRequest {
            url: fetch
                .forum_url
                .clone()
                .unwrap_or_else(|| self.config.forum_url.clone()),
            timeout: self.timeout(fetch.timeout),
        }
    }

    /// Network transport honoring the request's timeout
    pub fn transport_for(&self, request: &DownloadRequest) -> Result<ReqwestTransport> {
        self.transport(request.timeout)
    }

    /// Download over the network into the configured download directory
    pub fn download(&self, fetch: &FetchArgs) -> Result<DownloadedArtifact> {
        let request = self.download_request(fetch);
        let transport = self.transport_for(&request)?;
        self.download_with(&transport, &request)
    }

    pub fn download_with<T: HttpTransport>(
        &self,
        transport: &T,
        request: &DownloadRequest,
    ) -> Result<DownloadedArtifact> {
        resolver::validate_source(&request.url)?;
        let downloader = Downloader::new(
            transport,
            self.download_dir(),
            &self.config.fallback_filename,
        );
        downloader.download(request, self.progress().as_mut())
    }
}

/// Path as shown to the user
pub fn display_path(path: &Path) -> String {
    dunce::simplified(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context::new(
            PathBuf::from("/games/Deadlock"),
            TranslatorConfig::default(),
            true,
        )
    }

    #[test]
    fn test_resolve_game_dir_explicit() {
        let dir = resolve_game_dir(Some(PathBuf::from("/games/Deadlock"))).unwrap();
        assert_eq!(dir, PathBuf::from("/games/Deadlock"));
    }

    #[test]
    fn test_resolve_game_dir_default() {
        assert_eq!(
            resolve_game_dir(None).unwrap(),
            std::env::current_dir().unwrap()
        );
    }

    #[test]
    fn test_flags_override_config() {
        let ctx = context();
        let request = ctx.download_request(&FetchArgs {
            forum_url: Some("https://drive.google.com/file/d/abc/view".to_string()),
            timeout: Some(5),
        });
        assert_eq!(request.url, "https://drive.google.com/file/d/abc/view");
        assert_eq!(request.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_defaults_used() {
        let ctx = context();
        let request = ctx.download_request(&FetchArgs::default());
        assert_eq!(request.url, ctx.config.forum_url);
        assert_eq!(request.timeout, Duration::from_secs(30));
        assert_eq!(
            ctx.download_dir(),
            PathBuf::from("/games/Deadlock").join("downloads")
        );
    }

    #[test]
    fn test_transport_uses_request_timeout() {
        let ctx = context();
        let request = ctx.download_request(&FetchArgs {
            forum_url: None,
            timeout: Some(7),
        });
        let transport = ctx.transport_for(&request).unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(7));
    }
}
