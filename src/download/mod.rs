//! Translation download orchestration
//!
//! The download runs as a straight line with two early exits:
//! 1. Resolve the source into a downloadable URL
//! 2. Probe it with HEAD for size and filename (failures are ignored)
//! 3. Fall back to the URL path or the configured default filename
//! 4. Reuse an existing file at the target path if it validates
//! 5. Stream the body with GET, letting its headers override the filename
//! 6. Validate the result
//!
//! Bodies are streamed into a temporary file next to the target and only
//! moved into place once complete, so an interrupted transfer never leaves a
//! truncated archive behind.

pub mod validate;

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::{debug, info, info_span, warn};

use crate::error::{Result, archive, fs as fs_error, network};
use crate::filename::{extract_filename, sanitize_filename};
use crate::http::HttpTransport;
use crate::progress::ProgressReporter;
use crate::resolver::{self, ResolvedLink};

const CHUNK_SIZE: usize = 8192;

/// What to download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    /// Per-request timeout of the transport built for this request
    pub timeout: Duration,
}

/// A validated file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedArtifact {
    pub path: PathBuf,
    pub byte_size: u64,
    /// True when an existing valid file was reused without a transfer
    pub reused: bool,
}

/// Downloads translation bundles into a directory
pub struct Downloader<'a, T: HttpTransport> {
    transport: &'a T,
    download_dir: PathBuf,
    fallback_filename: String,
}

impl<'a, T: HttpTransport> Downloader<'a, T> {
    pub fn new(
        transport: &'a T,
        download_dir: impl Into<PathBuf>,
        fallback_filename: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            download_dir: download_dir.into(),
            fallback_filename: fallback_filename.into(),
        }
    }

    /// Resolve, download and validate the bundle behind `request.url`.
    pub fn download(
        &self,
        request: &DownloadRequest,
        progress: &mut dyn ProgressReporter,
    ) -> Result<DownloadedArtifact> {
        let _span =
            info_span!("download", source = %request.url, timeout = ?request.timeout).entered();

        let link = resolver::resolve_download_url(self.transport, &request.url);
        info!(url = %link.url, via = ?link.via, "Starting download");

        fs::create_dir_all(&self.download_dir).map_err(|e| {
            fs_error::write_failed(self.download_dir.display().to_string(), e)
        })?;

        let (probed_name, mut total_size) = self.probe(&link);
        let filename = probed_name
            .or_else(|| crate::filename::headers::filename_from_url(&link.url))
            .and_then(|name| sanitize_filename(&name))
            .unwrap_or_else(|| self.fallback_filename.clone());

        let target = self.download_dir.join(&filename);
        if target.exists() {
            info!(path = %target.display(), "Found existing download, validating");
            if validate::validate(&target) {
                info!(path = %target.display(), "Existing file is valid, skipping download");
                let byte_size = fs::metadata(&target).map(|m| m.len()).unwrap_or(0);
                return Ok(DownloadedArtifact {
                    path: target,
                    byte_size,
                    reused: true,
                });
            }
            warn!(path = %target.display(), "Existing file failed validation, downloading again");
        }

        let mut response = self.transport.get(&link.url)?;
        if total_size == 0 {
            total_size = response.meta.headers.content_length();
        }

        let target = match extract_filename(&response.meta.headers, &response.meta.url)
            .and_then(|name| sanitize_filename(&name))
        {
            Some(name) if name != filename => {
                debug!(probed = %filename, actual = %name, "GET response renamed the download");
                self.download_dir.join(name)
            }
            _ => target,
        };

        let byte_size = self.stream_to(&target, &mut response.body, total_size, progress)?;
        info!(path = %target.display(), bytes = byte_size, "Download finished");

        if total_size > 0 && byte_size != total_size {
            warn!(
                expected = total_size,
                actual = byte_size,
                "Downloaded size differs from the advertised content-length"
            );
        }

        if !validate::validate(&target) {
            return Err(archive::invalid(target.display().to_string()));
        }

        Ok(DownloadedArtifact {
            path: target,
            byte_size,
            reused: false,
        })
    }

    /// HEAD the URL for a filename and size. Any failure yields `(None, 0)`.
    fn probe(&self, link: &ResolvedLink) -> (Option<String>, u64) {
        match self.transport.head(&link.url) {
            Ok(meta) if meta.is_success() => (
                extract_filename(&meta.headers, &meta.url),
                meta.headers.content_length(),
            ),
            Ok(meta) => {
                debug!(status = meta.status, "HEAD probe rejected");
                (None, 0)
            }
            Err(e) => {
                debug!("HEAD probe failed: {e}");
                (None, 0)
            }
        }
    }

    fn stream_to(
        &self,
        target: &Path,
        body: &mut dyn Read,
        total_size: u64,
        progress: &mut dyn ProgressReporter,
    ) -> Result<u64> {
        let temp_display = self.download_dir.display().to_string();
        let mut temp = NamedTempFile::new_in(&self.download_dir)
            .map_err(|e| fs_error::write_failed(&temp_display, e))?;

        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.start_transfer(&name, total_size);

        let mut buffer = [0u8; CHUNK_SIZE];
        let mut downloaded: u64 = 0;
        loop {
            let read = match body.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    progress.abandon();
                    return Err(network::request_failed(&name, e));
                }
            };
            if let Err(e) = temp.write_all(&buffer[..read]) {
                progress.abandon();
                return Err(fs_error::write_failed(&temp_display, e));
            }
            downloaded += read as u64;
            progress.update_transfer(downloaded);
        }
        progress.finish_transfer();

        temp.flush()
            .map_err(|e| fs_error::write_failed(&temp_display, e))?;
        temp.persist(target)
            .map_err(|e| fs_error::write_failed(target.display().to_string(), e.error))?;

        Ok(downloaded)
    }
}
