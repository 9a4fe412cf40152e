//! File copy operations for installing a translation bundle
//!
//! This module handles low-level file operations:
//! - Directory creation (ensure_parent_dir)
//! - Mirroring a content root into the game directory (copy_tree)

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, TranslatorError, fs as fs_error};
use crate::progress::ProgressReporter;

/// Relative paths copied into the game directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledFileSet {
    /// Directory the files were copied into
    pub root: PathBuf,
    /// Paths relative to `root`, in copy order
    pub files: Vec<PathBuf>,
}

fn file_write_error(path: &Path, e: std::io::Error) -> TranslatorError {
    fs_error::write_failed(path.display().to_string(), e)
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| file_write_error(parent, e))?;
    }
    Ok(())
}

/// Whether both paths name the same existing file
fn is_same_file(source: &Path, target: &Path) -> bool {
    match (dunce::canonicalize(source), dunce::canonicalize(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy one file, overwriting the target. Copying a file onto itself is a
/// no-op.
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    if is_same_file(source, target) {
        debug!(path = %target.display(), "Source is the target, skipping copy");
        return Ok(());
    }
    ensure_parent_dir(target)?;
    std::fs::copy(source, target)
        .map_err(|e| file_write_error(target, e))
        .map(|_| ())
}

/// Copy every regular file under `content_root` to the same relative path
/// under `target_root`. Existing files are overwritten.
///
/// A `content_root` that is a single file is copied into `target_root`
/// under its own name.
pub fn copy_tree(
    content_root: &Path,
    target_root: &Path,
    progress: &mut dyn ProgressReporter,
) -> Result<InstalledFileSet> {
    if !content_root.exists() {
        return Err(fs_error::not_found(content_root.display().to_string()));
    }

    let mut sources: Vec<(PathBuf, PathBuf)> = Vec::new();
    if content_root.is_file() {
        if let Some(name) = content_root.file_name() {
            sources.push((content_root.to_path_buf(), PathBuf::from(name)));
        }
    } else {
        for entry in WalkDir::new(content_root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(content_root)
                .map_err(|e| fs_error::read_failed(entry.path().display().to_string(), e))?
                .to_path_buf();
            sources.push((entry.path().to_path_buf(), relative));
        }
    }

    progress.start_files(sources.len() as u64);

    let mut installed = InstalledFileSet {
        root: target_root.to_path_buf(),
        files: Vec::with_capacity(sources.len()),
    };
    for (source, relative) in sources {
        let target = target_root.join(&relative);
        if let Err(e) = copy_file(&source, &target) {
            progress.abandon();
            return Err(e);
        }
        debug!(from = %source.display(), to = %target.display(), "Copied");
        progress.update_file(&relative.to_string_lossy());
        installed.files.push(relative);
    }
    progress.finish_files();

    Ok(installed)
}
