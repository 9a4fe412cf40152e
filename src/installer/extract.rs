//! Archive extraction

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::download::validate::is_zip;
use crate::error::{Result, archive, fs as fs_error};

/// Directory a zip is extracted into: inside `work_dir`, named after its stem
pub fn extraction_dir(archive_path: &Path, work_dir: &Path) -> PathBuf {
    let stem = archive_path
        .file_stem()
        .map_or_else(|| "bundle".into(), |s| s.to_os_string());
    work_dir.join(stem)
}

/// Canonical form of a path that may not exist yet
fn comparable(path: &Path) -> PathBuf {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => comparable(parent).join(name),
        _ => path.to_path_buf(),
    }
}

/// Reject extraction directories that are, contain, or sit inside the game
/// files.
fn ensure_safe_target(target: &Path, game_root: &Path) -> Result<()> {
    let target_c = comparable(target);
    let root_c = comparable(game_root);
    let game_files = root_c.join("game");

    if root_c.starts_with(&target_c) || target_c.starts_with(&game_files) {
        return Err(archive::unsafe_target(target.display().to_string()));
    }
    Ok(())
}

/// Return the directory holding the artifact's contents.
///
/// Zip archives are extracted into a temporary directory inside `work_dir`
/// and moved to [`extraction_dir`] once complete, replacing a previous
/// extraction. Anything else is its own content root.
pub fn prepare_content_root(
    artifact: &Path,
    work_dir: &Path,
    game_root: &Path,
) -> Result<PathBuf> {
    if !is_zip(artifact) {
        return Ok(artifact.to_path_buf());
    }

    let target = extraction_dir(artifact, work_dir);
    ensure_safe_target(&target, game_root)?;
    info!(archive = %artifact.display(), target = %target.display(), "Extracting archive");

    fs::create_dir_all(work_dir)
        .map_err(|e| fs_error::write_failed(work_dir.display().to_string(), e))?;
    let staging = tempfile::Builder::new()
        .prefix(".extract-")
        .tempdir_in(work_dir)
        .map_err(|e| fs_error::write_failed(work_dir.display().to_string(), e))?;

    extract_zip(artifact, staging.path())?;

    if target.exists() {
        fs::remove_dir_all(&target)
            .map_err(|e| fs_error::write_failed(target.display().to_string(), e))?;
    }
    fs::rename(staging.path(), &target)
        .map_err(|e| fs_error::write_failed(target.display().to_string(), e))?;

    Ok(target)
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<()> {
    let display = archive_path.display().to_string();
    let file = File::open(archive_path).map_err(|e| archive::read_failed(&display, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| archive::read_failed(&display, e))?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| archive::read_failed(&display, e))?;

        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            warn!(entry = entry.name(), "Skipping entry outside the archive root");
            continue;
        };
        let out_path = destination.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .map_err(|e| fs_error::write_failed(out_path.display().to_string(), e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| fs_error::write_failed(parent.display().to_string(), e))?;
        }
        let mut out = File::create(&out_path)
            .map_err(|e| fs_error::write_failed(out_path.display().to_string(), e))?;
        io::copy(&mut entry, &mut out).map_err(|e| archive::read_failed(&display, e))?;
        debug!(path = %relative.display(), "Extracted");
    }

    Ok(())
}
