//! Downloaded file validation

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::{error, info};
use zip::ZipArchive;

use crate::error::{Result, archive, fs};

/// Whether a path names a zip archive (by extension, case-insensitive)
pub fn is_zip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Check that a downloaded file exists and, for archives, that every entry
/// decompresses with a matching CRC.
pub fn check(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(fs::not_found(path.display().to_string()));
    }

    if is_zip(path) {
        check_zip(path)?;
    }

    Ok(())
}

/// [`check`] as a yes/no answer, logging the reason for a rejection
pub fn validate(path: &Path) -> bool {
    match check(path) {
        Ok(()) => {
            info!(path = %path.display(), "File validated");
            true
        }
        Err(e) => {
            error!(path = %path.display(), "Validation failed: {e}");
            false
        }
    }
}

fn check_zip(path: &Path) -> Result<()> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|e| archive::read_failed(&display, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| archive::read_failed(&display, e))?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| archive::read_failed(&display, e))?;
        let name = entry.name().to_string();
        // Reading to the end makes the zip reader compare the CRC-32
        io::copy(&mut entry, &mut io::sink())
            .map_err(|e| archive::read_failed(&display, format!("bad entry {name}: {e}")))?;
    }

    Ok(())
}
