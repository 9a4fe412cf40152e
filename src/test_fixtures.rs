//! Test fixtures shared by unit tests: temp directories, zip archives and a
//! minimal game install.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::CompressionMethod;
use zip::write::{FileOptions, ZipWriter};

/// `SupportedLanguages` block as shipped in gameinfo.gi, trimmed
pub const GAMEINFO: &str = "\"GameInfo\"\n{\n\tgame\t\"citadel\"\n\tLocalization\n\t{\n\t\tSupportedLanguages\n\t\t{\n\t\t\t\"english\"\t\"3\"\n\t\t\t\"schinese\"\t\"3\"\n\t\t\t\"ukrainian\"\t\"3\"\n\t\t}\n\t}\n}\n";

/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write a zip with stored (uncompressed) entries, so tests can find and
/// corrupt entry bytes in place.
///
/// # Panics
///
/// Panics on any I/O error.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("Failed to create zip");
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(*name, options).expect("Failed to start entry");
        writer.write_all(data).expect("Failed to write entry");
    }
    writer.finish().expect("Failed to finish zip");
}

/// In-memory zip bytes, for canned HTTP responses
///
/// # Panics
///
/// Panics on any I/O error.
#[must_use]
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let temp = create_temp_dir();
    let path = temp.path().join("bundle.zip");
    write_zip(&path, entries);
    std::fs::read(path).expect("Failed to read zip")
}

/// Flip the first byte of `needle` inside a file
///
/// # Panics
///
/// Panics if the file cannot be read or does not contain `needle`.
pub fn corrupt_file(path: &Path, needle: &[u8]) {
    let mut bytes = std::fs::read(path).expect("Failed to read file");
    let pos = bytes
        .windows(needle.len())
        .position(|w| w == needle)
        .expect("needle not found");
    bytes[pos] ^= 0xFF;
    std::fs::write(path, bytes).expect("Failed to write file");
}

/// Game directory with `game/citadel/gameinfo.gi`
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn create_game_dir() -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let path = temp.path().to_path_buf();
    let gameinfo = path.join("game/citadel/gameinfo.gi");
    std::fs::create_dir_all(gameinfo.parent().expect("gameinfo has a parent"))
        .expect("Failed to create game dir");
    std::fs::write(&gameinfo, GAMEINFO).expect("Failed to write gameinfo.gi");
    (temp, path)
}
