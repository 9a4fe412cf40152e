//! Common test utilities for deadlock-translator integration tests

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// gameinfo.gi with the language list as shipped by the game
pub const GAMEINFO: &str = "\"GameInfo\"\n{\n\tgame\t\"citadel\"\n\tLanguages\n\t{\n\t\tSupportedLanguages\n\t\t{\n\t\t\t\"english\"\t\"3\"\n\t\t\t\"ukrainian\"\t\"3\"\n\t\t}\n\t}\n}\n";

/// A throwaway Deadlock install directory
pub struct TestGame {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Game root
    pub path: PathBuf,
}

impl TestGame {
    /// Create a game directory containing gameinfo.gi
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let game = Self { temp, path };
        game.write_file("game/citadel/gameinfo.gi", GAMEINFO);
        game
    }

    /// Create an empty directory with no game files
    #[allow(dead_code)]
    pub fn empty() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the game directory
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the game directory
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the game directory
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Whether a dated `deadlock_translator.*.log` exists in the game root
    pub fn has_log_file(&self) -> bool {
        std::fs::read_dir(&self.path)
            .map(|entries| {
                entries.flatten().any(|entry| {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    name.starts_with("deadlock_translator.") && name.ends_with(".log")
                })
            })
            .unwrap_or(false)
    }

    /// Write a zip archive at `path` (relative to the game root)
    #[allow(dead_code)]
    pub fn write_zip(&self, path: &str, entries: &[(&str, &str)]) -> PathBuf {
        let zip_path = self.path.join(path);
        write_zip(&zip_path, entries);
        zip_path
    }
}

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    let file = std::fs::File::create(path).expect("Failed to create zip");
    let mut zip = zip::ZipWriter::new(file);
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in entries {
        zip.start_file(*name, options).expect("Failed to start zip entry");
        zip.write_all(content.as_bytes())
            .expect("Failed to write zip entry");
    }
    zip.finish().expect("Failed to finish zip");
}
