//! Error types and handling for deadlock-translator
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`network`]: HTTP request errors
//! - [`link`]: Link resolution and URL errors
//! - [`archive`]: Archive validation and extraction errors
//! - [`fs`]: File system errors
//! - [`config`]: Configuration file errors
//! - [`patch`]: gameinfo.gi patch errors
//! - [`launch`]: Game launch errors

pub mod archive;
pub mod config;
pub mod fs;
pub mod launch;
pub mod link;
pub mod network;
pub mod patch;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for translator operations
#[derive(Error, Diagnostic, Debug)]
pub enum TranslatorError {
    // Network errors
    #[error("Request to {url} failed: {reason}")]
    #[diagnostic(
        code(deadlock_translator::network::request_failed),
        help("Check your internet connection or raise --timeout")
    )]
    RequestFailed { url: String, reason: String },

    #[error("Server returned HTTP {status} for {url}")]
    #[diagnostic(code(deadlock_translator::network::http_status))]
    HttpStatus { url: String, status: u16 },

    // Link errors
    #[error("No download link found on {url}")]
    #[diagnostic(
        code(deadlock_translator::link::not_found),
        help("The forum post may have moved; pass the file link with --forum-url")
    )]
    LinkNotFound { url: String },

    #[error("Invalid URL: {url}")]
    #[diagnostic(code(deadlock_translator::link::invalid_url))]
    InvalidUrl { url: String },

    // Archive errors
    #[error("Downloaded file failed validation: {path}")]
    #[diagnostic(
        code(deadlock_translator::archive::invalid),
        help("Run the command again to download a fresh copy")
    )]
    ArchiveInvalid { path: String },

    #[error("Failed to read archive {path}: {reason}")]
    #[diagnostic(code(deadlock_translator::archive::read_failed))]
    ArchiveReadFailed { path: String, reason: String },

    #[error("Refusing to extract into {path}: it holds game files")]
    #[diagnostic(
        code(deadlock_translator::archive::unsafe_target),
        help("Rename the archive or set download_dir to a separate directory")
    )]
    UnsafeExtractTarget { path: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(deadlock_translator::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(deadlock_translator::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(deadlock_translator::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(deadlock_translator::fs::io_error))]
    IoError { message: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(deadlock_translator::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(deadlock_translator::config::parse_failed),
        help("See deadlock_translator.yaml in the README for the accepted keys")
    )]
    ConfigParseFailed { path: String, reason: String },

    // Patch errors
    #[error("Could not find {anchor} in {path}")]
    #[diagnostic(
        code(deadlock_translator::patch::anchor_not_found),
        help("The game update may have changed gameinfo.gi; add the language entry by hand")
    )]
    PatchAnchorNotFound { path: String, anchor: String },

    // Launch errors
    #[error("Game executable not found: {path}")]
    #[diagnostic(
        code(deadlock_translator::launch::not_found),
        help("Run the tool from the Deadlock install directory or pass --game-dir")
    )]
    GameExecutableNotFound { path: String },

    #[error("Failed to launch {path}: {reason}")]
    #[diagnostic(code(deadlock_translator::launch::failed))]
    LaunchFailed { path: String, reason: String },
}

impl From<std::io::Error> for TranslatorError {
    fn from(err: std::io::Error) -> Self {
        TranslatorError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<walkdir::Error> for TranslatorError {
    fn from(err: walkdir::Error) -> Self {
        TranslatorError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TranslatorError {
    fn from(err: serde_json::Error) -> Self {
        TranslatorError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, TranslatorError>;
