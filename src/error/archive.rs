//! Archive errors

use super::TranslatorError;

/// Creates an archive validation error
pub fn invalid(path: impl Into<String>) -> TranslatorError {
    TranslatorError::ArchiveInvalid { path: path.into() }
}

/// Creates an archive read error
pub fn read_failed(path: impl Into<String>, reason: impl ToString) -> TranslatorError {
    TranslatorError::ArchiveReadFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates an error for an extraction directory that overlaps the game files
pub fn unsafe_target(path: impl Into<String>) -> TranslatorError {
    TranslatorError::UnsafeExtractTarget { path: path.into() }
}
