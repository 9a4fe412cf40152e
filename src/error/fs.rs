//! File system errors

use super::TranslatorError;

/// Creates a file not found error
pub fn not_found(path: impl Into<String>) -> TranslatorError {
    TranslatorError::FileNotFound { path: path.into() }
}

/// Creates a file read error
pub fn read_failed(path: impl Into<String>, reason: impl ToString) -> TranslatorError {
    TranslatorError::FileReadFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a file write error
pub fn write_failed(path: impl Into<String>, reason: impl ToString) -> TranslatorError {
    TranslatorError::FileWriteFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}
