//! Configuration errors

use super::TranslatorError;

/// Creates a configuration read error
pub fn read_failed(path: impl Into<String>, reason: impl ToString) -> TranslatorError {
    TranslatorError::ConfigReadFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a configuration parse error
pub fn parse_failed(path: impl Into<String>, reason: impl ToString) -> TranslatorError {
    TranslatorError::ConfigParseFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}
