//! Game launch errors

use super::TranslatorError;

/// Creates a missing executable error
pub fn not_found(path: impl Into<String>) -> TranslatorError {
    TranslatorError::GameExecutableNotFound { path: path.into() }
}

/// Creates a launch failure error
pub fn failed(path: impl Into<String>, reason: impl ToString) -> TranslatorError {
    TranslatorError::LaunchFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}
