//! Network errors

use super::TranslatorError;

/// Creates a request failed error
pub fn request_failed(url: impl Into<String>, reason: impl ToString) -> TranslatorError {
    TranslatorError::RequestFailed {
        url: url.into(),
        reason: reason.to_string(),
    }
}

/// Creates an unexpected HTTP status error
pub fn http_status(url: impl Into<String>, status: u16) -> TranslatorError {
    TranslatorError::HttpStatus {
        url: url.into(),
        status,
    }
}
