//! Link resolution errors

use super::TranslatorError;

/// Creates a link not found error
pub fn not_found(url: impl Into<String>) -> TranslatorError {
    TranslatorError::LinkNotFound { url: url.into() }
}

/// Creates an invalid URL error
pub fn invalid_url(url: impl Into<String>) -> TranslatorError {
    TranslatorError::InvalidUrl { url: url.into() }
}
