//! gameinfo.gi patch errors

use super::TranslatorError;

/// Creates an anchor not found error
pub fn anchor_not_found(path: impl Into<String>, anchor: impl Into<String>) -> TranslatorError {
    TranslatorError::PatchAnchorNotFound {
        path: path.into(),
        anchor: anchor.into(),
    }
}
