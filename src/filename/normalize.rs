//! Best-effort decoding of filename values into readable text
//!
//! Servers hand out filenames as raw bytes in unknown encodings, as
//! percent-encoded strings, or as UTF-8 that was already decoded as Latin-1
//! somewhere along the way. Everything here is infallible: the worst case is a
//! string with replacement characters.

use std::borrow::Cow;

/// A filename value as received, either raw bytes or already-decoded text
#[derive(Debug, Clone, Copy)]
pub enum RawName<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for RawName<'a> {
    fn from(value: &'a [u8]) -> Self {
        RawName::Bytes(value)
    }
}

impl<'a> From<&'a Vec<u8>> for RawName<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        RawName::Bytes(value.as_slice())
    }
}

impl<'a> From<&'a str> for RawName<'a> {
    fn from(value: &'a str) -> Self {
        RawName::Text(value)
    }
}

impl<'a> From<&'a String> for RawName<'a> {
    fn from(value: &'a String) -> Self {
        RawName::Text(value.as_str())
    }
}

/// Normalize a filename-like value into a best-effort readable string.
///
/// - Bytes are decoded with [`decode_bytes_with_fallback`].
/// - Text containing `%` is percent-decoded to bytes first.
/// - Other text goes through [`repair_mojibake`].
pub fn normalize<'a>(value: impl Into<RawName<'a>>) -> String {
    match value.into() {
        RawName::Bytes(bytes) => decode_bytes_with_fallback(bytes),
        RawName::Text(text) if text.contains('%') => {
            let bytes = urlencoding::decode_binary(text.as_bytes());
            decode_bytes_with_fallback(&bytes)
        }
        RawName::Text(text) => repair_mojibake(text).into_owned(),
    }
}

/// Decode bytes trying UTF-8, CP950 (Big5) and Latin-1 in that order.
pub fn decode_bytes_with_fallback(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    if let Some(text) = encoding_rs::BIG5.decode_without_bom_handling_and_without_replacement(bytes)
    {
        return text.into_owned();
    }

    // Latin-1 maps every byte, so the lossy UTF-8 tail below is only reached
    // for empty input.
    if !bytes.is_empty() {
        return latin1_to_string(bytes);
    }

    String::from_utf8_lossy(bytes).into_owned()
}

/// Undo UTF-8 text that was decoded as Latin-1.
///
/// The text is re-encoded as Latin-1 and decoded as UTF-8. The result is kept
/// only when it contains CJK ideographs and the input did not, so repairing an
/// already-correct string is a no-op.
pub fn repair_mojibake(text: &str) -> Cow<'_, str> {
    if text.is_empty() || contains_cjk(text) {
        return Cow::Borrowed(text);
    }

    let bytes = string_to_latin1(text);
    let decoded = String::from_utf8_lossy(&bytes);

    if contains_cjk(&decoded) {
        Cow::Owned(decoded.into_owned())
    } else {
        Cow::Borrowed(text)
    }
}

/// Whether the text contains a CJK Unified Ideograph (U+4E00..=U+9FFF)
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

/// Map each byte to the code point of the same value.
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode text as Latin-1; characters outside U+0000..=U+00FF become `?`.
fn string_to_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLIFIED: &str = "简體.zip";

    #[test]
    fn test_utf8_bytes_decode_unchanged() {
        let name = "繁體中文翻譯.zip";
        assert_eq!(normalize(name.as_bytes()), name);
    }

    #[test]
    fn test_big5_bytes_decode() {
        // "中文" in Big5
        let bytes: &[u8] = &[0xA4, 0xA4, 0xA4, 0xE5, b'.', b'z', b'i', b'p'];
        assert_eq!(normalize(bytes), "中文.zip");
    }

    #[test]
    fn test_latin1_fallback_for_undecodable_bytes() {
        // 0xFF is neither valid UTF-8 nor a Big5 lead byte
        let bytes: &[u8] = &[b'a', 0xFF, b'b'];
        assert_eq!(normalize(bytes), "a\u{ff}b");
    }

    #[test]
    fn test_empty_bytes() {
        assert_eq!(normalize(&[][..]), "");
    }

    #[test]
    fn test_plain_ascii_unchanged() {
        assert_eq!(normalize("taiwan_translation.zip"), "taiwan_translation.zip");
    }

    #[test]
    fn test_plain_accented_text_unchanged() {
        // Re-decoding "café" as UTF-8 produces no CJK, so it is left alone
        assert_eq!(normalize("café.zip"), "café.zip");
    }

    #[test]
    fn test_percent_encoded_text() {
        assert_eq!(normalize("%E7%AE%80%E9%AB%94.zip"), SIMPLIFIED);
    }

    #[test]
    fn test_percent_encoded_big5() {
        assert_eq!(normalize("%A4%A4%A4%E5.zip"), "中文.zip");
    }

    #[test]
    fn test_repairs_latin1_mojibake() {
        let garbled = latin1_to_string(SIMPLIFIED.as_bytes());
        assert_ne!(garbled, SIMPLIFIED);
        assert_eq!(normalize(garbled.as_str()), SIMPLIFIED);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let garbled = latin1_to_string("中文翻譯.zip".as_bytes());
        let once = repair_mojibake(&garbled).into_owned();
        let twice = repair_mojibake(&once).into_owned();
        assert_eq!(once, twice);

        for sample in ["plain.zip", "中文.zip", "", "ÀÁÂ"] {
            let once = repair_mojibake(sample).into_owned();
            assert_eq!(repair_mojibake(&once), once);
        }
    }

    #[test]
    fn test_repair_leaves_cjk_text_alone() {
        assert!(matches!(repair_mojibake("中文.zip"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_contains_cjk() {
        assert!(contains_cjk("abc中"));
        assert!(!contains_cjk("abc"));
        // Hiragana is outside the ideograph block
        assert!(!contains_cjk("あ"));
    }
}
