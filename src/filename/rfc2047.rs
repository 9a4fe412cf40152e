//! RFC 2047 encoded-word decoding (`=?charset?Q?...?=` / `=?charset?B?...?=`)

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use regex::Regex;

static ENCODED_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"=\?([^?]+)\?([QqBb])\?([^?]*)\?=").expect("encoded-word pattern is valid")
});

/// Whether a value looks like it carries encoded words
pub fn is_encoded(value: &str) -> bool {
    value.starts_with("=?") && value.contains("?=")
}

/// Decode every encoded word in `value` and concatenate the results.
///
/// Whitespace between two adjacent encoded words is dropped, other literal
/// text is kept. Returns `None` when a word names a charset we do not know or
/// its payload is malformed.
pub fn decode(value: &str) -> Option<String> {
    let mut out = String::new();
    let mut last_end = 0;
    let mut previous_was_word = false;

    for caps in ENCODED_WORD.captures_iter(value) {
        let whole = caps.get(0)?;
        let literal = &value[last_end..whole.start()];
        if !(previous_was_word && literal.trim().is_empty()) {
            out.push_str(literal);
        }

        let charset = &caps[1];
        let payload = &caps[3];
        let bytes = match &caps[2] {
            "Q" | "q" => decode_q(payload)?,
            _ => decode_b(payload)?,
        };
        out.push_str(&decode_charset(charset, &bytes)?);

        last_end = whole.end();
        previous_was_word = true;
    }

    if !previous_was_word {
        return None;
    }

    out.push_str(&value[last_end..]);
    Some(out)
}

/// Decode bytes with a MIME charset label, replacing malformed sequences.
pub fn decode_charset(label: &str, bytes: &[u8]) -> Option<String> {
    let label = label.trim();
    let label = if label.is_empty() { "utf-8" } else { label };
    let encoding = encoding_rs::Encoding::for_label(label.as_bytes())?;
    let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
    Some(text.into_owned())
}

fn decode_q(payload: &str) -> Option<Vec<u8>> {
    let bytes = payload.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'_' => {
                out.push(b' ');
                i += 1;
            }
            b'=' => {
                let hex = payload.get(i + 1..i + 3)?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    Some(out)
}

fn decode_b(payload: &str) -> Option<Vec<u8>> {
    STANDARD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload.trim_end_matches('=')))
        .ok()
}
