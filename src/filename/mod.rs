//! Filename recovery
//!
//! Turns whatever a server says about a download's name (RFC 2231 and
//! RFC 2047 headers, percent-encoding, legacy Big5 bytes, Latin-1 mojibake)
//! into a readable file name.

pub mod headers;
pub mod normalize;
pub mod rfc2047;

pub use headers::{ResponseHeaders, extract_filename, sanitize_filename};
