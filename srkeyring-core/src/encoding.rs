//! Hex presentation of keys and seeds.
//!
//! Networks present raw bytes as a fixed textual prefix followed by
//! lowercase hex. Decoding accepts the text with or without that prefix.

use crate::error::{Error, Result};

/// Encode bytes as `prefix` followed by lowercase hex.
pub fn encode_hex(data: &[u8], prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + data.len() * 2);
    out.push_str(prefix);
    out.push_str(&hex::encode(data));
    out
}

/// Decode hex text, stripping `prefix` first if present.
///
/// # Errors
///
/// Returns [`Error::InvalidHex`] if the remainder is not valid hex.
pub fn decode_hex(text: &str, prefix: &str) -> Result<Vec<u8>> {
    let digits = if prefix.is_empty() {
        text
    } else {
        text.strip_prefix(prefix).unwrap_or(text)
    };
    Ok(hex::decode(digits)?)
}

/// Decode a fixed-size hex value such as a public key.
///
/// # Errors
///
/// Returns [`Error::InvalidHex`] if the text is not hex of exactly `N` bytes.
pub fn decode_hex_array<const N: usize>(text: &str, prefix: &str) -> Result<[u8; N]> {
    decode_hex(text, prefix)?
        .try_into()
        .map_err(|_| Error::InvalidHex)
}
