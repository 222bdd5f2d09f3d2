//! JSON parser for NeoWs feed bodies.

use crate::feed::RawResponse;

/// Decodes a feed body from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON, or if a field the tracker
/// relies on is missing or has the wrong type.
pub fn parse_feed(bytes: &[u8]) -> serde_json::Result<RawResponse> {
    serde_json::from_slice(bytes)
}
