//! Field validators for the upload inputs.
//!
//! Pure checks return zero or more problem descriptions; the fallible
//! parsers go through [`attempt`] so their messages carry both the
//! offending input and the underlying cause.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use url::Url;

use crate::validated::{Validated, attempt, validated};

/// Fails on empty or all-whitespace input.
pub fn not_blank(value: &str, descriptor: &str) -> Vec<String> {
    if value.trim().is_empty() {
        vec![format!("No {descriptor} specified")]
    } else {
        Vec::new()
    }
}

/// Ports are strictly positive; zero is as invalid as a negative value.
pub fn greater_than_zero(value: i32) -> Vec<String> {
    if value <= 0 {
        vec![format!(
            "Invalid port {value}: port has to be greater than zero"
        )]
    } else {
        Vec::new()
    }
}

/// Remote paths are rooted at the server, never relative.
pub fn absolute_on_server(value: &str, descriptor: &str) -> Vec<String> {
    if value.starts_with('/') {
        Vec::new()
    } else {
        vec![format!(
            "{descriptor} has to be an absolute path on the server"
        )]
    }
}

/// Parses the host address, echoing the input back on failure so the
/// report points at the value that needs fixing.
pub fn host_uri(address: &str) -> Validated<Url> {
    attempt(
        || Url::parse(address),
        |e| format!("Invalid host address <{address}>: {e}"),
    )
}

/// Decodes a base64-encoded key. A blank input is reported as missing,
/// which is a different problem than a malformed one.
pub fn decode_base64(encoded: &str, descriptor: &str) -> Validated<Vec<u8>> {
    validated(encoded, |value| not_blank(value, descriptor)).and_then(|value| {
        attempt(
            || BASE64.decode(value.trim()),
            |e| format!("Bad base64 key: {e}"),
        )
    })
}
