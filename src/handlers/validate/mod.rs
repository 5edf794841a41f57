// handlers/validate/mod.rs - Credential validation routes for sibling services

pub mod bridge;
pub mod direct;

pub use bridge::validate_bridge;
pub use direct::validate_direct;

use crate::error::GreenError;

/// Split a `applicationKey:secret` credential, reporting the actual piece
/// count on mismatch.
pub(crate) fn split_credential(key: &str) -> Result<(&str, &str), GreenError> {
    let pieces: Vec<&str> = key.split(':').collect();
    match pieces.as_slice() {
        [application_key, secret] => Ok((application_key, secret)),
        _ => Err(GreenError::format_error(
            "key-length",
            "2",
            pieces.len().to_string(),
        )),
    }
}
