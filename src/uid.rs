//! Map UID derivation for variants
//!
//! A variant UID is 10 characters of fresh randomness, then the 10
//! characters of the source UID starting at offset 9, then a fixed tag.
//! Variants of the same map therefore share a recognizable middle part.

use crate::error::GenerationError;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use uuid::Uuid;

/// Suffix every variant UID ends with
pub const UID_SUFFIX: &str = "ENVIMIX";

const RANDOM_LEN: usize = 10;
const SOURCE_OFFSET: usize = 9;
const SOURCE_LEN: usize = 10;

/// Slice of the source UID carried into every variant UID
pub fn source_fragment(source_uid: &str) -> Result<&str, GenerationError> {
    source_uid
        .get(SOURCE_OFFSET..SOURCE_OFFSET + SOURCE_LEN)
        .ok_or_else(|| GenerationError::MalformedUid(source_uid.to_string()))
}

/// New UID derived from `source_uid`. Two calls never return the same value.
pub fn derive_uid(source_uid: &str) -> Result<String, GenerationError> {
    let fragment = source_fragment(source_uid)?;
    let token = Uuid::new_v4().hyphenated().to_string();
    let encoded = BASE64_STANDARD.encode(token.as_bytes());
    Ok(format!("{}{}{}", &encoded[..RANDOM_LEN], fragment, UID_SUFFIX))
}
