//! Content hashing helpers.
//!
//! Certificates store their own digest under `meta.sha256`. The digest is
//! computed over the canonical serialization with that field removed, so
//! re-hashing a loaded certificate (hash blanked again) reproduces the
//! stored value.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use wce_core::errors::{ErrorInfo, WceError};

use crate::serde::to_canonical_json_bytes;

fn hash_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Serde(ErrorInfo::new(code, message.into()))
}

/// Computes a stable hexadecimal hash for the provided payload using canonical JSON ordering.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, WceError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{digest:x}"))
}

/// Removes `meta.sha256` in place, if present.
pub fn blank_content_hash(value: &mut Value) {
    if let Some(meta) = value.get_mut("meta").and_then(Value::as_object_mut) {
        meta.remove("sha256");
    }
}

/// Computes the content hash of a certificate payload with `meta.sha256` blanked.
pub fn content_hash<T: Serialize>(payload: &T) -> Result<String, WceError> {
    let mut value =
        serde_json::to_value(payload).map_err(|err| hash_error("json-encode", err.to_string()))?;
    blank_content_hash(&mut value);
    stable_hash_string(&value)
}

/// Recomputes a loaded certificate's content hash and compares it with the stored digest.
pub fn verify_content_hash(doc: &Value) -> Result<bool, WceError> {
    let stored = doc
        .get("meta")
        .and_then(|meta| meta.get("sha256"))
        .and_then(Value::as_str)
        .ok_or_else(|| hash_error("missing-sha256", "certificate has no meta.sha256 field"))?;
    let recomputed = content_hash(doc)?;
    Ok(recomputed == stored)
}
