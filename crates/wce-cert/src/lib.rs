#![deny(missing_docs)]
#![doc = "Certificate plumbing for WCE: canonical JSON serialization, content hashing with the blank-field convention, shared metadata blocks, declared multi-path field schemas, and tolerant bound-value readers."]

/// Content hashing helpers.
pub mod hash;
/// Shared certificate metadata block.
pub mod meta;
/// Declared logical-field to alias-path schemas.
pub mod schema;
/// Canonical JSON serde helpers.
pub mod serde;
/// Tolerant scalar and bound-value readers.
pub mod value;

pub use hash::{blank_content_hash, content_hash, stable_hash_string, verify_content_hash};
pub use meta::{utc_now_iso, Meta};
pub use schema::{FieldSpec, SchemaMap};
pub use serde::{from_json_slice, to_canonical_json_bytes};
pub use value::{decimal_face, f64_face, flag_face, Face};
