//! Declared logical-field to alias-path schemas.
//!
//! Consumers of certificate artifacts must tolerate multiple historical
//! layouts for the same logical quantity. Instead of probing nested paths ad
//! hoc at each call site, a [`SchemaMap`] declares the ordered alias list per
//! logical field once and validates the declaration at registration time;
//! resolution walks the aliases and the first resolvable one wins.

use std::collections::BTreeMap;

use serde_json::Value;
use wce_core::errors::{ErrorInfo, WceError};

fn schema_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Schema(ErrorInfo::new(code, message.into()))
}

/// Declaration of one logical field and its ordered structural aliases.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Logical field name used by consumers.
    pub name: &'static str,
    /// Ordered alias paths, canonical layout first.
    pub aliases: &'static [&'static [&'static str]],
}

/// Validated mapping from logical field names to alias paths.
#[derive(Debug, Clone)]
pub struct SchemaMap {
    fields: BTreeMap<&'static str, FieldSpec>,
}

fn dig<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cursor = doc;
    for key in path {
        cursor = cursor.as_object()?.get(*key)?;
    }
    Some(cursor)
}

fn resolvable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty() && s != "null",
        _ => true,
    }
}

impl SchemaMap {
    /// Registers a schema, validating every declaration up front.
    pub fn new(specs: &[FieldSpec]) -> Result<Self, WceError> {
        let mut fields = BTreeMap::new();
        for spec in specs {
            if spec.name.is_empty() {
                return Err(schema_error("schema-empty-name", "field name must be non-empty"));
            }
            if spec.aliases.is_empty() {
                return Err(schema_error(
                    "schema-no-aliases",
                    format!("field `{}` declares no alias paths", spec.name),
                ));
            }
            for path in spec.aliases {
                if path.is_empty() || path.iter().any(|seg| seg.is_empty()) {
                    return Err(schema_error(
                        "schema-bad-path",
                        format!("field `{}` declares an empty alias path segment", spec.name),
                    ));
                }
            }
            if fields.insert(spec.name, *spec).is_some() {
                return Err(schema_error(
                    "schema-duplicate",
                    format!("field `{}` declared twice", spec.name),
                ));
            }
        }
        Ok(Self { fields })
    }

    /// Resolves a logical field against a document; `None` when no alias hits.
    pub fn resolve<'a>(&self, doc: &'a Value, name: &str) -> Result<Option<&'a Value>, WceError> {
        let spec = self.fields.get(name).ok_or_else(|| {
            schema_error("schema-unknown-field", format!("logical field `{name}` not registered"))
        })?;
        for path in spec.aliases {
            if let Some(value) = dig(doc, path) {
                if resolvable(value) {
                    return Ok(Some(value));
                }
            }
        }
        Ok(None)
    }

    /// Resolves a required logical field, failing loudly when absent.
    pub fn require<'a>(&self, doc: &'a Value, name: &str) -> Result<&'a Value, WceError> {
        self.resolve(doc, name)?.ok_or_else(|| {
            WceError::Input(
                ErrorInfo::new(
                    "missing-bound",
                    format!("required quantity `{name}` resolvable under no declared alias"),
                )
                .with_context("field", name),
            )
        })
    }
}
