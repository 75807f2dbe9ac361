//! Shared certificate metadata block.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use wce_core::ctx::NumCtx;

/// Returns the current UTC time in second-resolution ISO-8601 form.
pub fn utc_now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Metadata block attached to every certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Identity of the emitting tool.
    pub tool: String,
    /// Decimal digits recorded for the run's numeric context.
    pub digits: u32,
    /// Creation time, ISO-8601 UTC.
    pub created_utc: String,
    /// Content hash over the canonical serialization with this field blanked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl Meta {
    /// Creates an unsealed metadata block stamped with the current time.
    pub fn new(tool: impl Into<String>, ctx: &NumCtx) -> Self {
        Self {
            tool: tool.into(),
            digits: ctx.digits,
            created_utc: utc_now_iso(),
            sha256: None,
        }
    }
}
