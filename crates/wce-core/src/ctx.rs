//! Explicit numeric context threaded through every directed evaluation.
//!
//! There is deliberately no process-global precision setting: searches running
//! concurrently at different settings receive their own `NumCtx` value.

use serde::{Deserialize, Serialize};

fn default_digits() -> u32 {
    17
}

fn default_fn_slack_ulps() -> u32 {
    4
}

/// Numeric context for directed evaluation and decimal rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumCtx {
    /// Decimal digits recorded in certificate metadata. Rendering always emits
    /// the shortest round-trip string, so at least this many significant
    /// digits survive the boundary and no inward rounding can occur.
    #[serde(default = "default_digits")]
    pub digits: u32,
    /// Outward ulp slack applied after transcendental operations, whose
    /// library implementations are close to but not correctly rounded.
    #[serde(default = "default_fn_slack_ulps")]
    pub fn_slack_ulps: u32,
}

impl Default for NumCtx {
    fn default() -> Self {
        Self {
            digits: default_digits(),
            fn_slack_ulps: default_fn_slack_ulps(),
        }
    }
}

impl NumCtx {
    /// Renders a finite float as a decimal string that re-parses to the
    /// identical value (exact, hence trivially outward for either direction).
    pub fn dec(&self, x: f64) -> String {
        if x != 0.0 && (x.abs() < 1e-4 || x.abs() >= 1e17) {
            format!("{x:e}")
        } else {
            format!("{x}")
        }
    }
}
