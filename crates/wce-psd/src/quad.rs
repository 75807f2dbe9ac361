//! Compensated quadrature primitives.

use serde::{Deserialize, Serialize};
use wce_core::errors::{ErrorInfo, WceError};

fn quad_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

/// Result of a compensated trapezoid pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadResult {
    /// Integral estimate.
    pub value: f64,
    /// Magnitude of the final Kahan compensation term (summation residual).
    pub comp_residual: f64,
}

/// Streaming trapezoid rule over `[a, b]` with Kahan-compensated summation.
pub fn kahan_trapezoid<F>(f: F, a: f64, b: f64, nodes: usize) -> Result<QuadResult, WceError>
where
    F: Fn(f64) -> f64,
{
    if nodes < 2 {
        return Err(quad_error("quad-nodes", format!("nodes must be >= 2, got {nodes}")));
    }
    let h = (b - a) / (nodes - 1) as f64;
    let mut sum = 0.0f64;
    let mut comp = 0.0f64;
    for k in 1..nodes - 1 {
        let x = a + h * k as f64;
        let y = f(x) - comp;
        let t = sum + y;
        comp = (t - sum) - y;
        sum = t;
    }
    let sum = sum + 0.5 * (f(a) + f(b));
    Ok(QuadResult {
        value: h * sum,
        comp_residual: comp.abs(),
    })
}

/// A-priori trapezoid error bound `width * M2 / (12 N^2)` for an integrand
/// with `|f''| <= M2`, rounded outward upward.
pub fn trapezoid_error_bound(width: f64, m2_hi: f64, nodes: usize) -> Result<f64, WceError> {
    if nodes < 2 {
        return Err(quad_error("quad-nodes", format!("nodes must be >= 2, got {nodes}")));
    }
    let segments = (nodes - 1) as f64;
    let bound = (width * m2_hi) / (12.0 * segments * segments);
    Ok(bound.next_up())
}
