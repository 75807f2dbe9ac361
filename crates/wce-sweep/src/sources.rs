//! External-collaborator interfaces brought in-process.
//!
//! The certification pipeline consumes four upstream sources: shape
//! parameters, a band plan, analytic tail constants, and a grid error bound.
//! Each source validates its inputs and returns outward-rounded upper faces
//! where the quantity feeds a subtraction or cost sum.

use serde::{Deserialize, Serialize};
use wce_core::ctx::NumCtx;
use wce_core::enclose::Enclosure;
use wce_core::errors::{ErrorInfo, WceError};
use wce_core::types::Interval;

fn source_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

/// Band plan source: ordered labeled sub-intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BandPlanSpec {
    /// Uniform split of `[left, right]` into `count` labeled bands.
    Uniform {
        /// Left endpoint of the banded domain.
        left: f64,
        /// Right endpoint of the banded domain.
        right: f64,
        /// Number of bands.
        count: usize,
    },
    /// Explicit band list.
    Explicit {
        /// Ordered labeled bands.
        bands: Vec<Interval>,
    },
}

/// Materializes a band plan.
pub fn band_plan(spec: &BandPlanSpec) -> Result<Vec<Interval>, WceError> {
    match spec {
        BandPlanSpec::Uniform { left, right, count } => {
            if *count == 0 {
                return Err(source_error("bands-count", "uniform band plan requires count >= 1"));
            }
            if !(left.is_finite() && right.is_finite()) || left >= right {
                return Err(source_error(
                    "bands-domain",
                    format!("uniform band plan requires left < right, got [{left}, {right}]"),
                ));
            }
            let step = (right - left) / *count as f64;
            (0..*count)
                .map(|i| {
                    let a = left + step * i as f64;
                    let b = if i + 1 == *count { *right } else { left + step * (i + 1) as f64 };
                    Interval::new(a, b, format!("band_{i}"))
                })
                .collect()
        }
        BandPlanSpec::Explicit { bands } => {
            if bands.is_empty() {
                return Err(source_error("bands-empty", "explicit band plan has no bands"));
            }
            for band in bands {
                // Re-validate: the plan may have been deserialized.
                Interval::new(band.left, band.right, band.label.clone())?;
            }
            Ok(bands.clone())
        }
    }
}

/// Upper bound on the gamma tail envelope at T0:
/// `exp(-(sigma*k0*T0)^2 / 2) / (1 + sigma*k0*T0)`.
pub fn gamma_env_at(sigma: f64, k0: f64, t0: f64, ctx: &NumCtx) -> Result<f64, WceError> {
    if !(t0.is_finite() && t0 > 0.0) {
        return Err(source_error("gamma-t0", format!("T0 must be > 0, got {t0}")));
    }
    let x = Enclosure::point(sigma)
        .mul(Enclosure::point(k0))
        .mul(Enclosure::point(t0));
    let numerator = x.sqr().mul(Enclosure::point(0.5)).neg().exp(ctx);
    let denominator = Enclosure::point(1.0).add(x);
    Ok(numerator.div(denominator)?.hi())
}

/// Upper bound on the prime tail envelope at T0:
/// `A_prime * exp(-(sigma*k0*T0)^2 / 4) / (1 + K)`.
pub fn prime_tail_env_at(
    sigma: f64,
    k0: f64,
    t0: f64,
    a_prime: f64,
    k: u32,
    ctx: &NumCtx,
) -> Result<f64, WceError> {
    if !(t0.is_finite() && t0 > 0.0) {
        return Err(source_error("prime-t0", format!("T0 must be > 0, got {t0}")));
    }
    if !(a_prime.is_finite() && a_prime > 0.0) {
        return Err(source_error("prime-a", format!("A_prime must be > 0, got {a_prime}")));
    }
    let x = Enclosure::point(sigma)
        .mul(Enclosure::point(k0))
        .mul(Enclosure::point(t0));
    let base = x.sqr().mul(Enclosure::point(0.25)).neg().exp(ctx);
    let env = Enclosure::point(a_prime)
        .mul(base)
        .div(Enclosure::point(1.0).add(Enclosure::point(f64::from(k))))?;
    Ok(env.hi())
}

/// Upper bound on the prime tail constant: `2 (K + 1) A_prime`, optionally
/// scaled by `1 / ln(x0)`.
pub fn prime_tail_cap(
    a_prime: f64,
    k: u32,
    x0: f64,
    scale_by_log: bool,
    ctx: &NumCtx,
) -> Result<f64, WceError> {
    if !(a_prime.is_finite() && a_prime > 0.0) {
        return Err(source_error("prime-a", format!("A_prime must be > 0, got {a_prime}")));
    }
    let mut cap = Enclosure::point(2.0)
        .mul(Enclosure::point(f64::from(k) + 1.0))
        .mul(Enclosure::point(a_prime));
    if scale_by_log {
        if x0 <= 1.0 {
            return Err(source_error("prime-x0", format!("x0 must be > 1 to scale by log, got {x0}")));
        }
        cap = cap.div(Enclosure::point(x0).ln(ctx)?)?;
    }
    Ok(cap.hi())
}

/// Upper bound on the trapezoid grid error over `[left, right]` with
/// `grid_points` nodes and `|f''| <= m2_hi`.
pub fn grid_error_hi(left: f64, right: f64, grid_points: usize, m2_hi: f64) -> Result<f64, WceError> {
    if grid_points < 2 {
        return Err(source_error(
            "grid-points",
            format!("grid_points must be >= 2, got {grid_points}"),
        ));
    }
    if right <= left {
        return Err(source_error(
            "grid-domain",
            format!("grid error bound requires left < right, got [{left}, {right}]"),
        ));
    }
    let segments = (grid_points - 1) as f64;
    let width = Enclosure::point(right).sub(Enclosure::point(left));
    let bound = width
        .mul(Enclosure::point(m2_hi))
        .div(Enclosure::point(12.0).mul(Enclosure::point(segments).sqr()))?;
    Ok(bound.hi())
}
