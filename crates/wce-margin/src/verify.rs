//! Depth-limited DFS bisection over the verification domain.

use serde::{Deserialize, Serialize};
use wce_core::ctx::NumCtx;
use wce_core::errors::{ErrorInfo, WceError};

use crate::tails::{delta_lo, MarginInputs};

fn verify_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

fn default_mesh_initial() -> usize {
    128
}

fn default_mesh_max() -> usize {
    131072
}

fn default_depth_max() -> u32 {
    48
}

/// Mesh and budget parameters for the margin verifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginOpts {
    /// Margin level the lower bound must reach everywhere.
    pub delta_target: f64,
    /// Initial uniform mesh interval count.
    #[serde(default = "default_mesh_initial")]
    pub mesh_initial: usize,
    /// Total processed-interval budget.
    #[serde(default = "default_mesh_max")]
    pub mesh_max: usize,
    /// Per-piece bisection depth limit.
    #[serde(default = "default_depth_max")]
    pub depth_max: u32,
}

impl Default for MarginOpts {
    fn default() -> Self {
        Self {
            delta_target: 0.0,
            mesh_initial: default_mesh_initial(),
            mesh_max: default_mesh_max(),
            depth_max: default_depth_max(),
        }
    }
}

/// How the witness window was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WitnessKind {
    /// Unresolved piece left over when a budget or depth limit was hit.
    Unresolved,
    /// Symmetric diagnostic window around the argmin of a PASS run.
    ArgminDegenerate,
}

/// Concrete witness region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WitnessSpan {
    /// Left endpoint of the witness window.
    pub t_left: f64,
    /// Right endpoint of the witness window.
    pub t_right: f64,
    /// Bisection depth at which the witness was recorded.
    pub depth: u32,
    /// Provenance of the window.
    pub kind: WitnessKind,
}

/// Outcome of a margin verification run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginVerdict {
    /// True iff every sub-interval certified within budget.
    pub pass: bool,
    /// Global minimum margin sample observed.
    pub delta_min: f64,
    /// Sample point attaining the observed minimum.
    pub argmin_t: f64,
    /// Sub-intervals processed.
    pub intervals: usize,
    /// Deepest bisection level reached.
    pub max_depth: u32,
    /// Witness window, always present (diagnostic on PASS).
    pub witness: WitnessSpan,
}

fn degenerate_witness(argmin_t: f64) -> WitnessSpan {
    let pad = (argmin_t.abs() * 1e-9).max(64.0 * f64::EPSILON);
    WitnessSpan {
        t_left: argmin_t - pad,
        t_right: argmin_t + pad,
        depth: 0,
        kind: WitnessKind::ArgminDegenerate,
    }
}

/// Certifies `delta_lo(T) >= delta_target` for all `T` in `[t0, t1]`.
///
/// Each sub-interval is sampled at its left endpoint only, which is sound
/// because every subtracted term of the margin function is strictly
/// decreasing in `T` (documented precondition on [`MarginInputs`]). Pieces
/// failing the target bisect until the depth limit or the total budget is
/// exhausted, at which point the unresolved piece is returned as witness:
/// running out of budget is a conservative FAIL, never a false PASS.
pub fn verify_margin(
    t0: f64,
    t1: f64,
    inputs: &MarginInputs,
    opts: &MarginOpts,
    ctx: &NumCtx,
) -> Result<MarginVerdict, WceError> {
    if !(t0.is_finite() && t1.is_finite()) || t0 <= 0.0 {
        return Err(verify_error(
            "margin-domain",
            format!("margin domain requires finite 0 < T0 < T1, got [{t0}, {t1}]"),
        ));
    }
    // Respect declared tail domains by clamping the left endpoint up.
    let t0 = inputs
        .tails
        .iter()
        .filter_map(|tail| tail.t_min)
        .fold(t0, f64::max);
    if t0 >= t1 {
        return Err(verify_error(
            "margin-domain",
            format!("margin domain empty after tail clamp: [{t0}, {t1}]"),
        ));
    }
    if opts.mesh_initial == 0 {
        return Err(verify_error("margin-mesh", "mesh_initial must be at least 1"));
    }

    let n = opts.mesh_initial;
    let step = (t1 - t0) / n as f64;
    let mut stack: Vec<(f64, f64, u32)> = Vec::with_capacity(n);
    // Seed in reverse so the leftmost piece is processed first and an
    // exhaustion witness lands on the leftmost failing region.
    for i in (0..n).rev() {
        let a = t0 + step * i as f64;
        let b = if i + 1 == n { t1 } else { t0 + step * (i + 1) as f64 };
        stack.push((a, b, 0));
    }

    let mut total = 0usize;
    let mut max_depth = 0u32;
    let mut delta_min = f64::INFINITY;
    let mut argmin_t = t0;

    while let Some((a, b, depth)) = stack.pop() {
        if total >= opts.mesh_max {
            return Ok(MarginVerdict {
                pass: false,
                delta_min,
                argmin_t,
                intervals: total,
                max_depth,
                witness: WitnessSpan {
                    t_left: a,
                    t_right: b,
                    depth,
                    kind: WitnessKind::Unresolved,
                },
            });
        }
        let sample = delta_lo(a, inputs, ctx)?;
        total += 1;
        max_depth = max_depth.max(depth);
        if sample < delta_min {
            delta_min = sample;
            argmin_t = a;
        }
        if sample >= opts.delta_target {
            continue;
        }
        if depth >= opts.depth_max {
            return Ok(MarginVerdict {
                pass: false,
                delta_min,
                argmin_t,
                intervals: total,
                max_depth,
                witness: WitnessSpan {
                    t_left: a,
                    t_right: b,
                    depth,
                    kind: WitnessKind::Unresolved,
                },
            });
        }
        let mid = a + (b - a) / 2.0;
        stack.push((mid, b, depth + 1));
        stack.push((a, mid, depth + 1));
    }

    Ok(MarginVerdict {
        pass: true,
        delta_min,
        argmin_t,
        intervals: total,
        max_depth,
        witness: degenerate_witness(argmin_t),
    })
}
