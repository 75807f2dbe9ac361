//! Rolling margin certificate assembly.

use serde::{Deserialize, Serialize};
use wce_cert::hash::content_hash;
use wce_cert::meta::Meta;
use wce_core::ctx::NumCtx;
use wce_core::errors::WceError;

use crate::tails::MarginInputs;
use crate::verify::{MarginOpts, MarginVerdict, WitnessKind};

const TOOL: &str = "rolling_margin";

/// Echo of one tail term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailEcho {
    /// Upper bound on the tail constant.
    pub c: String,
    /// Lower bound on the decay exponent.
    pub a: String,
}

/// Echo of the proven bounds the verifier consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginBoundsEcho {
    /// Proven lower bound on the effective margin.
    pub eps_eff_lo: String,
    /// Upper bound on the constant grid error term.
    pub grid_error_hi: String,
    /// Decaying tail terms.
    pub tails: Vec<TailEcho>,
}

/// Result block of the rolling certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginResult {
    /// Verdict.
    #[serde(rename = "PASS")]
    pub pass: bool,
    /// Global minimum margin sample observed.
    pub delta_min: String,
    /// Witness window left endpoint.
    pub t_left: String,
    /// Witness window right endpoint.
    pub t_right: String,
    /// Sample attaining the minimum.
    pub t_star: String,
    /// Margin at the minimizing sample.
    pub delta_at_t_star: String,
    /// Bisection depth of the witness.
    pub witness_depth: u32,
    /// Witness provenance tag.
    pub witness_mode: WitnessKind,
}

/// Mesh statistics block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshStats {
    /// Sub-intervals processed.
    pub intervals: usize,
    /// Deepest bisection level reached.
    pub max_depth: u32,
}

/// Input echo block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginInputsEcho {
    /// Left domain endpoint (after tail clamping).
    pub t0: String,
    /// Right domain endpoint.
    pub t1: String,
    /// Margin target.
    pub delta_target: String,
    /// Initial mesh interval count.
    pub mesh_initial: usize,
    /// Total processed-interval budget.
    pub mesh_max: usize,
    /// Per-piece depth limit.
    pub depth_max: u32,
}

/// Hash-stamped certificate for a rolling margin verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingReport {
    /// Artifact kind tag.
    pub kind: String,
    /// Input echo block.
    pub inputs: MarginInputsEcho,
    /// Proven bounds consumed.
    pub bounds: MarginBoundsEcho,
    /// Mesh statistics.
    pub mesh: MeshStats,
    /// Result block.
    pub result: MarginResult,
    /// Tool identity, precision, creation time, content hash.
    pub meta: Meta,
}

/// Assembles and seals the rolling margin certificate.
pub fn margin_report(
    t0: f64,
    t1: f64,
    inputs: &MarginInputs,
    opts: &MarginOpts,
    verdict: &MarginVerdict,
    ctx: &NumCtx,
) -> Result<RollingReport, WceError> {
    let mut report = RollingReport {
        kind: TOOL.to_string(),
        inputs: MarginInputsEcho {
            t0: ctx.dec(t0),
            t1: ctx.dec(t1),
            delta_target: ctx.dec(opts.delta_target),
            mesh_initial: opts.mesh_initial,
            mesh_max: opts.mesh_max,
            depth_max: opts.depth_max,
        },
        bounds: MarginBoundsEcho {
            eps_eff_lo: ctx.dec(inputs.eps_eff_lo),
            grid_error_hi: ctx.dec(inputs.grid_hi),
            tails: inputs
                .tails
                .iter()
                .map(|tail| TailEcho {
                    c: ctx.dec(tail.c_hi),
                    a: ctx.dec(tail.a_lo),
                })
                .collect(),
        },
        mesh: MeshStats {
            intervals: verdict.intervals,
            max_depth: verdict.max_depth,
        },
        result: MarginResult {
            pass: verdict.pass,
            delta_min: ctx.dec(verdict.delta_min),
            t_left: ctx.dec(verdict.witness.t_left),
            t_right: ctx.dec(verdict.witness.t_right),
            t_star: ctx.dec(verdict.argmin_t),
            delta_at_t_star: ctx.dec(verdict.delta_min),
            witness_depth: verdict.witness.depth,
            witness_mode: verdict.witness.kind,
        },
        meta: Meta::new(TOOL, ctx),
    };
    report.meta.sha256 = Some(content_hash(&report)?);
    Ok(report)
}
