//! Per-point certification pipeline.
//!
//! Runs the full in-process chain for one shape point: window construction,
//! band plan, band certification, analytic tail constants, and the terminal
//! rollup. Intermediate certificates flow as serialized documents so the
//! rollup exercises the same tolerant ingestion as externally-produced
//! artifacts.

use std::time::{Duration, Instant};

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use wce_band::refine::{RefineOpts, RunBudget};
use wce_band::report::certify_bands;
use wce_band::window::Window;
use wce_core::ctx::NumCtx;
use wce_core::errors::{ErrorInfo, WceError};
use wce_rollup::ingest::RollupDocs;
use wce_rollup::report::{rollup, UniformReport};

use crate::grid::ShapePoint;
use crate::sources::{band_plan, gamma_env_at, grid_error_hi, prime_tail_env_at, BandPlanSpec};

fn default_t0() -> f64 {
    1e9
}

fn default_a_prime() -> f64 {
    1.2762
}

fn default_tail_k() -> u32 {
    3
}

fn default_prime_block_cap() -> f64 {
    0.0
}

fn default_grid_points() -> usize {
    6000
}

fn default_m2_hi() -> f64 {
    1e-3
}

/// Parameters of the per-point pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOpts {
    /// Band plan source.
    pub bands: BandPlanSpec,
    /// Subdivision parameters for band certification.
    #[serde(default)]
    pub refine: RefineOpts,
    /// Cutoff height for the tail envelopes.
    #[serde(default = "default_t0")]
    pub t0: f64,
    /// Prime-sum coefficient.
    #[serde(default = "default_a_prime")]
    pub a_prime: f64,
    /// Auxiliary index of the prime tail model.
    #[serde(default = "default_tail_k")]
    pub tail_k: u32,
    /// Supplied upper bound on the prime block operator norm. The cap is
    /// zeros-driven upstream, so the sweep echoes it rather than deriving it.
    #[serde(default = "default_prime_block_cap")]
    pub prime_block_cap: f64,
    /// Grid points of the quadrature error model.
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,
    /// Second-derivative cap of the quadrature error model.
    #[serde(default = "default_m2_hi")]
    pub m2_hi: f64,
    /// Cooperative per-point deadline in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

/// Outcome of one certified point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOutcome {
    /// Terminal uniform certificate.
    pub report: UniformReport,
    /// Exact margin gap `epsilon_eff - lhs_total`.
    pub gap: String,
    /// Verdict mirrored from the certificate.
    pub pass: bool,
}

fn expired(budget: &RunBudget) -> Result<(), WceError> {
    if budget.expired() {
        return Err(WceError::Pool(ErrorInfo::new(
            "deadline",
            "per-point pipeline hit its cooperative deadline",
        )));
    }
    Ok(())
}

/// Runs the full certification pipeline for one shape point.
pub fn run_point(
    point: &ShapePoint,
    opts: &PointOpts,
    ctx: &NumCtx,
) -> Result<PointOutcome, WceError> {
    let budget = RunBudget {
        deadline: opts
            .deadline_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms)),
    };

    if !opts.prime_block_cap.is_finite() || opts.prime_block_cap < 0.0 {
        return Err(WceError::Input(ErrorInfo::new(
            "prime-block-cap",
            format!("prime block cap must be >= 0, got {}", opts.prime_block_cap),
        )));
    }
    let window = Window::gauss_notch(point.sigma, point.k0)?;
    let bands = band_plan(&opts.bands)?;
    let band_report = certify_bands(&window, &bands, &opts.refine, &budget, ctx)?;
    expired(&budget)?;

    let gamma_env = gamma_env_at(point.sigma, point.k0, opts.t0, ctx)?;
    let prime_tail =
        prime_tail_env_at(point.sigma, point.k0, opts.t0, opts.a_prime, opts.tail_k, ctx)?;
    let (domain_left, domain_right) = match (bands.first(), bands.last()) {
        (Some(first), Some(last)) => (first.left, last.right),
        _ => unreachable!("band plan is validated non-empty"),
    };
    let grid_err = grid_error_hi(domain_left, domain_right, opts.grid_points, opts.m2_hi)?;
    expired(&budget)?;

    // Chain through serialized documents: the band certificate's result
    // fields become the rollup's inputs.
    let band_doc = serde_json::to_value(&band_report)
        .map_err(|err| WceError::Serde(ErrorInfo::new("json-encode", err.to_string())))?;
    let prime_block_doc = json!({ "used_operator_norm": ctx.dec(opts.prime_block_cap) });
    let prime_tail_doc = json!({ "prime_tail": { "env_T0_hi": ctx.dec(prime_tail) } });
    let gamma_doc = json!({ "gamma_tails": { "gamma_env_at_T0": ctx.dec(gamma_env) } });
    let grid_doc = json!({ "grid_error_bound": { "bound_hi": ctx.dec(grid_err) } });

    let report = rollup(
        &RollupDocs {
            band: &band_doc,
            prime_block: &prime_block_doc,
            prime_tail: &prime_tail_doc,
            gamma: &gamma_doc,
            grid: Some(&grid_doc),
            psd: None,
        },
        &ctx.dec(opts.t0),
        ctx,
    )?;

    let epsilon_eff = parse_exact(&report.uniform_certificate.epsilon_eff)?;
    let lhs_total = parse_exact(&report.uniform_certificate.lhs_total)?;
    let gap = (&epsilon_eff - &lhs_total).to_string();
    let pass = report.pass;
    Ok(PointOutcome { report, gap, pass })
}

fn parse_exact(text: &str) -> Result<BigDecimal, WceError> {
    BigDecimal::from_str(text).map_err(|err| {
        WceError::Serde(ErrorInfo::new(
            "decimal-parse",
            format!("certificate field `{text}` is not a decimal: {err}"),
        ))
    })
}
