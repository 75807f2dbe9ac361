//! Worker-pool sweep execution and the failure ledger.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use wce_cert::hash::{content_hash, stable_hash_string};
use wce_cert::meta::Meta;
use wce_core::ctx::NumCtx;
use wce_core::errors::{ErrorInfo, WceError};

use crate::grid::expand_points;
use crate::pipeline::{run_point, PointOutcome};
use crate::report::{BestPoint, PointReport, SweepPlan, SweepReport};

const TOOL: &str = "param_sweep";

fn default_concurrency() -> usize {
    1
}

/// Options governing sweep execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepOpts {
    /// Number of points certified in parallel.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for SweepOpts {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

/// One isolated per-point failure recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFailure {
    /// Point index within the expanded strategy.
    pub index: usize,
    /// Gaussian width parameter of the failing point.
    pub sigma: f64,
    /// Notch parameter of the failing point.
    pub k0: f64,
    /// Stable error code of the failing stage (`deadline`, `missing-bound`, ...).
    pub stage: String,
    /// Full diagnostic message.
    pub error: String,
}

/// Executes a sweep plan on a worker pool.
///
/// Points are mutually independent; each runs its own certification pipeline
/// and aggregates write-once keyed by point index. A timeout or any other
/// per-point error lands in the failure ledger and never aborts the sweep.
pub fn run_sweep(
    plan: &SweepPlan,
    opts: &SweepOpts,
    ctx: &NumCtx,
) -> Result<SweepReport, WceError> {
    let plan_hash = stable_hash_string(plan)?;
    let points = expand_points(&plan.strategy, plan.seed)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.concurrency.max(1))
        .build()
        .map_err(|err| WceError::Pool(ErrorInfo::new("thread_pool", err.to_string())))?;

    let outcomes: Vec<(usize, Result<PointOutcome, WceError>)> = pool.install(|| {
        points
            .par_iter()
            .enumerate()
            .map(|(index, point)| (index, run_point(point, &plan.point, ctx)))
            .collect()
    });

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    let mut best: Option<(usize, BigDecimal, bool)> = None;
    for (index, outcome) in outcomes {
        let point = points[index];
        match outcome {
            Ok(PointOutcome { report, gap, pass }) => {
                let gap_value = BigDecimal::from_str(&gap).map_err(|err| {
                    WceError::Serde(ErrorInfo::new("decimal-parse", err.to_string()))
                })?;
                let better = match &best {
                    Some((_, best_gap, _)) => gap_value > *best_gap,
                    None => true,
                };
                if better {
                    best = Some((index, gap_value.clone(), pass));
                }
                reports.push(PointReport {
                    index,
                    sigma: ctx.dec(point.sigma),
                    k0: ctx.dec(point.k0),
                    lhs_total: report.uniform_certificate.lhs_total.clone(),
                    epsilon_eff: report.uniform_certificate.epsilon_eff.clone(),
                    gap,
                    pass,
                    cert_sha256: report.meta.sha256.clone().unwrap_or_default(),
                });
            }
            Err(err) => {
                failures.push(PointFailure {
                    index,
                    sigma: point.sigma,
                    k0: point.k0,
                    stage: err.info().code.clone(),
                    error: err.to_string(),
                });
            }
        }
    }
    reports.sort_by_key(|report| report.index);
    failures.sort_by_key(|failure| failure.index);

    let best = best.map(|(index, gap, pass)| BestPoint {
        index,
        sigma: ctx.dec(points[index].sigma),
        k0: ctx.dec(points[index].k0),
        gap: gap.to_string(),
        pass,
    });

    let mut report = SweepReport {
        kind: TOOL.to_string(),
        plan_hash,
        points: reports,
        failures,
        best,
        meta: Meta::new(TOOL, ctx),
    };
    report.meta.sha256 = Some(content_hash(&report)?);
    Ok(report)
}
