//! Sweep report assembly.

use serde::{Deserialize, Serialize};

use wce_cert::meta::Meta;

use crate::dispatch::PointFailure;
use crate::grid::SweepStrategy;
use crate::pipeline::PointOpts;

/// Declarative sweep plan: strategy, master seed, and per-point parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Shape point strategy.
    pub strategy: SweepStrategy,
    /// Master deterministic seed.
    pub seed: u64,
    /// Per-point pipeline parameters.
    pub point: PointOpts,
}

/// Summary row for one certified point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointReport {
    /// Point index within the expanded strategy.
    pub index: usize,
    /// Gaussian width parameter.
    pub sigma: String,
    /// Notch parameter.
    pub k0: String,
    /// Total additive cost.
    pub lhs_total: String,
    /// Effective margin.
    pub epsilon_eff: String,
    /// Exact gap `epsilon_eff - lhs_total`.
    pub gap: String,
    /// Point verdict.
    pub pass: bool,
    /// Content hash of the point's uniform certificate.
    pub cert_sha256: String,
}

/// Best point observed across the sweep, by exact gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPoint {
    /// Index of the best point.
    pub index: usize,
    /// Gaussian width parameter.
    pub sigma: String,
    /// Notch parameter.
    pub k0: String,
    /// Exact gap at the best point.
    pub gap: String,
    /// Whether the best point passed.
    pub pass: bool,
}

/// Aggregate sweep report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Artifact kind tag.
    pub kind: String,
    /// Stable hash of the executed plan.
    pub plan_hash: String,
    /// Per-point summaries, ordered by point index.
    pub points: Vec<PointReport>,
    /// Failure ledger: isolated per-point failures, never fatal to the sweep.
    pub failures: Vec<PointFailure>,
    /// Best point by exact gap, when any point completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<BestPoint>,
    /// Tool identity, precision, creation time, content hash.
    pub meta: Meta,
}
