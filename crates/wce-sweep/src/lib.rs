#![deny(missing_docs)]
#![doc = "In-process parameter sweep: shape and band sources, analytic tail-constant sources, and per-point certification pipelines on a worker pool with a failure ledger."]

/// Worker-pool sweep execution and the failure ledger.
pub mod dispatch;
/// Shape point strategies (grid and Latin hypercube).
pub mod grid;
/// Per-point certification pipeline.
pub mod pipeline;
/// Sweep report assembly.
pub mod report;
/// External-collaborator interfaces brought in-process.
pub mod sources;

pub use dispatch::{run_sweep, PointFailure, SweepOpts};
pub use grid::{expand_points, AxisSpec, RangeSpec, ShapePoint, SweepStrategy};
pub use pipeline::{run_point, PointOpts, PointOutcome};
pub use report::{BestPoint, PointReport, SweepPlan, SweepReport};
pub use sources::{
    band_plan, gamma_env_at, grid_error_hi, prime_tail_cap, prime_tail_env_at, BandPlanSpec,
};
