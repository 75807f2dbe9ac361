#![deny(missing_docs)]
#![doc = "Interval bound oracle for the Gaussian-notch window and the priority-queue adaptive subdivision search certifying positive band margins."]

/// Priority-queue adaptive subdivision search.
pub mod refine;
/// Band certificate assembly.
pub mod report;
/// Gaussian-notch window model and its interval extension.
pub mod window;

pub use refine::{refine_min_abs, MinBounds, RefineOpts, RunBudget};
pub use report::{certify_bands, BandBound, BandInputs, BandNumbers, BandReport};
pub use window::Window;
