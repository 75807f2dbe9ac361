#![deny(missing_docs)]
#![doc = "Positive-semi-definiteness certification: Gram matrices of Gaussian-notch basis atoms built by compensated quadrature on a worker pool, factored by plain and pivoted Cholesky."]

/// Basis atom families.
pub mod atoms;
/// Plain and pivoted Cholesky factorizations.
pub mod chol;
/// Parallel Gram matrix construction.
pub mod gram;
/// Compensated quadrature primitives.
pub mod quad;
/// PSD certificate assembly.
pub mod report;

pub use atoms::{atom_profile, make_atoms, Atom};
pub use chol::{pivoted_cholesky, plain_cholesky, CholOpts, PivotOutcome, PlainOutcome};
pub use gram::{build_gram, GramMatrix, GramOpts};
pub use quad::{kahan_trapezoid, trapezoid_error_bound, QuadResult};
pub use report::{certify_psd, PsdInputs, PsdOpts, PsdReport, PsdResult};
