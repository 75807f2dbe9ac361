#![deny(missing_docs)]
#![doc = "Adaptive margin verifier for half-line domains: certifies that a proven analytic lower-bound margin stays above a target using depth-limited bisection with failure witnesses."]

/// Rolling margin certificate assembly.
pub mod report;
/// Analytic tail terms and the directed margin sample.
pub mod tails;
/// Depth-limited DFS bisection over the domain.
pub mod verify;

pub use report::{margin_report, MarginBoundsEcho, MarginResult, RollingReport, TailEcho};
pub use tails::{delta_lo, MarginInputs, TailTerm};
pub use verify::{verify_margin, MarginOpts, MarginVerdict, WitnessKind, WitnessSpan};
