#![deny(missing_docs)]
#![doc = "Shared numeric substrate for the WCE certification engine: structured errors, the explicit numeric context, directed-rounding enclosures, and labeled intervals."]

/// Explicit numeric context threaded through directed evaluation.
pub mod ctx;
/// Directed-rounding floating-point enclosures.
pub mod enclose;
/// Structured error types shared across WCE crates.
pub mod errors;
/// Labeled interval primitives.
pub mod types;

pub use ctx::NumCtx;
pub use enclose::Enclosure;
pub use errors::{ErrorInfo, WceError};
pub use types::Interval;
