#![deny(missing_docs)]
#![doc = "Terminal rollup of independently-produced certificates: exact-decimal bound algebra, schema-tolerant ingestion, and the hash-stamped uniform certificate issuing the final PASS/FAIL verdict."]

/// Inequality composition over exact decimals.
pub mod algebra;
/// Direction-tagged bounds and their arithmetic.
pub mod bound;
/// Schema-tolerant extraction from upstream certificate documents.
pub mod ingest;
/// Uniform certificate assembly.
pub mod report;

pub use algebra::{combine, RollupBounds, RollupResult};
pub use bound::{Bound, BoundDir};
pub use ingest::{extract_bounds, tail_pair, RollupDocs};
pub use report::{rollup, UniformBlock, UniformInputs, UniformReport};
