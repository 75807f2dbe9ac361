//! Uniform certificate assembly.

use serde::{Deserialize, Serialize};
use wce_cert::hash::content_hash;
use wce_cert::meta::Meta;
use wce_core::ctx::NumCtx;
use wce_core::errors::WceError;

use crate::algebra::combine;
use crate::ingest::{extract_bounds, RollupDocs};

const TOOL: &str = "uniform_rollup";

/// Input echo block of the uniform certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformInputs {
    /// Target cutoff height T0, echoed verbatim.
    #[serde(rename = "T0")]
    pub t0: String,
    /// Whether a grid error certificate was supplied.
    pub grid_error_present: bool,
    /// Whether a PSD certificate was supplied.
    pub psd_present: bool,
}

/// Result block of the uniform certificate, all exact decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformBlock {
    /// Proven lower bound on the spectral band margin.
    pub band_margin: String,
    /// Upper bound on the gamma tail envelope at T0.
    #[serde(rename = "gamma_env_at_T0")]
    pub gamma_env_at_t0: String,
    /// Effective margin `band_margin - gamma_env_at_T0`.
    pub epsilon_eff: String,
    /// Upper bound on the prime block operator norm.
    pub prime_block_cap: String,
    /// Upper bound on the prime tail contribution.
    pub prime_tail_norm: String,
    /// Upper bound on the quadrature/grid error.
    pub grid_error_norm: String,
    /// Total additive cost `prime_block_cap + prime_tail_norm + grid_error_norm`.
    pub lhs_total: String,
    /// PSD verdict carried through from the kernel certificate.
    #[serde(rename = "PSD_verified")]
    pub psd_verified: bool,
}

/// Terminal hash-stamped certificate issuing the final verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformReport {
    /// Artifact kind tag.
    pub kind: String,
    /// Input echo block.
    pub inputs: UniformInputs,
    /// Composed quantities.
    pub uniform_certificate: UniformBlock,
    /// PASS iff `PSD_verified` and `lhs_total <= epsilon_eff`.
    #[serde(rename = "PASS")]
    pub pass: bool,
    /// Tool identity, precision, creation time, content hash.
    pub meta: Meta,
}

/// Ingests the upstream certificates, composes the final inequality, and
/// seals the uniform certificate.
pub fn rollup(docs: &RollupDocs<'_>, t0: &str, ctx: &NumCtx) -> Result<UniformReport, WceError> {
    let bounds = extract_bounds(docs)?;
    let result = combine(&bounds)?;

    let mut report = UniformReport {
        kind: "uniform_certificate".to_string(),
        inputs: UniformInputs {
            t0: t0.to_string(),
            grid_error_present: docs.grid.is_some(),
            psd_present: docs.psd.is_some(),
        },
        uniform_certificate: UniformBlock {
            band_margin: bounds.band_margin.to_string(),
            gamma_env_at_t0: bounds.gamma_env_at_t0.to_string(),
            epsilon_eff: result.epsilon_eff.to_string(),
            prime_block_cap: bounds.prime_block_cap.to_string(),
            prime_tail_norm: bounds.prime_tail_norm.to_string(),
            grid_error_norm: bounds.grid_error_norm.to_string(),
            lhs_total: result.lhs_total.to_string(),
            psd_verified: bounds.psd_verified,
        },
        pass: result.pass,
        meta: Meta::new(TOOL, ctx),
    };
    report.meta.sha256 = Some(content_hash(&report)?);
    Ok(report)
}
