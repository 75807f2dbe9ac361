//! PSD certificate assembly.

use serde::{Deserialize, Serialize};
use wce_cert::hash::content_hash;
use wce_cert::meta::Meta;
use wce_core::ctx::NumCtx;
use wce_core::errors::WceError;

use crate::atoms::make_atoms;
use crate::chol::{pivoted_cholesky, plain_cholesky, CholOpts};
use crate::gram::{build_gram, GramOpts};

const TOOL: &str = "subspace_psd_cholesky";

/// Full parameter set for a PSD certification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsdOpts {
    /// Number of basis atoms.
    pub atoms: usize,
    /// Minimum sigma of the atom grid.
    pub sigma_min: f64,
    /// Maximum sigma of the atom grid.
    pub sigma_max: f64,
    /// Minimum k0 of the atom grid.
    pub k0_min: f64,
    /// Maximum k0 of the atom grid.
    pub k0_max: f64,
    /// Quadrature and pool parameters.
    #[serde(default)]
    pub gram: GramOpts,
    /// Factorization tolerance.
    #[serde(default)]
    pub chol: CholOpts,
}

/// Input echo block of the PSD certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsdInputs {
    /// Basis family identifier.
    pub basis: String,
    /// Number of atoms.
    pub atoms: usize,
    /// Sigma range, decimal strings.
    pub sigma_min: String,
    /// Upper end of the sigma range.
    pub sigma_max: String,
    /// Lower end of the k0 range.
    pub k0_min: String,
    /// Upper end of the k0 range.
    pub k0_max: String,
    /// Integration half-width.
    pub grid_half_width: String,
    /// Trapezoid node count.
    pub nodes: usize,
    /// Diagonal jitter.
    pub eta: String,
    /// Worker threads used for the Gram build.
    pub threads: usize,
}

/// Result block of the PSD certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsdResult {
    /// Whether the direct factorization succeeded.
    pub chol_success: bool,
    /// Smallest factor diagonal when the direct attempt succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_diag_l: Option<String>,
    /// Whether the pivoted fallback succeeded.
    pub pivot_success: bool,
    /// Minimal pivot observed by the fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pivot: Option<String>,
    /// Original atom index of a failing pivot, when one occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_index: Option<usize>,
    /// Achieved numerical rank.
    pub rank: usize,
    /// Final PSD verdict.
    pub psd_certified: bool,
}

/// Hash-stamped PSD certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsdReport {
    /// Artifact kind tag.
    pub kind: String,
    /// Input echo block.
    pub inputs: PsdInputs,
    /// Result block.
    pub result: PsdResult,
    /// Verdict mirrored at top level for downstream consumers.
    #[serde(rename = "PSD_verified")]
    pub psd_verified: bool,
    /// Tool identity, precision, creation time, content hash.
    pub meta: Meta,
}

/// Builds the Gram matrix, factors it, and seals the PSD certificate.
///
/// The direct factorization runs first; on failure the pivoted fallback
/// decides. FAIL requires a pivot below `-tol` (a genuine negative
/// direction); pivots inside `[-tol, 0]` only reduce the reported rank.
pub fn certify_psd(opts: &PsdOpts, ctx: &NumCtx) -> Result<PsdReport, WceError> {
    let atoms = make_atoms(
        opts.atoms,
        opts.sigma_min,
        opts.sigma_max,
        opts.k0_min,
        opts.k0_max,
    )?;
    let gram = build_gram(&atoms, &opts.gram)?;
    let n = gram.n();

    let plain = plain_cholesky(&gram, &opts.chol);
    let (pivot_success, min_pivot, rank, pivot_index, certified) = if plain.success {
        (false, None, n, None, true)
    } else {
        let pivoted = pivoted_cholesky(&gram, &opts.chol);
        (
            pivoted.success,
            Some(pivoted.min_pivot),
            pivoted.rank,
            pivoted.failed_index,
            pivoted.success,
        )
    };

    let mut report = PsdReport {
        kind: TOOL.to_string(),
        inputs: PsdInputs {
            basis: "gaussian".to_string(),
            atoms: opts.atoms,
            sigma_min: ctx.dec(opts.sigma_min),
            sigma_max: ctx.dec(opts.sigma_max),
            k0_min: ctx.dec(opts.k0_min),
            k0_max: ctx.dec(opts.k0_max),
            grid_half_width: ctx.dec(opts.gram.grid_half_width),
            nodes: opts.gram.nodes,
            eta: ctx.dec(opts.gram.eta),
            threads: opts.gram.threads,
        },
        result: PsdResult {
            chol_success: plain.success,
            min_diag_l: plain.success.then(|| ctx.dec(plain.min_diag_l)),
            pivot_success,
            min_pivot: min_pivot.map(|p| ctx.dec(p)),
            pivot_index,
            rank,
            psd_certified: certified,
        },
        psd_verified: certified,
        meta: Meta::new(TOOL, ctx),
    };
    report.meta.sha256 = Some(content_hash(&report)?);
    Ok(report)
}
