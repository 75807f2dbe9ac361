//! Plain and pivoted Cholesky factorizations.

use serde::{Deserialize, Serialize};

use crate::gram::GramMatrix;

fn default_tol() -> f64 {
    1e-12
}

/// Tolerance separating numerical noise from genuine negative directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CholOpts {
    /// Pivots below `-tol` fail the certificate; pivots in `[-tol, 0]` are
    /// treated as rank deficiency.
    #[serde(default = "default_tol")]
    pub tol: f64,
}

impl Default for CholOpts {
    fn default() -> Self {
        Self { tol: default_tol() }
    }
}

/// Outcome of the direct factorization attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlainOutcome {
    /// True when every diagonal residual stayed above tolerance.
    pub success: bool,
    /// Smallest diagonal entry of the factor (meaningful on success).
    pub min_diag_l: f64,
}

/// Outcome of the pivoted fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotOutcome {
    /// False only when a pivot fell below `-tol`.
    pub success: bool,
    /// Minimal pivot encountered; on success with rank deficiency this is
    /// the near-zero residual that terminated elimination, on failure the
    /// raw negative residual.
    pub min_pivot: f64,
    /// Achieved numerical rank.
    pub rank: usize,
    /// Original index of the offending atom when the factorization failed.
    pub failed_index: Option<usize>,
}

/// Direct Cholesky attempt.
///
/// Fails as soon as a diagonal residual drops to tolerance, so exact rank
/// deficiency cannot pass as a full-rank claim through floating-point noise.
pub fn plain_cholesky(gram: &GramMatrix, opts: &CholOpts) -> PlainOutcome {
    let n = gram.n();
    let mut factor = vec![0.0f64; n * n];
    let mut min_diag = f64::INFINITY;
    for k in 0..n {
        let mut residual = gram.get(k, k);
        for j in 0..k {
            residual -= factor[k * n + j] * factor[k * n + j];
        }
        if residual <= opts.tol {
            return PlainOutcome {
                success: false,
                min_diag_l: 0.0,
            };
        }
        let pivot = residual.sqrt();
        factor[k * n + k] = pivot;
        min_diag = min_diag.min(pivot);
        for i in (k + 1)..n {
            let mut entry = gram.get(i, k);
            for j in 0..k {
                entry -= factor[i * n + j] * factor[k * n + j];
            }
            factor[i * n + k] = entry / pivot;
        }
    }
    PlainOutcome {
        success: true,
        min_diag_l: min_diag,
    }
}

/// Pivoted Cholesky, tracking minimal pivot and achieved rank.
pub fn pivoted_cholesky(gram: &GramMatrix, opts: &CholOpts) -> PivotOutcome {
    let n = gram.n();
    let mut work = vec![0.0f64; n * n];
    for i in 0..n {
        for j in 0..n {
            work[i * n + j] = gram.get(i, j);
        }
    }
    let mut diag: Vec<f64> = (0..n).map(|i| gram.get(i, i)).collect();
    let mut order: Vec<usize> = (0..n).collect();
    let mut factor = vec![0.0f64; n * n];
    let mut min_pivot = f64::INFINITY;
    let mut rank = 0usize;

    for k in 0..n {
        let mut p = k;
        for i in (k + 1)..n {
            if diag[i] > diag[p] {
                p = i;
            }
        }
        if diag[p] < -opts.tol {
            return PivotOutcome {
                success: false,
                min_pivot: diag[p],
                rank,
                failed_index: Some(order[p]),
            };
        }
        if diag[p] <= opts.tol {
            // Residual mass is numerical noise: rank deficiency, and the
            // terminating residual is the honest minimal pivot.
            let terminal = diag[p].max(0.0).sqrt();
            if terminal < min_pivot {
                min_pivot = terminal;
            }
            break;
        }

        if p != k {
            diag.swap(p, k);
            order.swap(p, k);
            for t in 0..n {
                work.swap(k * n + t, p * n + t);
            }
            for t in 0..n {
                work.swap(t * n + k, t * n + p);
            }
            for t in 0..n {
                factor.swap(k * n + t, p * n + t);
            }
        }

        let pivot = diag[k].sqrt();
        factor[k * n + k] = pivot;
        min_pivot = min_pivot.min(pivot);
        rank += 1;

        for i in (k + 1)..n {
            let lik = if pivot != 0.0 {
                work[i * n + k] / pivot
            } else {
                0.0
            };
            factor[i * n + k] = lik;
            diag[i] -= lik * lik;
            for j in (k + 1)..=i {
                let updated = work[i * n + j] - lik * factor[j * n + k];
                work[i * n + j] = updated;
                work[j * n + i] = updated;
            }
        }
    }

    PivotOutcome {
        success: true,
        min_pivot: if min_pivot.is_finite() { min_pivot } else { 0.0 },
        rank,
        failed_index: None,
    }
}
