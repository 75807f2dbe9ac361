//! Analytic tail terms and the directed margin sample.

use serde::{Deserialize, Serialize};
use wce_core::ctx::NumCtx;
use wce_core::enclose::Enclosure;
use wce_core::errors::{ErrorInfo, WceError};

fn tail_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

/// One decaying tail term `C / T^a`.
///
/// The constant carries its upper face and the exponent its lower face, the
/// worst case for the subtraction on domains with `T >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TailTerm {
    /// Upper bound on the tail constant.
    pub c_hi: f64,
    /// Lower bound on the decay exponent.
    pub a_lo: f64,
    /// Optional left cutoff below which the term's derivation is not valid;
    /// the verifier clamps its domain up to respect it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_min: Option<f64>,
}

/// Proven inputs of the margin function
/// `delta_lo(T) = eps_eff_lo - sum C_i/T^{a_i} - grid_hi`.
///
/// Precondition (supplied, not checked): every subtracted term is strictly
/// decreasing in `T` over the verification domain. The upstream analytic
/// tail constructions guarantee this; the verifier relies on it to sample
/// each sub-interval at its left endpoint only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginInputs {
    /// Proven lower bound on the effective margin.
    pub eps_eff_lo: f64,
    /// Upper bound on the constant grid/quadrature error term.
    pub grid_hi: f64,
    /// Decaying tail terms.
    pub tails: Vec<TailTerm>,
}

/// Directed evaluation of the margin lower bound at a single point.
///
/// Tail terms are evaluated on their upper face and the final subtraction on
/// its lower face, so the result is a proven lower bound on the margin.
pub fn delta_lo(t: f64, inputs: &MarginInputs, ctx: &NumCtx) -> Result<f64, WceError> {
    if !t.is_finite() || t <= 0.0 {
        return Err(tail_error("margin-point", format!("margin sample requires T > 0, got {t}")));
    }
    let mut acc = Enclosure::point(inputs.eps_eff_lo);
    for tail in &inputs.tails {
        let decay = Enclosure::point(t).powf(-tail.a_lo, ctx)?;
        acc = acc.sub(Enclosure::point(tail.c_hi).mul(decay));
    }
    acc = acc.sub(Enclosure::point(inputs.grid_hi));
    Ok(acc.lo())
}
