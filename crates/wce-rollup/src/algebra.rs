//! Inequality composition over exact decimals.

use bigdecimal::BigDecimal;
use wce_core::errors::WceError;

use crate::bound::Bound;

/// Bounds extracted from the upstream certificates, all exact decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct RollupBounds {
    /// Proven lower bound on the spectral band margin.
    pub band_margin: BigDecimal,
    /// Upper bound on the gamma tail envelope at T0.
    pub gamma_env_at_t0: BigDecimal,
    /// Upper bound on the prime block operator norm.
    pub prime_block_cap: BigDecimal,
    /// Upper bound on the prime tail contribution at T0.
    pub prime_tail_norm: BigDecimal,
    /// Upper bound on the quadrature/grid error (zero when absent upstream).
    pub grid_error_norm: BigDecimal,
    /// PSD verdict of the kernel certificate (true when absent upstream).
    pub psd_verified: bool,
}

/// Composed quantities and the final verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct RollupResult {
    /// Upper bound on the additive cost side.
    pub lhs_total: BigDecimal,
    /// Lower bound on the effective margin.
    pub epsilon_eff: BigDecimal,
    /// PASS iff the PSD flag holds and `lhs_total <= epsilon_eff`.
    pub pass: bool,
}

/// Composes the final inequality in one exact decimal representation, so no
/// intermediate rounding can silently flip the verdict.
pub fn combine(bounds: &RollupBounds) -> Result<RollupResult, WceError> {
    let lhs_total = Bound::upper(bounds.prime_block_cap.clone())
        .add(&Bound::upper(bounds.prime_tail_norm.clone()))?
        .add(&Bound::upper(bounds.grid_error_norm.clone()))?;
    let epsilon_eff = Bound::lower(bounds.band_margin.clone())
        .sub(&Bound::upper(bounds.gamma_env_at_t0.clone()))?;
    // An upper bound dominated by a lower bound certifies the true inequality.
    let pass = bounds.psd_verified && lhs_total.value() <= epsilon_eff.value();
    Ok(RollupResult {
        lhs_total: lhs_total.value().clone(),
        epsilon_eff: epsilon_eff.value().clone(),
        pass,
    })
}
