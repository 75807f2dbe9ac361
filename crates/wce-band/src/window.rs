//! Gaussian-notch window model and its interval extension.

use serde::{Deserialize, Serialize};
use wce_core::ctx::NumCtx;
use wce_core::enclose::Enclosure;
use wce_core::errors::{ErrorInfo, WceError};

fn window_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

/// Gaussian window with a multiplicative notch:
/// `W(f) = exp(-(f/sigma)^2) * (1 - exp(-(f/k0)^2))`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    sigma: f64,
    k0: f64,
    inv_sigma: Enclosure,
    inv_k0: Enclosure,
}

impl Window {
    /// Builds the window from its shape parameters, both strictly positive.
    pub fn gauss_notch(sigma: f64, k0: f64) -> Result<Self, WceError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(window_error("window-sigma", format!("sigma must be > 0, got {sigma}")));
        }
        if !k0.is_finite() || k0 <= 0.0 {
            return Err(window_error("window-k0", format!("k0 must be > 0, got {k0}")));
        }
        let inv_sigma = Enclosure::point(sigma).recip()?;
        let inv_k0 = Enclosure::point(k0).recip()?;
        Ok(Self {
            sigma,
            k0,
            inv_sigma,
            inv_k0,
        })
    }

    /// Gaussian width parameter.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Notch parameter.
    pub fn k0(&self) -> f64 {
        self.k0
    }

    /// Rigorous enclosure of `|W|` over `[a, b]`.
    ///
    /// Every sub-operation is evaluated through its interval extension, so
    /// for all real `x` in `[a, b]` the result satisfies
    /// `lo <= |W(x)| <= hi`, with negative lower enclosures clipped to zero.
    /// Pure and total: defined for every ordered pair of finite endpoints.
    pub fn abs_enclosure(&self, a: f64, b: f64, ctx: &NumCtx) -> Enclosure {
        let f = Enclosure::span(a, b);
        let envelope = f.mul(self.inv_sigma).sqr().neg().exp(ctx);
        let notch = Enclosure::point(1.0).sub(f.mul(self.inv_k0).sqr().neg().exp(ctx));
        envelope.mul(notch).clamp_nonneg()
    }

    /// Point evaluation of `W` (not directed; diagnostics only).
    pub fn eval(&self, x: f64) -> f64 {
        let scaled = x / self.sigma;
        let notched = x / self.k0;
        (-(scaled * scaled)).exp() * (1.0 - (-(notched * notched)).exp())
    }
}
