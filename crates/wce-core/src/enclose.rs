//! Directed-rounding floating-point enclosures.
//!
//! An [`Enclosure`] is a proven `[lo, hi]` pair: every operation rounds its
//! endpoints outward, so the result is guaranteed to contain the exact real
//! result whenever the operands contain their exact inputs. Basic arithmetic
//! is correctly rounded by the hardware, so one ulp of outward padding
//! suffices; transcendental operations additionally widen by the slack
//! configured in [`NumCtx`].

use serde::{Deserialize, Serialize};

use crate::ctx::NumCtx;
use crate::errors::{ErrorInfo, WceError};

fn enclose_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Numeric(ErrorInfo::new(code, message.into()))
}

fn pad_up(x: f64, ulps: u32) -> f64 {
    let mut out = x;
    for _ in 0..ulps {
        out = out.next_up();
    }
    out
}

fn pad_down(x: f64, ulps: u32) -> f64 {
    let mut out = x;
    for _ in 0..ulps {
        out = out.next_down();
    }
    out
}

/// Proven `[lo, hi]` pair with outward-rounded endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    lo: f64,
    hi: f64,
}

impl Enclosure {
    /// Creates an enclosure from explicit endpoints.
    pub fn new(lo: f64, hi: f64) -> Result<Self, WceError> {
        if lo.is_nan() || hi.is_nan() {
            return Err(enclose_error("enclosure-nan", "enclosure endpoint is NaN"));
        }
        if lo > hi {
            return Err(enclose_error(
                "enclosure-empty",
                format!("enclosure requires lo <= hi, got [{lo}, {hi}]"),
            ));
        }
        Ok(Self { lo, hi })
    }

    /// Degenerate enclosure around a single finite value.
    pub fn point(x: f64) -> Self {
        Self { lo: x, hi: x }
    }

    /// Enclosure spanning two endpoints in either order.
    pub fn span(a: f64, b: f64) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// Lower endpoint.
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper endpoint.
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Outward-rounded width of the enclosure.
    pub fn width(&self) -> f64 {
        (self.hi - self.lo).next_up()
    }

    /// Whether the enclosure contains the given point.
    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Directed sum.
    pub fn add(self, rhs: Self) -> Self {
        Self {
            lo: (self.lo + rhs.lo).next_down(),
            hi: (self.hi + rhs.hi).next_up(),
        }
    }

    /// Exact negation.
    pub fn neg(self) -> Self {
        Self {
            lo: -self.hi,
            hi: -self.lo,
        }
    }

    /// Directed difference.
    pub fn sub(self, rhs: Self) -> Self {
        self.add(rhs.neg())
    }

    /// Directed product over all endpoint combinations.
    pub fn mul(self, rhs: Self) -> Self {
        let candidates = [
            self.lo * rhs.lo,
            self.lo * rhs.hi,
            self.hi * rhs.lo,
            self.hi * rhs.hi,
        ];
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for c in candidates {
            lo = lo.min(c);
            hi = hi.max(c);
        }
        Self {
            lo: lo.next_down(),
            hi: hi.next_up(),
        }
    }

    /// Directed square, tighter than `mul(self)` around zero.
    pub fn sqr(self) -> Self {
        if self.lo >= 0.0 {
            Self {
                lo: (self.lo * self.lo).next_down().max(0.0),
                hi: (self.hi * self.hi).next_up(),
            }
        } else if self.hi <= 0.0 {
            Self {
                lo: (self.hi * self.hi).next_down().max(0.0),
                hi: (self.lo * self.lo).next_up(),
            }
        } else {
            Self {
                lo: 0.0,
                hi: (self.lo * self.lo).max(self.hi * self.hi).next_up(),
            }
        }
    }

    /// Directed reciprocal; fails on enclosures containing zero.
    pub fn recip(self) -> Result<Self, WceError> {
        if self.lo <= 0.0 && self.hi >= 0.0 {
            return Err(enclose_error(
                "enclosure-zero-division",
                format!("reciprocal of enclosure containing zero: [{}, {}]", self.lo, self.hi),
            ));
        }
        Ok(Self {
            lo: (1.0 / self.hi).next_down(),
            hi: (1.0 / self.lo).next_up(),
        })
    }

    /// Directed quotient; fails when the divisor contains zero.
    pub fn div(self, rhs: Self) -> Result<Self, WceError> {
        Ok(self.mul(rhs.recip()?))
    }

    /// Directed exponential.
    pub fn exp(self, ctx: &NumCtx) -> Self {
        Self {
            lo: pad_down(self.lo.exp(), ctx.fn_slack_ulps).max(0.0),
            hi: pad_up(self.hi.exp(), ctx.fn_slack_ulps),
        }
    }

    /// Directed natural logarithm; requires a strictly positive enclosure.
    pub fn ln(self, ctx: &NumCtx) -> Result<Self, WceError> {
        if self.lo <= 0.0 {
            return Err(enclose_error(
                "enclosure-ln-domain",
                format!("ln requires lo > 0, got [{}, {}]", self.lo, self.hi),
            ));
        }
        Ok(Self {
            lo: pad_down(self.lo.ln(), ctx.fn_slack_ulps),
            hi: pad_up(self.hi.ln(), ctx.fn_slack_ulps),
        })
    }

    /// Directed real power for strictly positive bases.
    pub fn powf(self, exponent: f64, ctx: &NumCtx) -> Result<Self, WceError> {
        if self.lo <= 0.0 {
            return Err(enclose_error(
                "enclosure-pow-domain",
                format!("powf requires lo > 0, got [{}, {}]", self.lo, self.hi),
            ));
        }
        let (lo, hi) = if exponent >= 0.0 {
            (self.lo.powf(exponent), self.hi.powf(exponent))
        } else {
            (self.hi.powf(exponent), self.lo.powf(exponent))
        };
        Ok(Self {
            lo: pad_down(lo, ctx.fn_slack_ulps).max(0.0),
            hi: pad_up(hi, ctx.fn_slack_ulps),
        })
    }

    /// Enclosure of the absolute value.
    pub fn abs(self) -> Self {
        if self.lo >= 0.0 {
            self
        } else if self.hi <= 0.0 {
            self.neg()
        } else {
            Self {
                lo: 0.0,
                hi: (-self.lo).max(self.hi),
            }
        }
    }

    /// Clips negative endpoints to zero (for magnitudes known nonnegative).
    pub fn clamp_nonneg(self) -> Self {
        Self {
            lo: self.lo.max(0.0),
            hi: self.hi.max(0.0),
        }
    }
}
