//! Direction-tagged bounds and their arithmetic.
//!
//! A [`Bound`] pairs an exact decimal value with the direction it bounds
//! from. The algebra only admits combinations that preserve validity: two
//! lower bounds sum to a lower bound of the sum, and subtracting an upper
//! bound from a lower bound yields a lower bound of the difference.

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};
use wce_core::errors::{ErrorInfo, WceError};

fn bound_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Numeric(ErrorInfo::new(code, message.into()))
}

/// Direction a bound holds from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundDir {
    /// Proven lower bound: the true value is at least this.
    Lower,
    /// Proven upper bound: the true value is at most this.
    Upper,
}

/// Exact decimal value tagged with its bounding direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    dir: BoundDir,
    value: BigDecimal,
}

impl Bound {
    /// Creates a proven lower bound.
    pub fn lower(value: BigDecimal) -> Self {
        Self {
            dir: BoundDir::Lower,
            value,
        }
    }

    /// Creates a proven upper bound.
    pub fn upper(value: BigDecimal) -> Self {
        Self {
            dir: BoundDir::Upper,
            value,
        }
    }

    /// Direction of the bound.
    pub fn dir(&self) -> BoundDir {
        self.dir
    }

    /// Exact decimal value.
    pub fn value(&self) -> &BigDecimal {
        &self.value
    }

    /// Sums two bounds of the same direction.
    pub fn add(&self, rhs: &Bound) -> Result<Bound, WceError> {
        if self.dir != rhs.dir {
            return Err(bound_error(
                "bound-dir-sum",
                "summing bounds of opposite directions proves nothing",
            ));
        }
        Ok(Bound {
            dir: self.dir,
            value: &self.value + &rhs.value,
        })
    }

    /// Subtracts a bound of the opposite direction, keeping `self`'s direction.
    pub fn sub(&self, rhs: &Bound) -> Result<Bound, WceError> {
        if self.dir == rhs.dir {
            return Err(bound_error(
                "bound-dir-sub",
                "subtracting a same-direction bound proves nothing",
            ));
        }
        Ok(Bound {
            dir: self.dir,
            value: &self.value - &rhs.value,
        })
    }

    /// Rounds the stored value outward (away from the true value) to the
    /// given decimal scale, preserving validity under precision loss.
    pub fn round_out(&self, scale: i64) -> Bound {
        let mode = match self.dir {
            BoundDir::Lower => RoundingMode::Floor,
            BoundDir::Upper => RoundingMode::Ceiling,
        };
        Bound {
            dir: self.dir,
            value: self.value.with_scale_round(scale, mode),
        }
    }
}
