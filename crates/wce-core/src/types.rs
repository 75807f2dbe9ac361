//! Labeled interval primitives shared by the band and sweep crates.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, WceError};

fn interval_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

/// Closed sub-interval of the real line with a stable label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Left endpoint.
    pub left: f64,
    /// Right endpoint, strictly greater than `left`.
    pub right: f64,
    /// Stable label used in certificates (`critical`, `outer`, ...).
    pub label: String,
}

impl Interval {
    /// Creates a labeled interval, rejecting empty or non-finite spans.
    pub fn new(left: f64, right: f64, label: impl Into<String>) -> Result<Self, WceError> {
        if !left.is_finite() || !right.is_finite() {
            return Err(interval_error(
                "interval-non-finite",
                format!("interval endpoints must be finite, got [{left}, {right}]"),
            ));
        }
        if left >= right {
            return Err(interval_error(
                "interval-empty",
                format!("interval requires left < right, got [{left}, {right}]"),
            ));
        }
        Ok(Self {
            left,
            right,
            label: label.into(),
        })
    }

    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}
