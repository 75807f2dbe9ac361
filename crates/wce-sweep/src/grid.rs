//! Shape point strategies.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use wce_core::errors::{ErrorInfo, WceError};

fn grid_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

/// Inclusive stepped axis for the grid strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// First value.
    pub min: f64,
    /// Inclusive last value (up to step rounding).
    pub max: f64,
    /// Step size, strictly positive.
    pub step: f64,
}

/// Continuous range for the Latin-hypercube strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSpec {
    /// Lower end of the range.
    pub min: f64,
    /// Upper end of the range.
    pub max: f64,
}

/// Supported deterministic sweep strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SweepStrategy {
    /// Rectangular grid over both shape axes.
    Grid {
        /// Sigma axis.
        sigma: AxisSpec,
        /// k0 axis.
        k0: AxisSpec,
    },
    /// Latin hypercube over both shape ranges.
    Lhs {
        /// Sigma range.
        sigma: RangeSpec,
        /// k0 range.
        k0: RangeSpec,
        /// Number of samples.
        samples: usize,
    },
}

/// One shape point of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    /// Gaussian width parameter.
    pub sigma: f64,
    /// Notch parameter.
    pub k0: f64,
}

fn axis_values(axis: &AxisSpec) -> Result<Vec<f64>, WceError> {
    if !(axis.step.is_finite() && axis.step > 0.0) || axis.max < axis.min {
        return Err(grid_error(
            "axis-spec",
            format!("invalid axis [{}, {}] step {}", axis.min, axis.max, axis.step),
        ));
    }
    let mut values = Vec::new();
    let mut index = 0u32;
    loop {
        let value = axis.min + axis.step * f64::from(index);
        if value > axis.max + 1e-12 {
            break;
        }
        values.push(value);
        index += 1;
    }
    Ok(values)
}

/// Expands a strategy into the ordered list of shape points.
pub fn expand_points(strategy: &SweepStrategy, seed: u64) -> Result<Vec<ShapePoint>, WceError> {
    match strategy {
        SweepStrategy::Grid { sigma, k0 } => {
            let sigmas = axis_values(sigma)?;
            let k0s = axis_values(k0)?;
            let mut points = Vec::with_capacity(sigmas.len() * k0s.len());
            for &s in &sigmas {
                for &k in &k0s {
                    points.push(ShapePoint { sigma: s, k0: k });
                }
            }
            Ok(points)
        }
        SweepStrategy::Lhs { sigma, k0, samples } => {
            if *samples == 0 {
                return Err(grid_error("lhs-samples", "lhs strategy requires samples >= 1"));
            }
            let mut rng = StdRng::seed_from_u64(seed);
            let base_slots: Vec<f64> = (0..*samples)
                .map(|i| (i as f64 + 0.5) / *samples as f64)
                .collect();
            let mut sigma_slots = base_slots.clone();
            sigma_slots.shuffle(&mut rng);
            let mut k0_slots = base_slots;
            k0_slots.shuffle(&mut rng);
            Ok(sigma_slots
                .iter()
                .zip(k0_slots.iter())
                .map(|(&fs, &fk)| ShapePoint {
                    sigma: sigma.min + fs * (sigma.max - sigma.min),
                    k0: k0.min + fk * (k0.max - k0.min),
                })
                .collect())
        }
    }
}
