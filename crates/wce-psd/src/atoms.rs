//! Basis atom families for the Gram construction.

use serde::{Deserialize, Serialize};
use wce_core::errors::{ErrorInfo, WceError};

fn atom_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

/// One Gaussian-notch basis atom, parameterized by width and notch center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// Gaussian width parameter.
    pub sigma: f64,
    /// Notch center parameter.
    pub k0: f64,
}

/// Atom profile `h(x) = exp(-x^2/sigma^2) * (1 - exp(-(x - k0)^2))`.
pub fn atom_profile(x: f64, atom: &Atom) -> f64 {
    let envelope = (-(x * x) / (atom.sigma * atom.sigma)).exp();
    let shifted = x - atom.k0;
    envelope * (1.0 - (-(shifted * shifted)).exp())
}

/// Lays `n` atoms on a near-square grid over the `(sigma, k0)` rectangle.
pub fn make_atoms(
    n: usize,
    sigma_min: f64,
    sigma_max: f64,
    k0_min: f64,
    k0_max: f64,
) -> Result<Vec<Atom>, WceError> {
    if n == 0 {
        return Err(atom_error("atoms-empty", "at least one atom is required"));
    }
    if sigma_min <= 0.0 || sigma_max < sigma_min {
        return Err(atom_error(
            "atoms-sigma-range",
            format!("invalid sigma range [{sigma_min}, {sigma_max}]"),
        ));
    }
    if k0_min <= 0.0 || k0_max < k0_min {
        return Err(atom_error(
            "atoms-k0-range",
            format!("invalid k0 range [{k0_min}, {k0_max}]"),
        ));
    }

    let mut side = (n as f64).sqrt().floor() as usize;
    if side * side < n {
        side += 1;
    }
    let denom = (side - 1).max(1) as f64;
    let mut atoms = Vec::with_capacity(n);
    for i in 0..side {
        for j in 0..side {
            let sigma = sigma_min + (sigma_max - sigma_min) * i as f64 / denom;
            let k0 = k0_min + (k0_max - k0_min) * j as f64 / denom;
            atoms.push(Atom { sigma, k0 });
            if atoms.len() == n {
                return Ok(atoms);
            }
        }
    }
    Ok(atoms)
}
