//! Parallel Gram matrix construction.
//!
//! Pairwise inner products are independent, so the upper triangle fans out
//! over a rayon pool; results aggregate write-once into the symmetric matrix
//! before the strictly sequential factorization step.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use wce_core::errors::{ErrorInfo, WceError};

use crate::atoms::{atom_profile, Atom};
use crate::quad::kahan_trapezoid;

fn gram_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

fn default_grid_half_width() -> f64 {
    50.0
}

fn default_nodes() -> usize {
    2049
}

fn default_threads() -> usize {
    1
}

/// Quadrature and pool parameters for the Gram build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GramOpts {
    /// Integration half-width `A`; entries integrate over `[-A, A]`.
    #[serde(default = "default_grid_half_width")]
    pub grid_half_width: f64,
    /// Trapezoid node count per entry.
    #[serde(default = "default_nodes")]
    pub nodes: usize,
    /// Diagonal jitter added after assembly.
    #[serde(default)]
    pub eta: f64,
    /// Worker threads for the entry fan-out.
    #[serde(default = "default_threads")]
    pub threads: usize,
}

impl Default for GramOpts {
    fn default() -> Self {
        Self {
            grid_half_width: default_grid_half_width(),
            nodes: default_nodes(),
            eta: 0.0,
            threads: default_threads(),
        }
    }
}

/// Dense symmetric matrix of proven inner products between basis atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GramMatrix {
    n: usize,
    data: Vec<f64>,
}

impl GramMatrix {
    /// Creates a zero matrix of the given order.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Matrix order.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Entry accessor.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Symmetric entry write.
    pub fn set_sym(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.n + j] = value;
        self.data[j * self.n + i] = value;
    }

    /// Maximum absolute asymmetry, zero for matrices built here.
    pub fn asymmetry(&self) -> f64 {
        let mut worst = 0.0f64;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                worst = worst.max((self.get(i, j) - self.get(j, i)).abs());
            }
        }
        worst
    }
}

/// Builds the Gram matrix of the atom family on a worker pool.
pub fn build_gram(atoms: &[Atom], opts: &GramOpts) -> Result<GramMatrix, WceError> {
    if atoms.is_empty() {
        return Err(gram_error("gram-empty", "gram build requires at least one atom"));
    }
    let n = atoms.len();
    let half_width = opts.grid_half_width;
    if !half_width.is_finite() || half_width <= 0.0 {
        return Err(gram_error(
            "gram-half-width",
            format!("integration half-width must be > 0, got {half_width}"),
        ));
    }

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i..n).map(move |j| (i, j)))
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.threads.max(1))
        .build()
        .map_err(|err| WceError::Pool(ErrorInfo::new("thread_pool", err.to_string())))?;

    let entries: Result<Vec<(usize, usize, f64)>, WceError> = pool.install(|| {
        pairs
            .par_iter()
            .map(|&(i, j)| {
                let left = atoms[i];
                let right = atoms[j];
                let quad = kahan_trapezoid(
                    |x| atom_profile(x, &left) * atom_profile(x, &right),
                    -half_width,
                    half_width,
                    opts.nodes,
                )?;
                Ok((i, j, quad.value))
            })
            .collect()
    });

    let mut matrix = GramMatrix::zeros(n);
    for (i, j, value) in entries? {
        matrix.set_sym(i, j, value);
    }
    if opts.eta != 0.0 {
        for i in 0..n {
            let jittered = matrix.get(i, i) + opts.eta;
            matrix.set_sym(i, i, jittered);
        }
    }
    Ok(matrix)
}
