//! Priority-queue adaptive subdivision search.
//!
//! Certifies a global lower bound on `inf |f|` over an interval by keeping a
//! min-heap of pending pieces keyed by each piece's lower enclosure. The most
//! promising piece is popped; pieces whose enclosure gap exceeds the
//! tolerance are bisected and re-queued, resolved pieces accumulate into the
//! partition lower bound. Budget exhaustion returns the best rigorous bounds
//! found so far, which can only understate certainty, never overstate it.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use wce_core::ctx::NumCtx;
use wce_core::enclose::Enclosure;
use wce_core::errors::{ErrorInfo, WceError};

fn default_tol() -> f64 {
    1e-12
}

fn default_max_parts() -> usize {
    16384
}

/// Subdivision tolerance and budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefineOpts {
    /// Target gap between the global upper and lower bounds.
    #[serde(default = "default_tol")]
    pub tol: f64,
    /// Maximum number of sub-intervals examined.
    #[serde(default = "default_max_parts")]
    pub max_parts: usize,
}

impl Default for RefineOpts {
    fn default() -> Self {
        Self {
            tol: default_tol(),
            max_parts: default_max_parts(),
        }
    }
}

/// Cooperative run budget checked between piece evaluations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunBudget {
    /// Optional wall-clock deadline for sweep-managed runs.
    pub deadline: Option<Instant>,
}

impl RunBudget {
    /// Whether the deadline has passed.
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Rigorous bounds on the interval minimum of `|f|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinBounds {
    /// Proven lower bound on the minimum.
    pub lo: f64,
    /// Proven upper bound on the minimum.
    pub hi: f64,
    /// Sub-intervals examined.
    pub parts: usize,
    /// False when the piece budget ran out before the gap met tolerance.
    pub resolved: bool,
}

struct Piece {
    left: f64,
    right: f64,
    lo: f64,
    hi: f64,
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.lo.total_cmp(&other.lo) == Ordering::Equal
    }
}

impl Eq for Piece {}

impl PartialOrd for Piece {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Piece {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, the search wants the smallest lo.
        other.lo.total_cmp(&self.lo)
    }
}

/// Runs the adaptive subdivision search for `inf |f|` over `[left, right]`.
pub fn refine_min_abs<F>(
    eval: F,
    left: f64,
    right: f64,
    opts: &RefineOpts,
    budget: &RunBudget,
    ctx: &NumCtx,
) -> Result<MinBounds, WceError>
where
    F: Fn(f64, f64, &NumCtx) -> Enclosure,
{
    let max_parts = opts.max_parts.max(1);
    let mut queue = BinaryHeap::new();
    let push = |queue: &mut BinaryHeap<Piece>, a: f64, b: f64| {
        let bounds = eval(a, b, ctx);
        queue.push(Piece {
            left: a,
            right: b,
            lo: bounds.lo(),
            hi: bounds.hi(),
        });
    };
    push(&mut queue, left, right);

    let mut resolved_lo = f64::INFINITY;
    let mut best_hi = f64::INFINITY;
    let mut parts = 1usize;
    let mut global_lo = f64::NEG_INFINITY;
    let mut resolved = false;
    let mut exhausted = false;

    while let Some(piece) = queue.pop() {
        if budget.expired() {
            return Err(WceError::Pool(
                ErrorInfo::new("deadline", "subdivision search hit its cooperative deadline")
                    .with_context("parts", parts.to_string()),
            ));
        }
        best_hi = best_hi.min(piece.hi);
        // The heap is keyed by lo, so every remaining piece (and every child
        // of this one) has lo >= piece.lo: the partition lower bound is
        // exactly min(resolved pieces, this piece).
        global_lo = resolved_lo.min(piece.lo);
        if best_hi - global_lo <= opts.tol {
            resolved = true;
            break;
        }
        if piece.hi - piece.lo <= opts.tol {
            resolved_lo = resolved_lo.min(piece.lo);
            continue;
        }
        if parts >= max_parts {
            resolved_lo = resolved_lo.min(piece.lo);
            exhausted = true;
            break;
        }
        let mid = piece.left + (piece.right - piece.left) / 2.0;
        push(&mut queue, piece.left, mid);
        push(&mut queue, mid, piece.right);
        parts += 1;
    }

    if queue.is_empty() && !resolved && !exhausted {
        // Every piece resolved individually; the partition bound is final.
        global_lo = resolved_lo;
        resolved = true;
    }

    Ok(MinBounds {
        lo: global_lo.max(0.0),
        hi: best_hi,
        parts,
        resolved,
    })
}
