//! Band certificate assembly.

use serde::{Deserialize, Serialize};
use wce_cert::hash::content_hash;
use wce_cert::meta::Meta;
use wce_core::ctx::NumCtx;
use wce_core::errors::{ErrorInfo, WceError};
use wce_core::types::Interval;

use crate::refine::{refine_min_abs, MinBounds, RefineOpts, RunBudget};
use crate::window::Window;

const TOOL: &str = "band_cert";

fn band_error(code: &str, message: impl Into<String>) -> WceError {
    WceError::Input(ErrorInfo::new(code, message.into()))
}

/// Per-band enclosure of the window magnitude minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandBound {
    /// Band label.
    pub label: String,
    /// Left endpoint, decimal string.
    pub left: String,
    /// Right endpoint, decimal string.
    pub right: String,
    /// Proven lower bound on `min |W|` over the band.
    pub min_abs_lo: String,
    /// Proven upper bound on `min |W|` over the band.
    pub min_abs_hi: String,
    /// Whether refinement met tolerance within budget.
    pub resolved: bool,
}

/// Input echo block of the band certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandInputs {
    /// Window mode identifier.
    pub mode: String,
    /// Gaussian width parameter.
    pub sigma: String,
    /// Notch parameter.
    pub k0: String,
    /// Subdivision tolerance.
    pub tol: String,
    /// Sub-interval budget per band.
    pub max_parts: usize,
}

/// Headline numbers of the band certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandNumbers {
    /// Global lower band margin (min of per-band lower bounds).
    pub band_margin_lo: String,
    /// Global upper band margin (min of per-band upper bounds).
    pub band_margin_hi: String,
    /// Number of certified bands.
    pub bands_count: usize,
}

/// Certificate that the window magnitude stays strictly positive on every band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandReport {
    /// Artifact kind tag.
    pub kind: String,
    /// Input echo block.
    pub inputs: BandInputs,
    /// Headline numbers.
    pub numbers: BandNumbers,
    /// Per-band enclosures.
    pub per_band: Vec<BandBound>,
    /// Verdict: true iff the global lower margin is strictly positive.
    #[serde(rename = "PASS")]
    pub pass: bool,
    /// Tool identity, precision, creation time, content hash.
    pub meta: Meta,
}

/// Runs the subdivision search over every labeled band and seals the certificate.
///
/// The authoritative margin over the banded domain is the minimum of the
/// per-band lower bounds; PASS requires it to be strictly positive. Budget
/// exhaustion inside a band widens that band's enclosure but never flips the
/// verdict optimistically.
pub fn certify_bands(
    window: &Window,
    bands: &[Interval],
    opts: &RefineOpts,
    budget: &RunBudget,
    ctx: &NumCtx,
) -> Result<BandReport, WceError> {
    if bands.is_empty() {
        return Err(band_error("no-bands", "band certification requires at least one band"));
    }

    let mut per_band = Vec::with_capacity(bands.len());
    let mut margin_lo = f64::INFINITY;
    let mut margin_hi = f64::INFINITY;
    for band in bands {
        let bounds: MinBounds = refine_min_abs(
            |a, b, ctx| window.abs_enclosure(a, b, ctx),
            band.left,
            band.right,
            opts,
            budget,
            ctx,
        )?;
        margin_lo = margin_lo.min(bounds.lo);
        margin_hi = margin_hi.min(bounds.hi);
        per_band.push(BandBound {
            label: band.label.clone(),
            left: ctx.dec(band.left),
            right: ctx.dec(band.right),
            min_abs_lo: ctx.dec(bounds.lo),
            min_abs_hi: ctx.dec(bounds.hi),
            resolved: bounds.resolved,
        });
    }

    let mut report = BandReport {
        kind: TOOL.to_string(),
        inputs: BandInputs {
            mode: "gauss".to_string(),
            sigma: ctx.dec(window.sigma()),
            k0: ctx.dec(window.k0()),
            tol: ctx.dec(opts.tol),
            max_parts: opts.max_parts,
        },
        numbers: BandNumbers {
            band_margin_lo: ctx.dec(margin_lo),
            band_margin_hi: ctx.dec(margin_hi),
            bands_count: per_band.len(),
        },
        per_band,
        pass: margin_lo > 0.0,
        meta: Meta::new(TOOL, ctx),
    };
    report.meta.sha256 = Some(content_hash(&report)?);
    Ok(report)
}
