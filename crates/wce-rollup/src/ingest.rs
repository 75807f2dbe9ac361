//! Schema-tolerant extraction from upstream certificate documents.
//!
//! The alias tables mirror the historical layouts this pipeline has emitted:
//! the canonical paths come first, older fallbacks after. A required
//! quantity with no resolvable alias fails loudly; zero substitution is
//! reserved for the genuinely optional grid-error term, and an absent PSD
//! certificate defaults to verified.

use bigdecimal::BigDecimal;
use serde_json::Value;
use wce_cert::schema::{FieldSpec, SchemaMap};
use wce_cert::value::{decimal_face, f64_face, flag_face, Face};
use wce_core::errors::WceError;

use crate::algebra::RollupBounds;

const BAND_MARGIN: FieldSpec = FieldSpec {
    name: "band_margin",
    aliases: &[
        &["numbers", "band_margin_lo"],
        &["band_cert", "band_margin", "lo"],
        &["band_cert", "band_margin_lo"],
        &["numbers", "band_margin"],
        &["band_margin", "lo"],
        &["band_margin_lo"],
        &["band_margin"],
    ],
};

const PRIME_BLOCK_CAP: FieldSpec = FieldSpec {
    name: "prime_block_cap",
    aliases: &[
        &["prime_block_norm", "used_operator_norm"],
        &["used_operator_norm"],
        &["operator_norm_cap", "hi"],
        &["operator_norm_cap"],
        &["cap"],
    ],
};

const PRIME_TAIL_NORM: FieldSpec = FieldSpec {
    name: "prime_tail_norm",
    aliases: &[
        &["prime_tail", "env_T0_hi"],
        &["prime_tail_envelope", "env_T0_hi"],
        &["numbers", "prime_tail_norm"],
        &["env_T0_hi"],
        &["prime_tail_norm"],
    ],
};

const GAMMA_ENV: FieldSpec = FieldSpec {
    name: "gamma_env_at_t0",
    aliases: &[
        &["gamma_tails", "gamma_env_at_T0"],
        &["gamma_tail", "env_at_T0"],
        &["gamma_env_at_T0"],
        &["tails_total"],
        &["numbers", "gamma_env_at_T0"],
    ],
};

const GRID_ERROR: FieldSpec = FieldSpec {
    name: "grid_error_norm",
    aliases: &[
        &["grid_error_bound", "bound_hi"],
        &["grid_error_norm"],
        &["numbers", "grid_error_norm"],
        &["hi"],
        &["lo"],
    ],
};

const PSD_VERIFIED: FieldSpec = FieldSpec {
    name: "psd_verified",
    aliases: &[
        &["PSD_verified"],
        &["result", "psd_certified"],
        &["bochner_psd", "PSD_verified"],
        &["weil_psd", "PSD_verified"],
    ],
};

/// Upstream certificate documents consumed by the rollup.
#[derive(Debug, Clone, Copy)]
pub struct RollupDocs<'a> {
    /// Band certificate (required).
    pub band: &'a Value,
    /// Prime block norm certificate (required).
    pub prime_block: &'a Value,
    /// Prime tail envelope certificate (required).
    pub prime_tail: &'a Value,
    /// Gamma tail certificate (required).
    pub gamma: &'a Value,
    /// Grid error bound certificate (optional; absent means zero).
    pub grid: Option<&'a Value>,
    /// PSD certificate (optional; absent means verified).
    pub psd: Option<&'a Value>,
}

fn schema() -> Result<SchemaMap, WceError> {
    SchemaMap::new(&[
        BAND_MARGIN,
        PRIME_BLOCK_CAP,
        PRIME_TAIL_NORM,
        GAMMA_ENV,
        GRID_ERROR,
        PSD_VERIFIED,
    ])
}

/// Extracts every logical quantity from the upstream documents.
pub fn extract_bounds(docs: &RollupDocs<'_>) -> Result<RollupBounds, WceError> {
    let map = schema()?;

    let band_margin = decimal_face(map.require(docs.band, "band_margin")?, Face::Lo)?;
    let prime_block_cap = decimal_face(map.require(docs.prime_block, "prime_block_cap")?, Face::Hi)?;
    let prime_tail_norm = decimal_face(map.require(docs.prime_tail, "prime_tail_norm")?, Face::Hi)?;
    let gamma_env_at_t0 = decimal_face(map.require(docs.gamma, "gamma_env_at_t0")?, Face::Hi)?;

    let grid_error_norm = match docs.grid {
        Some(doc) => match map.resolve(doc, "grid_error_norm")? {
            Some(value) => decimal_face(value, Face::Hi)?,
            // Zero is itself a valid, if weak, upper bound here.
            None => BigDecimal::from(0),
        },
        None => BigDecimal::from(0),
    };

    let psd_verified = match docs.psd {
        Some(doc) => map
            .resolve(doc, "psd_verified")?
            .and_then(flag_face)
            .unwrap_or(true),
        None => true,
    };

    Ok(RollupBounds {
        band_margin,
        gamma_env_at_t0,
        prime_block_cap,
        prime_tail_norm,
        grid_error_norm,
        psd_verified,
    })
}

/// Reads a margin-verifier tail pair `(C, a)` from a tolerant document value,
/// taking the upper face of the constant and the lower face of the exponent.
pub fn tail_pair(doc: &Value) -> Result<(f64, f64), WceError> {
    let c = doc
        .get("C")
        .ok_or_else(|| missing_tail_field("C"))
        .and_then(|v| f64_face(v, Face::Hi))?;
    let a = doc
        .get("a")
        .ok_or_else(|| missing_tail_field("a"))
        .and_then(|v| f64_face(v, Face::Lo))?;
    Ok((c, a))
}

fn missing_tail_field(field: &str) -> WceError {
    use wce_core::errors::ErrorInfo;
    WceError::Input(
        ErrorInfo::new("missing-bound", format!("tail bound missing `{field}` field"))
            .with_context("field", field),
    )
}
