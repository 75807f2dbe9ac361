use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde_json::json;
use wce_core::errors::WceError;
use wce_rollup::ingest::{extract_bounds, tail_pair, RollupDocs};

#[test]
fn legacy_layouts_resolve() {
    // Older artifact shapes: flat band margin, bare cap, flat tail norms.
    let band = json!({ "band_margin_lo": "0.50" });
    let prime_block = json!({ "cap": "0.30" });
    let prime_tail = json!({ "prime_tail_norm": "0.05" });
    let gamma = json!({ "gamma_env_at_T0": "0.02" });

    let bounds = extract_bounds(&RollupDocs {
        band: &band,
        prime_block: &prime_block,
        prime_tail: &prime_tail,
        gamma: &gamma,
        grid: None,
        psd: None,
    })
    .expect("extract");

    assert_eq!(bounds.band_margin, BigDecimal::from_str("0.50").unwrap());
    assert_eq!(bounds.prime_block_cap, BigDecimal::from_str("0.30").unwrap());
    assert_eq!(bounds.prime_tail_norm, BigDecimal::from_str("0.05").unwrap());
    assert_eq!(bounds.gamma_env_at_t0, BigDecimal::from_str("0.02").unwrap());
    assert_eq!(bounds.grid_error_norm, BigDecimal::from(0));
    assert!(bounds.psd_verified);
}

#[test]
fn interval_shaped_band_margin_takes_the_lower_face() {
    let band = json!({ "band_cert": { "band_margin": { "lo": "0.41", "hi": "0.44" } } });
    let prime_block = json!({ "used_operator_norm": "0.1" });
    let prime_tail = json!({ "env_T0_hi": "0.1" });
    let gamma = json!({ "tails_total": "0.01" });

    let bounds = extract_bounds(&RollupDocs {
        band: &band,
        prime_block: &prime_block,
        prime_tail: &prime_tail,
        gamma: &gamma,
        grid: None,
        psd: None,
    })
    .expect("extract");
    assert_eq!(bounds.band_margin, BigDecimal::from_str("0.41").unwrap());
}

#[test]
fn missing_band_margin_fails_loudly() {
    let band = json!({ "numbers": {} });
    let prime_block = json!({ "used_operator_norm": "0.1" });
    let prime_tail = json!({ "env_T0_hi": "0.1" });
    let gamma = json!({ "tails_total": "0.01" });

    let err = extract_bounds(&RollupDocs {
        band: &band,
        prime_block: &prime_block,
        prime_tail: &prime_tail,
        gamma: &gamma,
        grid: None,
        psd: None,
    })
    .unwrap_err();

    match err {
        WceError::Input(info) => {
            assert_eq!(info.code, "missing-bound");
            assert!(info.message.contains("band_margin"));
        }
        other => panic!("expected input error, got {other:?}"),
    }
}

#[test]
fn grid_error_defaults_to_zero_only_when_optional() {
    // An empty grid document resolves to the zero default.
    let band = json!({ "band_margin_lo": "0.5" });
    let prime_block = json!({ "cap": "0.1" });
    let prime_tail = json!({ "prime_tail_norm": "0.1" });
    let gamma = json!({ "gamma_env_at_T0": "0.01" });
    let grid = json!({ "unrelated": "x" });

    let bounds = extract_bounds(&RollupDocs {
        band: &band,
        prime_block: &prime_block,
        prime_tail: &prime_tail,
        gamma: &gamma,
        grid: Some(&grid),
        psd: None,
    })
    .expect("extract");
    assert_eq!(bounds.grid_error_norm, BigDecimal::from(0));
}

#[test]
fn psd_flag_tolerates_string_booleans() {
    let band = json!({ "band_margin_lo": "0.5" });
    let prime_block = json!({ "cap": "0.1" });
    let prime_tail = json!({ "prime_tail_norm": "0.1" });
    let gamma = json!({ "gamma_env_at_T0": "0.01" });
    let psd = json!({ "weil_psd": { "PSD_verified": "false" } });

    let bounds = extract_bounds(&RollupDocs {
        band: &band,
        prime_block: &prime_block,
        prime_tail: &prime_tail,
        gamma: &gamma,
        grid: None,
        psd: Some(&psd),
    })
    .expect("extract");
    assert!(!bounds.psd_verified);
}

#[test]
fn tail_pair_takes_worst_case_faces() {
    let doc = json!({ "C": { "lo": "1.0", "hi": "1.5" }, "a": { "lo": "0.9", "hi": "1.1" } });
    let (c, a) = tail_pair(&doc).expect("tail");
    assert!((c - 1.5).abs() < 1e-9);
    assert!((a - 0.9).abs() < 1e-9);
}

#[test]
fn tail_pair_requires_both_fields() {
    assert!(tail_pair(&json!({ "C": "1.0" })).is_err());
    assert!(tail_pair(&json!({ "a": "1.0" })).is_err());
}
