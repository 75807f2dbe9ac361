use wce_core::errors::{ErrorInfo, WceError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("field", "band_margin")
        .with_hint("regenerate the upstream certificate")
}

#[test]
fn input_error_surface() {
    let err = WceError::Input(sample_info("missing-bound", "band margin unresolved"));
    assert_eq!(err.info().code, "missing-bound");
    assert!(err.info().context.contains_key("field"));
}

#[test]
fn schema_error_surface() {
    let err = WceError::Schema(sample_info("schema-no-aliases", "no alias paths"));
    assert_eq!(err.info().code, "schema-no-aliases");
}

#[test]
fn numeric_error_surface() {
    let err = WceError::Numeric(sample_info("enclosure-empty", "lo above hi"));
    assert_eq!(err.info().code, "enclosure-empty");
}

#[test]
fn pool_error_surface() {
    let err = WceError::Pool(sample_info("deadline", "cooperative deadline hit"));
    assert_eq!(err.info().code, "deadline");
}

#[test]
fn display_includes_context_and_hint() {
    let err = WceError::Input(sample_info("missing-bound", "band margin unresolved"));
    let rendered = err.to_string();
    assert!(rendered.contains("missing-bound"));
    assert!(rendered.contains("field=band_margin"));
    assert!(rendered.contains("regenerate the upstream certificate"));
}

#[test]
fn error_serde_roundtrip() {
    let err = WceError::Serde(sample_info("json-encode", "bad payload"));
    let encoded = serde_json::to_string(&err).expect("encode");
    let decoded: WceError = serde_json::from_str(&encoded).expect("decode");
    assert_eq!(err, decoded);
}
