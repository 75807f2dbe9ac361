use wce_psd::chol::{pivoted_cholesky, plain_cholesky, CholOpts};
use wce_psd::gram::GramMatrix;
use wce_psd::quad::{kahan_trapezoid, trapezoid_error_bound};

fn indefinite_matrix() -> GramMatrix {
    // Eigenvalues 3 and -1: symmetric but not PSD.
    let mut matrix = GramMatrix::zeros(2);
    matrix.set_sym(0, 0, 1.0);
    matrix.set_sym(1, 1, 1.0);
    matrix.set_sym(0, 1, 2.0);
    matrix
}

#[test]
fn negative_direction_fails_with_diagnostics() {
    let matrix = indefinite_matrix();
    let opts = CholOpts::default();

    let plain = plain_cholesky(&matrix, &opts);
    assert!(!plain.success);

    let pivoted = pivoted_cholesky(&matrix, &opts);
    assert!(!pivoted.success);
    assert!(pivoted.min_pivot < -opts.tol, "pivot {} should be genuinely negative", pivoted.min_pivot);
    assert_eq!(pivoted.rank, 1);
    assert!(pivoted.failed_index.is_some());
}

#[test]
fn noise_scale_negatives_are_tolerated() {
    // A residual inside [-tol, 0] counts as rank deficiency, not a violation.
    let mut matrix = GramMatrix::zeros(2);
    matrix.set_sym(0, 0, 1.0);
    matrix.set_sym(1, 1, 1.0 - 1e-14);
    matrix.set_sym(0, 1, 1.0);
    let opts = CholOpts { tol: 1e-12 };

    let pivoted = pivoted_cholesky(&matrix, &opts);
    assert!(pivoted.success);
    assert_eq!(pivoted.rank, 1);
    assert!(pivoted.min_pivot >= 0.0);
    assert!(pivoted.min_pivot < 1e-6);
}

#[test]
fn identity_has_full_rank_and_unit_pivots() {
    let mut matrix = GramMatrix::zeros(3);
    for i in 0..3 {
        matrix.set_sym(i, i, 1.0);
    }
    let opts = CholOpts::default();

    let plain = plain_cholesky(&matrix, &opts);
    assert!(plain.success);
    assert!((plain.min_diag_l - 1.0).abs() < 1e-15);

    let pivoted = pivoted_cholesky(&matrix, &opts);
    assert!(pivoted.success);
    assert_eq!(pivoted.rank, 3);
    assert!((pivoted.min_pivot - 1.0).abs() < 1e-15);
}

#[test]
fn kahan_trapezoid_integrates_linear_functions() {
    let result = kahan_trapezoid(|x| x, 0.0, 1.0, 101).expect("quad");
    assert!((result.value - 0.5).abs() < 1e-12);
    assert!(result.comp_residual < 1e-12);
    assert!(kahan_trapezoid(|x| x, 0.0, 1.0, 1).is_err());
}

#[test]
fn trapezoid_error_bound_matches_the_model() {
    let bound = trapezoid_error_bound(1.0, 1e-3, 6000).expect("bound");
    let expected = 1e-3 / (12.0 * 5999.0 * 5999.0);
    assert!(bound >= expected);
    assert!((bound - expected).abs() < 1e-20);
    assert!(trapezoid_error_bound(1.0, 1e-3, 1).is_err());
}
