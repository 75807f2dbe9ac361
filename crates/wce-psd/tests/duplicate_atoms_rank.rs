use serde_json::Value;
use wce_cert::hash::verify_content_hash;
use wce_core::ctx::NumCtx;
use wce_psd::report::{certify_psd, PsdOpts};
use wce_psd::{CholOpts, GramOpts};

fn degenerate_opts() -> PsdOpts {
    // A collapsed parameter rectangle duplicates every atom.
    PsdOpts {
        atoms: 2,
        sigma_min: 1.0,
        sigma_max: 1.0,
        k0_min: 1.0,
        k0_max: 1.0,
        gram: GramOpts {
            grid_half_width: 10.0,
            nodes: 513,
            eta: 0.0,
            threads: 1,
        },
        chol: CholOpts::default(),
    }
}

#[test]
fn duplicated_atoms_report_rank_deficiency() {
    let ctx = NumCtx::default();
    let report = certify_psd(&degenerate_opts(), &ctx).expect("certify");

    // Two identical atoms: the Gram matrix is exactly rank one. The direct
    // factorization must not smuggle a full-rank claim through fp noise.
    assert!(!report.result.chol_success);
    assert!(report.result.pivot_success);
    assert_eq!(report.result.rank, 1);
    assert!(report.result.psd_certified);
    assert!(report.psd_verified);

    let min_pivot: f64 = report
        .result
        .min_pivot
        .as_deref()
        .expect("pivot recorded")
        .parse()
        .expect("decimal");
    assert!(min_pivot >= 0.0);
    assert!(min_pivot < 1e-5, "terminal pivot should be near zero, got {min_pivot}");

    let doc: Value = serde_json::to_value(&report).expect("encode");
    assert!(verify_content_hash(&doc).expect("verify"));
}

#[test]
fn jitter_restores_full_rank() {
    let ctx = NumCtx::default();
    let mut opts = degenerate_opts();
    opts.gram.eta = 1e-3;
    let report = certify_psd(&opts, &ctx).expect("certify");
    assert!(report.result.chol_success);
    assert_eq!(report.result.rank, 2);
    assert!(report.psd_verified);
}
