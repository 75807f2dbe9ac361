use serde_json::Value;
use wce_cert::hash::verify_content_hash;
use wce_core::ctx::NumCtx;
use wce_margin::report::margin_report;
use wce_margin::tails::{delta_lo, MarginInputs, TailTerm};
use wce_margin::verify::{verify_margin, MarginOpts, WitnessKind};

fn ctx() -> NumCtx {
    NumCtx::default()
}

// delta_lo(T) = 1/T, realized as eps_eff_lo = 0 and a single negated tail.
// This violates the monotone-decrease precondition on purpose: it exercises
// the mesh mechanics, not the soundness argument.
fn reciprocal_inputs() -> MarginInputs {
    MarginInputs {
        eps_eff_lo: 0.0,
        grid_hi: 0.0,
        tails: vec![TailTerm {
            c_hi: -1.0,
            a_lo: 1.0,
            t_min: None,
        }],
    }
}

#[test]
fn delta_lo_is_a_tight_lower_bound() {
    let ctx = ctx();
    let inputs = MarginInputs {
        eps_eff_lo: 1.0,
        grid_hi: 0.25,
        tails: vec![TailTerm {
            c_hi: 1.0,
            a_lo: 1.0,
            t_min: None,
        }],
    };
    let sample = delta_lo(2.0, &inputs, &ctx).expect("sample");
    // True value is 1 - 1/2 - 1/4 = 0.25; the directed sample sits just below.
    assert!(sample <= 0.25);
    assert!((0.25 - sample).abs() < 1e-12);
}

#[test]
fn delta_lo_rejects_nonpositive_points() {
    let ctx = ctx();
    assert!(delta_lo(0.0, &reciprocal_inputs(), &ctx).is_err());
    assert!(delta_lo(-1.0, &reciprocal_inputs(), &ctx).is_err());
}

#[test]
fn trivial_pass_with_no_refinement() {
    let ctx = ctx();
    let opts = MarginOpts {
        delta_target: 0.5,
        mesh_initial: 1,
        mesh_max: 1000,
        depth_max: 40,
    };
    let verdict = verify_margin(1.0, 10.0, &reciprocal_inputs(), &opts, &ctx).expect("verify");
    assert!(verdict.pass);
    assert_eq!(verdict.intervals, 1);
    assert_eq!(verdict.max_depth, 0);
    // delta_lo(1) = 1 clears the target at the single seed left endpoint.
    assert!((verdict.delta_min - 1.0).abs() < 1e-9);
    assert_eq!(verdict.witness.kind, WitnessKind::ArgminDegenerate);
    let width = verdict.witness.t_right - verdict.witness.t_left;
    assert!(width > 0.0 && width < 1e-6);
    assert!(verdict.witness.t_left <= verdict.argmin_t);
    assert!(verdict.argmin_t <= verdict.witness.t_right);
}

#[test]
fn raised_target_fails_near_the_crossing() {
    let ctx = ctx();
    // Crossing of 1/T with the target sits at T = 1.5.
    let opts = MarginOpts {
        delta_target: 1.0 / 1.5,
        mesh_initial: 9,
        mesh_max: 500,
        depth_max: 24,
    };
    let verdict = verify_margin(1.0, 10.0, &reciprocal_inputs(), &opts, &ctx).expect("verify");
    assert!(!verdict.pass);
    assert_eq!(verdict.witness.kind, WitnessKind::Unresolved);
    // Leftmost-first processing pins the witness to the first failing mesh
    // cell, one initial-mesh step right of the crossing.
    assert!(verdict.witness.t_left >= 1.5);
    assert!(verdict.witness.t_left <= 1.5 + 1.0 + 1e-9);
    assert!(verdict.delta_min < opts.delta_target);
}

#[test]
fn monotone_margin_fails_with_left_edge_witness() {
    let ctx = ctx();
    // delta_lo(T) = 0.5 - 1/T: negative on [1, 2), certifiable beyond.
    let inputs = MarginInputs {
        eps_eff_lo: 0.5,
        grid_hi: 0.0,
        tails: vec![TailTerm {
            c_hi: 1.0,
            a_lo: 1.0,
            t_min: None,
        }],
    };
    let opts = MarginOpts {
        delta_target: 0.0,
        mesh_initial: 4,
        mesh_max: 10000,
        depth_max: 20,
    };
    let verdict = verify_margin(1.0, 10.0, &inputs, &opts, &ctx).expect("verify");
    assert!(!verdict.pass);
    // The witness lands inside the genuinely failing region.
    assert!(verdict.witness.t_left < 2.0);
    assert!(verdict.delta_min < 0.0);
    assert_eq!(verdict.witness.depth, opts.depth_max);
}

#[test]
fn budget_exhaustion_is_a_conservative_fail() {
    let ctx = ctx();
    let inputs = MarginInputs {
        eps_eff_lo: 0.5,
        grid_hi: 0.0,
        tails: vec![TailTerm {
            c_hi: 1.0,
            a_lo: 1.0,
            t_min: None,
        }],
    };
    let opts = MarginOpts {
        delta_target: 0.0,
        mesh_initial: 4,
        mesh_max: 3,
        depth_max: 40,
    };
    let verdict = verify_margin(1.0, 10.0, &inputs, &opts, &ctx).expect("verify");
    assert!(!verdict.pass);
    assert!(verdict.intervals <= 3);
    assert_eq!(verdict.witness.kind, WitnessKind::Unresolved);
}

#[test]
fn declared_tail_domain_clamps_the_left_endpoint() {
    let ctx = ctx();
    let inputs = MarginInputs {
        eps_eff_lo: 10.0,
        grid_hi: 0.0,
        tails: vec![TailTerm {
            c_hi: 1.0,
            a_lo: 1.0,
            t_min: Some(5.0),
        }],
    };
    let opts = MarginOpts {
        delta_target: 0.0,
        mesh_initial: 4,
        mesh_max: 100,
        depth_max: 10,
    };
    let verdict = verify_margin(1.0, 10.0, &inputs, &opts, &ctx).expect("verify");
    assert!(verdict.pass);
    // No sample may fall below the declared tail domain.
    assert!(verdict.argmin_t >= 5.0);
}

#[test]
fn empty_clamped_domain_is_rejected() {
    let ctx = ctx();
    let inputs = MarginInputs {
        eps_eff_lo: 1.0,
        grid_hi: 0.0,
        tails: vec![TailTerm {
            c_hi: 1.0,
            a_lo: 1.0,
            t_min: Some(20.0),
        }],
    };
    assert!(verify_margin(1.0, 10.0, &inputs, &MarginOpts::default(), &ctx).is_err());
}

#[test]
fn invalid_domains_are_rejected() {
    let ctx = ctx();
    let inputs = reciprocal_inputs();
    assert!(verify_margin(10.0, 1.0, &inputs, &MarginOpts::default(), &ctx).is_err());
    assert!(verify_margin(-1.0, 1.0, &inputs, &MarginOpts::default(), &ctx).is_err());
}

#[test]
fn rolling_certificate_hash_roundtrip() {
    let ctx = ctx();
    let inputs = reciprocal_inputs();
    let opts = MarginOpts {
        delta_target: 0.5,
        mesh_initial: 1,
        mesh_max: 1000,
        depth_max: 40,
    };
    let verdict = verify_margin(1.0, 10.0, &inputs, &opts, &ctx).expect("verify");
    let report = margin_report(1.0, 10.0, &inputs, &opts, &verdict, &ctx).expect("report");
    assert!(report.result.pass);
    assert_eq!(report.mesh.intervals, 1);

    let doc: Value = serde_json::to_value(&report).expect("encode");
    assert!(verify_content_hash(&doc).expect("verify"));
}
