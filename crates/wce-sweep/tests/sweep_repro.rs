use serde_json::Value;
use wce_band::refine::RefineOpts;
use wce_cert::hash::verify_content_hash;
use wce_core::ctx::NumCtx;
use wce_sweep::dispatch::{run_sweep, SweepOpts};
use wce_sweep::grid::{expand_points, AxisSpec, RangeSpec, SweepStrategy};
use wce_sweep::pipeline::PointOpts;
use wce_sweep::report::SweepPlan;
use wce_sweep::sources::BandPlanSpec;

fn small_plan() -> SweepPlan {
    SweepPlan {
        strategy: SweepStrategy::Grid {
            sigma: AxisSpec {
                min: 1.0,
                max: 1.0,
                step: 1.0,
            },
            k0: AxisSpec {
                min: 0.8,
                max: 1.2,
                step: 0.4,
            },
        },
        seed: 7,
        point: PointOpts {
            bands: BandPlanSpec::Uniform {
                left: 0.4,
                right: 1.6,
                count: 3,
            },
            refine: RefineOpts {
                tol: 1e-9,
                max_parts: 4096,
            },
            t0: 1e3,
            a_prime: 1.2762,
            tail_k: 3,
            prime_block_cap: 0.01,
            grid_points: 6000,
            m2_hi: 1e-3,
            deadline_ms: None,
        },
    }
}

#[test]
fn sweep_is_reproducible() {
    let ctx = NumCtx::default();
    let opts = SweepOpts { concurrency: 2 };
    let first = run_sweep(&small_plan(), &opts, &ctx).expect("sweep");
    let second = run_sweep(&small_plan(), &opts, &ctx).expect("sweep");

    assert_eq!(first.plan_hash, second.plan_hash);
    assert_eq!(first.points.len(), 2);
    assert_eq!(first.points.len(), second.points.len());
    for (a, b) in first.points.iter().zip(second.points.iter()) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.lhs_total, b.lhs_total);
        assert_eq!(a.epsilon_eff, b.epsilon_eff);
        assert_eq!(a.gap, b.gap);
        assert_eq!(a.pass, b.pass);
    }
    assert!(first.failures.is_empty());

    let best = first.best.as_ref().expect("best point");
    // Best is the maximal exact gap over completed points.
    for point in &first.points {
        let gap: f64 = point.gap.parse().expect("gap");
        let best_gap: f64 = best.gap.parse().expect("gap");
        assert!(best_gap >= gap);
    }

    let doc: Value = serde_json::to_value(&first).expect("encode");
    assert!(verify_content_hash(&doc).expect("verify"));
}

#[test]
fn grid_expansion_is_inclusive() {
    let strategy = SweepStrategy::Grid {
        sigma: AxisSpec {
            min: 0.5,
            max: 1.0,
            step: 0.25,
        },
        k0: AxisSpec {
            min: 1.0,
            max: 1.0,
            step: 1.0,
        },
    };
    let points = expand_points(&strategy, 0).expect("expand");
    assert_eq!(points.len(), 3);
    assert!((points[0].sigma - 0.5).abs() < 1e-12);
    assert!((points[2].sigma - 1.0).abs() < 1e-12);
}

#[test]
fn lhs_expansion_is_seed_deterministic() {
    let strategy = SweepStrategy::Lhs {
        sigma: RangeSpec { min: 0.5, max: 2.0 },
        k0: RangeSpec { min: 0.5, max: 1.5 },
        samples: 8,
    };
    let first = expand_points(&strategy, 42).expect("expand");
    let second = expand_points(&strategy, 42).expect("expand");
    assert_eq!(first, second);
    assert_eq!(first.len(), 8);
    for point in &first {
        assert!(point.sigma >= 0.5 && point.sigma <= 2.0);
        assert!(point.k0 >= 0.5 && point.k0 <= 1.5);
    }

    let other = expand_points(&strategy, 43).expect("expand");
    assert_ne!(first, other);
}

#[test]
fn degenerate_axes_are_rejected() {
    let strategy = SweepStrategy::Grid {
        sigma: AxisSpec {
            min: 1.0,
            max: 0.5,
            step: 0.1,
        },
        k0: AxisSpec {
            min: 1.0,
            max: 1.0,
            step: 1.0,
        },
    };
    assert!(expand_points(&strategy, 0).is_err());

    let lhs = SweepStrategy::Lhs {
        sigma: RangeSpec { min: 0.5, max: 2.0 },
        k0: RangeSpec { min: 0.5, max: 1.5 },
        samples: 0,
    };
    assert!(expand_points(&lhs, 0).is_err());
}
