use wce_band::refine::{refine_min_abs, MinBounds, RefineOpts, RunBudget};
use wce_band::window::Window;
use wce_core::ctx::NumCtx;

fn run_with_budget(max_parts: usize) -> MinBounds {
    let ctx = NumCtx::default();
    let window = Window::gauss_notch(0.7, 1.3).expect("window");
    let opts = RefineOpts {
        tol: 1e-14,
        max_parts,
    };
    refine_min_abs(
        |a, b, ctx| window.abs_enclosure(a, b, ctx),
        0.4,
        1.8,
        &opts,
        &RunBudget::default(),
        &ctx,
    )
    .expect("refine")
}

#[test]
fn global_lo_is_monotone_in_budget() {
    let budgets = [2usize, 8, 32, 128, 512, 2048];
    let mut previous: Option<MinBounds> = None;
    for budget in budgets {
        let bounds = run_with_budget(budget);
        assert!(bounds.lo <= bounds.hi);
        assert!(bounds.lo >= 0.0);
        if let Some(prev) = previous {
            assert!(
                bounds.lo >= prev.lo,
                "lower bound regressed: {} -> {} at budget {}",
                prev.lo,
                bounds.lo,
                budget
            );
            assert!(
                bounds.hi <= prev.hi,
                "upper bound loosened: {} -> {} at budget {}",
                prev.hi,
                bounds.hi,
                budget
            );
        }
        previous = Some(bounds);
    }
}

#[test]
fn rerun_is_deterministic() {
    let first = run_with_budget(256);
    let second = run_with_budget(256);
    assert_eq!(first, second);
}

#[test]
fn budget_exhaustion_reports_unresolved() {
    let bounds = run_with_budget(2);
    assert!(!bounds.resolved);
    assert!(bounds.parts <= 2);
}

#[test]
fn generous_budget_resolves() {
    let ctx = NumCtx::default();
    let window = Window::gauss_notch(0.7, 1.3).expect("window");
    let opts = RefineOpts {
        tol: 1e-6,
        max_parts: 65536,
    };
    let bounds = refine_min_abs(
        |a, b, ctx| window.abs_enclosure(a, b, ctx),
        0.4,
        1.8,
        &opts,
        &RunBudget::default(),
        &ctx,
    )
    .expect("refine");
    assert!(bounds.resolved);
    assert!(bounds.hi - bounds.lo <= 1e-6);
}
