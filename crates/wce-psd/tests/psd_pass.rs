use wce_core::ctx::NumCtx;
use wce_psd::atoms::{atom_profile, make_atoms, Atom};
use wce_psd::chol::CholOpts;
use wce_psd::gram::{build_gram, GramOpts};
use wce_psd::report::{certify_psd, PsdOpts};

#[test]
fn distinct_atoms_certify_directly() {
    let ctx = NumCtx::default();
    let opts = PsdOpts {
        atoms: 4,
        sigma_min: 0.8,
        sigma_max: 2.0,
        k0_min: 0.5,
        k0_max: 1.5,
        gram: GramOpts {
            grid_half_width: 12.0,
            nodes: 1025,
            eta: 0.0,
            threads: 2,
        },
        chol: CholOpts::default(),
    };
    let report = certify_psd(&opts, &ctx).expect("certify");
    assert!(report.result.chol_success);
    assert_eq!(report.result.rank, 4);
    assert!(report.psd_verified);
    assert!(report.result.min_diag_l.is_some());
    assert!(report.result.pivot_index.is_none());
}

#[test]
fn atom_grid_covers_the_rectangle() {
    let atoms = make_atoms(5, 1.0, 2.0, 0.5, 1.5).expect("atoms");
    assert_eq!(atoms.len(), 5);
    for atom in &atoms {
        assert!(atom.sigma >= 1.0 && atom.sigma <= 2.0);
        assert!(atom.k0 >= 0.5 && atom.k0 <= 1.5);
    }
    assert!(make_atoms(0, 1.0, 2.0, 0.5, 1.5).is_err());
    assert!(make_atoms(2, -1.0, 2.0, 0.5, 1.5).is_err());
}

#[test]
fn atom_profile_vanishes_at_the_notch() {
    let atom = Atom { sigma: 1.0, k0: 0.7 };
    assert_eq!(atom_profile(0.7, &atom), 0.0);
    assert!(atom_profile(0.0, &atom) > 0.0);
}

#[test]
fn gram_build_is_thread_count_invariant() {
    let atoms = make_atoms(3, 0.8, 1.6, 0.6, 1.2).expect("atoms");
    let serial = build_gram(
        &atoms,
        &GramOpts {
            grid_half_width: 8.0,
            nodes: 257,
            eta: 0.0,
            threads: 1,
        },
    )
    .expect("gram");
    let parallel = build_gram(
        &atoms,
        &GramOpts {
            grid_half_width: 8.0,
            nodes: 257,
            eta: 0.0,
            threads: 4,
        },
    )
    .expect("gram");
    assert_eq!(serial, parallel);
    assert_eq!(serial.asymmetry(), 0.0);
}

#[test]
fn diagonal_entries_are_positive() {
    let atoms = make_atoms(3, 0.8, 1.6, 0.6, 1.2).expect("atoms");
    let gram = build_gram(
        &atoms,
        &GramOpts {
            grid_half_width: 8.0,
            nodes: 257,
            eta: 0.0,
            threads: 1,
        },
    )
    .expect("gram");
    for i in 0..gram.n() {
        assert!(gram.get(i, i) > 0.0);
    }
}
