//! End-to-end scenarios: generate, store, reload, transform.

use chromath_core::{
    generate_kernel_grid, generate_semiprimes, is_prime, CoordRange, Pairing, SemiprimeOptions,
    Store, Transform, TransformError, TransformKind,
};
use pretty_assertions::assert_eq;

#[test]
fn five_semiprimes_golden() {
    let seq = generate_semiprimes(5, &SemiprimeOptions::default());
    assert_eq!(seq, vec![4, 6, 9, 10, 14]);
}

#[test]
fn cartesian_pairing_differs_from_triangular() {
    let opts = SemiprimeOptions {
        pairing: Pairing::Cartesian,
        ..SemiprimeOptions::default()
    };
    assert_eq!(generate_semiprimes(5, &opts), vec![4, 6, 10, 14, 22]);
}

#[test]
fn default_sequence_is_sorted_and_factorable() {
    let seq = generate_semiprimes(1000, &SemiprimeOptions::default());
    assert_eq!(seq.len(), 1000);
    assert!(seq.windows(2).all(|w| w[0] < w[1]));
    for &n in &seq {
        let p = (2..=n).find(|d| n % d == 0).unwrap();
        assert!(is_prime(p) && is_prime(n / p), "{n} is not a semiprime");
        assert!(n / p < 10_000);
    }
}

#[test]
fn three_by_three_kernel_grid() {
    let grid = generate_kernel_grid(CoordRange::new(-1, 2), CoordRange::new(-1, 2)).unwrap();
    assert_eq!(grid.shape(), (3, 3));
    assert_eq!(grid.at(0, 0), Some(0));
    assert_eq!(grid.at(1, 1), Some(1));
    assert_eq!(grid.at(-1, 1), Some(1));
}

#[test]
fn generate_store_reload_transform() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();

    let seq = generate_semiprimes(50, &SemiprimeOptions::default());
    let grid = generate_kernel_grid(CoordRange::new(-50, 50), CoordRange::new(-50, 50)).unwrap();
    store.save_semiprimes(&seq).unwrap();
    store.save_kernel_grid(&grid).unwrap();

    let seq_back = store.load_semiprimes().unwrap();
    let grid_back = store.load_kernel_grid().unwrap();
    assert_eq!(seq_back, seq);
    assert_eq!(grid_back, grid);

    let residues = Transform::Mod { modulus: 7 }.apply_sequence(&seq_back).unwrap();
    assert!(residues.iter().all(|&r| r < 7));

    let reduced = Transform::GridMod { modulus: 2 }.apply_grid(&grid_back).unwrap();
    assert_eq!(reduced.shape(), (100, 100));
    assert!(reduced.cells().iter().all(|&v| v < 2));
}

#[test]
fn transforms_always_start_from_original_data() {
    let seq = generate_semiprimes(20, &SemiprimeOptions::default());
    let first = Transform::Div { base: 3 }.apply_sequence(&seq).unwrap();
    let second = Transform::Div { base: 5 }.apply_sequence(&seq).unwrap();
    let expected: Vec<u64> = seq.iter().map(|v| v / 5).collect();
    assert_eq!(second, expected);
    assert_ne!(first, second);
}

#[test]
fn bad_parameters_leave_data_untouched() {
    let seq = generate_semiprimes(10, &SemiprimeOptions::default());
    let before = seq.clone();

    let err = Transform::from_raw(TransformKind::Mod, &["abc"]).unwrap_err();
    assert_eq!(err.param, "modulus");

    let err = Transform::Mod { modulus: 0 }.apply_sequence(&seq).unwrap_err();
    assert!(matches!(err, TransformError::Param(ref p) if p.is_domain_error()));
    assert_eq!(seq, before);
}

#[test]
fn linear_mod10_over_kernel_grid() {
    let grid = generate_kernel_grid(CoordRange::new(0, 4), CoordRange::new(0, 4)).unwrap();
    let out = Transform::from_raw(TransformKind::LinearMod10, &["3", "-2"])
        .unwrap()
        .apply_grid(&grid)
        .unwrap();
    // Row 1: (3 - 2c) mod 10 for c = 0..4.
    assert_eq!(out.row(1), Some(&[3, 1, 9, 7][..]));
}
