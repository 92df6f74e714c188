use fock_algebra::Spin;
use fock_basis::{Basis, BasisFilter, BasisKind};
use proptest::prelude::*;

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

fn assert_bijection(basis: &Basis) {
    for (index, element) in basis.elements().iter().enumerate() {
        assert!(basis.contains(element));
        assert_eq!(basis.index(element), index);
        assert_eq!(basis.position(element), Some(index));
    }
}

proptest! {
    #[test]
    fn fermionic_cardinality_matches_binomial(orbitals in 0usize..6, particles in 0usize..5) {
        let basis = Basis::fermionic(orbitals, particles, true).expect("basis");
        prop_assert_eq!(basis.len(), binomial(2 * orbitals, particles));
        assert_bijection(&basis);
    }

    #[test]
    fn bosonic_cardinality_matches_multiset_count(orbitals in 1usize..6, particles in 0usize..5) {
        let basis = Basis::bosonic(orbitals, particles).expect("basis");
        prop_assert_eq!(basis.len(), binomial(orbitals + particles - 1, particles));
        assert_bijection(&basis);
    }

    #[test]
    fn generic_accumulates_every_sub_count(orbitals in 1usize..5, particles in 0usize..4) {
        let basis = Basis::generic(orbitals, particles).expect("basis");
        let expected: usize = (0..=particles)
            .map(|count| binomial(orbitals + count - 1, count))
            .sum();
        prop_assert_eq!(basis.len(), expected);
        assert_bijection(&basis);
    }

    #[test]
    fn elements_are_non_decreasing_in_orbital(orbitals in 1usize..5, particles in 1usize..4) {
        let basis = Basis::fermionic(orbitals, particles, false).expect("basis");
        for element in basis.elements() {
            prop_assert!(element.windows(2).all(|pair| pair[0].orbital() < pair[1].orbital()));
            prop_assert!(element.iter().all(|op| op.is_creation() && op.is_fermion()));
        }
    }
}

#[test]
fn total_spin_zero_keeps_four_of_six() {
    let full = Basis::fermionic(2, 2, true).expect("basis");
    assert_eq!(full.len(), 6);
    let filtered = Basis::new(
        BasisKind::Fermionic {
            allow_double_occupancy: true,
        },
        2,
        2,
        BasisFilter::total_spin(0),
    )
    .expect("basis");
    assert_eq!(filtered.len(), 4);
    assert_bijection(&filtered);
    for element in filtered.elements() {
        assert!(full.contains(element));
    }
}

#[test]
fn positive_total_spin_keeps_single_down_elements() {
    let basis = Basis::new(
        BasisKind::Fermionic {
            allow_double_occupancy: true,
        },
        2,
        1,
        BasisFilter::total_spin(1),
    )
    .expect("basis");
    assert_eq!(basis.len(), 2);
    for element in basis.elements() {
        assert_eq!(element.len(), 1);
        assert_eq!(element[0].spin(), Spin::Down);
    }
}

#[test]
fn generic_filter_applies_at_every_depth() {
    let basis = Basis::new(
        BasisKind::Generic,
        3,
        2,
        BasisFilter::from_fn("non-empty", |element| !element.is_empty()),
    )
    .expect("basis");
    // 3 singles + 6 pairs, the vacuum is rejected
    assert_eq!(basis.len(), 9);
    assert!(!basis.contains(&[]));
}

#[test]
fn bases_compare_by_shape_and_order() {
    let a = Basis::fermionic(3, 2, true).expect("basis");
    let mut b = Basis::fermionic(3, 2, true).expect("basis");
    assert_eq!(a, b);
    b.sort_by(|x, y| y.cmp(x));
    assert_ne!(a, b);
}
