use fock_basis::Basis;
use fock_core::stable_hash_string;
use fock_model::{AssemblyOpts, HashSparseMatrix, HubbardChain, Model, SparseMatrix};
use proptest::prelude::*;

fn run(threads: usize, sites: usize, particles: usize) -> (HashSparseMatrix, String) {
    let basis = Basis::fermionic(sites, particles, true).expect("basis");
    let mut matrix = HashSparseMatrix::new();
    let opts = AssemblyOpts {
        threads,
        ..AssemblyOpts::default()
    };
    let report = HubbardChain::new(sites, 1.0, 3.0)
        .compute_matrix_elements_with(&basis, &mut matrix, &opts)
        .expect("assembly");
    (matrix, report.hash)
}

#[test]
fn thread_count_does_not_change_the_matrix() {
    let (serial, serial_hash) = run(1, 4, 2);
    let (parallel, parallel_hash) = run(4, 4, 2);
    assert_eq!(serial, parallel);
    assert_eq!(serial_hash, parallel_hash);
}

#[test]
fn report_hash_covers_sorted_entries() {
    let (matrix, hash) = run(3, 3, 2);
    let entries = matrix.entries_sorted();
    assert_eq!(entries.len(), matrix.len());
    assert!(entries.windows(2).all(|pair| (pair[0].0, pair[0].1) < (pair[1].0, pair[1].1)));
    assert_eq!(stable_hash_string(&entries).expect("hash"), hash);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn assembled_hubbard_matrices_are_hermitian(sites in 2usize..5, particles in 1usize..3) {
        let (matrix, _) = run(2, sites, particles);
        for (row, col, value) in matrix.iter() {
            prop_assert_eq!(matrix.get(col, row), value.conj());
        }
    }
}
