use std::fs;

use fock_basis::{load_basis_spec, Basis, BasisKind, BasisSpec, FilterSpec};
use tempfile::tempdir;

#[test]
fn yaml_spec_builds_filtered_basis() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("basis.yaml");
    fs::write(
        &path,
        "orbitals: 2\nparticles: 2\nkind:\n  type: fermionic\nfilter:\n  kind: total-spin\n  total: 0\n",
    )
    .expect("write spec");

    let spec = load_basis_spec(&path).expect("load spec");
    assert_eq!(
        spec.kind,
        BasisKind::Fermionic {
            allow_double_occupancy: true
        }
    );
    assert_eq!(spec.filter, FilterSpec::TotalSpin { total: 0 });
    let basis = Basis::from_spec(&spec).expect("basis");
    assert_eq!(basis.len(), 4);
}

#[test]
fn json_spec_defaults_kind_and_filter() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("basis.json");
    fs::write(&path, r#"{"orbitals": 3, "particles": 1}"#).expect("write spec");
    let spec = load_basis_spec(&path).expect("load spec");
    assert_eq!(
        spec,
        BasisSpec {
            orbitals: 3,
            particles: 1,
            kind: BasisKind::default(),
            filter: FilterSpec::AcceptAll,
        }
    );
    assert_eq!(Basis::from_spec(&spec).expect("basis").len(), 6);
}

#[test]
fn oversized_spec_is_rejected() {
    let spec = BasisSpec {
        orbitals: 40,
        particles: 1,
        kind: BasisKind::Bosonic,
        filter: FilterSpec::AcceptAll,
    };
    let err = Basis::from_spec(&spec).expect_err("40 orbitals do not fit");
    assert_eq!(err.code(), "too-many-orbitals");
    assert_eq!(err.info().context.get("orbitals").map(String::as_str), Some("40"));
}
