use std::path::Path;

use fock_core::{load_config, FockError};
use serde::{Deserialize, Serialize};

use crate::basis::BasisKind;
use crate::filter::FilterSpec;

/// Declarative basis description.
///
/// ```yaml
/// orbitals: 4
/// particles: 2
/// kind:
///   type: fermionic
///   allow_double_occupancy: false
/// filter:
///   kind: total-spin
///   total: 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisSpec {
    /// Number of orbitals.
    pub orbitals: usize,
    /// Number of particles; an upper bound for generic bases.
    pub particles: usize,
    /// Enumeration strategy; fermionic with double occupancy by default.
    #[serde(default)]
    pub kind: BasisKind,
    /// Element filter; accept-all by default.
    #[serde(default)]
    pub filter: FilterSpec,
}

/// Loads a [`BasisSpec`] from a YAML or JSON file.
pub fn load_basis_spec(path: &Path) -> Result<BasisSpec, FockError> {
    load_config(path)
}
