#![deny(missing_docs)]
#![doc = "Occupation-number bases over ladder operators."]

/// Basis generation and element lookup.
pub mod basis;
/// Declarative basis descriptions.
pub mod config;
/// Element predicates applied during generation.
pub mod filter;

pub use basis::{Basis, BasisElement, BasisKind};
pub use config::{load_basis_spec, BasisSpec};
pub use filter::{BasisFilter, FilterSpec};
