#![deny(missing_docs)]
#![doc = "Hamiltonian matrix assembly over occupation-number bases."]

/// Matrix backends.
pub mod matrix;
/// The model trait and the parallel assembler.
pub mod model;
/// Reference lattice models and their declarative selection.
pub mod models;
/// Assembly options and their loader.
pub mod opts;
/// Assembly summaries.
pub mod report;

pub use matrix::{CsrMatrix, HashSparseMatrix, SparseMatrix};
pub use model::{assemble, Hamiltonian, Model};
pub use models::{HeisenbergChain, HubbardChain, LinearChain, ModelSpec};
pub use opts::{load_assembly_opts, AssemblyOpts};
pub use report::AssemblyReport;
