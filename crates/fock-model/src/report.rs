use serde::{Deserialize, Serialize};

/// Summary of one assembly run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyReport {
    /// Model name.
    pub model: String,
    /// Basis size.
    pub dimension: usize,
    /// Matrix positions written.
    pub entries: usize,
    /// Strings dropped because they annihilate the vacuum.
    pub discarded_unphysical: usize,
    /// Strings that are not basis elements.
    pub outside_basis: usize,
    /// Strings dropped by the coefficient tolerance.
    pub below_tolerance: usize,
    /// Worker threads used.
    pub threads: usize,
    /// SHA-256 over the canonical JSON of the written entries in row-major
    /// order.
    pub hash: String,
}
