use std::path::Path;

use fock_core::{load_config, ErrorInfo, FockError};
use serde::{Deserialize, Serialize};

/// Knobs for matrix assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOpts {
    /// Worker threads; `0` lets rayon pick.
    pub threads: usize,
    /// Discard normal-ordered strings whose last operator is not a creation
    /// operator, since they annihilate the vacuum.
    pub require_trailing_creation: bool,
    /// Skip coefficients with magnitude below this value.
    pub drop_tolerance: Option<f64>,
}

impl Default for AssemblyOpts {
    fn default() -> Self {
        Self {
            threads: 0,
            require_trailing_creation: true,
            drop_tolerance: None,
        }
    }
}

impl AssemblyOpts {
    /// Rejects a negative or non-finite drop tolerance.
    pub fn validate(&self) -> Result<(), FockError> {
        if let Some(tolerance) = self.drop_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(FockError::Config(
                    ErrorInfo::new("invalid-tolerance", "drop tolerance must be finite and >= 0")
                        .with_context("drop_tolerance", tolerance),
                ));
            }
        }
        Ok(())
    }
}

/// Loads and validates [`AssemblyOpts`] from a YAML or JSON file.
pub fn load_assembly_opts(path: &Path) -> Result<AssemblyOpts, FockError> {
    let opts: AssemblyOpts = load_config(path)?;
    opts.validate()?;
    Ok(opts)
}
