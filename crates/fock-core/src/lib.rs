#![deny(missing_docs)]
#![doc = "Core error surface, scalar types and canonical serialization helpers shared by the fock crates."]

pub mod errors;
pub mod hash;
pub mod serde;
mod types;

pub use errors::{ErrorInfo, FockError};
pub use hash::stable_hash_string;
pub use self::serde::{from_json_slice, from_yaml_slice, load_config, to_canonical_json_bytes};
pub use types::{approx_eq, imag, real, Coefficient, DEFAULT_TOLERANCE};

pub use num_complex::Complex64;
