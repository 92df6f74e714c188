//! Canonical JSON and YAML helpers used for configs and reports.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{ErrorInfo, FockError};

fn serde_error(code: &str, err: impl ToString) -> FockError {
    FockError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Serializes a value into pretty JSON bytes with a trailing newline.
///
/// Struct fields serialize in declaration order and every map that flows
/// through this helper is either a `BTreeMap` or an explicitly sorted vector,
/// so equal values always produce identical bytes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, FockError> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|err| serde_error("json-encode", err))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decodes a JSON payload.
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FockError> {
    serde_json::from_slice(bytes).map_err(|err| serde_error("json-decode", err))
}

/// Decodes a YAML payload.
pub fn from_yaml_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FockError> {
    serde_yaml::from_slice(bytes).map_err(|err| serde_error("yaml-decode", err))
}

/// Loads a config file, choosing the decoder from the file extension.
///
/// `.json` files are decoded as JSON, everything else as YAML.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, FockError> {
    let bytes = fs::read(path).map_err(|err| {
        FockError::Config(
            ErrorInfo::new("config-read", err.to_string()).with_context("path", path.display()),
        )
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        from_json_slice(&bytes)
    } else {
        from_yaml_slice(&bytes)
    }
}
