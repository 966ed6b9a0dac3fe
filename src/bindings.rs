//! Collecting supplied parameter values.
//!
//! The portal submits bindings as a flat key/value form; standalone runs
//! supply the same map through repeated `--param key=value` flags and an
//! optional YAML bindings file. Flags win over the file on conflict. The
//! values collected here are raw strings; coercion against the schema
//! happens at bind time.

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Parse one `key=value` flag. Used as a clap value parser, hence the
/// `String` error type.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

/// Load a flat key -> value map from a YAML bindings file.
///
/// Scalar values of any YAML type are accepted and carried as strings;
/// nested structures are rejected.
pub fn load_file(path: &Path) -> Result<HashMap<String, String>> {
    debug!("Loading parameter bindings from: {:?}", path);

    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open bindings file '{}'", path.display()))?;
    let raw: HashMap<String, serde_yaml::Value> = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse bindings file '{}'", path.display()))?;

    let mut bindings = HashMap::new();
    for (key, value) in raw {
        let text = match value {
            serde_yaml::Value::String(text) => text,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Null => String::new(),
            other => {
                return Err(eyre!(
                    "binding '{}' must be a scalar, got {:?}",
                    key,
                    other
                ))
            }
        };
        bindings.insert(key, text);
    }
    Ok(bindings)
}

/// Merge file-sourced bindings with command-line pairs; the command line
/// wins on conflicting keys.
pub fn merge(
    from_file: HashMap<String, String>,
    from_cli: &[(String, String)],
) -> HashMap<String, String> {
    let mut merged = from_file;
    for (key, value) in from_cli {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
