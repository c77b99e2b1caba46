//! Environment and script-history decoding
//!
//! The environment record is a flat label→value object, except that the
//! producing tool also nests the script history inside it: the main
//! script's path/timestamp plus parallel lists of sourced-script paths,
//! timestamps, and (in later versions) hashes. The environment table
//! keeps only the scalar labels; the sourced-script fields are excluded
//! and reassembled here into ordered [`ScriptEntry`] rows, main script
//! first.

use crate::record::scalar_to_string;
use indexmap::IndexMap;
use provgraph_model::{Environment, ScriptEntry};
use serde_json::Value;

/// Environment label of the main script path.
const SCRIPT: &str = "script";
/// Environment label of the main script timestamp.
const SCRIPT_TIMESTAMP: &str = "scriptTimeStamp";
/// Environment label of the main script hash (later producers only).
const SCRIPT_HASH: &str = "scriptHash";

/// The nested sourced-script fields excluded from the environment table.
const SOURCED_FIELDS: [&str; 3] = [
    "sourcedScripts",
    "sourcedScriptTimeStamps",
    "sourcedScriptHashes",
];

/// Transpose the environment record into ordered label/value pairs,
/// excluding the sourced-script history fields.
#[must_use]
pub fn environment_pairs(env: &Value) -> Environment {
    let Value::Object(map) = env else {
        return Environment::default();
    };
    let mut pairs = IndexMap::new();
    for (label, value) in map {
        if SOURCED_FIELDS.contains(&label.as_str()) {
            continue;
        }
        if let Some(text) = scalar_to_string(value) {
            pairs.insert(label.clone(), text);
        } else if !value.is_null() {
            tracing::debug!(label = %label, "skipping non-scalar environment field");
        }
    }
    Environment::from_pairs(pairs)
}

/// A list-valued field: the tool emits a JSON array, except that
/// single-element lists arrive unboxed as a bare scalar.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(scalar) => scalar_to_string(scalar).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Build the ordered script list: the main script, then one row per
/// sourced script zipped with its timestamp and hash.
///
/// Hashes are `""` wherever the producing tool did not record them. A
/// sourced list that is empty, or a single empty-string placeholder,
/// contributes no rows.
#[must_use]
pub fn script_history(env: &Value) -> Vec<ScriptEntry> {
    let Value::Object(map) = env else {
        return Vec::new();
    };
    let Some(main_path) = map.get(SCRIPT).and_then(scalar_to_string) else {
        return Vec::new();
    };

    let mut scripts = vec![ScriptEntry {
        path: main_path,
        timestamp: map
            .get(SCRIPT_TIMESTAMP)
            .and_then(scalar_to_string)
            .unwrap_or_default(),
        hash: map
            .get(SCRIPT_HASH)
            .and_then(scalar_to_string)
            .unwrap_or_default(),
    }];

    let sourced = string_list(map.get(SOURCED_FIELDS[0]));
    if sourced.is_empty() || (sourced.len() == 1 && sourced[0].is_empty()) {
        return scripts;
    }
    let timestamps = string_list(map.get(SOURCED_FIELDS[1]));
    let hashes = string_list(map.get(SOURCED_FIELDS[2]));

    for (i, path) in sourced.into_iter().enumerate() {
        scripts.push(ScriptEntry {
            path,
            timestamp: timestamps.get(i).cloned().unwrap_or_default(),
            hash: hashes.get(i).cloned().unwrap_or_default(),
        });
    }
    scripts
}
