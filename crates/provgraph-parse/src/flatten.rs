//! Flattener
//!
//! Parses the raw document text and unnests the section→id→record tree
//! into an ordered sequence of [`FlatEntry`] values. The producing tool
//! namespaces every key (`rdt:name`, `prov:activity`); both prefixes are
//! stripped here, before anything downstream interprets a key.

use crate::error::DecodeError;
use serde_json::{Map, Value};

/// Namespace prefixes the producing tool attaches to keys.
const NAMESPACE_PREFIXES: [&str; 2] = ["rdt:", "prov:"];

/// Top-level section holding namespace declarations, not entries.
const PREFIX_SECTION: &str = "prefix";

/// One unnested entry: a compound dotted path, the trailing identifier
/// segment, and the record (or scalar) found there.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    /// Compound path, e.g. `activity.p1`
    pub key: String,
    /// Trailing identifier segment, e.g. `p1`
    pub id: String,
    /// The entry's record with all namespace prefixes stripped
    pub value: Value,
}

/// Strip the tool namespace prefix from one key, if present.
#[must_use]
pub fn strip_namespace(key: &str) -> &str {
    for prefix in NAMESPACE_PREFIXES {
        if let Some(rest) = key.strip_prefix(prefix) {
            return rest;
        }
    }
    key
}

/// Recursively strip namespace prefixes from every object key.
fn strip_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let stripped: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (strip_namespace(&k).to_string(), strip_keys(v)))
                .collect();
            Value::Object(stripped)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(strip_keys).collect()),
        other => other,
    }
}

/// Parse the document text and unnest it into flat entries.
///
/// An empty result means the document parsed but declared no entries;
/// the caller decides whether that is acceptable.
///
/// # Errors
/// [`DecodeError::MalformedInput`] when the text is not valid JSON or the
/// root is not an object.
pub fn flatten(text: &str) -> Result<Vec<FlatEntry>, DecodeError> {
    let root: Value = serde_json::from_str(text)?;
    let Value::Object(root) = strip_keys(root) else {
        return Err(DecodeError::MalformedInput {
            message: "document root is not an object".to_string(),
        });
    };

    let mut entries = Vec::new();
    for (section, value) in root {
        if section == PREFIX_SECTION {
            continue;
        }
        match value {
            Value::Object(records) => {
                for (id, record) in records {
                    entries.push(FlatEntry {
                        key: format!("{section}.{id}"),
                        id,
                        value: record,
                    });
                }
            }
            other => {
                // Top-level scalars are not entries; the format does not
                // define any, so just note and move on.
                tracing::debug!(section = %section, value = %other, "skipping non-object top-level value");
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn strips_both_namespace_prefixes() {
        assert_eq!(strip_namespace("rdt:name"), "name");
        assert_eq!(strip_namespace("prov:activity"), "activity");
        assert_eq!(strip_namespace("name"), "name");
    }

    #[test]
    fn unnests_sections_in_document_order() {
        let text = json!({
            "prefix": {"rdt": "http://example.org/rdt"},
            "activity": {
                "rdt:p1": {"rdt:name": "x <- 1", "rdt:type": "Operation"},
                "rdt:p2": {"rdt:name": "y <- 2", "rdt:type": "Operation"}
            },
            "entity": {
                "rdt:d1": {"rdt:name": "x", "rdt:type": "Data"}
            }
        })
        .to_string();

        let entries = flatten(&text).unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["activity.p1", "activity.p2", "entity.d1"]);
        assert_eq!(entries[0].id, "p1");
        assert_eq!(entries[0].value["name"], json!("x <- 1"));
    }

    #[test]
    fn prefixes_are_stripped_at_every_depth() {
        let text = json!({
            "agent": {
                "rdt:a1": {"rdt:args": {"rdt:names": ["snapshot.size"]}}
            }
        })
        .to_string();

        let entries = flatten(&text).unwrap();
        assert_eq!(entries[0].value["args"]["names"], json!(["snapshot.size"]));
    }

    #[test]
    fn invalid_json_is_malformed_input() {
        let err = flatten("{not json").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInput { .. }));
    }

    #[test]
    fn non_object_root_is_malformed_input() {
        let err = flatten("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInput { .. }));
    }

    #[test]
    fn empty_document_yields_no_entries() {
        assert!(flatten("{}").unwrap().is_empty());
        // A document with nothing but namespace declarations counts as
        // empty too.
        let text = json!({"prefix": {"rdt": "http://example.org/rdt"}}).to_string();
        assert!(flatten(&text).unwrap().is_empty());
    }
}
