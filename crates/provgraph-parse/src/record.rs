//! Name-keyed record assembly
//!
//! Converts a code group of flattened entries into [`RawRecord`]s whose
//! fields are looked up by name, never by position. The first entry of a
//! group is the reference schema; later entries whose field set disagrees
//! are a [`DecodeError::SchemaMismatch`] under strict decoding and a
//! recorded [`Warning::SchemaDrift`] under lenient decoding. The
//! transport's `"NA"` sentinel is normalized to null here and never
//! reaches typed rows.

use crate::builder::SchemaMode;
use crate::error::DecodeError;
use crate::flatten::FlatEntry;
use crate::route::Code;
use indexmap::IndexMap;
use provgraph_model::Warning;
use serde_json::Value;

/// The transport's missing-value sentinel.
const NA_SENTINEL: &str = "NA";

/// One entry as an ordered field-name→value record.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// The entry's original identifier
    pub id: String,
    /// Fields in document order, `"NA"` already normalized to null
    pub fields: IndexMap<String, Value>,
}

impl RawRecord {
    /// A field as text; null, absent, and non-scalar fields are `None`.
    #[must_use]
    pub fn opt_str(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(scalar_to_string)
    }

    /// A field as text, defaulting to the empty string.
    #[must_use]
    pub fn str_or_default(&self, name: &str) -> String {
        self.opt_str(name).unwrap_or_default()
    }

    /// A field as an integer; accepts numbers and numeric strings.
    #[must_use]
    pub fn opt_int(&self, name: &str) -> Option<i64> {
        match self.fields.get(name)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// A field as a flag; accepts JSON booleans and the tool's
    /// `"TRUE"`/`"FALSE"` strings. Absent fields are false.
    #[must_use]
    pub fn bool_flag(&self, name: &str) -> bool {
        match self.fields.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.trim(), "TRUE" | "true" | "T"),
            _ => false,
        }
    }

    /// The raw JSON value of a field.
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Render a scalar JSON value as text; objects, arrays, and null are
/// `None`.
#[must_use]
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn to_record(entry: FlatEntry) -> Result<RawRecord, DecodeError> {
    let FlatEntry { id, value, .. } = entry;
    let Value::Object(map) = value else {
        return Err(DecodeError::NotARecord { id });
    };
    let fields = map
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) if s == NA_SENTINEL => Value::Null,
                other => other,
            };
            (name, value)
        })
        .collect();
    Ok(RawRecord { id, fields })
}

/// Convert entries to records without schema validation.
///
/// Used for the agent group, whose records are legitimately
/// variable-shaped (the optional argument block).
///
/// # Errors
/// [`DecodeError::NotARecord`] when an entry is not a JSON object.
pub fn to_records(entries: Vec<FlatEntry>) -> Result<Vec<RawRecord>, DecodeError> {
    entries.into_iter().map(to_record).collect()
}

fn sorted_names(record: &RawRecord) -> Vec<&str> {
    let mut names: Vec<&str> = record.fields.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

fn required_names<'a>(record: &'a RawRecord, optional: &[&str]) -> Vec<&'a str> {
    let mut names: Vec<&str> = record
        .fields
        .keys()
        .map(String::as_str)
        .filter(|name| !optional.contains(name))
        .collect();
    names.sort_unstable();
    names
}

/// Assemble a code group into records, enforcing field-set agreement
/// against the group's first entry. Fields listed in the code's
/// [`Code::optional_fields`] are exempt from the check: their absence is
/// resolved downstream by fallback, never reported as a mismatch.
///
/// # Errors
/// [`DecodeError::NotARecord`] for non-object entries;
/// [`DecodeError::SchemaMismatch`] under [`SchemaMode::Strict`] when an
/// entry's required field names disagree with the reference entry. Under
/// [`SchemaMode::Lenient`] the disagreement becomes a
/// [`Warning::SchemaDrift`] and decoding continues name-keyed.
pub fn assemble(
    code: Code,
    entries: Vec<FlatEntry>,
    mode: SchemaMode,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<RawRecord>, DecodeError> {
    let records = to_records(entries)?;
    let Some(reference) = records.first() else {
        return Ok(records);
    };
    let optional = code.optional_fields();
    let expected = required_names(reference, optional);
    let reference_id = reference.id.clone();

    for record in &records[1..] {
        let found = required_names(record, optional);
        if found == expected {
            continue;
        }
        match mode {
            SchemaMode::Strict => {
                return Err(DecodeError::SchemaMismatch {
                    code: code.token().to_string(),
                    id: record.id.clone(),
                    reference: reference_id,
                    expected: sorted_names(reference).join(", "),
                    found: sorted_names(record).join(", "),
                });
            }
            SchemaMode::Lenient => {
                tracing::warn!(
                    code = code.token(),
                    id = %record.id,
                    "field set drifts from group reference"
                );
                warnings.push(Warning::SchemaDrift {
                    code: code.token().to_string(),
                    id: record.id.clone(),
                });
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn entry(id: &str, value: Value) -> FlatEntry {
        FlatEntry {
            key: format!("section.{id}"),
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn na_sentinel_becomes_null() {
        let records = to_records(vec![entry("p1", json!({"scriptNum": "NA", "name": "x"}))]).unwrap();
        assert_eq!(records[0].raw("scriptNum"), Some(&Value::Null));
        assert_eq!(records[0].opt_str("scriptNum"), None);
        assert_eq!(records[0].opt_str("name").as_deref(), Some("x"));
    }

    #[test]
    fn field_coercions() {
        let records = to_records(vec![entry(
            "d1",
            json!({"line": "12", "col": 3, "fromEnv": "TRUE", "flag": false}),
        )])
        .unwrap();
        let r = &records[0];
        assert_eq!(r.opt_int("line"), Some(12));
        assert_eq!(r.opt_int("col"), Some(3));
        assert!(r.bool_flag("fromEnv"));
        assert!(!r.bool_flag("flag"));
        assert!(!r.bool_flag("absent"));
    }

    #[test]
    fn strict_mode_rejects_field_set_disagreement() {
        let entries = vec![
            entry("p1", json!({"name": "a", "type": "Operation"})),
            entry("p2", json!({"name": "b"})),
        ];
        let mut warnings = Vec::new();
        let err = assemble(Code::Process, entries, SchemaMode::Strict, &mut warnings).unwrap_err();
        match err {
            DecodeError::SchemaMismatch { code, id, reference, .. } => {
                assert_eq!(code, "p");
                assert_eq!(id, "p2");
                assert_eq!(reference, "p1");
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
        assert!(warnings.is_empty());
    }

    #[test]
    fn lenient_mode_records_drift_and_continues() {
        let entries = vec![
            entry("p1", json!({"name": "a", "type": "Operation"})),
            entry("p2", json!({"name": "b"})),
        ];
        let mut warnings = Vec::new();
        let records = assemble(Code::Process, entries, SchemaMode::Lenient, &mut warnings).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            warnings,
            vec![Warning::SchemaDrift {
                code: "p".to_string(),
                id: "p2".to_string()
            }]
        );
    }

    #[test]
    fn field_order_differences_are_not_a_mismatch() {
        // Assembly is name-keyed; only the field *set* must agree.
        let entries = vec![
            entry("p1", json!({"name": "a", "type": "Operation"})),
            entry("p2", json!({"type": "Operation", "name": "b"})),
        ];
        let mut warnings = Vec::new();
        let records = assemble(Code::Process, entries, SchemaMode::Strict, &mut warnings).unwrap();
        assert_eq!(records.len(), 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn optional_fields_are_exempt_from_strict_agreement() {
        // whereLoaded only exists in newer library records; a group
        // mixing producer versions must still assemble strictly.
        let entries = vec![
            entry(
                "l1",
                json!({"name": "readr", "version": "2.1.5", "whereLoaded": "script"}),
            ),
            entry("l2", json!({"name": "base", "version": "4.3.1"})),
        ];
        let mut warnings = Vec::new();
        let records = assemble(Code::Library, entries, SchemaMode::Strict, &mut warnings).unwrap();
        assert_eq!(records.len(), 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn optional_field_exemption_still_enforces_required_fields() {
        let entries = vec![
            entry("l1", json!({"name": "readr", "version": "2.1.5"})),
            entry("l2", json!({"name": "base"})),
        ];
        let mut warnings = Vec::new();
        let err = assemble(Code::Library, entries, SchemaMode::Strict, &mut warnings).unwrap_err();
        assert!(matches!(err, DecodeError::SchemaMismatch { id, .. } if id == "l2"));
    }

    #[test]
    fn func_lib_endpoint_spellings_are_not_a_mismatch() {
        let entries = vec![
            entry("m1", json!({"collection": "l1", "entity": "f1"})),
            entry("m2", json!({"library": "l1", "entity": "f2"})),
        ];
        let mut warnings = Vec::new();
        let records = assemble(Code::FuncLib, entries, SchemaMode::Strict, &mut warnings).unwrap();
        assert_eq!(records.len(), 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn non_object_entry_is_not_a_record() {
        let err = to_records(vec![entry("p1", json!("just a string"))]).unwrap_err();
        assert!(matches!(err, DecodeError::NotARecord { id } if id == "p1"));
    }
}
