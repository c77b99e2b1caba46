//! Typed row decoders
//!
//! One decoder per routed code group. Each consumes name-keyed
//! [`RawRecord`]s and produces rows of the matching model table. The
//! agent and environment groups have their own modules ([`crate::agent`],
//! [`crate::environment`]); everything here decodes with plain
//! field-by-name extraction.

use crate::error::DecodeError;
use crate::normalize::parse_elapsed;
use crate::record::RawRecord;
use provgraph_model::{
    DataNode, DataProcEdge, DataType, FuncLibEdge, FuncProcEdge, FunctionNode, LibraryNode,
    ProcDataEdge, ProcProcEdge, ProcessNode, ProcessType,
};
use serde_json::Value;

/// Fallback for library rows written before the tool recorded load
/// provenance.
const WHERE_LOADED_FALLBACK: &str = "unknown";

/// Decode process-node rows.
///
/// # Errors
/// [`DecodeError::ElapsedTime`] when a string-encoded elapsed time
/// survives the locale repair heuristic unparsed.
pub fn process_rows(records: Vec<RawRecord>) -> Result<Vec<ProcessNode>, DecodeError> {
    records
        .into_iter()
        .map(|r| {
            let elapsed = match r.raw("elapsedTime") {
                Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
                Some(Value::String(s)) => {
                    parse_elapsed(s).ok_or_else(|| DecodeError::ElapsedTime {
                        id: r.id.clone(),
                        value: s.clone(),
                    })?
                }
                _ => {
                    tracing::debug!(id = %r.id, "elapsed time absent or null; defaulting to 0");
                    0.0
                }
            };
            Ok(ProcessNode {
                name: r.str_or_default("name"),
                process_type: ProcessType::from_label(&r.str_or_default("type")),
                elapsed,
                script_num: r.opt_int("scriptNum"),
                start_line: r.opt_int("startLine"),
                start_col: r.opt_int("startCol"),
                end_line: r.opt_int("endLine"),
                end_col: r.opt_int("endCol"),
                id: r.id,
            })
        })
        .collect()
}

/// Decode data-node rows.
#[must_use]
pub fn data_rows(records: Vec<RawRecord>) -> Vec<DataNode> {
    records
        .into_iter()
        .map(|r| DataNode {
            name: r.str_or_default("name"),
            value: r.str_or_default("value"),
            val_type: r.str_or_default("valType"),
            data_type: DataType::from_label(&r.str_or_default("type")),
            scope: r.opt_str("scope"),
            from_env: r.bool_flag("fromEnv"),
            hash: r.opt_str("hash"),
            timestamp: r.str_or_default("timestamp"),
            location: r.opt_str("location"),
            id: r.id,
        })
        .collect()
}

/// Decode function-node rows.
#[must_use]
pub fn function_rows(records: Vec<RawRecord>) -> Vec<FunctionNode> {
    records
        .into_iter()
        .map(|r| FunctionNode {
            name: r.str_or_default("name"),
            id: r.id,
        })
        .collect()
}

/// Decode library rows, projecting to the fixed column subset.
///
/// `whereLoaded` was introduced by a later producer version; older rows
/// get the documented `"unknown"` fallback rather than an error.
#[must_use]
pub fn library_rows(records: Vec<RawRecord>) -> Vec<LibraryNode> {
    records
        .into_iter()
        .map(|r| LibraryNode {
            name: r.str_or_default("name"),
            version: r.str_or_default("version"),
            where_loaded: r
                .opt_str("whereLoaded")
                .unwrap_or_else(|| WHERE_LOADED_FALLBACK.to_string()),
            id: r.id,
        })
        .collect()
}

/// Decode process→process (control flow) edges.
#[must_use]
pub fn proc_proc_rows(records: Vec<RawRecord>) -> Vec<ProcProcEdge> {
    records
        .into_iter()
        .map(|r| ProcProcEdge {
            informant: r.str_or_default("informant"),
            informed: r.str_or_default("informed"),
            id: r.id,
        })
        .collect()
}

/// Decode process→data (output) edges.
#[must_use]
pub fn proc_data_rows(records: Vec<RawRecord>) -> Vec<ProcDataEdge> {
    records
        .into_iter()
        .map(|r| ProcDataEdge {
            activity: r.str_or_default("activity"),
            entity: r.str_or_default("entity"),
            id: r.id,
        })
        .collect()
}

/// Decode data→process (input) edges.
#[must_use]
pub fn data_proc_rows(records: Vec<RawRecord>) -> Vec<DataProcEdge> {
    records
        .into_iter()
        .map(|r| DataProcEdge {
            entity: r.str_or_default("entity"),
            activity: r.str_or_default("activity"),
            id: r.id,
        })
        .collect()
}

/// Decode function→process edges.
#[must_use]
pub fn func_proc_rows(records: Vec<RawRecord>) -> Vec<FuncProcEdge> {
    records
        .into_iter()
        .map(|r| FuncProcEdge {
            entity: r.str_or_default("entity"),
            activity: r.str_or_default("activity"),
            id: r.id,
        })
        .collect()
}

/// Decode function→library edges.
///
/// Older producers name the library endpoint `collection` (the generic
/// membership relation); accept both spellings.
#[must_use]
pub fn func_lib_rows(records: Vec<RawRecord>) -> Vec<FuncLibEdge> {
    records
        .into_iter()
        .map(|r| FuncLibEdge {
            entity: r.str_or_default("entity"),
            library: r
                .opt_str("library")
                .or_else(|| r.opt_str("collection"))
                .unwrap_or_default(),
            id: r.id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(id: &str, fields: serde_json::Value) -> RawRecord {
        let Value::Object(map) = fields else { panic!("fields must be an object") };
        let fields: IndexMap<String, Value> = map.into_iter().collect();
        RawRecord {
            id: id.to_string(),
            fields,
        }
    }

    #[test]
    fn process_row_with_numeric_elapsed() {
        let rows = process_rows(vec![record(
            "p1",
            json!({
                "name": "x <- 1", "type": "Operation", "elapsedTime": 0.5,
                "scriptNum": 1, "startLine": 3, "startCol": 1,
                "endLine": 3, "endCol": 6
            }),
        )])
        .unwrap();
        assert_eq!(rows[0].id, "p1");
        assert_eq!(rows[0].process_type, ProcessType::Operation);
        assert_eq!(rows[0].elapsed, 0.5);
        assert_eq!(rows[0].start_line, Some(3));
    }

    #[test]
    fn process_row_with_null_positions() {
        let rows = process_rows(vec![record(
            "p1",
            json!({"name": "s", "type": "Start", "elapsedTime": "0.441", "scriptNum": null}),
        )])
        .unwrap();
        assert_eq!(rows[0].elapsed, 0.441);
        assert_eq!(rows[0].script_num, None);
        assert_eq!(rows[0].start_line, None);
    }

    #[test]
    fn absent_or_null_elapsed_time_defaults_to_zero() {
        let rows = process_rows(vec![
            record("p1", json!({"name": "s", "type": "Operation"})),
            record("p2", json!({"name": "t", "type": "Operation", "elapsedTime": null})),
        ])
        .unwrap();
        assert_eq!(rows[0].elapsed, 0.0);
        assert_eq!(rows[1].elapsed, 0.0);
    }

    #[test]
    fn unrepairable_elapsed_time_is_an_error() {
        let err = process_rows(vec![record(
            "p9",
            json!({"name": "s", "type": "Operation", "elapsedTime": "fast"}),
        )])
        .unwrap_err();
        assert!(matches!(err, DecodeError::ElapsedTime { id, .. } if id == "p9"));
    }

    #[test]
    fn data_row_fields() {
        let rows = data_rows(vec![record(
            "d1",
            json!({
                "name": "x", "value": "7", "valType": "{\"container\":\"vector\"}",
                "type": "Data", "scope": "R_GlobalEnv", "fromEnv": "FALSE",
                "hash": null, "timestamp": "2024-01-01T00:00:00", "location": null
            }),
        )]);
        assert_eq!(rows[0].data_type, DataType::Data);
        assert_eq!(rows[0].scope.as_deref(), Some("R_GlobalEnv"));
        assert!(!rows[0].from_env);
        assert_eq!(rows[0].hash, None);
    }

    #[test]
    fn library_row_fallback_for_missing_where_loaded() {
        let rows = library_rows(vec![
            record("l1", json!({"name": "ggplot2", "version": "3.5.0", "whereLoaded": "script"})),
            record("l2", json!({"name": "base", "version": "4.3.1"})),
        ]);
        assert_eq!(rows[0].where_loaded, "script");
        assert_eq!(rows[1].where_loaded, "unknown");
    }

    #[test]
    fn func_lib_edge_accepts_collection_spelling() {
        let rows = func_lib_rows(vec![
            record("m1", json!({"entity": "f1", "library": "l1"})),
            record("m2", json!({"collection": "l2", "entity": "f2"})),
        ]);
        assert_eq!(rows[0].library, "l1");
        assert_eq!(rows[1].library, "l2");
        assert_eq!(rows[1].entity, "f2");
    }
}
