//! Agent and argument decoding
//!
//! Agent records mix plain scalars (tool name/version, format version)
//! with an optional argument block: three parallel arrays of names,
//! string values, and declared types describing how the collecting tool
//! was invoked. The block is split off before the scalars become an
//! [`AgentNode`] row; agents without a block contribute nothing to the
//! argument collection.

use crate::error::DecodeError;
use crate::record::{scalar_to_string, RawRecord};
use indexmap::IndexMap;
use provgraph_model::{AgentNode, ArgValue, ArgumentSet};
use serde_json::Value;

/// Field-name fragment marking argument sub-fields.
const ARGS_MARKER: &str = "args";

/// Decode the agent group into rows plus per-agent argument sets.
///
/// # Errors
/// [`DecodeError::ArgumentArity`] when an agent's three argument arrays
/// differ in length.
pub fn agent_rows(
    records: Vec<RawRecord>,
) -> Result<(Vec<AgentNode>, IndexMap<String, ArgumentSet>), DecodeError> {
    let mut agents = Vec::with_capacity(records.len());
    let mut arguments = IndexMap::new();

    for record in records {
        let mut fields = IndexMap::new();
        let mut args_block = ArgsBlock::default();

        for (name, value) in &record.fields {
            if name.contains(ARGS_MARKER) {
                args_block.take(name, value);
            } else if let Some(text) = scalar_to_string(value) {
                fields.insert(name.clone(), text);
            } else if !value.is_null() {
                tracing::debug!(agent = %record.id, field = %name, "skipping non-scalar agent field");
            }
        }

        if let Some(set) = args_block.zip(&record.id)? {
            arguments.insert(record.id.clone(), set);
        }
        agents.push(AgentNode {
            id: record.id,
            fields,
        });
    }
    Ok((agents, arguments))
}

/// The three parallel argument arrays, collected from either the nested
/// (`args: {names, values, types}`) or the flattened (`args.names`, …)
/// producer layout.
#[derive(Debug, Default)]
struct ArgsBlock {
    names: Option<Vec<Value>>,
    values: Option<Vec<Value>>,
    types: Option<Vec<Value>>,
}

impl ArgsBlock {
    fn take(&mut self, name: &str, value: &Value) {
        match name {
            "args" => {
                if let Value::Object(block) = value {
                    self.slot("names", block.get("names"));
                    self.slot("values", block.get("values"));
                    self.slot("types", block.get("types"));
                }
            }
            "args.names" => self.slot("names", Some(value)),
            "args.values" => self.slot("values", Some(value)),
            "args.types" => self.slot("types", Some(value)),
            other => {
                tracing::debug!(field = %other, "unrecognized argument sub-field");
            }
        }
    }

    fn slot(&mut self, which: &str, value: Option<&Value>) {
        let Some(Value::Array(items)) = value else { return };
        let items = items.clone();
        match which {
            "names" => self.names = Some(items),
            "values" => self.values = Some(items),
            _ => self.types = Some(items),
        }
    }

    /// Zip the arrays into a typed set, or `None` when no block was
    /// present at all.
    fn zip(self, agent_id: &str) -> Result<Option<ArgumentSet>, DecodeError> {
        let (Some(names), Some(values), Some(types)) = (self.names, self.values, self.types)
        else {
            return Ok(None);
        };
        if names.len() != values.len() || names.len() != types.len() {
            return Err(DecodeError::ArgumentArity {
                id: agent_id.to_string(),
                names: names.len(),
                values: values.len(),
                types: types.len(),
            });
        }

        let mut args = IndexMap::new();
        for ((name, value), declared) in names.iter().zip(&values).zip(&types) {
            let Some(name) = scalar_to_string(name) else { continue };
            let raw = scalar_to_string(value).unwrap_or_default();
            let declared = scalar_to_string(declared).unwrap_or_default();
            args.insert(name, typed_argument(&declared, raw));
        }
        Ok(Some(ArgumentSet::from_pairs(args)))
    }
}

/// Coerce one argument to the tool's declared type; unsupported declared
/// types pass the value text through unmodified.
fn typed_argument(declared: &str, raw: String) -> ArgValue {
    match declared {
        "logical" => match raw.trim() {
            "TRUE" | "true" | "T" => ArgValue::Bool(true),
            "FALSE" | "false" | "F" => ArgValue::Bool(false),
            _ => ArgValue::Text(raw),
        },
        "integer" => raw
            .trim()
            .parse()
            .map_or_else(|_| ArgValue::Text(raw), ArgValue::Int),
        "numeric" => raw
            .trim()
            .parse()
            .map_or_else(|_| ArgValue::Text(raw), ArgValue::Real),
        _ => ArgValue::Text(raw),
    }
}
