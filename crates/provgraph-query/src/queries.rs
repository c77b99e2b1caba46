//! Derived-view queries
//!
//! Each function is a pure projection: it reads the model, allocates its
//! result, and touches nothing else. The `Option<&ProvModel>` parameter
//! is the caller's model handle; `None` in, `None` out, for every
//! accessor.

use crate::views::{FuncLibView, FuncProcView, SavedScript, ValTypeView};
use provgraph_model::{
    AgentNode, ArgumentSet, DataNode, DataProcEdge, DataType, Environment, FuncLibEdge,
    FuncProcEdge, FunctionNode, LibraryNode, ProcDataEdge, ProcProcEdge, ProcessNode,
    ProvModel, ScriptEntry,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// The process-node table.
#[must_use]
pub fn process_nodes(model: Option<&ProvModel>) -> Option<&[ProcessNode]> {
    model.map(ProvModel::processes)
}

/// The data-node table.
#[must_use]
pub fn data_nodes(model: Option<&ProvModel>) -> Option<&[DataNode]> {
    model.map(ProvModel::data)
}

/// The function-node table.
#[must_use]
pub fn function_nodes(model: Option<&ProvModel>) -> Option<&[FunctionNode]> {
    model.map(ProvModel::functions)
}

/// The agent table.
#[must_use]
pub fn agents(model: Option<&ProvModel>) -> Option<&[AgentNode]> {
    model.map(ProvModel::agents)
}

/// The library table.
#[must_use]
pub fn libraries(model: Option<&ProvModel>) -> Option<&[LibraryNode]> {
    model.map(ProvModel::libraries)
}

/// The process→process (control flow) edge table.
#[must_use]
pub fn proc_proc_edges(model: Option<&ProvModel>) -> Option<&[ProcProcEdge]> {
    model.map(ProvModel::proc_proc_edges)
}

/// The process→data (output) edge table.
#[must_use]
pub fn proc_data_edges(model: Option<&ProvModel>) -> Option<&[ProcDataEdge]> {
    model.map(ProvModel::proc_data_edges)
}

/// The data→process (input) edge table.
#[must_use]
pub fn data_proc_edges(model: Option<&ProvModel>) -> Option<&[DataProcEdge]> {
    model.map(ProvModel::data_proc_edges)
}

/// The function→process edge table.
#[must_use]
pub fn func_proc_edges(model: Option<&ProvModel>) -> Option<&[FuncProcEdge]> {
    model.map(ProvModel::func_proc_edges)
}

/// The function→library edge table.
#[must_use]
pub fn func_lib_edges(model: Option<&ProvModel>) -> Option<&[FuncLibEdge]> {
    model.map(ProvModel::func_lib_edges)
}

/// The environment table.
#[must_use]
pub fn environment(model: Option<&ProvModel>) -> Option<&Environment> {
    model.map(ProvModel::environment)
}

/// The script history, main script first.
#[must_use]
pub fn scripts(model: Option<&ProvModel>) -> Option<&[ScriptEntry]> {
    model.map(ProvModel::scripts)
}

/// Typed tool arguments per agent id.
#[must_use]
pub fn arguments(model: Option<&ProvModel>) -> Option<&indexmap::IndexMap<String, ArgumentSet>> {
    model.map(ProvModel::arguments)
}

fn function_names(model: &ProvModel) -> HashMap<&str, &str> {
    model
        .functions()
        .iter()
        .map(|f| (f.id.as_str(), f.name.as_str()))
        .collect()
}

/// Function→process join: which process used which function, with names
/// resolved. Inner join: edges whose function id is unknown are
/// dropped.
#[must_use]
pub fn func_proc(model: Option<&ProvModel>) -> Option<Vec<FuncProcView>> {
    let model = model?;
    if model.func_proc_edges().is_empty() {
        return Some(Vec::new());
    }
    let names = function_names(model);
    Some(
        model
            .func_proc_edges()
            .iter()
            .filter_map(|edge| {
                names.get(edge.entity.as_str()).map(|name| FuncProcView {
                    func_id: edge.entity.clone(),
                    function: (*name).to_string(),
                    activity: edge.activity.clone(),
                })
            })
            .collect(),
    )
}

/// Function→library join: which library each used function came from.
#[must_use]
pub fn func_lib(model: Option<&ProvModel>) -> Option<Vec<FuncLibView>> {
    let model = model?;
    if model.func_lib_edges().is_empty() {
        return Some(Vec::new());
    }
    let names = function_names(model);
    Some(
        model
            .func_lib_edges()
            .iter()
            .filter_map(|edge| {
                names.get(edge.entity.as_str()).map(|name| FuncLibView {
                    func_id: edge.entity.clone(),
                    function: (*name).to_string(),
                    library: edge.library.clone(),
                })
            })
            .collect(),
    )
}

fn filter_consumed(model: &ProvModel, kinds: &[DataType]) -> Vec<DataNode> {
    let consumed: HashSet<&str> = model
        .data_proc_edges()
        .iter()
        .map(|e| e.entity.as_str())
        .collect();
    model
        .data()
        .iter()
        .filter(|d| kinds.contains(&d.data_type) && consumed.contains(d.id.as_str()))
        .cloned()
        .collect()
}

fn filter_produced(model: &ProvModel, kinds: &[DataType]) -> Vec<DataNode> {
    let produced: HashSet<&str> = model
        .proc_data_edges()
        .iter()
        .map(|e| e.entity.as_str())
        .collect();
    model
        .data()
        .iter()
        .filter(|d| kinds.contains(&d.data_type) && produced.contains(d.id.as_str()))
        .cloned()
        .collect()
}

/// Files the traced script read: File-typed data nodes (plus URLs when
/// `only_files` is false) that appear as input-edge entities.
#[must_use]
pub fn input_files(model: Option<&ProvModel>, only_files: bool) -> Option<Vec<DataNode>> {
    let kinds: &[DataType] = if only_files {
        &[DataType::File]
    } else {
        &[DataType::File, DataType::Url]
    };
    Some(filter_consumed(model?, kinds))
}

/// Files the traced script wrote: File-typed data nodes that appear as
/// output-edge entities.
#[must_use]
pub fn output_files(model: Option<&ProvModel>) -> Option<Vec<DataNode>> {
    Some(filter_produced(model?, &[DataType::File]))
}

/// Variables the script assigned: Data/Snapshot nodes produced by a
/// process.
#[must_use]
pub fn variables_set(model: Option<&ProvModel>) -> Option<Vec<DataNode>> {
    Some(filter_produced(model?, &[DataType::Data, DataType::Snapshot]))
}

/// Variables the script read: Data/Snapshot nodes consumed by a process.
#[must_use]
pub fn variables_used(model: Option<&ProvModel>) -> Option<Vec<DataNode>> {
    Some(filter_consumed(model?, &[DataType::Data, DataType::Snapshot]))
}

/// Names of values that pre-existed in the environment before the run.
#[must_use]
pub fn preexisting(model: Option<&ProvModel>) -> Option<Vec<String>> {
    Some(
        model?
            .data()
            .iter()
            .filter(|d| d.from_env)
            .map(|d| d.name.clone())
            .collect(),
    )
}

fn join_list(value: &Value, separator: &str) -> Option<String> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .map(render_scalar)
                .collect::<Vec<_>>()
                .join(separator),
        ),
        Value::Null => None,
        scalar => Some(render_scalar(scalar)),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn decompose_val_type(node: &DataNode) -> ValTypeView {
    let raw = node.val_type.as_str();
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(descriptor)) => ValTypeView {
            id: node.id.clone(),
            container: descriptor.get("container").map(render_scalar),
            dimension: descriptor.get("dimension").and_then(|d| join_list(d, ",")),
            value_type: descriptor.get("type").and_then(|t| join_list(t, ", ")),
        },
        Ok(Value::String(label)) => ValTypeView {
            id: node.id.clone(),
            container: None,
            dimension: None,
            value_type: Some(label),
        },
        _ => ValTypeView {
            id: node.id.clone(),
            container: None,
            dimension: None,
            value_type: Some(raw.to_string()),
        },
    }
}

/// Decompose the polymorphic value-type descriptor of each data node,
/// optionally restricted to a requested id subset.
///
/// With a subset, `None` is returned when none of the requested ids
/// exist.
#[must_use]
pub fn val_type(model: Option<&ProvModel>, ids: Option<&[&str]>) -> Option<Vec<ValTypeView>> {
    let model = model?;
    let rows: Vec<ValTypeView> = model
        .data()
        .iter()
        .filter(|d| ids.map_or(true, |wanted| wanted.contains(&d.id.as_str())))
        .map(decompose_val_type)
        .collect();
    if ids.is_some() && rows.is_empty() {
        return None;
    }
    Some(rows)
}

/// Path of the last component of a recorded script path.
fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Absolute paths of the on-disk script copies the tool saved under
/// `provDirectory/scripts/`, paired with the original timestamps.
///
/// Empty when the environment did not record a provenance directory.
#[must_use]
pub fn saved_scripts(model: Option<&ProvModel>) -> Option<Vec<SavedScript>> {
    let model = model?;
    let Some(dir) = model.environment().prov_directory() else {
        return Some(Vec::new());
    };
    Some(
        model
            .scripts()
            .iter()
            .map(|script| SavedScript {
                path: format!("{dir}/scripts/{}", basename(&script.path)),
                timestamp: script.timestamp.clone(),
            })
            .collect(),
    )
}
