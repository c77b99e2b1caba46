//! Atomic model construction
//!
//! Runs the whole pipeline (flatten, route, assemble, decode, normalize)
//! in one pass and seals the result into a [`ProvModel`]. Either every
//! table is built or the caller gets a [`DecodeError`]; there is no
//! partial model.

use crate::agent::agent_rows;
use crate::decode;
use crate::environment::{environment_pairs, script_history};
use crate::error::DecodeError;
use crate::flatten::flatten;
use crate::normalize::resolve_snapshot_paths;
use crate::record::assemble;
use crate::route::{route, Code};
use provgraph_model::{ModelParts, ProvModel, Warning};
use std::path::Path;

/// How to treat entries of one code group whose field sets disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaMode {
    /// Reject the document with [`DecodeError::SchemaMismatch`].
    #[default]
    Strict,
    /// Decode name-keyed anyway and record a
    /// [`Warning::SchemaDrift`] in the model.
    Lenient,
}

/// Whether a document with zero entries is an acceptable input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyInput {
    /// Build an all-empty model carrying [`Warning::EmptyProvenance`].
    #[default]
    Allow,
    /// Fail construction with [`DecodeError::EmptyInput`].
    Reject,
}

/// Construction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// How field-set disagreement within a code group is handled
    pub schema_mode: SchemaMode,
    /// How a document with zero entries is handled
    pub empty_input: EmptyInput,
}

/// Decode a provenance document held in memory.
///
/// # Errors
/// Any [`DecodeError`]; on error no model is returned.
pub fn parse_document(text: &str, options: ParseOptions) -> Result<ProvModel, DecodeError> {
    let entries = flatten(text)?;
    let mut warnings = Vec::new();

    if entries.is_empty() {
        match options.empty_input {
            EmptyInput::Allow => {
                tracing::warn!("provenance document contains no entries");
                warnings.push(Warning::EmptyProvenance);
            }
            EmptyInput::Reject => return Err(DecodeError::EmptyInput),
        }
    }

    let routed = route(entries);
    let mode = options.schema_mode;

    let mut parts = ModelParts {
        processes: decode::process_rows(assemble(
            Code::Process,
            routed.processes,
            mode,
            &mut warnings,
        )?)?,
        data: decode::data_rows(assemble(Code::Data, routed.data, mode, &mut warnings)?),
        functions: decode::function_rows(assemble(
            Code::Function,
            routed.functions,
            mode,
            &mut warnings,
        )?),
        libraries: decode::library_rows(assemble(
            Code::Library,
            routed.libraries,
            mode,
            &mut warnings,
        )?),
        proc_proc: decode::proc_proc_rows(assemble(
            Code::ProcProc,
            routed.proc_proc,
            mode,
            &mut warnings,
        )?),
        proc_data: decode::proc_data_rows(assemble(
            Code::ProcData,
            routed.proc_data,
            mode,
            &mut warnings,
        )?),
        data_proc: decode::data_proc_rows(assemble(
            Code::DataProc,
            routed.data_proc,
            mode,
            &mut warnings,
        )?),
        func_proc: decode::func_proc_rows(assemble(
            Code::FuncProc,
            routed.func_proc,
            mode,
            &mut warnings,
        )?),
        func_lib: decode::func_lib_rows(assemble(
            Code::FuncLib,
            routed.func_lib,
            mode,
            &mut warnings,
        )?),
        ..ModelParts::default()
    };

    // Agent records are legitimately variable-shaped, so they bypass the
    // field-set check.
    let (agents, arguments) = agent_rows(crate::record::to_records(routed.agents)?)?;
    parts.agents = agents;
    parts.arguments = arguments;

    if let Some(env) = routed.environment {
        parts.scripts = script_history(&env);
        parts.environment = environment_pairs(&env);
    }

    resolve_snapshot_paths(&mut parts.data, &parts.environment);
    parts.warnings = warnings;

    Ok(ProvModel::from_parts(parts))
}

/// Read a provenance document from disk and decode it.
///
/// The file is read fully into memory first; decoding itself never
/// touches the file system.
///
/// # Errors
/// [`DecodeError::Io`] when the file cannot be read, otherwise as
/// [`parse_document`].
pub fn parse_file(path: impl AsRef<Path>, options: ParseOptions) -> Result<ProvModel, DecodeError> {
    let text = std::fs::read_to_string(path)?;
    parse_document(&text, options)
}
