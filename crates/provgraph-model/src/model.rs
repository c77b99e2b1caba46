//! The immutable model aggregate
//!
//! [`ProvModel`] can only be assembled through [`ModelParts`], which the
//! decoding pipeline fills in one atomic construction pass. After that the
//! aggregate exposes read-only views; there is no mutation path, so a
//! model may be shared and queried concurrently without synchronization.

use crate::arguments::ArgumentSet;
use crate::edges::{DataProcEdge, FuncLibEdge, FuncProcEdge, ProcDataEdge, ProcProcEdge};
use crate::environment::{Environment, ScriptEntry};
use crate::nodes::{AgentNode, DataNode, FunctionNode, LibraryNode, ProcessNode};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Non-fatal condition observed while the model was built.
///
/// Warnings ride inside the model value rather than an out-of-band
/// stream, so callers always see the full decode outcome in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Warning {
    /// The document parsed but contained zero entries; every table is
    /// present and empty.
    EmptyProvenance,
    /// Under lenient decoding, an entry's field set disagreed with the
    /// first entry of its group and was assembled by field name anyway.
    SchemaDrift {
        /// Code group the entry belongs to
        code: String,
        /// Identifier of the drifting entry
        id: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EmptyProvenance => {
                write!(f, "provenance document contains no entries")
            }
            Warning::SchemaDrift { code, id } => {
                write!(f, "entry '{id}' drifts from the field set of its '{code}' group")
            }
        }
    }
}

/// Everything a decoder frontend must supply to build a [`ProvModel`].
///
/// Plain public fields; `Default` gives all-empty tables so a frontend
/// only fills what the document actually contained.
#[derive(Debug, Clone, Default)]
pub struct ModelParts {
    /// Process nodes in document order
    pub processes: Vec<ProcessNode>,
    /// Data nodes in document order
    pub data: Vec<DataNode>,
    /// Function nodes in document order
    pub functions: Vec<FunctionNode>,
    /// Collection-tool agent nodes
    pub agents: Vec<AgentNode>,
    /// Library nodes in document order
    pub libraries: Vec<LibraryNode>,
    /// Process informed-by process edges
    pub proc_proc: Vec<ProcProcEdge>,
    /// Data generated-by process edges
    pub proc_data: Vec<ProcDataEdge>,
    /// Data used-by process edges
    pub data_proc: Vec<DataProcEdge>,
    /// Function used-by process edges
    pub func_proc: Vec<FuncProcEdge>,
    /// Function membership-in-library edges
    pub func_lib: Vec<FuncLibEdge>,
    /// Collection environment key/value pairs
    pub environment: Environment,
    /// Main and sourced script history
    pub scripts: Vec<ScriptEntry>,
    /// Agent id → typed argument set; agents whose record carried no
    /// argument block are simply absent.
    pub arguments: IndexMap<String, ArgumentSet>,
    /// Non-fatal conditions observed during decoding
    pub warnings: Vec<Warning>,
}

/// One fully decoded provenance collection run.
#[derive(Debug, Clone, Serialize)]
pub struct ProvModel {
    processes: Vec<ProcessNode>,
    data: Vec<DataNode>,
    functions: Vec<FunctionNode>,
    agents: Vec<AgentNode>,
    libraries: Vec<LibraryNode>,
    proc_proc: Vec<ProcProcEdge>,
    proc_data: Vec<ProcDataEdge>,
    data_proc: Vec<DataProcEdge>,
    func_proc: Vec<FuncProcEdge>,
    func_lib: Vec<FuncLibEdge>,
    environment: Environment,
    scripts: Vec<ScriptEntry>,
    arguments: IndexMap<String, ArgumentSet>,
    warnings: Vec<Warning>,
}

impl ProvModel {
    /// Seal the decoded parts into an immutable model.
    #[must_use]
    pub fn from_parts(parts: ModelParts) -> Self {
        for warning in &parts.warnings {
            tracing::warn!(%warning, "provenance decoded with warning");
        }
        Self {
            processes: parts.processes,
            data: parts.data,
            functions: parts.functions,
            agents: parts.agents,
            libraries: parts.libraries,
            proc_proc: parts.proc_proc,
            proc_data: parts.proc_data,
            data_proc: parts.data_proc,
            func_proc: parts.func_proc,
            func_lib: parts.func_lib,
            environment: parts.environment,
            scripts: parts.scripts,
            arguments: parts.arguments,
            warnings: parts.warnings,
        }
    }

    /// The process-node table.
    #[must_use]
    pub fn processes(&self) -> &[ProcessNode] {
        &self.processes
    }

    /// The data-node table.
    #[must_use]
    pub fn data(&self) -> &[DataNode] {
        &self.data
    }

    /// The function-node table.
    #[must_use]
    pub fn functions(&self) -> &[FunctionNode] {
        &self.functions
    }

    /// The agent-node table.
    #[must_use]
    pub fn agents(&self) -> &[AgentNode] {
        &self.agents
    }

    /// The library-node table.
    #[must_use]
    pub fn libraries(&self) -> &[LibraryNode] {
        &self.libraries
    }

    /// Process informed-by process edges.
    #[must_use]
    pub fn proc_proc_edges(&self) -> &[ProcProcEdge] {
        &self.proc_proc
    }

    /// Data generated-by process edges.
    #[must_use]
    pub fn proc_data_edges(&self) -> &[ProcDataEdge] {
        &self.proc_data
    }

    /// Data used-by process edges.
    #[must_use]
    pub fn data_proc_edges(&self) -> &[DataProcEdge] {
        &self.data_proc
    }

    /// Function used-by process edges.
    #[must_use]
    pub fn func_proc_edges(&self) -> &[FuncProcEdge] {
        &self.func_proc
    }

    /// Function membership-in-library edges.
    #[must_use]
    pub fn func_lib_edges(&self) -> &[FuncLibEdge] {
        &self.func_lib
    }

    /// The collection environment.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Main and sourced script history.
    #[must_use]
    pub fn scripts(&self) -> &[ScriptEntry] {
        &self.scripts
    }

    /// Typed argument sets keyed by agent id.
    #[must_use]
    pub fn arguments(&self) -> &IndexMap<String, ArgumentSet> {
        &self.arguments
    }

    /// Non-fatal conditions recorded during construction.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// True when every table is empty (the empty-document case).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
            && self.data.is_empty()
            && self.functions.is_empty()
            && self.agents.is_empty()
            && self.libraries.is_empty()
            && self.proc_proc.is_empty()
            && self.proc_data.is_empty()
            && self.data_proc.is_empty()
            && self.func_proc.is_empty()
            && self.func_lib.is_empty()
            && self.environment.is_empty()
            && self.scripts.is_empty()
            && self.arguments.is_empty()
    }
}
