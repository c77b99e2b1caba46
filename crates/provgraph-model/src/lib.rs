//! provgraph relational model
//!
//! Typed node/edge tables and the immutable [`ProvModel`] aggregate that
//! holds one decoded provenance collection run.
//!
//! # Core Concepts
//!
//! - [`ProcessNode`], [`DataNode`], [`FunctionNode`], [`AgentNode`],
//!   [`LibraryNode`]: one struct per node table, one instance per row
//! - [`ProcProcEdge`] and friends: the five directed edge tables
//! - [`Environment`]: ordered label→value pairs describing the run
//! - [`ScriptEntry`]: the main script plus any sourced scripts, in order
//! - [`ArgumentSet`]: typed tool arguments reconstructed per agent
//! - [`ProvModel`]: the aggregate; built once, never mutated, safe to
//!   share across threads
//!
//! Every table keeps a fixed schema by construction: an empty table is an
//! empty `Vec` of the row type, so callers detect absence of data by row
//! count, never by probing for columns.

#![warn(unreachable_pub)]

mod arguments;
mod edges;
mod environment;
mod model;
mod nodes;

pub use arguments::{ArgValue, ArgumentSet};
pub use edges::{DataProcEdge, FuncLibEdge, FuncProcEdge, ProcDataEdge, ProcProcEdge};
pub use environment::{Environment, ScriptEntry};
pub use model::{ModelParts, ProvModel, Warning};
pub use nodes::{AgentNode, DataNode, DataType, FunctionNode, LibraryNode, ProcessNode, ProcessType};
