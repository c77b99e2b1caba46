//! provgraph query layer
//!
//! Pure, read-only projections over a decoded [`provgraph_model::ProvModel`]:
//! direct table getters, join views, type/flag filters, id-set
//! intersections, and the decomposition of the polymorphic value-type
//! descriptor.
//!
//! Every function takes the model handle as `Option<&ProvModel>` and
//! returns `Option<_>`: an absent handle yields `None` from every
//! accessor, never an error. Nothing here mutates the model, so any
//! number of callers may query one model concurrently.

#![warn(unreachable_pub)]

mod queries;
mod views;

pub use queries::{
    agents, arguments, data_nodes, data_proc_edges, environment, func_lib, func_lib_edges,
    func_proc, func_proc_edges, function_nodes, input_files, libraries, output_files,
    preexisting, proc_data_edges, proc_proc_edges, process_nodes, saved_scripts, scripts,
    val_type, variables_set, variables_used,
};
pub use views::{FuncLibView, FuncProcView, SavedScript, ValTypeView};
