//! View row types returned by the derived queries.

use serde::Serialize;

/// One row of the function→process join: which process steps used a
/// function, with the function name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuncProcView {
    /// Function node id
    pub func_id: String,
    /// Function name
    pub function: String,
    /// Process the function was used by
    pub activity: String,
}

/// One row of the function→library join: which library each used
/// function came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuncLibView {
    /// Function node id
    pub func_id: String,
    /// Function name
    pub function: String,
    /// Library node id
    pub library: String,
}

/// Decomposed value-type descriptor of one data node.
///
/// Descriptors are either JSON-object-shaped (`container` / `dimension` /
/// `type` fields) or a bare scalar label; the bare form yields only
/// `value_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValTypeView {
    /// Data node id
    pub id: String,
    /// Container kind, when the descriptor is object-shaped
    pub container: Option<String>,
    /// Dimensions joined by `,`, when object-shaped
    pub dimension: Option<String>,
    /// Element type(s) joined by `", "`, or the bare label
    pub value_type: Option<String>,
}

/// One saved on-disk script copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedScript {
    /// Absolute path of the copy under the provenance directory
    pub path: String,
    /// Timestamp of the original script
    pub timestamp: String,
}
