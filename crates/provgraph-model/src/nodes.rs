//! Node tables
//!
//! One row struct per node table. Nullable columns are `Option`; the
//! decoder normalizes the transport's `"NA"` sentinel to `None` before
//! rows are built, so the sentinel never appears here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of a process node (one step of the traced execution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessType {
    /// An evaluated expression
    Operation,
    /// A variable binding
    Binding,
    /// Start of a collapsible block
    Start,
    /// End of a collapsible block
    Finish,
    /// The trace ended before this step completed
    Incomplete,
}

impl ProcessType {
    /// Map the producing tool's type label to a variant.
    ///
    /// Unknown labels fall back to [`ProcessType::Incomplete`]; the set is
    /// closed on the producer side, so this only fires on trace damage.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Operation" => Self::Operation,
            "Binding" => Self::Binding,
            "Start" => Self::Start,
            "Finish" => Self::Finish,
            "Incomplete" => Self::Incomplete,
            other => {
                tracing::debug!(label = other, "unknown process type label");
                Self::Incomplete
            }
        }
    }
}

/// One row of the process-node table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessNode {
    /// Identifier from the document (`p1`, `p2`, …)
    pub id: String,
    /// Display label, usually the source text of the step
    pub name: String,
    /// Step kind
    pub process_type: ProcessType,
    /// Elapsed time in seconds since the run started
    pub elapsed: f64,
    /// Index into the script table, when recorded
    pub script_num: Option<i64>,
    /// First source line of the step, when recorded
    pub start_line: Option<i64>,
    /// First source column of the step, when recorded
    pub start_col: Option<i64>,
    /// Last source line of the step, when recorded
    pub end_line: Option<i64>,
    /// Last source column of the step, when recorded
    pub end_col: Option<i64>,
}

/// Kind of a data node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Plain in-memory value
    Data,
    /// Value stored in an external artifact under the provenance directory
    Snapshot,
    /// File read or written by the script
    File,
    /// Remote resource
    #[serde(rename = "URL")]
    Url,
    /// Raised error or warning
    Exception,
    /// Graphics or other device
    Device,
    /// Inline captured standard output
    StandardOutput,
    /// Standard output stored as an external snapshot
    StandardOutputSnapshot,
}

impl DataType {
    /// Map the producing tool's type label to a variant.
    ///
    /// Unknown labels fall back to [`DataType::Data`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Data" => Self::Data,
            "Snapshot" => Self::Snapshot,
            "File" => Self::File,
            "URL" => Self::Url,
            "Exception" => Self::Exception,
            "Device" => Self::Device,
            "StandardOutput" => Self::StandardOutput,
            "StandardOutputSnapshot" => Self::StandardOutputSnapshot,
            other => {
                tracing::debug!(label = other, "unknown data type label");
                Self::Data
            }
        }
    }

    /// True for the two kinds whose `value` is a path relative to the
    /// provenance directory until the resolver rewrites it.
    #[must_use]
    pub const fn is_snapshot(self) -> bool {
        matches!(self, Self::Snapshot | Self::StandardOutputSnapshot)
    }
}

/// One row of the data-node table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataNode {
    /// Identifier from the document (`d1`, `d2`, …)
    pub id: String,
    /// Variable or file name
    pub name: String,
    /// Inline value text, or a file/snapshot reference
    pub value: String,
    /// Raw polymorphic type descriptor; the query layer decomposes it
    pub val_type: String,
    /// Node kind
    pub data_type: DataType,
    /// Scope the value was bound in, when recorded
    pub scope: Option<String>,
    /// True when the value pre-existed in the environment before the run
    pub from_env: bool,
    /// Content hash, when the tool recorded one
    pub hash: Option<String>,
    /// When the value was observed
    pub timestamp: String,
    /// Original on-disk location (files only)
    pub location: Option<String>,
}

/// One row of the function-node table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionNode {
    /// Identifier from the document (`f1`, `f2`, …)
    pub id: String,
    /// Function name as written in the source
    pub name: String,
}

/// One row of the agent table: the collecting tool itself.
///
/// Agent records carry a small open-ended set of scalar fields
/// (`tool.name`, `tool.version`, `json.version`, …), so the row keeps an
/// ordered map rather than fixed columns. Argument sub-fields are split
/// out into [`crate::ArgumentSet`] before the row is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentNode {
    /// Identifier from the document (`a1`, …)
    pub id: String,
    /// Agent-scoped scalar fields in document order
    pub fields: IndexMap<String, String>,
}

impl AgentNode {
    /// Name of the collecting tool, when recorded.
    #[must_use]
    pub fn tool_name(&self) -> Option<&str> {
        self.fields.get("tool.name").map(String::as_str)
    }

    /// Version of the collecting tool, when recorded.
    #[must_use]
    pub fn tool_version(&self) -> Option<&str> {
        self.fields.get("tool.version").map(String::as_str)
    }

    /// Version of the JSON format the tool emitted, when recorded.
    #[must_use]
    pub fn json_version(&self) -> Option<&str> {
        self.fields.get("json.version").map(String::as_str)
    }
}

/// One row of the library table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryNode {
    /// Identifier from the document (`l1`, `l2`, …)
    pub id: String,
    /// Package name
    pub name: String,
    /// Installed package version
    pub version: String,
    /// How the library came to be loaded. Producers written before this
    /// field existed get the documented `"unknown"` fallback.
    pub where_loaded: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_type_labels_round_trip() {
        assert_eq!(ProcessType::from_label("Operation"), ProcessType::Operation);
        assert_eq!(ProcessType::from_label("Finish"), ProcessType::Finish);
        assert_eq!(ProcessType::from_label("???"), ProcessType::Incomplete);
    }

    #[test]
    fn data_type_labels_round_trip() {
        assert_eq!(DataType::from_label("URL"), DataType::Url);
        assert_eq!(DataType::from_label("StandardOutputSnapshot"), DataType::StandardOutputSnapshot);
        assert_eq!(DataType::from_label("bogus"), DataType::Data);
    }

    #[test]
    fn snapshot_kinds_are_flagged() {
        assert!(DataType::Snapshot.is_snapshot());
        assert!(DataType::StandardOutputSnapshot.is_snapshot());
        assert!(!DataType::File.is_snapshot());
    }

    #[test]
    fn agent_field_accessors() {
        let mut fields = IndexMap::new();
        fields.insert("tool.name".to_string(), "rdtLite".to_string());
        fields.insert("tool.version".to_string(), "1.4".to_string());
        let agent = AgentNode { id: "a1".to_string(), fields };
        assert_eq!(agent.tool_name(), Some("rdtLite"));
        assert_eq!(agent.tool_version(), Some("1.4"));
        assert_eq!(agent.json_version(), None);
    }
}
