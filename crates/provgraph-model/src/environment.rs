//! Execution environment and script history

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label the environment uses for the provenance directory.
pub const PROV_DIRECTORY: &str = "provDirectory";

/// Ordered label→value description of the run's environment
/// (architecture, operating system, language version, directories, …).
///
/// The sourced-script history fields the tool nests inside the same JSON
/// object are excluded here; they live in [`ScriptEntry`] rows instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pairs: IndexMap<String, String>,
}

impl Environment {
    /// Build from already-decoded pairs, preserving their order.
    #[must_use]
    pub fn from_pairs(pairs: IndexMap<String, String>) -> Self {
        Self { pairs }
    }

    /// Look up a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.pairs.get(label).map(String::as_str)
    }

    /// The directory holding this run's artifacts (snapshots, saved
    /// scripts), when the tool recorded one.
    #[must_use]
    pub fn prov_directory(&self) -> Option<&str> {
        self.get(PROV_DIRECTORY)
    }

    /// Iterate label/value pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of environment pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when the environment holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// One script involved in the run: the main script first, then any
/// scripts it sourced, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Path as the producing tool recorded it
    pub path: String,
    /// Last-modified timestamp of the script
    pub timestamp: String,
    /// Script hash; empty string when the tool did not record hashes
    pub hash: String,
}
