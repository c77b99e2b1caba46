//! Edge tables
//!
//! Five directed edge tables. Endpoint columns hold identifiers into the
//! node tables; the decoder does not validate that the referenced nodes
//! exist (producers are trusted for referential consistency).

use serde::{Deserialize, Serialize};

/// Control flow: one process step preceded another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcProcEdge {
    /// Identifier from the document (`pp1`, …)
    pub id: String,
    /// The earlier process
    pub informant: String,
    /// The later process
    pub informed: String,
}

/// Output data flow: a process produced a data node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcDataEdge {
    /// Identifier from the document (`pd1`, …)
    pub id: String,
    /// Producing process
    pub activity: String,
    /// Produced data node
    pub entity: String,
}

/// Input data flow: a process consumed a data node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataProcEdge {
    /// Identifier from the document (`dp1`, …)
    pub id: String,
    /// Consumed data node
    pub entity: String,
    /// Consuming process
    pub activity: String,
}

/// A function was used by a process step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncProcEdge {
    /// Identifier from the document (`fp1`, …)
    pub id: String,
    /// Function node id
    pub entity: String,
    /// Using process
    pub activity: String,
}

/// A function belongs to a library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncLibEdge {
    /// Identifier from the document (`m1`, …)
    pub id: String,
    /// Function node id
    pub entity: String,
    /// Library node id
    pub library: String,
}
