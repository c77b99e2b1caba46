//! Testing utilities for the provgraph workspace
//!
//! Programmatic builders for extended PROV-JSON documents, shared by the
//! parse and query integration tests.

use serde_json::{json, Value};

/// A document with zero entries (only namespace declarations).
#[must_use]
pub fn empty_trace() -> Value {
    json!({
        "prefix": {
            "prov": "http://www.w3.org/ns/prov#",
            "rdt": "http://rdatatracker.org/"
        }
    })
}

/// The environment object used by [`full_trace`], with two sourced
/// scripts and no hashes.
#[must_use]
pub fn trace_environment() -> Value {
    json!({
        "rdt:architecture": "x86_64",
        "rdt:operatingSystem": "linux",
        "rdt:language": "R",
        "rdt:langVersion": "4.3.1",
        "rdt:script": "/work/A.R",
        "rdt:scriptTimeStamp": "t0",
        "rdt:workingDirectory": "/work",
        "rdt:provDirectory": "/tmp/prov",
        "rdt:provTimeStamp": "2024-03-01T10:00:00",
        "rdt:hashAlgorithm": "md5",
        "rdt:sourcedScripts": ["/work/B.R", "/work/C.R"],
        "rdt:sourcedScriptTimeStamps": ["t1", "t2"]
    })
}

/// A small but complete trace: four processes, six data nodes covering
/// the interesting kinds, two functions, one library, every edge table
/// populated, an agent with an argument block, and an environment with
/// sourced scripts.
///
/// The graph reads: `p1` loads the library, `p2` reads `data.csv` (`d2`)
/// and the URL `d3` and sets `x` (`d1`), `p3` calls `read.csv` via `f1`
/// and writes `out.csv` (`d4`), `p4` snapshots `big` (`d5`). `d6` is a
/// pre-existing environment value consumed by `p2`.
#[must_use]
pub fn full_trace() -> Value {
    json!({
        "prefix": {
            "prov": "http://www.w3.org/ns/prov#",
            "rdt": "http://rdatatracker.org/"
        },
        "activity": {
            "rdt:p1": {
                "rdt:name": "library(readr)", "rdt:type": "Operation",
                "rdt:elapsedTime": 0.1, "rdt:scriptNum": 1,
                "rdt:startLine": 1, "rdt:startCol": 1, "rdt:endLine": 1, "rdt:endCol": 14
            },
            "rdt:p2": {
                "rdt:name": "x <- read.csv(\"data.csv\")", "rdt:type": "Operation",
                "rdt:elapsedTime": "0.441", "rdt:scriptNum": 1,
                "rdt:startLine": 2, "rdt:startCol": 1, "rdt:endLine": 2, "rdt:endCol": 26
            },
            "rdt:p3": {
                "rdt:name": "write.csv(x, \"out.csv\")", "rdt:type": "Operation",
                "rdt:elapsedTime": "1,234.5", "rdt:scriptNum": 1,
                "rdt:startLine": 3, "rdt:startCol": 1, "rdt:endLine": 3, "rdt:endCol": 24
            },
            "rdt:p4": {
                "rdt:name": "big", "rdt:type": "Binding",
                "rdt:elapsedTime": 2.0, "rdt:scriptNum": "NA",
                "rdt:startLine": "NA", "rdt:startCol": "NA",
                "rdt:endLine": "NA", "rdt:endCol": "NA"
            }
        },
        "entity": {
            "rdt:d1": {
                "rdt:name": "x", "rdt:value": "data frame",
                "rdt:valType": "{\"container\":\"data_frame\",\"dimension\":[100,3],\"type\":[\"integer\",\"character\",\"logical\"]}",
                "rdt:type": "Data", "rdt:scope": "R_GlobalEnv", "rdt:fromEnv": "FALSE",
                "rdt:hash": "NA", "rdt:timestamp": "ts1", "rdt:location": "NA"
            },
            "rdt:d2": {
                "rdt:name": "data.csv", "rdt:value": "data.csv",
                "rdt:valType": "\"file\"",
                "rdt:type": "File", "rdt:scope": "NA", "rdt:fromEnv": "FALSE",
                "rdt:hash": "abc123", "rdt:timestamp": "ts2", "rdt:location": "/work/data.csv"
            },
            "rdt:d3": {
                "rdt:name": "remote", "rdt:value": "https://example.org/d.csv",
                "rdt:valType": "\"url\"",
                "rdt:type": "URL", "rdt:scope": "NA", "rdt:fromEnv": "FALSE",
                "rdt:hash": "NA", "rdt:timestamp": "ts3", "rdt:location": "NA"
            },
            "rdt:d4": {
                "rdt:name": "out.csv", "rdt:value": "out.csv",
                "rdt:valType": "\"file\"",
                "rdt:type": "File", "rdt:scope": "NA", "rdt:fromEnv": "FALSE",
                "rdt:hash": "def456", "rdt:timestamp": "ts4", "rdt:location": "/work/out.csv"
            },
            "rdt:d5": {
                "rdt:name": "big", "rdt:value": "snap1",
                "rdt:valType": "vector",
                "rdt:type": "Snapshot", "rdt:scope": "R_GlobalEnv", "rdt:fromEnv": "FALSE",
                "rdt:hash": "NA", "rdt:timestamp": "ts5", "rdt:location": "NA"
            },
            "rdt:d6": {
                "rdt:name": "HOME", "rdt:value": "/home/user",
                "rdt:valType": "character",
                "rdt:type": "Data", "rdt:scope": "R_GlobalEnv", "rdt:fromEnv": "TRUE",
                "rdt:hash": "NA", "rdt:timestamp": "ts6", "rdt:location": "NA"
            },
            "rdt:environment": trace_environment(),
            "rdt:l1": {
                "rdt:name": "readr", "rdt:version": "2.1.5", "rdt:whereLoaded": "script"
            },
            "rdt:f1": {"rdt:name": "read.csv"},
            "rdt:f2": {"rdt:name": "write.csv"}
        },
        "agent": {
            "rdt:a1": {
                "rdt:tool.name": "rdtLite",
                "rdt:tool.version": "1.4",
                "rdt:json.version": "2.3",
                "rdt:args": {
                    "rdt:names": ["snapshot.size", "overwrite"],
                    "rdt:values": ["10", "TRUE"],
                    "rdt:types": ["numeric", "logical"]
                }
            }
        },
        "wasInformedBy": {
            "rdt:pp1": {"prov:informant": "p1", "prov:informed": "p2"},
            "rdt:pp2": {"prov:informant": "p2", "prov:informed": "p3"},
            "rdt:pp3": {"prov:informant": "p3", "prov:informed": "p4"}
        },
        "wasGeneratedBy": {
            "rdt:pd1": {"prov:activity": "p2", "prov:entity": "d1"},
            "rdt:pd2": {"prov:activity": "p3", "prov:entity": "d4"},
            "rdt:pd3": {"prov:activity": "p4", "prov:entity": "d5"}
        },
        "used": {
            "rdt:dp1": {"prov:entity": "d2", "prov:activity": "p2"},
            "rdt:dp2": {"prov:entity": "d3", "prov:activity": "p2"},
            "rdt:dp3": {"prov:entity": "d1", "prov:activity": "p3"},
            "rdt:dp4": {"prov:entity": "d6", "prov:activity": "p2"}
        },
        "wasAssociatedWith": {
            "rdt:fp1": {"prov:entity": "f1", "prov:activity": "p2"},
            "rdt:fp2": {"prov:entity": "f2", "prov:activity": "p3"}
        },
        "hadMember": {
            "rdt:m1": {"prov:collection": "l1", "prov:entity": "f1"},
            "rdt:m2": {"prov:collection": "l1", "prov:entity": "f2"}
        }
    })
}

/// [`full_trace`] with one environment field replaced or added.
#[must_use]
pub fn full_trace_with_env(label: &str, value: Value) -> Value {
    let mut doc = full_trace();
    doc["entity"]["rdt:environment"][format!("rdt:{label}")] = value;
    doc
}

/// Render a document value as the text the parser consumes.
#[must_use]
pub fn to_text(doc: &Value) -> String {
    doc.to_string()
}
