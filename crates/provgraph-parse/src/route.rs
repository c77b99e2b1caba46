//! Identifier router
//!
//! Partitions flattened entries into typed groups by the leading code of
//! each identifier. A code matches only when it is immediately followed by
//! an ASCII digit, which keeps the table prefix-free: `p1` is a process,
//! `pp1` a control-flow edge, never both. The prefix match happens here
//! and only here; downstream decoders receive already-classified groups.

use crate::flatten::FlatEntry;
use serde_json::Value;

/// The closed identifier code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// `p`: process node
    Process,
    /// `d`: data node
    Data,
    /// `f`: function node
    Function,
    /// `pp`: process→process edge
    ProcProc,
    /// `pd`: process→data edge
    ProcData,
    /// `dp`: data→process edge
    DataProc,
    /// `fp`: function→process edge
    FuncProc,
    /// `m`: function→library edge
    FuncLib,
    /// `a`: agent
    Agent,
    /// `l`: library
    Library,
}

impl Code {
    /// Every defined code.
    pub const ALL: [Code; 10] = [
        Code::Process,
        Code::Data,
        Code::Function,
        Code::ProcProc,
        Code::ProcData,
        Code::DataProc,
        Code::FuncProc,
        Code::FuncLib,
        Code::Agent,
        Code::Library,
    ];

    /// The literal code string an identifier must start with.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Code::Process => "p",
            Code::Data => "d",
            Code::Function => "f",
            Code::ProcProc => "pp",
            Code::ProcData => "pd",
            Code::DataProc => "dp",
            Code::FuncProc => "fp",
            Code::FuncLib => "m",
            Code::Agent => "a",
            Code::Library => "l",
        }
    }

    /// Field names this code's records may legitimately carry or omit:
    /// fields introduced by a later producer version (resolved by a
    /// documented fallback) and alternate spellings of the same field.
    /// The record assembler exempts these from the field-set agreement
    /// check.
    #[must_use]
    pub const fn optional_fields(self) -> &'static [&'static str] {
        match self {
            Code::Library => &["whereLoaded"],
            Code::FuncLib => &["library", "collection"],
            _ => &[],
        }
    }

    /// Classify an identifier, or `None` when it matches no code.
    ///
    /// Membership requires the code string immediately followed by a
    /// digit, so no identifier can belong to more than one code.
    #[must_use]
    pub fn classify(id: &str) -> Option<Code> {
        Code::ALL.into_iter().find(|code| {
            id.strip_prefix(code.token())
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| c.is_ascii_digit())
        })
    }
}

/// Identifier of the single environment entry.
const ENVIRONMENT_ID: &str = "environment";

/// Flattened entries partitioned by code, encounter order preserved.
#[derive(Debug, Default)]
pub struct Routed {
    /// `p` entries
    pub processes: Vec<FlatEntry>,
    /// `d` entries
    pub data: Vec<FlatEntry>,
    /// `f` entries
    pub functions: Vec<FlatEntry>,
    /// `pp` entries
    pub proc_proc: Vec<FlatEntry>,
    /// `pd` entries
    pub proc_data: Vec<FlatEntry>,
    /// `dp` entries
    pub data_proc: Vec<FlatEntry>,
    /// `fp` entries
    pub func_proc: Vec<FlatEntry>,
    /// `m` entries
    pub func_lib: Vec<FlatEntry>,
    /// `a` entries
    pub agents: Vec<FlatEntry>,
    /// `l` entries
    pub libraries: Vec<FlatEntry>,
    /// The environment record, when the document carries one
    pub environment: Option<Value>,
}

/// Partition entries into code groups.
///
/// Identifiers matching no code are skipped; referential consistency of
/// the document is the producer's responsibility.
#[must_use]
pub fn route(entries: Vec<FlatEntry>) -> Routed {
    let mut routed = Routed::default();
    for entry in entries {
        if entry.id == ENVIRONMENT_ID {
            routed.environment = Some(entry.value);
            continue;
        }
        match Code::classify(&entry.id) {
            Some(Code::Process) => routed.processes.push(entry),
            Some(Code::Data) => routed.data.push(entry),
            Some(Code::Function) => routed.functions.push(entry),
            Some(Code::ProcProc) => routed.proc_proc.push(entry),
            Some(Code::ProcData) => routed.proc_data.push(entry),
            Some(Code::DataProc) => routed.data_proc.push(entry),
            Some(Code::FuncProc) => routed.func_proc.push(entry),
            Some(Code::FuncLib) => routed.func_lib.push(entry),
            Some(Code::Agent) => routed.agents.push(entry),
            Some(Code::Library) => routed.libraries.push(entry),
            None => {
                tracing::debug!(id = %entry.id, key = %entry.key, "unroutable identifier");
            }
        }
    }
    routed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str) -> FlatEntry {
        FlatEntry {
            key: format!("section.{id}"),
            id: id.to_string(),
            value: json!({}),
        }
    }

    #[test]
    fn single_letter_codes_require_a_digit() {
        assert_eq!(Code::classify("p1"), Some(Code::Process));
        assert_eq!(Code::classify("d42"), Some(Code::Data));
        assert_eq!(Code::classify("f7"), Some(Code::Function));
        assert_eq!(Code::classify("m3"), Some(Code::FuncLib));
        assert_eq!(Code::classify("a1"), Some(Code::Agent));
        assert_eq!(Code::classify("l2"), Some(Code::Library));
        assert_eq!(Code::classify("p"), None);
        assert_eq!(Code::classify("q1"), None);
    }

    #[test]
    fn two_letter_codes_beat_their_one_letter_prefixes() {
        // `p1` is a process but `pp1`/`pd1` are edges; the digit rule
        // keeps the table prefix-free.
        assert_eq!(Code::classify("pp1"), Some(Code::ProcProc));
        assert_eq!(Code::classify("pd9"), Some(Code::ProcData));
        assert_eq!(Code::classify("dp2"), Some(Code::DataProc));
        assert_eq!(Code::classify("fp11"), Some(Code::FuncProc));
    }

    #[test]
    fn routing_preserves_encounter_order() {
        let routed = route(vec![entry("p2"), entry("pp1"), entry("p1"), entry("zz")]);
        let ids: Vec<_> = routed.processes.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
        assert_eq!(routed.proc_proc.len(), 1);
    }

    #[test]
    fn environment_is_routed_separately() {
        let env = FlatEntry {
            key: "entity.environment".to_string(),
            id: "environment".to_string(),
            value: json!({"language": "R"}),
        };
        let routed = route(vec![env]);
        assert_eq!(routed.environment, Some(json!({"language": "R"})));
    }
}
