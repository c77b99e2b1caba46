//! Error taxonomy for the decoding pipeline
//!
//! Only [`DecodeError::MalformedInput`] can be produced by arbitrary
//! well-meaning input; the remaining variants indicate a damaged or
//! internally inconsistent trace. Non-fatal conditions are not errors;
//! they are [`provgraph_model::Warning`]s carried inside the model.

/// Fatal decode failure; no partial model is returned.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input is not a valid provenance document.
    #[error("malformed provenance document: {message}")]
    MalformedInput {
        /// What the JSON parser or structural check objected to
        message: String,
    },

    /// The document could not be read from disk.
    #[error("cannot read provenance document: {0}")]
    Io(#[from] std::io::Error),

    /// The document parsed but contained zero entries, and construction
    /// was configured to reject empty input.
    #[error("provenance document contains no entries")]
    EmptyInput,

    /// An entry that should be a record of named fields is some other
    /// JSON shape.
    #[error("entry '{id}' is not a record of named fields")]
    NotARecord {
        /// Identifier of the offending entry
        id: String,
    },

    /// Under strict decoding, an entry's field set disagrees with the
    /// first entry of its code group.
    #[error(
        "schema mismatch in '{code}' group: entry '{id}' has fields [{found}] \
         but reference entry '{reference}' has [{expected}]"
    )]
    SchemaMismatch {
        /// Code group the entries share
        code: String,
        /// Identifier of the disagreeing entry
        id: String,
        /// Identifier of the group's reference (first) entry
        reference: String,
        /// Comma-joined reference field names
        expected: String,
        /// Comma-joined offending field names
        found: String,
    },

    /// The elapsed-time repair heuristic could not recover a number.
    #[error("cannot interpret elapsed time '{value}' of process '{id}' as a number")]
    ElapsedTime {
        /// Process node the value belongs to
        id: String,
        /// The unrepairable raw text
        value: String,
    },

    /// An agent's three argument arrays differ in length.
    #[error(
        "argument arrays of agent '{id}' have mismatched lengths \
         ({names} names, {values} values, {types} types)"
    )]
    ArgumentArity {
        /// Agent the argument block belongs to
        id: String,
        /// Length of the names array
        names: usize,
        /// Length of the values array
        values: usize,
        /// Length of the types array
        types: usize,
    },
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput {
            message: err.to_string(),
        }
    }
}
