//! Error types — one channel per candidate, one per lookup.

use thiserror::Error;

/// Errors raised while parsing a single candidate line or parameter fragment.
///
/// Unrecognized input is expected noise in a manual page and only discards
/// the candidate. A round-trip mismatch means the tokenizer and the
/// serializer disagree about a fragment the tokenizer accepted, which is a
/// defect and aborts the lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized declaration `{line}`: {reason}")]
    UnrecognizedDeclaration { line: String, reason: &'static str },

    #[error("unrecognized parameter `{fragment}`: {reason}")]
    UnrecognizedParameter {
        fragment: String,
        reason: &'static str,
    },

    #[error("parameter `{fragment}` re-serialized as `{rendered}`")]
    RoundTrip { fragment: String, rendered: String },
}

impl ParseError {
    /// True when the error must abort the lookup instead of skipping the candidate.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::RoundTrip { .. })
    }
}

/// Errors that end a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("malformed document: reached end of page while looking for the {marker} line")]
    MalformedDocument { marker: &'static str },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("more than one declaration matches `{name}` once digit suffixes are stripped: {candidates:?}")]
    AmbiguousSuffixMatch {
        name: String,
        candidates: Vec<String>,
    },
}

/// Result alias for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;
