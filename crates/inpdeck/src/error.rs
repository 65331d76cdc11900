//! Error types for deck operations.

use std::io;

use thiserror::Error;

use inpdeck_parser::ParseError;

/// The top-level error type for reading and writing decks.
///
/// The `Parse` variant carries the structured diagnostics together with the
/// source text they index into, so a reporter can render labeled snippets.
#[derive(Debug, Error)]
pub enum InpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("duplicate {kind} number `{number}`")]
    Duplicate { kind: &'static str, number: i64 },
}

impl InpError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
