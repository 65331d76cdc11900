//! # inpdeck-parser
//!
//! Parser for MCNP INP input decks. This crate provides the pipeline from
//! raw file text to the typed card records of `inpdeck-core`.
//!
//! Parsing happens in two stages:
//!
//! 1. **Preprocess** - strip comments, fold continuation lines, and split
//!    the deck into the message block, title card, and the cell, surface,
//!    and data card blocks ([`split_deck`]).
//! 2. **Parse** - tokenize each logical card and parse it into its typed
//!    record ([`parse_cell`], [`parse_surface`], [`parse_data`]).
//!
//! Failed cards produce a [`Diagnostic`] with an error code and labeled
//! spans into the folded card text; the deck-level assembly in the
//! `inpdeck` crate accumulates them with a [`DiagnosticCollector`].
//!
//! ## Usage
//!
//! ```
//! # use inpdeck_parser::{split_deck, parse_cell};
//! let source = "tiny deck\n1 0 -1\n\n1 so 5.0\n\nnps 100\n";
//! let deck = split_deck(source).unwrap();
//! let cell = parse_cell(deck.cells()[0].text()).unwrap();
//! assert_eq!(cell.number(), 1);
//! ```

mod error;
mod lexer;
mod parser;
#[cfg(test)]
mod parser_tests;
mod preprocess;
mod span;
mod tokens;

pub use error::{Diagnostic, DiagnosticCollector, ErrorCode, Label, ParseError, Severity};
pub use parser::{parse_cell, parse_data, parse_surface};
pub use preprocess::{split_deck, LogicalCard, SourceDeck};
pub use span::Span;
