//! Error and diagnostic system for the INP parser.
//!
//! Parsing a deck produces one [`Diagnostic`] per failed card rather than
//! stopping at the first problem; the [`DiagnosticCollector`] accumulates
//! them and [`ParseError`] carries the batch out. Each diagnostic has a
//! severity, an error code, labeled spans into the card text, the 1-based
//! source line of the card, and optional help text.
//!
//! # Example
//!
//! ```
//! # use inpdeck_parser::{Diagnostic, ErrorCode, Span};
//! let diag = Diagnostic::error("card `cell`: attribute `number` has invalid value `0`")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(0..1), "restriction failed")
//!     .with_line(12)
//!     .with_help("cell numbers are 1 to 99999999");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
