//! The core diagnostic type for the INP error system.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message about one logical card or the deck structure.
///
/// Spans in the labels index into the logical card's folded text; the
/// 1-based source line (where the card started in the original file) and
/// the card text itself travel with the diagnostic so a reporter can show
/// the offending source.
///
/// # Example
///
/// ```text
/// error[E201]: option `wwn`: attribute `bound` has invalid value `-2`
///   --> reactor.inp:14
///    |
/// 14 | 2 3 -7.8 -4 5 wwn1:n -2
///    |                      ^^ restriction failed
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
    line: Option<usize>,
    source: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
            line: None,
            source: None,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The 1-based line in the source file where the card started.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// The folded text of the card the labels index into.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Record the card's 1-based source line.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach the card text the labels refer to.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let diag = Diagnostic::error("unknown mnemonic `pq`")
            .with_code(ErrorCode::E102)
            .with_label(Span::new(2..4), "not a surface mnemonic")
            .with_line(7)
            .with_source("1 pq 5.0")
            .with_help("did you mean `pz`?");

        assert!(diag.severity().is_error());
        assert_eq!(diag.code(), Some(ErrorCode::E102));
        assert_eq!(diag.labels().len(), 1);
        assert_eq!(diag.line(), Some(7));
        assert_eq!(diag.source(), Some("1 pq 5.0"));
        assert_eq!(diag.help(), Some("did you mean `pz`?"));
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::error("duplicate cell number `3`")
            .with_code(ErrorCode::E301)
            .with_line(9);
        assert_eq!(
            diag.to_string(),
            "error[E301]: duplicate cell number `3` (line 9)"
        );
    }
}
