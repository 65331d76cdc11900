//! Collector for accumulating per-card diagnostics.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics across a deck so every bad card is reported in
/// one pass instead of stopping at the first.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Whether an error-severity diagnostic has been recorded.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection: `Err` with all diagnostics if any error was
    /// recorded, `Ok(())` otherwise (warnings alone do not fail).
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collector_is_ok() {
        assert!(DiagnosticCollector::new().finish().is_ok());
    }

    #[test]
    fn test_errors_fail() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::error("bad card"));
        collector.emit(Diagnostic::error("another bad card"));
        assert!(collector.has_errors());

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
    }

    #[test]
    fn test_warnings_alone_pass() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("suspicious card"));
        assert!(!collector.has_errors());
        assert!(collector.finish().is_ok());
    }
}
