//! Collector for accumulating diagnostics during a processing phase.
//!
//! The [`DiagnosticCollector`] lets the reader and the graph builder report
//! every problem in a document instead of stopping at the first one.

use log::log;

use crate::error::{Diagnostic, DiagnosticError};

/// A collector for accumulating diagnostics during a processing phase.
///
/// Warnings are logged as soon as they are emitted and are not kept;
/// errors are kept and returned from [`DiagnosticCollector::finish`].
///
/// # Example
///
/// ```
/// # use chaingraph_parser::error::{Diagnostic, DiagnosticCollector, ErrorCode};
/// # use chaingraph_parser::Span;
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::error("element `A` references unknown child `X`")
///         .with_code(ErrorCode::E202)
///         .with_label(Span::new(0..10), "no element has this label"),
/// );
/// collector.emit(Diagnostic::warning("unknown tag `<colour>`"));
///
/// let err = collector.finish().unwrap_err();
/// assert_eq!(err.diagnostics().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    errors: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.errors.push(diagnostic);
        } else {
            log!(diagnostic.severity().log_level(), "{diagnostic}");
        }
    }

    /// Move every diagnostic of `err` into this collector.
    pub fn absorb(&mut self, err: DiagnosticError) {
        for diagnostic in err.diagnostics() {
            self.emit(diagnostic.clone());
        }
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(DiagnosticError)` with all of them.
    /// - If there are no errors, returns `Ok(())`.
    pub fn finish(self) -> Result<(), DiagnosticError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DiagnosticError::new(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_emit_error_finish_err() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("test error"));

        assert!(collector.finish().is_err());
    }

    #[test]
    fn test_collector_warnings_only_finish_ok() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::warning("warning 2"));

        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_keeps_only_errors() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(
            Diagnostic::error("chain `Demo` has no root element")
                .with_code(ErrorCode::E200)
                .with_label(Span::new(10..20), "this chain"),
        );
        collector.emit(Diagnostic::warning("unknown tag"));
        collector.emit(Diagnostic::error("second error"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(
            err.diagnostics()[0].message(),
            "chain `Demo` has no root element"
        );
    }

    #[test]
    fn test_collector_absorb() {
        let mut collector = DiagnosticCollector::new();
        let err = DiagnosticError::from(vec![
            Diagnostic::error("first"),
            Diagnostic::error("second"),
        ]);

        collector.absorb(err);

        assert_eq!(collector.finish().unwrap_err().diagnostics().len(), 2);
    }
}
