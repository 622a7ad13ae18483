//! Severity levels for diagnostics.

use std::fmt;

use log::Level;

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] aborts the run once the current phase finishes.
/// - [`Severity::Warning`] is logged and otherwise ignored, e.g. an unknown
///   tag inside an `<element>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A fatal problem with the input document.
    Error,

    /// Something in the input was ignored.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// The [`log`] level a diagnostic of this severity is reported at.
    pub fn log_level(&self) -> Level {
        match self {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warn,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_predicates() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
    }

    #[test]
    fn test_severity_log_level() {
        assert_eq!(Severity::Error.log_level(), Level::Error);
        assert_eq!(Severity::Warning.log_level(), Level::Warn);
    }
}
