//! Error types for chaingraph operations.
//!
//! This module provides the main error type [`ChaingraphError`] which wraps
//! the error conditions that can occur while turning a document into graph
//! artifacts.

use std::io;

use thiserror::Error;

use chaingraph_parser::DiagnosticError;

/// The main error type for chaingraph operations.
///
/// # Diagnostic Variant
///
/// The `Diagnostic` variant carries the parse and structure diagnostics
/// together with the XML source they point into, so callers can render
/// labelled source snippets.
#[derive(Debug, Error)]
pub enum ChaingraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Diagnostic { err: DiagnosticError, src: String },

    #[error("Export error: {0}")]
    Export(Box<crate::export::Error>),
}

impl From<crate::export::Error> for ChaingraphError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ChaingraphError {
    /// Create a new `Diagnostic` error with the associated source text.
    pub fn new_diagnostic_error(err: DiagnosticError, src: impl Into<String>) -> Self {
        Self::Diagnostic {
            err,
            src: src.into(),
        }
    }
}
