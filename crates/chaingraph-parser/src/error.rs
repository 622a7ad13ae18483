//! Error and diagnostic system for chain documents.
//!
//! This module provides an error handling system with:
//! - Error codes grouped by pipeline phase
//! - Multiple labeled spans pointing into the XML source
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in
//! [`DiagnosticError`] for returning from the reading and building phases.
//!
//! # Example
//!
//! ```
//! # use chaingraph_parser::error::{Diagnostic, ErrorCode};
//! # use chaingraph_parser::Span;
//!
//! let span = Span::new(100..120);
//! let original_span = Span::new(50..70);
//!
//! let diag = Diagnostic::error("label `pump` is defined more than once in chain `Cooling`")
//!     .with_code(ErrorCode::E203)
//!     .with_label(span, "duplicate label")
//!     .with_secondary_label(original_span, "first defined here")
//!     .with_help("labels must be unique within a chain");
//! ```

mod collector;
mod diagnostic;
mod diagnostic_error;
mod error_code;
mod label;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use diagnostic_error::DiagnosticError;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;
