//! Error codes for the chain diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Input errors (the document itself)
//! - `E1xx` - Schema errors (fields of chains and elements)
//! - `E2xx` - Structure errors (graph building)

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Input Errors (E0xx)
    // =========================================================================
    /// Malformed XML.
    ///
    /// The document could not be parsed as XML at all.
    E001,

    /// Unexpected root tag.
    ///
    /// The document's root element is not `<rmod>`.
    E002,

    // =========================================================================
    // Schema Errors (E1xx)
    // =========================================================================
    /// Missing required field.
    ///
    /// A `<chain>` has no `<name>`, or an `<element>` has no `<label>` or `<type>`.
    E100,

    /// Duplicate field.
    ///
    /// A field that may appear only once was given more than once.
    E101,

    /// Empty field value.
    ///
    /// A text field was present but contained only whitespace.
    E102,

    // =========================================================================
    // Structure Errors (E2xx)
    // =========================================================================
    /// Chain has no root.
    ///
    /// Every element of the chain carries a `<parent>` marker.
    E200,

    /// Chain has more than one root.
    ///
    /// More than one element of the chain lacks a `<parent>` marker.
    E201,

    /// Dangling child reference.
    ///
    /// A `<child>` names a label that no element of the chain has.
    E202,

    /// Duplicate label.
    ///
    /// Two elements of the same chain share a label, which makes child
    /// references to it ambiguous.
    E203,

    /// Root without children.
    ///
    /// The root element does not reference any other element, so the chain
    /// would render as a single disconnected node.
    E204,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Input errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            // Schema errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            // Structure errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Input errors
            ErrorCode::E001 => "malformed xml",
            ErrorCode::E002 => "unexpected root tag",
            // Schema errors
            ErrorCode::E100 => "missing required field",
            ErrorCode::E101 => "duplicate field",
            ErrorCode::E102 => "empty field value",
            // Structure errors
            ErrorCode::E200 => "chain has no root",
            ErrorCode::E201 => "chain has multiple roots",
            ErrorCode::E202 => "dangling child reference",
            ErrorCode::E203 => "duplicate label",
            ErrorCode::E204 => "root has no children",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E204.to_string(), "E204");
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E002.as_str(), "E002");
        assert_eq!(ErrorCode::E202.as_str(), "E202");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "malformed xml");
        assert_eq!(ErrorCode::E202.description(), "dangling child reference");
        assert_eq!(ErrorCode::E203.description(), "duplicate label");
    }
}
