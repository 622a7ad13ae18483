//! # Chaingraph Parser
//!
//! Reader for the `rmod` chain XML format. This crate turns an XML document
//! into raw [`ChainRecord`]s and provides the diagnostic system shared with
//! the graph builder.
//!
//! ## Usage
//!
//! ```
//! # use chaingraph_parser::{parse, DiagnosticError};
//!
//! fn main() -> Result<(), DiagnosticError> {
//!     let source = r#"
//!         <rmod>
//!             <chain>
//!                 <name>Demo Chain</name>
//!                 <element><label>A</label><type>pump</type><child>B</child></element>
//!                 <element><label>B</label><type>valve</type><parent/></element>
//!             </chain>
//!         </rmod>
//!     "#;
//!
//!     let chains = parse(source)?;
//!     assert_eq!(chains[0].name(), "Demo Chain");
//!     Ok(())
//! }
//! ```

pub mod error;

mod reader;
mod records;
mod span;

pub use error::DiagnosticError;
pub use reader::ROOT_TAG;
pub use records::{ChainRecord, ChildRef, ElementRecord};
pub use span::Span;

/// Parse an XML document into chain records.
///
/// Chains and their elements keep document order.
///
/// # Errors
///
/// Returns a [`DiagnosticError`] with every problem found in the document:
/// malformed XML, a root tag other than `<rmod>`, or missing, duplicate or
/// empty fields on chains and elements.
pub fn parse(source: &str) -> Result<Vec<ChainRecord>, DiagnosticError> {
    reader::read_document(source)
}
