//! Reader for the `rmod` chain XML format.
//!
//! The reader walks the document with [`roxmltree`] and turns every
//! `<chain>` into a [`ChainRecord`]:
//!
//! ```xml
//! <rmod>
//!     <chain>
//!         <name>Demo Chain</name>
//!         <element>
//!             <label>A</label>
//!             <type>pump</type>
//!             <child>B</child>
//!         </element>
//!         <element>
//!             <label>B</label>
//!             <type>valve</type>
//!             <parent/>
//!         </element>
//!     </chain>
//! </rmod>
//! ```
//!
//! Schema problems are collected over the whole document so that a single
//! run reports all of them. Tags the reader does not know are ignored with a
//! warning.

use log::{debug, trace};
use roxmltree::{Document, Node, TextPos};

use crate::{
    error::{Diagnostic, DiagnosticCollector, DiagnosticError, ErrorCode},
    records::{ChainRecord, ChildRef, ElementRecord},
    span::Span,
};

/// Tag the document root must have.
pub const ROOT_TAG: &str = "rmod";

/// Tags under `<rmod>` that belong to other tools and are skipped.
const SKIPPED_ROOT_TAGS: &[&str] = &["block"];

/// Tags under `<chain>` that belong to other tools and are skipped.
const SKIPPED_CHAIN_TAGS: &[&str] = &["first", "last"];

/// Attributes of `<element>` that are known but unused.
const SKIPPED_ELEMENT_ATTRIBUTES: &[&str] = &["etype"];

/// Read every chain of an XML document.
///
/// # Errors
///
/// Returns a [`DiagnosticError`] if the document is not well-formed XML
/// ([`ErrorCode::E001`]), its root is not `<rmod>` ([`ErrorCode::E002`]), or
/// any chain or element violates the schema (`E1xx`). All schema violations
/// of the document are reported together.
pub fn read_document(source: &str) -> Result<Vec<ChainRecord>, DiagnosticError> {
    let document = Document::parse(source).map_err(|err| malformed_xml(source, &err))?;

    let root = document.root_element();
    let root_tag = root.tag_name().name();
    if root_tag != ROOT_TAG {
        return Err(Diagnostic::error(format!(
            "document root is `<{root_tag}>`, expected `<{ROOT_TAG}>`"
        ))
        .with_code(ErrorCode::E002)
        .with_label(span_of(root), "unexpected root tag")
        .with_help(format!("wrap the chains in a single `<{ROOT_TAG}>` element"))
        .into());
    }

    let mut reader = Reader::default();
    let chains = reader.read_root(root);
    reader.diagnostics.finish()?;

    debug!(chains_count = chains.len(); "Document read");
    trace!(chains:?; "Chain records");

    Ok(chains)
}

/// A text field together with where it was found.
struct Field {
    value: String,
    span: Span,
}

#[derive(Default)]
struct Reader {
    diagnostics: DiagnosticCollector,
}

impl Reader {
    fn read_root(&mut self, root: Node) -> Vec<ChainRecord> {
        self.check_attributes(root, &[], &format!("`<{ROOT_TAG}>`"));

        let mut chains = Vec::new();
        for node in root.children().filter(|n| n.is_element()) {
            let tag = node.tag_name().name();
            if tag == "chain" {
                chains.push(self.read_chain(node, chains.len()));
            } else if SKIPPED_ROOT_TAGS.contains(&tag) {
                debug!(tag = tag; "Skipping tag under root");
            } else {
                self.unknown_tag(node, &format!("`<{ROOT_TAG}>`"));
            }
        }
        chains
    }

    fn read_chain(&mut self, node: Node, chain_index: usize) -> ChainRecord {
        // The name is needed for every element message, so find it first.
        let mut name: Option<Field> = None;
        for field in node
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "name")
        {
            self.single_text_field(field, &mut name, &format!("chain #{}", chain_index + 1));
        }

        let chain_name = match &name {
            Some(field) => field.value.clone(),
            None => {
                self.diagnostics.emit(
                    Diagnostic::error(format!("chain #{} is missing `<name>`", chain_index + 1))
                        .with_code(ErrorCode::E100)
                        .with_label(span_of(node), "this chain")
                        .with_help("add a `<name>` field to the chain"),
                );
                format!("#{}", chain_index + 1)
            }
        };
        let context = format!("chain `{chain_name}`");
        self.check_attributes(node, &[], &context);

        let mut elements = Vec::new();
        let mut element_count = 0;
        for child in node.children().filter(|n| n.is_element()) {
            let tag = child.tag_name().name();
            match tag {
                "name" => {}
                "element" => {
                    if let Some(element) = self.read_element(child, &chain_name, element_count) {
                        elements.push(element);
                    }
                    element_count += 1;
                }
                _ if SKIPPED_CHAIN_TAGS.contains(&tag) => {
                    debug!(chain = chain_name, tag = tag; "Skipping tag in chain");
                }
                _ => self.unknown_tag(child, &context),
            }
        }

        debug!(chain = chain_name, elements_count = elements.len(); "Chain read");
        ChainRecord::new(chain_name, elements, span_of(node))
    }

    /// Read one `<element>`.
    ///
    /// Returns `None` if a required field is missing; the problem has been
    /// reported by then. `index` counts every `<element>` of the chain so far.
    fn read_element(&mut self, node: Node, chain: &str, index: usize) -> Option<ElementRecord> {
        let position = index + 1;
        let context = format!("element at position {position} in chain `{chain}`");
        self.check_attributes(node, SKIPPED_ELEMENT_ATTRIBUTES, &context);

        let mut label: Option<Field> = None;
        let mut type_name: Option<Field> = None;
        let mut parent: Option<Span> = None;
        let mut children = Vec::new();

        for field in node.children().filter(|n| n.is_element()) {
            match field.tag_name().name() {
                "label" => self.single_text_field(field, &mut label, &context),
                "type" => self.single_text_field(field, &mut type_name, &context),
                "child" => {
                    if let Some(child) = self.text_field(field, &context) {
                        children.push(ChildRef::new(child.value, child.span));
                    }
                }
                "parent" => {
                    if let Some(first) = parent {
                        self.duplicate_field(field, first, &context);
                    } else {
                        parent = Some(span_of(field));
                    }
                }
                _ => self.unknown_tag(field, &context),
            }
        }

        if label.is_none() {
            self.missing_field(node, "label", &context);
        }
        if type_name.is_none() {
            self.missing_field(node, "type", &context);
        }
        let (label, type_name) = (label?, type_name?);

        Some(ElementRecord::new(
            index,
            label.value,
            type_name.value,
            children,
            parent.is_none(),
            span_of(node),
        ))
    }

    /// Read a field that may appear at most once into `slot`.
    fn single_text_field(&mut self, node: Node, slot: &mut Option<Field>, context: &str) {
        if let Some(first) = slot {
            self.duplicate_field(node, first.span, context);
            return;
        }
        let span = span_of(node);
        // An empty value has been reported already; keep the slot filled so
        // it is not reported as missing as well.
        *slot = Some(self.text_field(node, context).unwrap_or(Field {
            value: String::new(),
            span,
        }));
    }

    /// Read the trimmed text of a field, reporting it if empty.
    ///
    /// Text split by comments or processing instructions is joined.
    fn text_field(&mut self, node: Node, context: &str) -> Option<Field> {
        let tag = node.tag_name().name();
        let span = span_of(node);
        let text: String = node
            .children()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();
        let value = text.trim();

        if value.is_empty() {
            self.diagnostics.emit(
                Diagnostic::error(format!("`<{tag}>` of {context} is empty"))
                    .with_code(ErrorCode::E102)
                    .with_label(span, "empty value"),
            );
            return None;
        }

        Some(Field {
            value: value.to_string(),
            span,
        })
    }

    fn duplicate_field(&mut self, node: Node, first: Span, context: &str) {
        let tag = node.tag_name().name();
        self.diagnostics.emit(
            Diagnostic::error(format!("{context} has more than one `<{tag}>`"))
                .with_code(ErrorCode::E101)
                .with_label(span_of(node), "duplicate field")
                .with_secondary_label(first, "first given here")
                .with_help(format!("remove all but one `<{tag}>`")),
        );
    }

    fn missing_field(&mut self, node: Node, tag: &str, context: &str) {
        self.diagnostics.emit(
            Diagnostic::error(format!("{context} is missing `<{tag}>`"))
                .with_code(ErrorCode::E100)
                .with_label(span_of(node), "this element")
                .with_help(format!("add a `<{tag}>` field to the element")),
        );
    }

    fn unknown_tag(&mut self, node: Node, context: &str) {
        let tag = node.tag_name().name();
        self.diagnostics.emit(
            Diagnostic::warning(format!("unknown tag `<{tag}>` in {context} is ignored"))
                .with_label(span_of(node), "ignored"),
        );
    }

    fn check_attributes(&mut self, node: Node, known: &[&str], context: &str) {
        for attribute in node.attributes() {
            let name = attribute.name();
            if known.contains(&name) {
                debug!(attribute = name, value = attribute.value(); "Skipping attribute");
                continue;
            }
            self.diagnostics.emit(
                Diagnostic::warning(format!("unknown attribute `{name}` on {context} is ignored"))
                    .with_label(span_of(node), "ignored"),
            );
        }
    }
}

fn span_of(node: Node) -> Span {
    Span::new(node.range())
}

fn malformed_xml(source: &str, err: &roxmltree::Error) -> DiagnosticError {
    let offset = text_pos_offset(source, err.pos());
    let end = (offset + 1).min(source.len());

    Diagnostic::error(format!("malformed XML: {err}"))
        .with_code(ErrorCode::E001)
        .with_label(Span::new(offset..end), "here")
        .into()
}

/// Convert a 1-based row/column position into a byte offset into `source`.
fn text_pos_offset(source: &str, pos: TextPos) -> usize {
    let row = pos.row.saturating_sub(1) as usize;
    let col = pos.col.saturating_sub(1) as usize;

    let line_start: usize = source.split_inclusive('\n').take(row).map(str::len).sum();
    let line = source.get(line_start..).unwrap_or_default();
    let column: usize = line.chars().take(col).map(char::len_utf8).sum();

    (line_start + column).min(source.len())
}
