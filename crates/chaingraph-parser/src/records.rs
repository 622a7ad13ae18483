//! Raw records produced by the reader.
//!
//! These types mirror the XML document one to one. Child references are
//! still plain names here; resolving them into graph edges is the job of the
//! graph builder in the `chaingraph` crate.

use crate::span::Span;

/// A reference from one element to another, by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRef {
    name: String,
    span: Span,
}

impl ChildRef {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// The label this reference points at.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Span of the `<child>` field in the source.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// One parsed `<element>` of a chain.
#[derive(Debug, Clone)]
pub struct ElementRecord {
    index: usize,
    label: String,
    type_name: String,
    children: Vec<ChildRef>,
    is_root: bool,
    span: Span,
}

impl ElementRecord {
    pub fn new(
        index: usize,
        label: impl Into<String>,
        type_name: impl Into<String>,
        children: Vec<ChildRef>,
        is_root: bool,
        span: Span,
    ) -> Self {
        Self {
            index,
            label: label.into(),
            type_name: type_name.into(),
            children,
            is_root,
            span,
        }
    }

    /// Zero-based position of the element within its chain.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based position, as used in messages.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Child references in document order.
    pub fn children(&self) -> &[ChildRef] {
        &self.children
    }

    /// `true` iff the element carries no `<parent>` marker.
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Span of the whole `<element>` block.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// One parsed `<chain>` with its elements in document order.
#[derive(Debug, Clone)]
pub struct ChainRecord {
    name: String,
    elements: Vec<ElementRecord>,
    span: Span,
}

impl ChainRecord {
    pub fn new(name: impl Into<String>, elements: Vec<ElementRecord>, span: Span) -> Self {
        Self {
            name: name.into(),
            elements,
            span,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> &[ElementRecord] {
        &self.elements
    }

    /// Span of the whole `<chain>` block.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Total number of child references over all elements.
    pub fn reference_count(&self) -> usize {
        self.elements.iter().map(|e| e.children().len()).sum()
    }
}
