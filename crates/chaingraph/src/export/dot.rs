//! DOT text generation for chains.

use std::{fs, path::Path};

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::{debug, trace};

use super::Error;
use crate::{
    config::{LabelStyle, StyleConfig},
    structure::{Chain, GraphNode},
};

/// Builds DOT graphs from chains.
///
/// The output is a `strict digraph` named after the chain's base name. It
/// starts with one node shape directive, then lists every node in document
/// order and finally one edge statement per child reference, in node order
/// and then reference order. Identical chains always give identical text.
#[derive(Debug, Clone)]
pub struct DotExporter<'a> {
    style: &'a StyleConfig,
}

impl<'a> DotExporter<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self { style }
    }

    /// Build the DOT graph structure for `chain`.
    pub fn graph(&self, chain: &Chain) -> Graph {
        let mut stmts = Vec::with_capacity(1 + chain.nodes_count() + chain.edges_count());

        stmts.push(Stmt::GAttribute(GraphAttributes::Node(vec![attribute(
            "shape",
            self.style.node_shape(),
        )])));

        stmts.extend(chain.nodes().map(|(_, node)| Stmt::Node(self.node(node))));

        stmts.extend(chain.edges().map(|(parent, child)| {
            Stmt::Edge(Edge {
                ty: EdgeTy::Pair(Vertex::N(node_id(parent)), Vertex::N(node_id(child))),
                attributes: vec![],
            })
        }));

        Graph::DiGraph {
            id: quoted(&chain.base_name()),
            strict: true,
            stmts,
        }
    }

    /// Render `chain` as DOT text.
    pub fn to_dot(&self, chain: &Chain) -> String {
        let dot = self.graph(chain).print(&mut PrinterContext::default());
        trace!(chain = chain.name(), dot = dot.as_str(); "DOT generated");
        dot
    }

    /// Write the DOT text of `chain` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the file cannot be written.
    pub fn write(&self, chain: &Chain, path: &Path) -> Result<(), Error> {
        fs::write(path, self.to_dot(chain)).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(chain = chain.name(), path:? = path; "DOT text saved");
        Ok(())
    }

    fn node(&self, node: &GraphNode) -> Node {
        let attributes = match self.style.label_style() {
            LabelStyle::Composite => vec![Attribute(
                Id::Plain("label".to_string()),
                Id::Escaped(format!(
                    "\"{}\\n{}\"",
                    escape(node.label()),
                    escape(node.type_name())
                )),
            )],
            LabelStyle::Attribute => vec![
                attribute("label", node.label()),
                attribute("tooltip", node.type_name()),
            ],
        };

        Node {
            id: node_id(node),
            attributes,
        }
    }
}

fn node_id(node: &GraphNode) -> NodeId {
    NodeId(quoted(node.label()), None)
}

fn attribute(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), quoted(value))
}

fn quoted(text: &str) -> Id {
    Id::Escaped(format!("\"{}\"", escape(text)))
}

/// Escape text for use inside a double-quoted DOT string.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chaingraph_parser::parse;

    use super::*;
    use crate::structure::build_chain;

    const DEMO_CHAIN: &str = r#"
        <rmod>
            <chain>
                <name>Demo Chain</name>
                <element><label>A</label><type>pump</type><child>B</child><child>C</child></element>
                <element><label>B</label><type>valve</type><parent/></element>
                <element><label>C</label><type>tank</type><parent/></element>
            </chain>
        </rmod>
    "#;

    fn demo_chain(source: &str) -> Chain {
        let records = parse(source).expect("test document must parse");
        build_chain(&records[0]).expect("test chain must build")
    }

    fn edge_count(dot: &str) -> usize {
        dot.matches("->").count()
    }

    #[test]
    fn test_demo_chain_edges() {
        let style = StyleConfig::default();
        let dot = DotExporter::new(&style).to_dot(&demo_chain(DEMO_CHAIN));

        assert_eq!(edge_count(&dot), 2, "dot:\n{dot}");
        let ab = dot.find(r#""A" -> "B""#).expect("edge A -> B present");
        let ac = dot.find(r#""A" -> "C""#).expect("edge A -> C present");
        assert!(ab < ac);
    }

    #[test]
    fn test_header_and_shape_directive() {
        let style = StyleConfig::new("ellipse", LabelStyle::Composite);
        let dot = DotExporter::new(&style).to_dot(&demo_chain(DEMO_CHAIN));

        assert!(dot.contains(r#"strict digraph "Demo_Chain""#), "dot:\n{dot}");
        assert!(dot.contains(r#"shape="ellipse""#), "dot:\n{dot}");
        assert_eq!(dot.matches("shape=").count(), 1);
        let shape_at = dot.find("shape=").expect("shape directive present");
        let first_label_at = dot.find("label=").expect("node labels present");
        assert!(shape_at < first_label_at);
    }

    #[test]
    fn test_composite_labels() {
        let style = StyleConfig::default();
        let dot = DotExporter::new(&style).to_dot(&demo_chain(DEMO_CHAIN));

        assert!(dot.contains(r#"label="A\npump""#), "dot:\n{dot}");
        assert!(dot.contains(r#"label="C\ntank""#), "dot:\n{dot}");
        assert!(!dot.contains("tooltip"));
    }

    #[test]
    fn test_attribute_labels() {
        let style = StyleConfig::new("box", LabelStyle::Attribute);
        let dot = DotExporter::new(&style).to_dot(&demo_chain(DEMO_CHAIN));

        assert!(dot.contains(r#"label="B""#), "dot:\n{dot}");
        assert!(dot.contains(r#"tooltip="valve""#), "dot:\n{dot}");
    }

    #[test]
    fn test_quotes_are_escaped() {
        let source = r#"<rmod><chain><name>q</name>
            <element><label>say "hi"</label><type>a\b</type><child>x</child></element>
            <element><label>x</label><type>t</type><parent/></element>
        </chain></rmod>"#;
        let style = StyleConfig::default();
        let dot = DotExporter::new(&style).to_dot(&demo_chain(source));

        assert!(dot.contains(r#""say \"hi\"" -> "x""#), "dot:\n{dot}");
        assert!(dot.contains(r#"label="say \"hi\"\na\\b""#), "dot:\n{dot}");
    }

    #[test]
    fn test_output_is_deterministic() {
        let style = StyleConfig::default();
        let exporter = DotExporter::new(&style);

        let first = exporter.to_dot(&demo_chain(DEMO_CHAIN));
        let second = exporter.to_dot(&demo_chain(DEMO_CHAIN));
        assert_eq!(first, second);
    }

    #[test]
    fn test_write() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("Demo_Chain.dot");
        let style = StyleConfig::default();
        let exporter = DotExporter::new(&style);
        let chain = demo_chain(DEMO_CHAIN);

        exporter.write(&chain, &path).expect("write succeeds");

        let written = fs::read_to_string(&path).expect("file exists");
        assert_eq!(written, exporter.to_dot(&chain));
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("out.dot");
        let style = StyleConfig::default();

        let err = DotExporter::new(&style)
            .write(&demo_chain(DEMO_CHAIN), &path)
            .expect_err("directory does not exist");
        assert!(matches!(err, Error::Write { .. }));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape(r"a\b"), r"a\\b");
        assert_eq!(escape("a\nb"), r"a\nb");
    }
}
