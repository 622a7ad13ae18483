//! Assembled chain graphs.

use petgraph::{algo, graph::DiGraph};

use super::graph_base::{GraphInternal, NodeIndex};

/// One element of a chain, after its child references were resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    label: String,
    type_name: String,
}

impl GraphNode {
    pub(super) fn new(label: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            type_name: type_name.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// A chain with exactly one root and all child references resolved.
///
/// The chain owns every node; edges refer to nodes by [`NodeIndex`]. Nodes
/// and each node's children keep document order.
#[derive(Debug)]
pub struct Chain {
    name: String,
    root: NodeIndex,
    graph: GraphInternal<GraphNode>,
}

impl Chain {
    pub(super) fn new(name: impl Into<String>, root: NodeIndex, graph: GraphInternal<GraphNode>) -> Self {
        Self {
            name: name.into(),
            root,
            graph,
        }
    }

    /// The chain name as written in the document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name used for output files, see [`normalize_name`].
    pub fn base_name(&self) -> String {
        normalize_name(&self.name)
    }

    pub fn root(&self) -> &GraphNode {
        self.graph.node_unchecked(self.root)
    }

    pub fn root_index(&self) -> NodeIndex {
        self.root
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&GraphNode> {
        self.graph.node(idx)
    }

    /// All nodes, root included, in document order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode)> {
        self.graph.nodes()
    }

    /// Direct children of `idx` in reference order.
    pub fn children(&self, idx: NodeIndex) -> impl Iterator<Item = &GraphNode> {
        self.graph
            .outgoing_nodes(idx)
            .map(|child| self.graph.node_unchecked(child))
    }

    /// Every `(parent, child)` pair: nodes in document order, then each
    /// node's children in reference order.
    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode)> {
        self.graph
            .nodes()
            .flat_map(move |(idx, parent)| self.children(idx).map(move |child| (parent, child)))
    }

    pub fn nodes_count(&self) -> usize {
        self.graph.nodes_count()
    }

    pub fn edges_count(&self) -> usize {
        self.graph.edges_count()
    }

    /// Nodes that cannot be reached from the root by following child edges.
    pub fn unreachable_nodes(&self) -> Vec<NodeIndex> {
        let mut visited = vec![false; self.graph.nodes_count()];
        let mut stack = vec![self.root];

        // The visited set keeps this finite on cyclic input.
        while let Some(idx) = stack.pop() {
            if std::mem::replace(&mut visited[idx.index()], true) {
                continue;
            }
            stack.extend(self.graph.outgoing_nodes(idx));
        }

        self.graph
            .nodes()
            .filter(|(idx, _)| !visited[idx.index()])
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Returns `true` if following child edges can lead back to a node.
    pub fn contains_cycle(&self) -> bool {
        let graph = DiGraph::<(), ()>::from_edges(
            self.graph
                .edges()
                .map(|(source, target)| (source.index() as u32, target.index() as u32)),
        );
        algo::is_cyclic_directed(&graph)
    }
}

/// Turn a chain name into a file base name.
///
/// Runs of whitespace become a single `_`; leading and trailing whitespace is
/// dropped. Path separators become `_` as well, so the result always names a
/// file directly inside the output directory.
///
/// ```
/// # use chaingraph::structure::normalize_name;
/// assert_eq!(normalize_name("Demo Chain"), "Demo_Chain");
/// assert_eq!(normalize_name("  cooling \t loop  "), "cooling_loop");
/// assert_eq!(normalize_name("../plant/loop"), ".._plant_loop");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.replace(['/', '\\'], "_"))
        .collect::<Vec<_>>()
        .join("_")
}
