//! Low-level arena storage for chain graphs.
//!
//! Nodes live in one vector owned by the graph; edges are pairs of node
//! indices. A node can be the target of any number of edges, so shared
//! children and even cycles need no special ownership handling.
//!
//! # Architecture
//!
//! The module provides:
//! - [`NodeIndex`]: Position of a node in the arena
//! - [`EdgeIndex`]: Position of an edge in the arena
//! - [`GraphInternal`]: Node and edge storage with per-node outgoing edge lists
//!
//! Nodes and edges are kept in insertion order, and so are the outgoing edges
//! of each node. Every iteration over the graph is therefore deterministic.

// =============================================================================
// Low-level primitive types and internal data structures
// =============================================================================

/// Index of a node in a chain graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of an edge in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct EdgeIndex(usize);

/// A directed edge between two nodes of the same graph.
#[derive(Debug, Clone, Copy)]
struct Edge {
    source: NodeIndex,
    target: NodeIndex,
}

// =============================================================================
// Core internal graph structure
// =============================================================================

/// Core graph data structure.
///
/// The graph is directed and allows self-loops and multiple edges between
/// the same pair of nodes; every `<child>` reference becomes one edge.
#[derive(Debug)]
pub(super) struct GraphInternal<N> {
    nodes: Vec<N>,
    edges: Vec<Edge>,
    outgoing_edges: Vec<Vec<EdgeIndex>>,
}

impl<N> GraphInternal<N> {
    /// Creates a new empty graph.
    pub(super) fn new() -> Self {
        GraphInternal {
            nodes: Vec::new(),
            edges: Vec::new(),
            outgoing_edges: Vec::new(),
        }
    }

    /// Returns the node for the given index, if it exists.
    pub(super) fn node(&self, idx: NodeIndex) -> Option<&N> {
        self.nodes.get(idx.0)
    }

    /// Returns the node for the given index without checking existence.
    ///
    /// # Panics
    /// Panics if the index does not belong to this graph.
    pub(super) fn node_unchecked(&self, idx: NodeIndex) -> &N {
        &self.nodes[idx.0]
    }

    /// Returns an iterator over all nodes in insertion order.
    pub(super) fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &N)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeIndex(idx), node))
    }

    /// Returns the total number of nodes in the graph.
    pub(super) fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns an iterator over `(source, target)` pairs in insertion order.
    pub(super) fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> {
        self.edges.iter().map(|edge| (edge.source, edge.target))
    }

    /// Returns the total number of edges in the graph.
    pub(super) fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the targets of all outgoing edges of `source`, in the order
    /// the edges were added. Empty for unknown indices.
    pub(super) fn outgoing_nodes(&self, source: NodeIndex) -> impl Iterator<Item = NodeIndex> {
        self.outgoing_edges
            .get(source.0)
            .into_iter()
            .flatten()
            .map(|idx| self.edges[idx.0].target)
    }

    /// Adds a node and returns its index.
    pub(super) fn add_node(&mut self, node: N) -> NodeIndex {
        self.nodes.push(node);
        self.outgoing_edges.push(Vec::new());
        NodeIndex(self.nodes.len() - 1)
    }

    /// Adds a directed edge between two existing nodes.
    ///
    /// # Panics
    /// Panics in debug mode if either node does not exist in the graph.
    pub(super) fn add_edge(&mut self, source: NodeIndex, target: NodeIndex) -> EdgeIndex {
        debug_assert!(
            source.0 < self.nodes.len(),
            "Adding edge: source node {source:?} does not exist"
        );
        debug_assert!(
            target.0 < self.nodes.len(),
            "Adding edge: target node {target:?} does not exist"
        );

        self.edges.push(Edge { source, target });

        let idx = EdgeIndex(self.edges.len() - 1);
        self.outgoing_edges[source.0].push(idx);
        idx
    }
}
