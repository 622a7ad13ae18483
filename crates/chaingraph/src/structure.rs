//! Chain graph structures and the builder that assembles them.
//!
//! [`build_chains`] turns the raw records produced by the parser into
//! [`Chain`]s: arena graphs with exactly one root and every child reference
//! resolved to a node index.

mod builder;
mod chain;
mod graph_base;

pub use builder::{build_chain, build_chains};
pub use chain::{Chain, GraphNode, normalize_name};
pub use graph_base::NodeIndex;
