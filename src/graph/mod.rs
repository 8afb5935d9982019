//! Graph model.
//!
//! Host-facing node/edge records plus the normalized topology built from
//! them for a single layout call. The topology uses petgraph's StableGraph
//! for the link structure and union-find for component detection.

mod edge;
mod node;
mod subgraph;
mod topology;

pub use edge::EdgeRef;
pub use node::{NodeKind, NodeRef, PositionedNode};
pub use subgraph::Subgraph;
pub use topology::{AdjacencyIndex, Topology};
