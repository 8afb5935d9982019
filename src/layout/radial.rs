//! Concentric-ring placement around an anchor node.
//!
//! The anchor sits at the origin and depth `k` lies on the ring of radius
//! `k * spacing`. Angular space is handed down the BFS tree: every node
//! splits its own sector among its children in proportion to their subtree
//! weight and each child sits in the middle of its share. Sibling subtrees
//! therefore occupy disjoint wedges and never cross on tree-like inputs.

use std::f64::consts::TAU;

use crate::geometry::Position;
use crate::graph::Subgraph;

use super::layers::Layering;

/// Angular interval `[start, start + span)` owned by a node.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sector {
    start: f64,
    span: f64,
}

impl Sector {
    const FULL: Self = Self {
        start: 0.0,
        span: TAU,
    };

    fn middle(self) -> f64 {
        self.start + self.span / 2.0
    }
}

/// Total effective weight of each node's BFS subtree, itself included.
pub fn subtree_weights(graph: &Subgraph, layering: &Layering) -> Vec<f64> {
    let mut totals: Vec<f64> = (0..graph.len()).map(|n| graph.weight(n)).collect();

    // children are always one layer deeper, so walk the layers bottom-up
    for layer in layering.layers().iter().rev() {
        for &node in layer {
            if let Some(parent) = layering.parent(node) {
                totals[parent] += totals[node];
            }
        }
    }
    totals
}

/// Place a component layered from a single anchor. Positions are indexed
/// by local node.
///
/// Extra roots in the layering (nodes the anchor cannot reach) do not occur
/// for a connected component; if present they share the anchor's sector
/// and land on ring 0.
pub fn place(graph: &Subgraph, layering: &Layering, spacing: f64) -> Vec<Position> {
    let count = graph.len();
    let mut positions = vec![Position::ORIGIN; count];
    let mut sectors = vec![Sector::FULL; count];
    let weights = subtree_weights(graph, layering);
    let children = layering.children();

    for layer in layering.layers() {
        for &node in layer {
            let sector = sectors[node];
            let kids = &children[node];
            let total: f64 = kids.iter().map(|&c| weights[c]).sum();
            if total <= 0.0 {
                continue;
            }

            let mut start = sector.start;
            for &child in kids {
                let span = sector.span * weights[child] / total;
                let share = Sector { start, span };
                sectors[child] = share;
                positions[child] =
                    Position::polar(layering.depth(child) as f64 * spacing, share.middle());
                start += span;
            }
        }
    }

    positions
}
