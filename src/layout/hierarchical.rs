//! Layered top-down placement.
//!
//! Each BFS layer becomes a row, one spacing below the previous one. Inside
//! a row nodes keep discovery order and sit one spacing apart. Row 0 is
//! centered on x = 0; every later row is centered under the mean x of its
//! nodes' BFS parents, weighted by the child's layout weight, so subtrees
//! hang below the nodes that discovered them instead of drifting left.

use crate::geometry::Position;
use crate::graph::Subgraph;

use super::layers::Layering;

/// Vertical distance between rows, as a multiple of spacing.
pub const LAYER_SPACING_RATIO: f64 = 1.0;

/// Place a layered component. Positions are indexed by local node.
pub fn place(graph: &Subgraph, layering: &Layering, spacing: f64) -> Vec<Position> {
    let mut positions = vec![Position::ORIGIN; graph.len()];

    for (depth, layer) in layering.layers().iter().enumerate() {
        let anchor = if depth == 0 {
            0.0
        } else {
            parent_centroid(graph, layering, layer, &positions)
        };
        let y = depth as f64 * spacing * LAYER_SPACING_RATIO;
        let half_span = (layer.len() as f64 - 1.0) / 2.0;

        for (i, &node) in layer.iter().enumerate() {
            let x = anchor + (i as f64 - half_span) * spacing;
            positions[node] = Position::new(x, y);
        }
    }

    positions
}

/// Weighted mean x of the parents of a row's nodes.
fn parent_centroid(
    graph: &Subgraph,
    layering: &Layering,
    layer: &[usize],
    positions: &[Position],
) -> f64 {
    let (sum, total) = layer
        .iter()
        .filter_map(|&node| layering.parent(node).map(|p| (node, p)))
        .fold((0.0, 0.0), |(sum, total), (node, parent)| {
            let w = graph.weight(node);
            (sum + positions[parent].x * w, total + w)
        });

    if total > 0.0 { sum / total } else { 0.0 }
}
