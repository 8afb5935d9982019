//! Root selection and BFS layering shared by the hierarchical and radial
//! layouts.
//!
//! Layers are BFS distances from the roots over the undirected links. A
//! visited set guarantees each node is dequeued exactly once, so cyclic
//! meshes terminate in O(V + E) and links that close a cycle are simply not
//! part of the BFS tree.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::graph::Subgraph;

/// How roots are chosen for layered layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RootSelection {
    /// The node of highest degree, ties broken by input order.
    #[default]
    MaxDegree,
    /// Every node no supplied edge points at. Falls back to
    /// [`RootSelection::MaxDegree`] when a component has none.
    Sources,
}

/// Result of layering one component.
#[derive(Debug, Clone, PartialEq)]
pub struct Layering {
    /// BFS depth per local node.
    depth: Vec<usize>,
    /// BFS tree parent per local node (`None` for roots).
    parent: Vec<Option<usize>>,
    /// Nodes per depth, in discovery order.
    layers: Vec<Vec<usize>>,
    /// Number of dequeues performed.
    visits: usize,
}

impl Layering {
    pub fn depth(&self, node: usize) -> usize {
        self.depth[node]
    }

    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parent[node]
    }

    /// Layers in depth order, each in discovery order.
    pub fn layers(&self) -> &[Vec<usize>] {
        &self.layers
    }

    /// The roots (layer 0).
    pub fn roots(&self) -> &[usize] {
        self.layers.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total node visits made by the traversal; equals the node count.
    pub fn visits(&self) -> usize {
        self.visits
    }

    /// BFS tree children per node, in discovery order.
    pub fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.depth.len()];
        for layer in &self.layers {
            for &node in layer {
                if let Some(parent) = self.parent[node] {
                    children[parent].push(node);
                }
            }
        }
        children
    }
}

/// Choose the roots of a component.
pub fn select_roots(graph: &Subgraph, selection: RootSelection) -> Vec<usize> {
    if graph.is_empty() {
        return Vec::new();
    }

    if selection == RootSelection::Sources {
        let sources: Vec<usize> = (0..graph.len())
            .filter(|&node| graph.in_degree(node) == 0)
            .collect();
        if !sources.is_empty() {
            return sources;
        }
    }

    // max_by_key keeps the last maximum, so scan in reverse to keep the first
    let hub = (0..graph.len())
        .rev()
        .max_by_key(|&node| graph.degree(node))
        .unwrap_or(0);
    vec![hub]
}

/// Assign BFS layers from the given roots.
///
/// Duplicate roots are ignored. Nodes the roots cannot reach start a new
/// traversal at depth 0, so every node ends up layered.
pub fn assign_layers(graph: &Subgraph, roots: &[usize]) -> Layering {
    let count = graph.len();
    let mut depth = vec![0usize; count];
    let mut parent = vec![None; count];
    let mut layers: Vec<Vec<usize>> = Vec::new();
    let mut visited = vec![false; count];
    let mut visits = 0;

    let mut queue = VecDeque::with_capacity(count);
    for &root in roots.iter().filter(|&&node| node < count) {
        if !visited[root] {
            visited[root] = true;
            queue.push_back(root);
        }
    }
    drain(graph, &mut queue, &mut visited, &mut depth, &mut parent, &mut layers, &mut visits);

    for node in 0..count {
        if !visited[node] {
            visited[node] = true;
            queue.push_back(node);
            drain(graph, &mut queue, &mut visited, &mut depth, &mut parent, &mut layers, &mut visits);
        }
    }

    Layering {
        depth,
        parent,
        layers,
        visits,
    }
}

/// Run the BFS until the queue empties. Queued nodes are already marked
/// visited and have their depth and parent set.
fn drain(
    graph: &Subgraph,
    queue: &mut VecDeque<usize>,
    visited: &mut [bool],
    depth: &mut [usize],
    parent: &mut [Option<usize>],
    layers: &mut Vec<Vec<usize>>,
    visits: &mut usize,
) {
    while let Some(node) = queue.pop_front() {
        *visits += 1;
        let d = depth[node];
        if layers.len() <= d {
            layers.resize_with(d + 1, Vec::new);
        }
        layers[d].push(node);

        for &next in graph.neighbors(node) {
            if !visited[next] {
                visited[next] = true;
                depth[next] = d + 1;
                parent[next] = Some(node);
                queue.push_back(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_degree_root() {
        // star around node 2
        let graph = Subgraph::from_pairs(4, &[(0, 2), (1, 2), (3, 2)]);
        assert_eq!(select_roots(&graph, RootSelection::MaxDegree), vec![2]);
    }

    #[test]
    fn test_max_degree_ties_keep_input_order() {
        // 4-cycle: every node has degree 2
        let graph = Subgraph::from_pairs(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(select_roots(&graph, RootSelection::MaxDegree), vec![0]);

        let path = Subgraph::from_pairs(4, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(select_roots(&path, RootSelection::MaxDegree), vec![1]);
    }

    #[test]
    fn test_sources_roots() {
        let graph = Subgraph::from_pairs(4, &[(0, 2), (1, 2), (2, 3)]);
        assert_eq!(select_roots(&graph, RootSelection::Sources), vec![0, 1]);
    }

    #[test]
    fn test_sources_fall_back_on_directed_cycle() {
        let graph = Subgraph::from_pairs(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(select_roots(&graph, RootSelection::Sources), vec![0]);
    }

    #[test]
    fn test_layers_of_tree() {
        // 0 -> 1, 0 -> 2, 1 -> 3
        let graph = Subgraph::from_pairs(4, &[(0, 1), (0, 2), (1, 3)]);
        let layering = assign_layers(&graph, &[0]);

        assert_eq!(layering.layers(), &[vec![0], vec![1, 2], vec![3]]);
        assert_eq!(layering.parent(3), Some(1));
        assert_eq!(layering.depth(3), 2);
        assert_eq!(layering.roots(), &[0]);
        assert_eq!(layering.children()[0], vec![1, 2]);
    }

    #[test]
    fn test_cycle_visits_each_node_once() {
        let graph = Subgraph::from_pairs(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let layering = assign_layers(&graph, &[0]);

        assert_eq!(layering.visits(), 4);
        assert_eq!(layering.layers(), &[vec![0], vec![1, 3], vec![2]]);
        // the closing link 2-3 is not a tree edge
        assert_eq!(layering.parent(2), Some(1));
    }

    #[test]
    fn test_full_mesh_terminates() {
        let mut pairs = Vec::new();
        for a in 0..12 {
            for b in (a + 1)..12 {
                pairs.push((a, b));
            }
        }
        let graph = Subgraph::from_pairs(12, &pairs);
        let layering = assign_layers(&graph, &select_roots(&graph, RootSelection::MaxDegree));

        assert_eq!(layering.visits(), 12);
        assert_eq!(layering.layers().len(), 2);
        assert_eq!(layering.layers()[1].len(), 11);
    }

    #[test]
    fn test_multiple_roots_share_layer_zero() {
        let graph = Subgraph::from_pairs(4, &[(0, 2), (1, 2), (2, 3)]);
        let layering = assign_layers(&graph, &[0, 1]);

        assert_eq!(layering.roots(), &[0, 1]);
        assert_eq!(layering.depth(2), 1);
        assert_eq!(layering.parent(2), Some(0));
        assert_eq!(layering.depth(3), 2);
    }

    #[test]
    fn test_unreachable_nodes_become_roots() {
        let graph = Subgraph::from_pairs(3, &[(0, 1)]);
        let layering = assign_layers(&graph, &[0]);

        assert_eq!(layering.visits(), 3);
        assert_eq!(layering.roots(), &[0, 2]);
    }

    #[test]
    fn test_duplicate_roots_ignored() {
        let graph = Subgraph::from_pairs(2, &[(0, 1)]);
        let layering = assign_layers(&graph, &[0, 0]);
        assert_eq!(layering.visits(), 2);
        assert_eq!(layering.roots(), &[0]);
    }
}
