//! Topology - normalized graph model for one layout call.
//!
//! The Topology stores the validated node set and the undirected link
//! structure using petgraph's StableGraph. It is built once per layout call
//! from host data and discarded afterwards; nothing here outlives the call.

use std::collections::HashMap;

use log::debug;
use petgraph::Undirected;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::unionfind::UnionFind;

use super::edge::EdgeRef;
use super::node::NodeRef;
use super::subgraph::Subgraph;

/// Neighbor slots per node, ascending by input order, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyIndex {
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyIndex {
    /// Number of nodes indexed.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Neighbors of a node slot.
    pub fn neighbors(&self, slot: usize) -> &[usize] {
        &self.neighbors[slot]
    }

    /// Undirected degree of a node slot (parallel links counted once).
    pub fn degree(&self, slot: usize) -> usize {
        self.neighbors[slot].len()
    }

    /// Iterate `(slot, neighbors)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.neighbors
            .iter()
            .enumerate()
            .map(|(slot, list)| (slot, list.as_slice()))
    }
}

/// The normalized topology.
///
/// This struct manages:
/// - The retained nodes, in input order (their index is the node's "slot")
/// - Link structure via petgraph, one undirected edge per linked pair
/// - Directed in-degrees as supplied by the host edge list
pub struct Topology<'a> {
    /// Retained nodes; duplicates of an earlier id are dropped.
    nodes: Vec<&'a NodeRef>,

    /// Undirected link graph. Node weights are slots.
    graph: StableGraph<usize, (), Undirected>,

    /// Map from slot to petgraph NodeIndex
    handles: Vec<NodeIndex>,

    /// Count of valid host edges pointing at each slot
    in_degree: Vec<u32>,

    dropped_nodes: usize,
    dropped_edges: usize,
}

impl<'a> Topology<'a> {
    /// Normalize host nodes and edges.
    ///
    /// Keeps the first node for each id, and drops self-loops and edges whose
    /// endpoints are not in the node set. Parallel edges collapse into one
    /// link. None of these conditions is an error.
    pub fn build(nodes: &'a [NodeRef], edges: &[EdgeRef]) -> Self {
        let mut kept: Vec<&'a NodeRef> = Vec::with_capacity(nodes.len());
        let mut slot_of: HashMap<&'a str, usize> = HashMap::with_capacity(nodes.len());
        let mut graph: StableGraph<usize, (), Undirected> =
            StableGraph::with_capacity(nodes.len(), edges.len());
        let mut handles = Vec::with_capacity(nodes.len());

        for node in nodes {
            if slot_of.contains_key(node.id.as_str()) {
                continue;
            }
            let slot = kept.len();
            slot_of.insert(node.id.as_str(), slot);
            kept.push(node);
            handles.push(graph.add_node(slot));
        }

        let mut in_degree = vec![0u32; kept.len()];
        let mut dropped_edges = 0;

        for edge in edges {
            if edge.is_self_loop() {
                dropped_edges += 1;
                continue;
            }
            let endpoints = (
                slot_of.get(edge.source.as_str()),
                slot_of.get(edge.target.as_str()),
            );
            let (Some(&source), Some(&target)) = endpoints else {
                dropped_edges += 1;
                continue;
            };

            // update_edge reuses an existing link between the pair
            graph.update_edge(handles[source], handles[target], ());
            in_degree[target] += 1;
        }

        let dropped_nodes = nodes.len() - kept.len();
        debug!(
            nodes = kept.len(),
            links = graph.edge_count(),
            dropped_nodes = dropped_nodes,
            dropped_edges = dropped_edges;
            "Topology normalized"
        );

        Self {
            nodes: kept,
            graph,
            handles,
            in_degree,
            dropped_nodes,
            dropped_edges,
        }
    }

    /// Number of retained nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct undirected links.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The node stored at a slot.
    pub fn node(&self, slot: usize) -> &'a NodeRef {
        self.nodes[slot]
    }

    /// Retained nodes in input order.
    pub fn nodes(&self) -> &[&'a NodeRef] {
        &self.nodes
    }

    /// Number of duplicate nodes discarded.
    pub fn dropped_nodes(&self) -> usize {
        self.dropped_nodes
    }

    /// Number of dangling edges and self-loops discarded.
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// Build the adjacency index.
    pub fn adjacency(&self) -> AdjacencyIndex {
        let neighbors = self
            .handles
            .iter()
            .map(|&handle| {
                let mut list: Vec<usize> = self
                    .graph
                    .neighbors(handle)
                    .map(|n| self.graph[n])
                    .collect();
                list.sort_unstable();
                list.dedup();
                list
            })
            .collect();

        AdjacencyIndex { neighbors }
    }

    /// Split into connected components.
    ///
    /// Components are ordered by their earliest member, and members keep
    /// input order, so the split is deterministic for a given input.
    pub fn components(&self) -> Vec<Subgraph> {
        let adjacency = self.adjacency();
        let count = self.len();

        let mut sets = UnionFind::<usize>::new(count);
        for (slot, neighbors) in adjacency.iter() {
            for &other in neighbors {
                if slot < other {
                    sets.union(slot, other);
                }
            }
        }
        let labels = sets.into_labeling();

        let mut group_of_label: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (slot, &label) in labels.iter().enumerate() {
            let group = *group_of_label.entry(label).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(slot);
        }

        let mut local_of = vec![0usize; count];
        groups
            .into_iter()
            .map(|members| {
                for (local, &slot) in members.iter().enumerate() {
                    local_of[slot] = local;
                }
                let neighbors = members
                    .iter()
                    .map(|&slot| {
                        adjacency
                            .neighbors(slot)
                            .iter()
                            .map(|&other| local_of[other])
                            .collect()
                    })
                    .collect();
                let weights = members
                    .iter()
                    .map(|&slot| self.nodes[slot].effective_weight())
                    .collect();
                let in_degree = members.iter().map(|&slot| self.in_degree[slot]).collect();

                Subgraph::new(members, neighbors, weights, in_degree)
            })
            .collect()
    }
}
