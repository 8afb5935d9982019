//! Connected component view handed to the layout strategies.
//!
//! A Subgraph renumbers its members densely (`0..len`) so strategies can use
//! plain vectors for per-node state. Local index order follows input order.

/// One connected component of a [`Topology`](super::Topology).
#[derive(Debug, Clone, PartialEq)]
pub struct Subgraph {
    /// Topology slots of the members, ascending.
    members: Vec<usize>,
    /// Local neighbor indices per member, ascending.
    neighbors: Vec<Vec<usize>>,
    /// Effective layout weight per member.
    weights: Vec<f64>,
    /// Directed in-degree per member as supplied by the host.
    in_degree: Vec<u32>,
}

impl Subgraph {
    pub(crate) fn new(
        members: Vec<usize>,
        neighbors: Vec<Vec<usize>>,
        weights: Vec<f64>,
        in_degree: Vec<u32>,
    ) -> Self {
        Self {
            members,
            neighbors,
            weights,
            in_degree,
        }
    }

    /// Build a unit-weight subgraph from local index pairs. Pairs are taken
    /// as directed for in-degree purposes.
    #[cfg(test)]
    pub(crate) fn from_pairs(len: usize, pairs: &[(usize, usize)]) -> Self {
        let mut neighbors = vec![Vec::new(); len];
        let mut in_degree = vec![0u32; len];
        for &(a, b) in pairs {
            neighbors[a].push(b);
            neighbors[b].push(a);
            in_degree[b] += 1;
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        Self::new((0..len).collect(), neighbors, vec![1.0; len], in_degree)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Topology slots of the members, indexed by local index.
    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    #[inline]
    pub fn neighbors(&self, local: usize) -> &[usize] {
        &self.neighbors[local]
    }

    #[inline]
    pub fn degree(&self, local: usize) -> usize {
        self.neighbors[local].len()
    }

    #[inline]
    pub fn weight(&self, local: usize) -> f64 {
        self.weights[local]
    }

    #[inline]
    pub fn in_degree(&self, local: usize) -> u32 {
        self.in_degree[local]
    }

    /// Each undirected link once, as `(lower, higher)` local indices.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors.iter().enumerate().flat_map(|(a, list)| {
            list.iter().copied().filter(move |&b| a < b).map(move |b| (a, b))
        })
    }

    /// Number of undirected links.
    pub fn link_count(&self) -> usize {
        self.links().count()
    }
}
