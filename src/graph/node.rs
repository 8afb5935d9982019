//! Node types.
//!
//! Nodes are the devices in the topology graph. Each node has:
//! - A caller-assigned string identifier, unique within one layout call
//! - A kind (router, switch, ...) carried through to the renderer
//! - An optional weight hint used by strategies that balance subtrees

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Position;

/// Category of a topology node.
///
/// Unknown kinds coming from the host deserialize to [`NodeKind::Generic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Device,
    Router,
    Switch,
    Vlan,
    #[default]
    #[serde(other)]
    Generic,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Device => "device",
            Self::Router => "router",
            Self::Switch => "switch",
            Self::Vlan => "vlan",
            Self::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// A node as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef {
    pub id: String,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl NodeRef {
    /// Create a node with no weight hint.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            weight: None,
        }
    }

    /// Set the weight hint.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// The weight used for layout: the hint when it is finite and positive,
    /// otherwise 1.
    #[inline]
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => 1.0,
        }
    }
}

/// A node with its computed position.
///
/// Serializes flat: `{ id, kind, weight?, position: { x, y } }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: NodeRef,
    pub position: Position,
}

impl PositionedNode {
    #[inline]
    pub fn id(&self) -> &str {
        &self.node.id
    }
}
