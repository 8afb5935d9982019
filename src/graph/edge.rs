//! Edge type.
//!
//! Edges are the links between devices. The host may supply them with a
//! direction (uplink to downlink), but layout treats them as undirected
//! except where a strategy explicitly asks for directed in-degrees.

use serde::{Deserialize, Serialize};

/// A link as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRef {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl EdgeRef {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns true if both endpoints name the same node.
    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
