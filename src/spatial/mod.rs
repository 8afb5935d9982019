//! Spatial indexing for slot claiming.
//!
//! This module provides an R-tree based index of occupied positions, used
//! when generated seed positions must avoid nodes that already sit on the
//! canvas.

mod rtree;

pub use rtree::SpatialIndex;
