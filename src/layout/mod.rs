//! Layout strategies for topology graphs.
//!
//! This module provides the five placement strategies offered by the
//! topology view and the engine that dispatches between them. Strategies
//! work on one connected component at a time in local coordinates; the
//! engine packs components, fits them to the canvas and centers the result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

pub mod circular;
pub mod engine;
pub mod force;
pub mod grid;
pub mod hierarchical;
pub mod layers;
pub mod packing;
pub mod radial;

pub use engine::{LayoutEngine, layout};
pub use force::{ForceConfig, ForceLayout, ForceReport};
pub use layers::{Layering, RootSelection};

/// Smallest spacing the engine will use. Non-positive spacing is raised to it.
pub const MIN_SPACING: f64 = 50.0;

/// The available layout strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutKind {
    /// Layered top-down placement by BFS depth.
    Hierarchical,
    /// One ring per component.
    Circular,
    /// Row-major grid.
    Grid,
    /// Spring-embedder simulation.
    #[serde(rename = "force", alias = "forceDirected")]
    ForceDirected,
    /// Concentric rings around an anchor node.
    Radial,
}

impl LayoutKind {
    /// Every strategy, in the order the toolbar lists them.
    pub const ALL: [Self; 5] = [
        Self::Hierarchical,
        Self::Circular,
        Self::Grid,
        Self::ForceDirected,
        Self::Radial,
    ];

    /// Name used by the host.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hierarchical => "hierarchical",
            Self::Circular => "circular",
            Self::Grid => "grid",
            Self::ForceDirected => "force",
            Self::Radial => "radial",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hierarchical" => Ok(Self::Hierarchical),
            "circular" => Ok(Self::Circular),
            "grid" => Ok(Self::Grid),
            "force" | "forceDirected" => Ok(Self::ForceDirected),
            "radial" => Ok(Self::Radial),
            other => Err(LayoutError::UnknownKind(other.to_string())),
        }
    }
}

/// Canvas and spacing configuration for a layout call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Canvas width (default: 800.0).
    pub width: f64,
    /// Canvas height (default: 600.0).
    pub height: f64,
    /// Nominal center-to-center distance between nodes (default: 150.0).
    pub spacing: f64,
    /// How hierarchical and radial layouts choose their roots.
    pub roots: RootSelection,
    /// Force-directed simulation parameters.
    pub force: ForceConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            spacing: 150.0,
            roots: RootSelection::default(),
            force: ForceConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a configuration with default strategy parameters.
    pub fn new(width: f64, height: f64, spacing: f64) -> Self {
        Self {
            width,
            height,
            spacing,
            ..Default::default()
        }
    }

    /// Set the root selection mode.
    pub fn with_roots(mut self, roots: RootSelection) -> Self {
        self.roots = roots;
        self
    }

    /// Set the force-directed parameters.
    pub fn with_force(mut self, force: ForceConfig) -> Self {
        self.force = force;
        self
    }

    /// Check that the canvas has a positive, finite size.
    pub fn check_canvas(&self) -> Result<(), LayoutError> {
        for (dimension, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidCanvas { dimension, value });
            }
        }
        Ok(())
    }

    /// Spacing actually used: the configured value, or [`MIN_SPACING`] when
    /// it is not a positive finite number.
    pub fn effective_spacing(&self) -> f64 {
        if self.spacing.is_finite() && self.spacing > 0.0 {
            self.spacing
        } else {
            MIN_SPACING
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        for kind in LayoutKind::ALL {
            assert_eq!(kind.name().parse::<LayoutKind>(), Ok(kind));
        }
        assert_eq!(
            "forceDirected".parse::<LayoutKind>(),
            Ok(LayoutKind::ForceDirected)
        );
        assert_eq!(
            "mesh".parse::<LayoutKind>(),
            Err(LayoutError::UnknownKind("mesh".to_string()))
        );
    }

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.spacing, 150.0);
        assert_eq!(config.roots, RootSelection::MaxDegree);
    }

    #[test]
    fn test_check_canvas_rejects_bad_dimensions() {
        assert!(LayoutConfig::new(800.0, 600.0, 100.0).check_canvas().is_ok());
        assert_eq!(
            LayoutConfig::new(0.0, 600.0, 100.0).check_canvas(),
            Err(LayoutError::InvalidCanvas {
                dimension: "width",
                value: 0.0
            })
        );
        assert_eq!(
            LayoutConfig::new(800.0, -5.0, 100.0).check_canvas(),
            Err(LayoutError::InvalidCanvas {
                dimension: "height",
                value: -5.0
            })
        );
        assert!(
            LayoutConfig::new(f64::INFINITY, 600.0, 100.0)
                .check_canvas()
                .is_err()
        );
    }

    #[test]
    fn test_effective_spacing_clamps() {
        assert_eq!(LayoutConfig::new(800.0, 600.0, 120.0).effective_spacing(), 120.0);
        assert_eq!(LayoutConfig::new(800.0, 600.0, 0.0).effective_spacing(), MIN_SPACING);
        assert_eq!(LayoutConfig::new(800.0, 600.0, -10.0).effective_spacing(), MIN_SPACING);
        assert_eq!(
            LayoutConfig::new(800.0, 600.0, f64::NAN).effective_spacing(),
            MIN_SPACING
        );
    }
}
