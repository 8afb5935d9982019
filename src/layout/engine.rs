//! Layout dispatcher.
//!
//! Validates the call, normalizes the topology, lays out every connected
//! component with the chosen strategy, packs the components, fits the
//! result to the canvas and centers it.

use std::collections::HashMap;

use log::{debug, warn};

use crate::error::LayoutError;
use crate::geometry::{Bounds, Position};
use crate::graph::{EdgeRef, NodeRef, PositionedNode, Subgraph, Topology};

use super::force::ForceLayout;
use super::layers::{assign_layers, select_roots};
use super::{LayoutConfig, LayoutKind, circular, grid, hierarchical, packing, radial};

/// Computes node positions for a canvas configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Position every node of the graph.
    ///
    /// Output follows input node order with duplicate ids removed (the
    /// first occurrence wins). Edges that reference unknown ids or loop on
    /// a single node are ignored. `seeds` maps ids to previous positions
    /// and is only read by the force-directed strategy.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidCanvas`] when the canvas width or
    /// height is not a positive finite number.
    pub fn compute(
        &self,
        nodes: &[NodeRef],
        edges: &[EdgeRef],
        kind: LayoutKind,
        seeds: Option<&HashMap<String, Position>>,
    ) -> Result<Vec<PositionedNode>, LayoutError> {
        self.config.check_canvas()?;
        let (width, height) = (self.config.width, self.config.height);

        let spacing = self.config.effective_spacing();
        if spacing != self.config.spacing {
            warn!(requested = self.config.spacing, used = spacing; "Spacing out of range, clamped");
        }
        if kind == LayoutKind::ForceDirected && self.config.force.sanitized() != self.config.force {
            warn!("Force parameters out of range, defaults used for those");
        }

        let topology = Topology::build(nodes, edges);
        if topology.is_empty() {
            return Ok(Vec::new());
        }

        let components = topology.components();
        debug!(
            kind = kind.name(),
            nodes = topology.len(),
            components = components.len();
            "Computing layout"
        );

        let mut positions = self.arrange(&topology, &components, kind, spacing, seeds);
        let mut bounds = extent(&positions);

        let offset = match self.radial_anchor(&components, kind) {
            Some(slot) => {
                // the anchor goes to the canvas center; scale about it
                let pivot = positions[slot];
                let scale = packing::fit_scale_around(&bounds, pivot, width, height);
                if scale < 1.0 {
                    debug!(scale = scale; "Fitting radial layout around its anchor");
                    for p in &mut positions {
                        *p = pivot.add(p.sub(pivot).scale(scale));
                    }
                }
                Position::new(width / 2.0, height / 2.0).sub(pivot)
            }
            None => {
                let scale = packing::fit_scale(&bounds, width, height);
                if scale < 1.0 {
                    debug!(scale = scale, width = bounds.width(), height = bounds.height(); "Fitting layout to canvas");
                    positions = if kind == LayoutKind::Grid {
                        self.arrange(&topology, &components, kind, spacing * scale, seeds)
                    } else {
                        positions.into_iter().map(|p| p.scale(scale)).collect()
                    };
                    bounds = extent(&positions);
                }
                packing::center_offset(&bounds, width, height)
            }
        };

        Ok(topology
            .nodes()
            .iter()
            .zip(positions)
            .map(|(&node, p)| PositionedNode {
                node: node.clone(),
                position: packing::clamp(p.add(offset), width, height),
            })
            .collect())
    }

    /// Topology slot of the radial anchor when the whole graph is one
    /// component; `None` for other kinds or several components.
    fn radial_anchor(&self, components: &[Subgraph], kind: LayoutKind) -> Option<usize> {
        match (kind, components) {
            (LayoutKind::Radial, [component]) => select_roots(component, self.config.roots)
                .first()
                .map(|&root| component.members()[root]),
            _ => None,
        }
    }

    /// Lay out and pack all components. Positions are indexed by topology
    /// slot.
    fn arrange(
        &self,
        topology: &Topology<'_>,
        components: &[Subgraph],
        kind: LayoutKind,
        spacing: f64,
        seeds: Option<&HashMap<String, Position>>,
    ) -> Vec<Position> {
        let locals: Vec<Vec<Position>> = components
            .iter()
            .map(|component| self.place_component(topology, component, kind, spacing, seeds))
            .collect();
        let boxes: Vec<Bounds> = locals.iter().map(|local| extent(local)).collect();
        let offsets = packing::pack(&boxes, spacing);

        let mut positions = vec![Position::ORIGIN; topology.len()];
        for ((component, local), offset) in components.iter().zip(&locals).zip(offsets) {
            for (&slot, &p) in component.members().iter().zip(local) {
                positions[slot] = p.add(offset);
            }
        }
        positions
    }

    /// Run the strategy on one component in local coordinates.
    fn place_component(
        &self,
        topology: &Topology<'_>,
        component: &Subgraph,
        kind: LayoutKind,
        spacing: f64,
        seeds: Option<&HashMap<String, Position>>,
    ) -> Vec<Position> {
        match kind {
            LayoutKind::Grid => grid::place(component.len(), spacing),
            LayoutKind::Circular => circular::place(component.len(), spacing),
            LayoutKind::Hierarchical => {
                let roots = select_roots(component, self.config.roots);
                let layering = assign_layers(component, &roots);
                hierarchical::place(component, &layering, spacing)
            }
            LayoutKind::Radial => {
                let roots = select_roots(component, self.config.roots);
                let layering = assign_layers(component, &roots[..roots.len().min(1)]);
                radial::place(component, &layering, spacing)
            }
            LayoutKind::ForceDirected => {
                let local_seeds: Vec<Option<Position>> = component
                    .members()
                    .iter()
                    .map(|&slot| seeds.and_then(|s| s.get(&topology.node(slot).id)).copied())
                    .collect();
                let (positions, report) =
                    ForceLayout::new(self.config.force, spacing).run(component, &local_seeds);
                debug!(
                    nodes = component.len(),
                    iterations = report.iterations,
                    converged = report.converged,
                    displacement = report.final_displacement();
                    "Force simulation finished"
                );
                positions
            }
        }
    }
}

/// Bounds of a non-empty position set; a point at the origin otherwise.
fn extent(positions: &[Position]) -> Bounds {
    Bounds::from_positions(positions).unwrap_or_else(|| Bounds::from_point(Position::ORIGIN))
}

/// Lay out a graph with the given configuration.
///
/// Shorthand for `LayoutEngine::new(config.clone()).compute(...)`.
pub fn layout(
    nodes: &[NodeRef],
    edges: &[EdgeRef],
    kind: LayoutKind,
    config: &LayoutConfig,
    seeds: Option<&HashMap<String, Position>>,
) -> Result<Vec<PositionedNode>, LayoutError> {
    LayoutEngine::new(config.clone()).compute(nodes, edges, kind, seeds)
}
