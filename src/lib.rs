//! Netmap Layout - WASM Module
//!
//! Positions network-topology nodes (routers, switches, endpoint devices)
//! on a 2D canvas for the monitoring dashboard's topology view. The crate is
//! compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen; the same engine is usable from Rust through [`layout()`]
//! and [`LayoutEngine`].
//!
//! # Architecture
//!
//! - `graph`: Host records and the normalized topology (petgraph StableGraph)
//! - `layout`: The five strategies and the dispatcher that packs and fits them
//! - `spatial`: R-tree index used to keep generated seeds off occupied spots
//! - `geometry`: Positions and bounding boxes
//! - `error`: Programmer errors surfaced to the host

use std::collections::HashMap;

use js_sys::Float64Array;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
mod logging;
pub mod spatial;

pub use error::LayoutError;
pub use geometry::{Bounds, Position};
pub use graph::{EdgeRef, NodeKind, NodeRef, PositionedNode};
pub use layout::{LayoutConfig, LayoutEngine, LayoutKind, layout};

/// Initialize the WASM module: panic messages and `log` output go to the
/// browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

/// Set the console log level (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    logging::set_level(level)
        .map(|_| ())
        .map_err(|message| JsError::new(&message))
}

// =========================================================================
// Layout API
// =========================================================================

/// Compute a layout.
///
/// Returns an array of `{ id, kind, weight?, position: { x, y } }` in input
/// node order, duplicates removed.
///
/// # Arguments
///
/// * `nodes` - Array of `{ id, kind?, weight? }`
/// * `edges` - Array of `{ id, source, target }`
/// * `kind` - `"hierarchical"`, `"circular"`, `"grid"`, `"force"` or `"radial"`
/// * `config` - `{ width, height, spacing, roots?, force? }`; missing fields
///   take their defaults, `undefined` means all defaults
/// * `seed_positions` - Optional `{ [id]: { x, y } }` of previous positions
///   for the force-directed strategy
#[wasm_bindgen(js_name = computeLayout)]
pub fn compute_layout(
    nodes: JsValue,
    edges: JsValue,
    kind: &str,
    config: JsValue,
    seed_positions: JsValue,
) -> Result<JsValue, JsError> {
    let positioned = run_layout(nodes, edges, kind, config, seed_positions)?;
    positioned
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsError::new(&err.to_string()))
}

/// Compute a layout and return only the coordinates.
///
/// Takes the same arguments as [`compute_layout`]. Returns a Float64Array
/// `[x0, y0, x1, y1, ...]` in the same node order.
#[wasm_bindgen(js_name = computeLayoutPositions)]
pub fn compute_layout_positions(
    nodes: JsValue,
    edges: JsValue,
    kind: &str,
    config: JsValue,
    seed_positions: JsValue,
) -> Result<Float64Array, JsError> {
    let positioned = run_layout(nodes, edges, kind, config, seed_positions)?;
    Ok(Float64Array::from(&interleave(&positioned)[..]))
}

fn run_layout(
    nodes: JsValue,
    edges: JsValue,
    kind: &str,
    config: JsValue,
    seed_positions: JsValue,
) -> Result<Vec<PositionedNode>, LayoutError> {
    let nodes: Vec<NodeRef> = decode(nodes, "nodes")?;
    let edges: Vec<EdgeRef> = decode(edges, "edges")?;
    let kind: LayoutKind = kind.parse()?;
    let config: LayoutConfig = decode_optional(config, "config")?.unwrap_or_default();
    let seeds: Option<HashMap<String, Position>> = decode_optional(seed_positions, "seed positions")?;

    layout(&nodes, &edges, kind, &config, seeds.as_ref())
}

fn decode<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, LayoutError> {
    serde_wasm_bindgen::from_value(value).map_err(|err| LayoutError::Decode(format!("{what}: {err}")))
}

/// `undefined` and `null` decode to `None`.
fn decode_optional<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<Option<T>, LayoutError> {
    if value.is_undefined() || value.is_null() {
        Ok(None)
    } else {
        decode(value, what).map(Some)
    }
}

/// Interleave positions into `[x0, y0, x1, y1, ...]`.
fn interleave(positioned: &[PositionedNode]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(positioned.len() * 2);
    for node in positioned {
        flat.push(node.position.x);
        flat.push(node.position.y);
    }
    flat
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn kind_strategy() -> impl Strategy<Value = LayoutKind> {
        prop::sample::select(LayoutKind::ALL.to_vec())
    }

    fn config_strategy() -> impl Strategy<Value = LayoutConfig> {
        (100.0f64..2000.0, 100.0f64..2000.0, -20.0f64..200.0)
            .prop_map(|(width, height, spacing)| LayoutConfig::new(width, height, spacing))
    }

    /// Node ids `n0..n{count}` plus edges whose endpoints may dangle or
    /// repeat.
    fn graph_strategy() -> impl Strategy<Value = (Vec<NodeRef>, Vec<EdgeRef>)> {
        (0usize..14).prop_flat_map(|count| {
            let ids = prop::collection::vec(0usize..count.max(1) + 2, 0..=count);
            let links = prop::collection::vec((0usize..count + 3, 0usize..count + 3), 0..count * 2 + 1);
            (ids, links).prop_map(move |(extra, links)| {
                let mut nodes: Vec<NodeRef> = (0..count)
                    .map(|i| NodeRef::new(format!("n{i}"), NodeKind::Generic))
                    .collect();
                // duplicates of existing ids, or ids no edge can reach
                nodes.extend(extra.into_iter().map(|i| NodeRef::new(format!("n{i}"), NodeKind::Vlan)));
                let edges: Vec<EdgeRef> = links
                    .into_iter()
                    .enumerate()
                    .map(|(e, (s, t))| EdgeRef::new(format!("e{e}"), format!("n{s}"), format!("n{t}")))
                    .collect();
                (nodes, edges)
            })
        })
    }

    /// A connected group: a path over `prefix0..prefix{count}` plus chords.
    fn connected_group(prefix: &'static str) -> impl Strategy<Value = (Vec<NodeRef>, Vec<EdgeRef>)> {
        (1usize..7).prop_flat_map(move |count| {
            prop::collection::vec((0..count, 0..count), 0..count).prop_map(move |chords| {
                let id = |i: usize| format!("{prefix}{i}");
                let nodes: Vec<NodeRef> = (0..count).map(|i| NodeRef::new(id(i), NodeKind::Device)).collect();
                let edges: Vec<EdgeRef> = (1..count)
                    .map(|i| (i - 1, i))
                    .chain(chords)
                    .enumerate()
                    .map(|(e, (s, t))| EdgeRef::new(format!("{prefix}e{e}"), id(s), id(t)))
                    .collect();
                (nodes, edges)
            })
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_deterministic(
        graph: &(Vec<NodeRef>, Vec<EdgeRef>),
        kind: LayoutKind,
        config: &LayoutConfig,
    ) -> Result<(), TestCaseError> {
        let first = layout(&graph.0, &graph.1, kind, config, None);
        let second = layout(&graph.0, &graph.1, kind, config, None);
        prop_assert_eq!(first, second);
        Ok(())
    }

    fn check_ids_preserved(
        graph: &(Vec<NodeRef>, Vec<EdgeRef>),
        kind: LayoutKind,
        config: &LayoutConfig,
    ) -> Result<(), TestCaseError> {
        let result = layout(&graph.0, &graph.1, kind, config, None)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let input: HashSet<&str> = graph.0.iter().map(|n| n.id.as_str()).collect();
        let output: HashSet<&str> = result.iter().map(PositionedNode::id).collect();
        prop_assert_eq!(&input, &output);
        prop_assert_eq!(result.len(), input.len());
        Ok(())
    }

    fn check_inside_canvas(
        graph: &(Vec<NodeRef>, Vec<EdgeRef>),
        kind: LayoutKind,
        config: &LayoutConfig,
    ) -> Result<(), TestCaseError> {
        let result = layout(&graph.0, &graph.1, kind, config, None)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        for node in &result {
            let p = node.position;
            prop_assert!(p.is_finite());
            prop_assert!(p.x >= 0.0 && p.x <= config.width, "x {} outside {}", p.x, config.width);
            prop_assert!(p.y >= 0.0 && p.y <= config.height, "y {} outside {}", p.y, config.height);
        }
        Ok(())
    }

    fn check_groups_apart(
        a: &(Vec<NodeRef>, Vec<EdgeRef>),
        b: &(Vec<NodeRef>, Vec<EdgeRef>),
        kind: LayoutKind,
        config: &LayoutConfig,
    ) -> Result<(), TestCaseError> {
        let nodes: Vec<NodeRef> = a.0.iter().chain(&b.0).cloned().collect();
        let edges: Vec<EdgeRef> = a.1.iter().chain(&b.1).cloned().collect();
        let result = layout(&nodes, &edges, kind, config, None)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        let group_bounds = |group: &[NodeRef]| {
            let ids: HashSet<&str> = group.iter().map(|n| n.id.as_str()).collect();
            let positions: Vec<Position> = result
                .iter()
                .filter(|n| ids.contains(n.id()))
                .map(|n| n.position)
                .collect();
            Bounds::from_positions(&positions)
        };
        let (Some(box_a), Some(box_b)) = (group_bounds(&a.0), group_bounds(&b.0)) else {
            return Err(TestCaseError::fail("group missing from output"));
        };
        prop_assert!(!box_a.intersects(&box_b), "{:?} overlaps {:?}", box_a, box_b);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn layout_is_deterministic(graph in graph_strategy(), kind in kind_strategy(), config in config_strategy()) {
            check_deterministic(&graph, kind, &config)?;
        }

        #[test]
        fn layout_preserves_ids(graph in graph_strategy(), kind in kind_strategy(), config in config_strategy()) {
            check_ids_preserved(&graph, kind, &config)?;
        }

        #[test]
        fn layout_stays_inside_canvas(graph in graph_strategy(), kind in kind_strategy(), config in config_strategy()) {
            check_inside_canvas(&graph, kind, &config)?;
        }

        #[test]
        fn disconnected_groups_never_overlap(
            a in connected_group("a"),
            b in connected_group("b"),
            kind in kind_strategy(),
            config in config_strategy()
        ) {
            check_groups_apart(&a, &b, kind, &config)?;
        }
    }
}
