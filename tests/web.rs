//! Tests across the JavaScript boundary. Run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use std::collections::HashMap;

use netmap_layout::{
    EdgeRef, LayoutConfig, NodeKind, NodeRef, Position, compute_layout, compute_layout_positions,
    set_log_level,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Debug, Deserialize)]
struct Placed {
    id: String,
    kind: String,
    position: Position,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

fn star() -> (JsValue, JsValue) {
    let nodes = vec![
        NodeRef::new("core", NodeKind::Router),
        NodeRef::new("sw1", NodeKind::Switch),
        NodeRef::new("sw2", NodeKind::Switch),
    ];
    let edges = vec![
        EdgeRef::new("e1", "core", "sw1"),
        EdgeRef::new("e2", "core", "sw2"),
    ];
    (to_js(&nodes), to_js(&edges))
}

#[wasm_bindgen_test]
fn compute_layout_returns_plain_objects() {
    let (nodes, edges) = star();
    let config = to_js(&LayoutConfig::new(800.0, 600.0, 100.0));
    let result = compute_layout(nodes, edges, "hierarchical", config, JsValue::UNDEFINED).unwrap();

    let placed: Vec<Placed> = serde_wasm_bindgen::from_value(result).unwrap();
    assert_eq!(placed.len(), 3);
    assert_eq!(placed[0].id, "core");
    assert_eq!(placed[0].kind, "router");
    assert_eq!(placed[1].position.y, placed[0].position.y + 100.0);
}

#[wasm_bindgen_test]
fn positions_buffer_is_interleaved() {
    let (nodes, edges) = star();
    let buffer =
        compute_layout_positions(nodes, edges, "grid", JsValue::NULL, JsValue::UNDEFINED).unwrap();

    assert_eq!(buffer.length(), 6);
    let flat = buffer.to_vec();
    assert!(flat.iter().all(|v| v.is_finite()));
}

#[wasm_bindgen_test]
fn seeds_accepted_as_object() {
    let (nodes, edges) = star();
    let seeds: HashMap<String, Position> = [("core".to_string(), Position::new(10.0, 10.0))]
        .into_iter()
        .collect();
    let result = compute_layout(nodes, edges, "force", JsValue::UNDEFINED, to_js(&seeds));
    assert!(result.is_ok());
}

#[wasm_bindgen_test]
fn bad_input_is_an_error() {
    let (nodes, edges) = star();
    assert!(compute_layout(nodes.clone(), edges.clone(), "spiral", JsValue::UNDEFINED, JsValue::UNDEFINED).is_err());

    let config = to_js(&LayoutConfig::new(-1.0, 600.0, 100.0));
    assert!(compute_layout(nodes, edges.clone(), "grid", config, JsValue::UNDEFINED).is_err());

    let not_nodes = JsValue::from_str("routers");
    assert!(compute_layout(not_nodes, edges, "grid", JsValue::UNDEFINED, JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn log_level_names() {
    assert!(set_log_level("debug").is_ok());
    assert!(set_log_level("chatty").is_err());
}
