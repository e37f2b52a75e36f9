//! Graph document decoding through the `serde` feature.
#![cfg(feature = "serde")]

use spanstep_core::{EdgeId, Graph, Position};

#[test]
fn decodes_editor_documents_with_optional_fields() {
    let document = r#"{
        "nodes": [
            {"id": "A", "name": "Depot", "x": 10, "y": 20},
            {"id": "B"}
        ],
        "edges": [{"id": 9, "from": "A", "to": "B", "weight": 2.5}]
    }"#;
    let graph: Graph = match serde_json::from_str(document) {
        Ok(graph) => graph,
        Err(err) => panic!("document must decode: {err}"),
    };

    let [depot, other] = graph.nodes() else {
        panic!("expected two nodes, got {}", graph.nodes().len());
    };
    assert_eq!(depot.name(), "Depot");
    assert_eq!(depot.position(), Position { x: 10.0, y: 20.0 });
    assert_eq!(other.name(), "B");
    assert_eq!(other.position(), Position { x: 0.0, y: 0.0 });

    let edge = &graph.edges()[0];
    assert_eq!(edge.id(), EdgeId::new(9));
    assert_eq!(edge.label(), "A-B");
    assert_eq!(edge.weight(), 2.5);
}

#[test]
fn sample_graph_survives_encoding() {
    let sample = Graph::sample();
    let encoded = match serde_json::to_string(&sample) {
        Ok(encoded) => encoded,
        Err(err) => panic!("sample must encode: {err}"),
    };
    let decoded: Graph = match serde_json::from_str(&encoded) {
        Ok(graph) => graph,
        Err(err) => panic!("encoded sample must decode: {err}"),
    };
    assert_eq!(decoded, sample);
}

#[test]
fn rejects_documents_without_nodes_field() {
    let result = serde_json::from_str::<Graph>(r#"{"edges": []}"#);
    assert!(result.is_err());
}
