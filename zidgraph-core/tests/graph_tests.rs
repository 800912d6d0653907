// Tests for dependency edges and adjacency lists

use serde_json::json;
use zidgraph_core::graph::{AdjacencyList, build_edges};
use zidgraph_core::model::{Edge, Record};

fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs.iter().map(|&pair| Edge::from(pair)).collect()
}

// ============================================================================
// Edge Building Tests
// ============================================================================

#[test]
fn test_implementation_edges() {
    let records = vec![Record::implementation(
        "1",
        "Z100",
        "Z1",
        json!({"Z1K1": "Z7", "Z7K1": "Z7"}),
    )];

    assert_eq!(build_edges(&records), edges(&[("Z1", "Z100"), ("Z100", "Z7")]));
}

#[test]
fn test_edges_deduplicated_per_record_only() {
    let records = vec![
        Record::implementation(
            "1",
            "Z100",
            "Z1",
            json!({"Z7K1": "Z802", "args": [{"Z7K1": "Z844"}, {"Z7K1": "Z802"}]}),
        ),
        Record::function("2", "Z1", "Z40"),
        Record::implementation("3", "Z101", "Z1", json!({"Z7K1": "Z802"})),
    ];

    assert_eq!(
        build_edges(&records),
        edges(&[
            ("Z1", "Z100"),
            ("Z100", "Z802"),
            ("Z100", "Z844"),
            ("Z1", "Z101"),
            ("Z101", "Z802"),
        ])
    );
}

#[test]
fn test_functions_contribute_no_edges() {
    let records = vec![Record::function("1", "Z10", "Z6"), Record::function("2", "Z11", "Z40")];
    assert!(build_edges(&records).is_empty());
}

#[test]
fn test_implementation_without_calls_still_links_parent() {
    let records = vec![Record::implementation("1", "Z100", "Z1", json!({"Z1K1": "Z6", "Z6K1": "x"}))];
    assert_eq!(build_edges(&records), edges(&[("Z1", "Z100")]));
}

#[test]
fn test_record_missing_parent_is_skipped() {
    let mut broken = Record::implementation("1", "Z100", "Z1", json!({"Z7K1": "Z7"}));
    broken.parent = None;
    let records = vec![broken, Record::implementation("2", "Z101", "Z2", json!({"Z7K1": "Z8"}))];

    assert_eq!(build_edges(&records), edges(&[("Z2", "Z101"), ("Z101", "Z8")]));
}

// ============================================================================
// Adjacency List Tests
// ============================================================================

#[test]
fn test_directed_adjacency() {
    let list = AdjacencyList::from_edges(&edges(&[("A", "B"), ("B", "A")]), true);

    assert_eq!(list.neighbors("A"), Some(&["B".to_string()][..]));
    assert_eq!(list.neighbors("B"), Some(&["A".to_string()][..]));
}

#[test]
fn test_undirected_adjacency_keeps_reciprocal_duplicates() {
    let list = AdjacencyList::from_edges(&edges(&[("A", "B"), ("B", "A")]), false);

    // (A,B) adds A->B and B->A; (B,A) adds B->A and A->B again
    assert_eq!(list.neighbors("A").unwrap(), ["B", "B"]);
    assert_eq!(list.neighbors("B").unwrap(), ["A", "A"]);
}

#[test]
fn test_isolated_targets_are_vertices() {
    let list = AdjacencyList::from_edges(&edges(&[("Z1", "Z100"), ("Z100", "Z7")]), true);

    assert_eq!(list.len(), 3);
    assert!(list.contains("Z7"));
    assert_eq!(list.neighbors("Z7").unwrap().len(), 0);
}

#[test]
fn test_vertex_order_is_first_encounter() {
    let list = AdjacencyList::from_edges(&edges(&[("C", "A"), ("B", "C"), ("A", "D")]), true);

    let vertices: Vec<&str> = list.vertices().collect();
    assert_eq!(vertices, vec!["C", "A", "B", "D"]);
}

#[test]
fn test_repeated_edges_repeat_neighbors() {
    let list = AdjacencyList::from_edges(&edges(&[("A", "B"), ("A", "B")]), true);
    assert_eq!(list.neighbors("A").unwrap(), ["B", "B"]);
    assert_eq!(list.entry_count(), 2);
}

#[test]
fn test_self_loop_undirected() {
    let list = AdjacencyList::from_edges(&edges(&[("A", "A")]), false);
    assert_eq!(list.neighbors("A").unwrap(), ["A", "A"]);
}

#[test]
fn test_empty_edges() {
    let list = AdjacencyList::from_edges(&[], true);
    assert!(list.is_empty());
    assert_eq!(list.to_string(), "");
}

#[test]
fn test_adjacency_json_keeps_order() {
    let list = AdjacencyList::from_edges(&edges(&[("Z9", "Z1"), ("Z1", "Z5")]), true);

    let json = serde_json::to_string(&list).unwrap();

    assert_eq!(json, r#"{"Z9":["Z1"],"Z1":["Z5"],"Z5":[]}"#);
}

#[test]
fn test_adjacency_text_listing() {
    let list = AdjacencyList::from_edges(&edges(&[("Z1", "Z100"), ("Z100", "Z7"), ("Z100", "Z8")]), true);

    assert_eq!(list.to_string(), "Z1: [Z100]\nZ100: [Z7, Z8]\nZ7: []\nZ8: []\n");
}

#[test]
fn test_vertices_cover_titles_and_call_targets() {
    let records = vec![
        Record::implementation("1", "Z100", "Z1", json!({"Z7K1": "Z7", "a": {"Z7K1": "Z8"}})),
        Record::implementation("2", "Z101", "Z1", json!({"Z7K1": "Z100"})),
    ];

    let list = AdjacencyList::from_edges(&build_edges(&records), true);

    let mut vertices: Vec<&str> = list.vertices().collect();
    vertices.sort();
    assert_eq!(vertices, vec!["Z1", "Z100", "Z101", "Z7", "Z8"]);
}
