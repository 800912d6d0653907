// Dependency edges and adjacency lists

use crate::model::{Edge, Record};
use crate::scan::unique_call_targets;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Build the dependency edges for a set of records.
///
/// Each implementation contributes `parent -> implementation` followed by
/// `implementation -> target` for every distinct function it calls, in the
/// order the calls first appear. Records without a composition contribute
/// nothing. Edges from different records are never merged.
pub fn build_edges(records: &[Record]) -> Vec<Edge> {
    let mut edges = Vec::new();

    for record in records {
        let Some(composition) = record.composition.as_ref() else {
            continue;
        };
        let Some(parent) = record.parent.as_deref() else {
            warn!("Skipping implementation {} without a parent function", record.title);
            continue;
        };

        edges.push(Edge::new(parent, record.title.as_str()));
        for target in unique_call_targets(composition) {
            debug!("pair: {} {}", record.title, target);
            edges.push(Edge::new(record.title.as_str(), target));
        }
    }

    edges
}

/// Vertex to neighbor mapping that remembers the order vertices were first
/// seen in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    order: Vec<String>,
    neighbors: HashMap<String, Vec<String>>,
}

impl AdjacencyList {
    /// Build from an edge list.
    ///
    /// Every endpoint becomes a vertex. In undirected mode each edge also
    /// adds the reverse entry; neither mode removes repeated neighbors.
    pub fn from_edges(edges: &[Edge], directed: bool) -> Self {
        let mut list = AdjacencyList::default();

        for edge in edges {
            list.add_vertex(&edge.source);
            list.add_vertex(&edge.target);
        }

        for edge in edges {
            list.push_neighbor(&edge.source, &edge.target);
            if !directed {
                list.push_neighbor(&edge.target, &edge.source);
            }
        }

        list
    }

    fn add_vertex(&mut self, vertex: &str) {
        if !self.neighbors.contains_key(vertex) {
            self.order.push(vertex.to_string());
            self.neighbors.insert(vertex.to_string(), Vec::new());
        }
    }

    fn push_neighbor(&mut self, vertex: &str, neighbor: &str) {
        if let Some(list) = self.neighbors.get_mut(vertex) {
            list.push(neighbor.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, vertex: &str) -> bool {
        self.neighbors.contains_key(vertex)
    }

    pub fn neighbors(&self, vertex: &str) -> Option<&[String]> {
        self.neighbors.get(vertex).map(Vec::as_slice)
    }

    /// Vertices in first-encounter order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order.iter().map(|vertex| {
            let neighbors = self
                .neighbors
                .get(vertex)
                .map(Vec::as_slice)
                .unwrap_or_default();
            (vertex.as_str(), neighbors)
        })
    }

    /// Total number of neighbor entries.
    pub fn entry_count(&self) -> usize {
        self.neighbors.values().map(Vec::len).sum()
    }
}

impl Serialize for AdjacencyList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (vertex, neighbors) in self.iter() {
            map.serialize_entry(vertex, neighbors)?;
        }
        map.end()
    }
}

/// One `vertex: [a, b]` line per vertex.
impl fmt::Display for AdjacencyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, neighbors) in self.iter() {
            writeln!(f, "{}: [{}]", vertex, neighbors.join(", "))?;
        }
        Ok(())
    }
}
