// Graphviz rendering of the dependency graph

use crate::attributes::AttributeAssigner;
use crate::graph::AdjacencyList;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

pub const DEFAULT_LAYOUT_SEED: u64 = 50;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Seed for force-directed layouts (Graphviz `start`).
    pub seed: u64,
    pub font_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_LAYOUT_SEED,
            font_size: 6,
        }
    }
}

/// Directed simple graph over the adjacency list's vertices.
///
/// Node indices follow the adjacency list's vertex order. Repeated
/// neighbor entries collapse to a single arc.
pub fn to_digraph(adjacency: &AdjacencyList) -> DiGraph<String, &'static str> {
    let mut graph = DiGraph::with_capacity(adjacency.len(), adjacency.entry_count());
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();

    for vertex in adjacency.vertices() {
        index.insert(vertex, graph.add_node(vertex.to_string()));
    }

    for (vertex, neighbors) in adjacency.iter() {
        for neighbor in neighbors {
            if let (Some(&from), Some(&to)) = (index.get(vertex), index.get(neighbor.as_str())) {
                graph.update_edge(from, to, "");
            }
        }
    }

    graph
}

/// Render the graph as DOT, one filled node per vertex.
pub fn render_dot(
    adjacency: &AdjacencyList,
    attributes: &AttributeAssigner,
    options: &RenderOptions,
) -> String {
    let graph = to_digraph(adjacency);

    let edge_attrs = |_, _| String::new();
    let node_attrs = |_, (_, name): (NodeIndex, &String)| {
        format!(
            "style=filled, fillcolor=\"{}\", fontsize={}",
            attributes.color(name),
            options.font_size
        )
    };
    let body = Dot::with_attr_getters(
        &graph,
        &[Config::EdgeNoLabel, Config::GraphContentOnly],
        &edge_attrs,
        &node_attrs,
    );

    let mut dot = String::new();
    dot.push_str("digraph {\n");
    dot.push_str(&format!("    start={};\n", options.seed));
    dot.push_str("    node [shape=circle];\n");
    dot.push_str(&body.to_string());
    dot.push_str("}\n");
    dot
}

pub fn save_dot(content: &str, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
