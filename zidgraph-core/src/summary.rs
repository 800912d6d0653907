// Run summaries

use crate::error::ExtractionError;
use crate::graph::AdjacencyList;
use crate::model::{Edge, ObjectType, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub pages_seen: usize,
    pub implementations: usize,
    pub functions: usize,
    /// Discarded pages per extraction error kind.
    pub discarded: BTreeMap<String, usize>,
    pub edges: usize,
    pub vertices: usize,
}

impl RunSummary {
    pub fn record_page(&mut self, outcome: Result<&Record, &ExtractionError>) {
        self.pages_seen += 1;
        match outcome {
            Ok(record) => match record.otype {
                ObjectType::Implementation => self.implementations += 1,
                ObjectType::FunctionDefinition => self.functions += 1,
            },
            Err(e) => *self.discarded.entry(e.kind().to_string()).or_default() += 1,
        }
    }

    pub fn record_graph(&mut self, edges: &[Edge], adjacency: &AdjacencyList) {
        self.edges = edges.len();
        self.vertices = adjacency.len();
    }

    pub fn records(&self) -> usize {
        self.implementations + self.functions
    }

    pub fn discarded_total(&self) -> usize {
        self.discarded.values().sum()
    }

    pub fn discarded_count(&self, kind: &str) -> usize {
        self.discarded.get(kind).copied().unwrap_or(0)
    }
}

pub fn generate_text_summary(summary: &RunSummary) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages read: {}\n", summary.pages_seen));
    report.push_str(&format!("  Records kept: {}\n", summary.records()));
    report.push_str(&format!("    Implementations: {}\n", summary.implementations));
    report.push_str(&format!("    Function definitions: {}\n", summary.functions));
    report.push_str(&format!("  Pages discarded: {}\n", summary.discarded_total()));
    for (kind, count) in &summary.discarded {
        report.push_str(&format!("    {}: {}\n", format_kind(kind), count));
    }
    report.push_str(&format!("  Edges: {}\n", summary.edges));
    report.push_str(&format!("  Vertices: {}\n", summary.vertices));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report
}

pub fn generate_json_summary(summary: &RunSummary) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "summary": {
            "metadata": {
                "generator": "zidgraph",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
            },
            "pages_seen": summary.pages_seen,
            "records": {
                "total": summary.records(),
                "implementations": summary.implementations,
                "functions": summary.functions,
            },
            "discarded": {
                "total": summary.discarded_total(),
                "by_kind": summary.discarded,
            },
            "graph": {
                "edges": summary.edges,
                "vertices": summary.vertices,
            }
        }
    });

    serde_json::to_string_pretty(&json_report)
}

fn format_kind(kind: &str) -> String {
    kind.split('_')
        .enumerate()
        .map(|(idx, word)| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) if idx == 0 => first.to_uppercase().collect::<String>() + chars.as_str(),
                Some(first) => first.to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
