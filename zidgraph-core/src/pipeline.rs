use crate::attributes::AttributeAssigner;
use crate::error::{ExtractionError, PipelineError, Result};
use crate::export::save_records_csv;
use crate::graph::{AdjacencyList, build_edges};
use crate::model::{Edge, Record};
use crate::record::RecordExtractor;
use crate::render::{RenderOptions, render_dot, save_dot};
use crate::summary::RunSummary;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use zidgraph_dump::{DumpError, DumpReader, RawPage};

/// Options for one pass over a dump
pub struct PipelineOptions {
    pub dump: PathBuf,
    /// Overrides the default `^Z\d+$` title filter.
    pub title_pattern: Option<String>,
    pub directed: bool,
    pub records_csv: Option<PathBuf>,
    pub graph_dot: Option<PathBuf>,
    pub adjacency_json: Option<PathBuf>,
    pub render: RenderOptions,
    pub show_progress: bool,
}

impl PipelineOptions {
    pub fn new(dump: impl Into<PathBuf>) -> Self {
        Self {
            dump: dump.into(),
            title_pattern: None,
            directed: true,
            records_csv: None,
            graph_dot: None,
            adjacency_json: None,
            render: RenderOptions::default(),
            show_progress: false,
        }
    }
}

/// Callback for reporting pipeline progress
pub type PipelineProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Records kept from a dump, with the tally of what was dropped
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub summary: RunSummary,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: Vec<Record>,
    pub edges: Vec<Edge>,
    pub adjacency: AdjacencyList,
    pub summary: RunSummary,
}

/// Classify every page, keeping the records that qualify.
///
/// A page that fails to classify is logged and counted; a reader error ends
/// the extraction.
pub fn extract_records<I, F>(
    pages: I,
    extractor: &RecordExtractor,
    mut on_page: F,
) -> std::result::Result<Extraction, DumpError>
where
    I: IntoIterator<Item = std::result::Result<RawPage, DumpError>>,
    F: FnMut(&RunSummary),
{
    let mut extraction = Extraction::default();

    for page in pages {
        let page = page?;
        match extractor.extract(&page) {
            Ok(record) => {
                extraction.summary.record_page(Ok(&record));
                extraction.records.push(record);
            }
            Err(e) => {
                log_discard(&e);
                extraction.summary.record_page(Err(&e));
            }
        }
        on_page(&extraction.summary);
    }

    Ok(extraction)
}

fn log_discard(error: &ExtractionError) {
    match error {
        ExtractionError::TitleMismatch(_) => {}
        e if e.is_diagnostic() => warn!("Discarding {}", e),
        e => debug!("Discarding {}", e),
    }
}

/// Edges and adjacency for a record list.
pub fn build_graph(records: &[Record], directed: bool) -> (Vec<Edge>, AdjacencyList) {
    let edges = build_edges(records);
    let adjacency = AdjacencyList::from_edges(&edges, directed);
    (edges, adjacency)
}

/// Run the whole pipeline: read, classify, build the graph and write every
/// requested artifact.
pub fn execute_pipeline(
    options: PipelineOptions,
    progress_callback: Option<PipelineProgressCallback>,
) -> Result<PipelineOutput> {
    let PipelineOptions {
        dump,
        title_pattern,
        directed,
        records_csv,
        graph_dot,
        adjacency_json,
        render,
        show_progress,
    } = options;

    let extractor = match title_pattern {
        Some(pattern) => RecordExtractor::with_title_pattern(&pattern)?,
        None => RecordExtractor::new(),
    };

    let report = |msg: String| {
        if let Some(ref callback) = progress_callback {
            callback(msg);
        }
    };

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading dump...");
        Some(pb)
    } else {
        None
    };

    report(format!("Reading {}", dump.display()));
    let reader = DumpReader::open(&dump)?;
    let extraction = extract_records(reader, &extractor, |summary| {
        if let Some(ref pb) = progress_bar
            && summary.pages_seen % 1000 == 0
        {
            pb.set_message(format!(
                "Reading dump... {} pages, {} records",
                summary.pages_seen,
                summary.records()
            ));
        }
    });

    let Extraction {
        records,
        mut summary,
    } = match extraction {
        Ok(extraction) => extraction,
        Err(e) => {
            if let Some(ref pb) = progress_bar {
                pb.abandon_with_message("Reading dump failed");
            }
            return Err(e.into());
        }
    };

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Read {} pages, kept {} records",
            summary.pages_seen,
            summary.records()
        ));
    }
    info!(
        "Extracted {} records from {} pages ({} discarded)",
        summary.records(),
        summary.pages_seen,
        summary.discarded_total()
    );

    let (edges, adjacency) = build_graph(&records, directed);
    summary.record_graph(&edges, &adjacency);
    info!("Built {} edges over {} vertices", edges.len(), adjacency.len());

    if let Some(path) = records_csv {
        report(format!("Writing records to {}", path.display()));
        save_records_csv(&records, &path).map_err(|e| write_error(&path, e))?;
    }

    if let Some(path) = graph_dot {
        report(format!("Writing graph to {}", path.display()));
        let attributes = AttributeAssigner::from_records(&records);
        let dot = render_dot(&adjacency, &attributes, &render);
        save_dot(&dot, &path).map_err(|e| write_error(&path, e))?;
    }

    if let Some(path) = adjacency_json {
        report(format!("Writing adjacency list to {}", path.display()));
        let json = serde_json::to_string_pretty(&adjacency)?;
        save_text(&json, &path)?;
    }

    Ok(PipelineOutput {
        records,
        edges,
        adjacency,
        summary,
    })
}

/// Write a text artifact, creating parent directories as needed.
pub fn save_text(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| write_error(path, e))?;
    }
    fs::write(path, content).map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, source: std::io::Error) -> PipelineError {
    PipelineError::Write {
        path: path.display().to_string(),
        source,
    }
}
