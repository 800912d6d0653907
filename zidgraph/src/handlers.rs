use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use zidgraph_core::graph::AdjacencyList;
use zidgraph_core::pipeline::{PipelineOptions, PipelineProgressCallback, execute_pipeline, save_text};
use zidgraph_core::render::{DEFAULT_LAYOUT_SEED, RenderOptions};
use zidgraph_core::summary::{generate_json_summary, generate_text_summary};

// Helper functions for the command handlers

/// Expand `~` in a user supplied path
pub fn resolve_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Place `file` inside `output_dir` unless it is already absolute
pub fn output_path(output_dir: &Path, file: &str) -> PathBuf {
    let file = resolve_path(file);
    if file.is_absolute() {
        file
    } else {
        output_dir.join(file)
    }
}

fn base_options(args: &ArgMatches) -> PipelineOptions {
    let dump = args
        .get_one::<String>("DUMP")
        .map(|d| resolve_path(d))
        .unwrap_or_default();
    let mut options = PipelineOptions::new(dump);
    options.title_pattern = args.get_one::<String>("title-pattern").cloned();
    options
}

fn output_dir(args: &ArgMatches) -> PathBuf {
    args.get_one::<String>("output-dir")
        .map(|d| resolve_path(d))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Pipeline options for `zidgraph run`
pub fn run_options(args: &ArgMatches, quiet: bool) -> PipelineOptions {
    let dir = output_dir(args);
    let mut options = base_options(args);
    options.directed = !args.get_flag("undirected");
    options.records_csv = args.get_one::<String>("csv").map(|f| output_path(&dir, f));
    options.graph_dot = args.get_one::<String>("dot").map(|f| output_path(&dir, f));
    options.adjacency_json = args.get_one::<String>("adjacency").map(|f| output_path(&dir, f));
    options.render = RenderOptions {
        seed: args.get_one::<u64>("seed").copied().unwrap_or(DEFAULT_LAYOUT_SEED),
        ..RenderOptions::default()
    };
    options.show_progress = !quiet;
    options
}

/// Pipeline options for `zidgraph records`
pub fn records_options(args: &ArgMatches, quiet: bool) -> PipelineOptions {
    let dir = output_dir(args);
    let mut options = base_options(args);
    options.records_csv = args.get_one::<String>("csv").map(|f| output_path(&dir, f));
    options.show_progress = !quiet;
    options
}

/// Pipeline options for `zidgraph graph`; nothing is written to disk
pub fn graph_options(args: &ArgMatches) -> PipelineOptions {
    let mut options = base_options(args);
    options.directed = !args.get_flag("undirected");
    options
}

/// Render an adjacency list for stdout
pub fn format_adjacency(adjacency: &AdjacencyList, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(adjacency)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(adjacency.to_string())
    }
}

fn progress_printer(quiet: bool) -> Option<PipelineProgressCallback> {
    if quiet {
        return None;
    }
    Some(Arc::new(|msg: String| {
        eprintln!("{} {}", "→".blue(), msg);
    }))
}

pub fn print_banner() {
    eprintln!("{}", "═".repeat(60).bright_blue().bold());
    eprintln!(
        "{} {}",
        "  ZIDGRAPH".bright_white().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    eprintln!("{}", "═".repeat(60).bright_blue().bold());
}

pub fn handle_run(args: &ArgMatches, quiet: bool) -> Result<()> {
    let options = run_options(args, quiet);
    let dump = options.dump.clone();
    let csv = options.records_csv.clone();
    let dot = options.graph_dot.clone();

    let output = execute_pipeline(options, progress_printer(quiet))
        .with_context(|| format!("Failed to process {}", dump.display()))?;

    if let Some(path) = args.get_one::<String>("summary-json") {
        let path = output_path(&output_dir(args), path);
        let json = generate_json_summary(&output.summary)?;
        save_text(&json, &path)?;
        info!("Wrote run summary to {}", path.display());
    }

    if !quiet {
        eprint!("{}", generate_text_summary(&output.summary));
        if let Some(csv) = csv {
            eprintln!("{} Records: {}", "✓".green().bold(), csv.display().to_string().bright_white());
        }
        if let Some(dot) = dot {
            eprintln!("{} Graph: {}", "✓".green().bold(), dot.display().to_string().bright_white());
        }
    }
    Ok(())
}

pub fn handle_records(args: &ArgMatches, quiet: bool) -> Result<()> {
    let options = records_options(args, quiet);
    let dump = options.dump.clone();

    let output = execute_pipeline(options, progress_printer(quiet))
        .with_context(|| format!("Failed to process {}", dump.display()))?;

    if !quiet {
        eprintln!(
            "{} Exported {} records ({} implementations, {} function definitions)",
            "✓".green().bold(),
            output.records.len().to_string().cyan(),
            output.summary.implementations,
            output.summary.functions
        );
    }
    Ok(())
}

pub fn handle_graph(args: &ArgMatches, quiet: bool) -> Result<()> {
    let options = graph_options(args);
    let dump = options.dump.clone();

    let output = execute_pipeline(options, progress_printer(quiet))
        .with_context(|| format!("Failed to process {}", dump.display()))?;

    print!("{}", format_adjacency(&output.adjacency, args.get_flag("json"))?);
    Ok(())
}
