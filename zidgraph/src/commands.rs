use clap::{Arg, arg, command};
use zidgraph_core::record::DEFAULT_TITLE_PATTERN;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub const DEFAULT_CSV_FILE: &str = "items.csv";
pub const DEFAULT_DOT_FILE: &str = "ZID_graph.dot";

fn dump_arg() -> Arg {
    arg!(<DUMP>)
        .required(true)
        .help("Path to a MediaWiki XML export (pages-meta-current)")
}

fn title_pattern_arg() -> Arg {
    arg!(--"title-pattern" <REGEX>)
        .required(false)
        .help(format!(
            "Only pages whose title matches this pattern are considered (default: {})",
            DEFAULT_TITLE_PATTERN
        ))
}

fn output_dir_arg() -> Arg {
    arg!(-o --"output-dir" <DIR>)
        .required(false)
        .help("Directory the exports are written to")
        .default_value(".")
}

fn csv_arg() -> Arg {
    arg!(--"csv" <FILE>)
        .required(false)
        .help("File name of the record export, relative to the output directory")
        .default_value(DEFAULT_CSV_FILE)
}

fn undirected_arg() -> Arg {
    arg!(--"undirected")
        .required(false)
        .help("Add the reverse of every edge to the adjacency list")
        .action(clap::ArgAction::SetTrue)
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("zidgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("zidgraph")
        .styles(CLAP_STYLING)
        .about("Maps Wikifunctions implementations to the functions they call")
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("run")
                .about("Extract records, build the dependency graph and write every export")
                .arg(dump_arg())
                .arg(output_dir_arg())
                .arg(csv_arg())
                .arg(
                    arg!(--"dot" <FILE>)
                        .required(false)
                        .help("File name of the Graphviz graph, relative to the output directory")
                        .default_value(DEFAULT_DOT_FILE),
                )
                .arg(
                    arg!(--"adjacency" <FILE>)
                        .required(false)
                        .help("Also write the adjacency list as JSON to this file"),
                )
                .arg(
                    arg!(--"summary-json" <FILE>)
                        .required(false)
                        .help("Also write the run summary as JSON to this file"),
                )
                .arg(undirected_arg())
                .arg(
                    arg!(--"seed" <SEED>)
                        .required(false)
                        .help("Layout seed passed to Graphviz")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("50"),
                )
                .arg(title_pattern_arg()),
        )
        .subcommand(
            command!("records")
                .about("Extract records and write the CSV export only")
                .arg(dump_arg())
                .arg(output_dir_arg())
                .arg(csv_arg())
                .arg(title_pattern_arg()),
        )
        .subcommand(
            command!("graph")
                .about("Extract records and print the adjacency list")
                .arg(dump_arg())
                .arg(undirected_arg())
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Print the adjacency list as JSON")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(title_pattern_arg()),
        )
}
