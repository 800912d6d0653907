use colored::Colorize;
use zidgraph::commands::command_argument_builder;
use zidgraph::handlers::{handle_graph, handle_records, handle_run, print_banner};

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    // Logs go to stderr so `graph` output stays pipeable
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init();

    let result = match chosen_command.subcommand() {
        Some(("run", primary_command)) => handle_run(primary_command, quiet),
        Some(("records", primary_command)) => handle_records(primary_command, quiet),
        Some(("graph", primary_command)) => handle_graph(primary_command, quiet),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
