pub mod args;
pub mod commands;
pub mod context;

pub use args::{EditAction, EditArgs, FmtArgs, GraphArgs, LintArgs, ModeArg};
pub use context::CliContext;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
WORKFLOW COMMANDS:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "routeforge")]
#[command(version = crate::VERSION)]
#[command(about = "Structural editor for Camel YAML integration workflows")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: lint a workflow, inspect its graph, apply edits by node path, then fmt to normalize."
)]
pub struct Args {
    /// Configuration file (default: ./routeforge.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog file overriding catalog.path
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Normalize a workflow file",
        long_about = "Fmt reads a workflow, expands shorthand forms, drops empty fields and writes the canonical layout.",
        after_help = "Example:\n    routeforge fmt flows.camel.yaml --write"
    )]
    Fmt(FmtArgs),
    #[command(
        about = "Print the visual graph of each flow",
        long_about = "Graph projects every flow into its canvas graph and renders it as an indented tree, Graphviz DOT or JSON.",
        after_help = "Example:\n    routeforge graph flows.camel.yaml --format dot | dot -Tsvg > flows.svg"
    )]
    Graph(GraphArgs),
    #[command(
        about = "Check flows for structural problems",
        long_about = "Lint reports duplicate ids, missing required fields, empty source endpoints, unknown step kinds and empty branches. Exits non-zero when errors are found.",
        after_help = "Example:\n    routeforge lint flows.camel.yaml --json"
    )]
    Lint(LintArgs),
    #[command(
        about = "Apply a structural edit by node path",
        long_about = "Edit inserts, removes, moves or updates steps addressed by the node paths shown by `graph`.",
        after_help = "Examples:\n    routeforge edit flows.camel.yaml add route.from.steps.0.log choice\n    routeforge edit flows.camel.yaml move route.from.steps.2.to route.from.steps.0.log --write"
    )]
    Edit(EditArgs),
}

pub fn run(args: Args) -> crate::Result<()> {
    let context = CliContext::load(args.config.as_deref(), args.catalog.as_deref())?;
    match args.command {
        Command::Fmt(fmt_args) => commands::fmt(&context, fmt_args),
        Command::Graph(graph_args) => commands::graph(&context, graph_args),
        Command::Lint(lint_args) => commands::lint(&context, lint_args),
        Command::Edit(edit_args) => commands::edit(&context, edit_args),
    }
}
