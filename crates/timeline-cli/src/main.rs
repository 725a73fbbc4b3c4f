#![forbid(unsafe_code)]

mod cmd;
mod gantt;
mod output;
mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use std::env;
use timeline_core::config::resolve_config;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "tl",
    author,
    version,
    about = "tl: pack dated items into the fewest non-overlapping lanes",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "Print the lane assignment",
        long_about = "Pack items into the minimum number of non-overlapping lanes and print them.",
        after_help = "EXAMPLES:\n    # Lanes for a file\n    tl lanes plan.json\n\n    # Read items from stdin\n    tl sample | tl lanes -\n\n    # Emit machine-readable output\n    tl lanes --sample --format json"
    )]
    Lanes(cmd::lanes::LanesArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show timeline statistics",
        long_about = "Show item count, lane count, total days, date range, and peak overlap.",
        after_help = "EXAMPLES:\n    # Stats for a file\n    tl stats plan.json\n\n    # Emit machine-readable output\n    tl stats --sample --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Read",
        about = "Draw a text Gantt chart",
        long_about = "Draw the lanes as a text Gantt chart with a weekly time scale.",
        after_help = "EXAMPLES:\n    # Chart at default zoom\n    tl chart plan.json\n\n    # Zoom in on a wider canvas\n    tl chart --sample --zoom 2.25 --width 120"
    )]
    Chart(cmd::chart::ChartArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Rename an item",
        long_about = "Rename one item and print the updated items as JSON. The input file is not modified.",
        after_help = "EXAMPLES:\n    # Rename item 3\n    tl rename plan.json --id 3 --name \"Translate phrases\"\n\n    # Chain with other commands\n    tl rename --sample --id 16 --name \"Go live\" | tl lanes -"
    )]
    Rename(cmd::rename::RenameArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Open the interactive timeline",
        long_about = "Browse lanes in the terminal with zoom and inline rename. Without FILE the built-in launch plan is shown.",
        after_help = "EXAMPLES:\n    # Browse a file\n    tl view plan.json\n\n    # Browse the built-in launch plan\n    tl view"
    )]
    View(cmd::view::ViewArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Print the built-in launch plan",
        long_about = "Print the 16-item launch plan as item JSON.",
        after_help = "EXAMPLES:\n    # Save the sample to a file\n    tl sample > plan.json"
    )]
    Sample(cmd::sample::SampleArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        long_about = "Generate shell completion scripts for tl.",
        after_help = "EXAMPLES:\n    # Bash\n    tl completions bash > ~/.local/share/bash-completion/completions/tl\n\n    # Zsh\n    tl completions zsh > ~/.zfunc/_tl"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TIMELINE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "timeline_core=debug,tl=debug,info"
        } else {
            "timeline_core=info,tl=info,warn"
        })
    });

    let format = env::var("TIMELINE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let config = resolve_config(&project_root)?;
    let output = resolve_output_mode(cli.format, cli.json, config.user.output.as_deref());

    match cli.command {
        Commands::Lanes(ref args) => cmd::lanes::run_lanes(args, output),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output),
        Commands::Chart(ref args) => cmd::chart::run_chart(args, output, &config.project),
        Commands::Rename(ref args) => cmd::rename::run_rename(args, output, cli.quiet),
        Commands::View(ref args) => cmd::view::run_view(args, output, &config.project),
        Commands::Sample(ref args) => cmd::sample::run_sample(args),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }
    }
}
