//! vdocs CLI - versioned documentation renderer.
//!
//! Provides commands for:
//! - `render`: Render a templated markdown file to HTML
//! - `compare`: Evaluate a version condition operator

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CompareArgs, RenderArgs};
use output::Output;

/// vdocs - Versioned documentation renderer.
#[derive(Parser)]
#[command(name = "vdocs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown file with template syntax to HTML.
    Render(RenderArgs),
    /// Compare two version strings with a condition operator.
    Compare(CompareArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&output),
        Commands::Compare(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
