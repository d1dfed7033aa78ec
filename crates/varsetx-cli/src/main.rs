//! VarsetX CLI
//!
//! Drives the selection cascade and edit-chain builder against YAML scene
//! fixtures, keeping the edit chain in a JSON file between runs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use varsetx_core::logging_facility::{init, Profile};

mod chain_file;
mod commands;

#[derive(Debug, Parser)]
#[command(name = "varsetx")]
#[command(about = "VarsetX - Variant selection to edit chains", long_about = None)]
struct Cli {
    /// Applier configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List selectable nodes, groups and choices of a scene
    Inspect(commands::inspect::InspectArgs),
    /// Apply one selection to the edit chain
    Apply(commands::apply::ApplyArgs),
    /// Remove every applier-created edit node
    Reset(commands::reset::ResetArgs),
    /// Render the edit chain to Markdown
    Show(commands::show::ShowArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = commands::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Inspect(args) => commands::inspect::execute(args),
        Commands::Apply(args) => commands::apply::execute(args, config),
        Commands::Reset(args) => commands::reset::execute(args, config),
        Commands::Show(args) => commands::show::execute(args),
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
