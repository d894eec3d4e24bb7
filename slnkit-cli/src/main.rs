//! slnkit: inspect and edit solution documents.
//!
//! # Usage
//!
//! ```text
//! slnkit load <solution> [--placeholders] [--no-migrate]
//! slnkit info <solution> [--json]
//! slnkit find <solution> <file>
//! slnkit add <solution> <project-file> [--new]
//! slnkit remove <solution> <project-name>
//! slnkit set-startup <solution> [<project-name> | --clear]
//! slnkit config [--missing-references skip|placeholder] [--migrate true|false]
//! ```
//!
//! Set `RUST_LOG` (for example `RUST_LOG=debug`) to see loader diagnostics.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    add::AddArgs, config::ConfigArgs, find::FindArgs, info::InfoArgs, load::LoadArgs,
    remove::RemoveArgs, startup::SetStartupArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "slnkit",
    version,
    about = "Load, migrate and edit solution documents",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a solution, migrating legacy documents to the new schema.
    Load(LoadArgs),

    /// Show the items of a solution.
    Info(InfoArgs),

    /// Find the project that owns a source file.
    Find(FindArgs),

    /// Add a project file to a solution.
    Add(AddArgs),

    /// Remove a project from a solution by name.
    Remove(RemoveArgs),

    /// Set or clear the startup project.
    SetStartup(SetStartupArgs),

    /// Show or change the loader configuration.
    Config(ConfigArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Load(args) => args.run(),
        Commands::Info(args) => args.run(),
        Commands::Find(args) => args.run(),
        Commands::Add(args) => args.run(),
        Commands::Remove(args) => args.run(),
        Commands::SetStartup(args) => args.run(),
        Commands::Config(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
