//! Command line helper for projects using `arena-http`.
//!
//! ```bash
//! # Write ARENA-AGENTS.md into the current directory
//! arena-http init-agents
//!
//! # Overwrite an existing file
//! arena-http init-agents --force
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const AGENTS_FILE: &str = "ARENA-AGENTS.md";
const AGENTS_TEMPLATE: &str = include_str!("../../templates/ARENA-AGENTS.md");

/// Project scaffolding for the Are.na API client
#[derive(Parser)]
#[command(name = "arena-http", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create ARENA-AGENTS.md in the current project root
    InitAgents {
        /// Overwrite an existing ARENA-AGENTS.md
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::InitAgents { force }) => {
            let dir = std::env::current_dir().context("cannot resolve the current directory")?;
            let path = init_agents(&dir, force)?;
            println!("Created {}", path.display());
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }
    Ok(())
}

/// Writes the agent guide into `dir`, returning the written path.
fn init_agents(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(AGENTS_FILE);
    if path.exists() && !force {
        bail!("{AGENTS_FILE} already exists. Re-run with --force to overwrite.");
    }

    debug!(path = %path.display(), force, "writing agent guide");
    fs::write(&path, AGENTS_TEMPLATE)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "agent guide written");
    Ok(path)
}
