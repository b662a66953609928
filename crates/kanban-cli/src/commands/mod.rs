//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kanban_core::Config;
use std::path::PathBuf;

pub mod config;
pub mod replay;
pub mod serve;

/// In-memory kanban board with drag-and-drop columns and tasks
#[derive(Parser)]
#[command(name = "kanban")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a kanban.toml (defaults to ./kanban.toml if present)
    #[arg(short, long, global = true, env = "KANBAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Replay a scripted session and print the resulting board
    Replay(replay::ReplayArgs),

    /// Print the effective configuration
    Config,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = Config::load_or_default(self.config.as_deref()).with_context(|| match &self.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to load configuration".to_string(),
        })?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Replay(args) => replay::execute(args, config),
            Commands::Config => config::execute(&config),
        }
    }
}
