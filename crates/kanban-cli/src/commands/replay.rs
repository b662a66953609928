//! Script replay command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use kanban_core::Config;
use std::path::PathBuf;

use crate::output;
use crate::script::{Replay, Script};

#[derive(Args)]
pub struct ReplayArgs {
    /// Script file (TOML list of [[step]] tables)
    pub script: PathBuf,

    /// Print the final board as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Do not list the individual steps
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn execute(args: ReplayArgs, config: Config) -> Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let script = Script::from_toml(&text)
        .with_context(|| format!("Failed to parse script {}", args.script.display()))?;

    let mut replay = Replay::new(config.board);
    let reports = replay.run(&script)?;
    let board = replay.session().snapshot();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    if !args.quiet {
        println!("{} {}", "Replaying".cyan().bold(), args.script.display());
        output::print_steps(&reports);
    }
    output::print_board(&board);

    Ok(())
}
