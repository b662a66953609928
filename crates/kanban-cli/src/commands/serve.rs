//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use kanban_core::Config;
use std::path::PathBuf;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides server.port)
    #[arg(long, env = "KANBAN_PORT")]
    pub port: Option<u16>,

    /// Host to bind to (overrides server.host)
    #[arg(long, env = "KANBAN_HOST")]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to kanban-serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    println!();
    println!("  {} {}", "Kanban".cyan().bold(), "Web Server".bold());
    println!();
    println!(
        "  {}  http://{}:{}",
        "Board".green(),
        config.server.host,
        config.server.port
    );
    println!(
        "  {}    http://{}:{}/api",
        "API".green(),
        config.server.host,
        config.server.port
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    kanban_web::run_server(&config.server, config.board).await?;

    Ok(())
}
