//! Configuration command.

use anyhow::Result;
use kanban_core::Config;

pub fn execute(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
