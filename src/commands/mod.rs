use crate::cli::{Cli, Commands};
use anyhow::Result;
use std::path::PathBuf;

mod build;
mod check;

pub fn execute(cli: Cli) -> Result<()> {
    let root = resolve_root(cli.root)?;

    match cli.command {
        Commands::Build { toggles } => build::execute(&root, &toggles),

        Commands::Check => check::execute(&root),
    }
}

fn resolve_root(root: PathBuf) -> Result<PathBuf> {
    if root.is_absolute() {
        return Ok(root);
    }
    Ok(std::env::current_dir()?.join(root))
}
