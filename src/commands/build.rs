use crate::{ui, Executor, HttpFetcher, ProcessRunner};
use anyhow::{Context, Result};
use std::env;
use std::path::Path;

pub fn execute(root: &Path, toggles: &[String]) -> Result<()> {
    let fetcher = HttpFetcher::new()?;
    let runner = ProcessRunner;

    let mut executor = Executor::new(root, toggles, env::vars().collect(), &fetcher, &runner)
        .context("Invalid build configuration")?;
    let report = executor.execute()?;

    match &report.bundle {
        Some(bundle) => ui::info(format!("Bundle written to {}", bundle.display())),
        None => ui::info(format!(
            "Deployed {} file(s) to {}",
            report.staged.len(),
            report.destination.display()
        )),
    }
    Ok(())
}
