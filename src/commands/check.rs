use crate::environment::{EnvStore, ENV_LOCAL_FILE};
use crate::{config::expand_path, ui, BuildConfig};
use anyhow::Result;
use std::env;
use std::path::Path;

/// Report every problem that would stop `build`, instead of only the first.
pub fn execute(root: &Path) -> Result<()> {
    let mut issues = Vec::new();

    let config = match BuildConfig::load(root) {
        Ok(config) => config,
        Err(err) => {
            ui::error(&err);
            anyhow::bail!("Configuration check failed (1 issue(s)).");
        }
    };

    match env::var(&config.deploy_variable) {
        Ok(value) if !value.is_empty() => {
            let target = expand_path(&value).join(&config.mod_id);
            ui::info(format!("Deployment target: {}", target.display()));
        }
        _ => issues.push(format!(
            "The environment variable {} is not defined!",
            config.deploy_variable
        )),
    }

    for (kind, relative) in [
        ("native", &config.native.path),
        ("managed", &config.managed.path),
    ] {
        let dir = root.join(relative);
        if !dir.is_dir() {
            issues.push(format!("{kind} project directory {} does not exist", dir.display()));
        }
    }

    match EnvStore::load(root) {
        Ok(store) => match store.get(&config.binding.env_key) {
            Ok(checkout) => {
                let binding = expand_path(checkout).join(&config.binding.source);
                if !binding.is_file() {
                    issues.push(format!(
                        "binding file {} (from {}) does not exist",
                        binding.display(),
                        config.binding.env_key
                    ));
                }
            }
            Err(err) => issues.push(format!("{ENV_LOCAL_FILE}: {err}")),
        },
        Err(err) => issues.push(err.to_string()),
    }

    if issues.is_empty() {
        ui::success("Check", format!("{} is ready to build.", config.mod_id));
        Ok(())
    } else {
        for issue in &issues {
            ui::error(issue);
        }
        anyhow::bail!("Configuration check failed ({} issue(s)).", issues.len());
    }
}
