use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mod build orchestrator
///
/// modbuild compiles the native (cargo) and managed (dotnet) halves of a
/// Reloaded-II mod, then deploys them into `$RELOADEDIIMODS` or packages them
/// for release. Local paths are read from `env.local.yaml` in the project root.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root containing env.local.yaml and both sub-projects
    #[arg(short = 'C', long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build both projects and deploy or publish the mod
    ///
    /// Toggles are given as NAME VALUE pairs, for example
    /// `modbuild build Debug true Publish false`. Recognized toggles:
    /// Debug, SkipGlobals, Timings, Publish (all default to false).
    Build {
        /// Toggle/value pairs
        #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
        toggles: Vec<String>,
    },

    /// Validate local configuration without building
    Check,
}
