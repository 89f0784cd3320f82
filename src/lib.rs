// Public API
pub mod cli;
pub mod commands;

// Build pipeline
pub mod arguments;
pub mod config;
pub mod environment;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod projects;
pub mod publish;
pub mod runner;

mod ui;
mod util;

// Re-export main types
pub use arguments::{ArgumentList, ArgumentRegistry, Toggle};
pub use config::BuildConfig;
pub use environment::EnvStore;
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use pipeline::{Executor, Mode, Outcome, Report, Step, StepRecord};
pub use projects::{ArtifactSource, CargoCrate, DotnetProject, Project, ProjectRegistry};
pub use publish::PublishState;
pub use runner::{CommandRunner, Invocation, ProcessOutput, ProcessRunner};
