use std::path::{Path, PathBuf};
use tracing::info;

use crate::environment::EnvStore;
use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};

mod cargo;
mod dotnet;

pub use cargo::CargoCrate;
pub use dotnet::DotnetProject;

/// Locations the managed build writes to instead of its defaults when publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRedirect {
    pub build_output: PathBuf,
    pub temp_build: PathBuf,
}

/// Everything a project needs to run its toolchain once.
pub struct BuildRequest<'a> {
    pub debug: bool,
    pub env: &'a EnvStore,
    pub runner: &'a dyn CommandRunner,
    pub redirect: Option<&'a OutputRedirect>,
}

/// A sub-project that knows how to build itself.
pub trait Project {
    fn name(&self) -> &str;
    fn root(&self) -> &Path;
    fn build(&self, request: &BuildRequest<'_>) -> Result<()>;

    /// Projects whose outputs get copied into the mod folder.
    fn artifacts(&self) -> Option<&dyn ArtifactSource> {
        None
    }
}

/// Copies a finished build's outputs somewhere else.
pub trait ArtifactSource {
    /// Copy debug or release outputs found under `source_root` into `destination`.
    fn copy_artifacts(&self, debug: bool, source_root: &Path, destination: &Path)
        -> Result<Vec<PathBuf>>;
}

/// Run a toolchain invocation, turning a non-zero exit into `BuildFailed`.
pub(crate) fn run_build(
    project: &str,
    invocation: Invocation,
    request: &BuildRequest<'_>,
) -> Result<()> {
    info!(project, "Building with {invocation}");
    let invocation = invocation.envs(request.env.exports());
    let output = request.runner.run(&invocation)?;
    if output.success {
        Ok(())
    } else {
        Err(Error::BuildFailed {
            project: project.to_string(),
            diagnostics: output.diagnostics(),
        })
    }
}

/// Named sub-projects in registration order.
pub struct ProjectRegistry {
    root: PathBuf,
    projects: Vec<(String, Box<dyn Project>)>,
}

impl ProjectRegistry {
    pub fn new(root: &Path, projects: Vec<(String, Box<dyn Project>)>) -> Self {
        Self {
            root: root.to_path_buf(),
            projects,
        }
    }

    /// Registry with the native crate and the managed project from `config`.
    pub fn from_config(root: &Path, config: &crate::BuildConfig) -> Self {
        let native = CargoCrate::new(
            &config.native.name,
            root.join(&config.native.path),
            config.native.artifacts.clone(),
        );
        let managed = DotnetProject::new(&config.managed.name, root.join(&config.managed.path));

        Self::new(
            root,
            vec![
                (config.managed.name.clone(), Box::new(managed) as Box<dyn Project>),
                (config.native.name.clone(), Box::new(native) as Box<dyn Project>),
            ],
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, name: &str) -> Result<&dyn Project> {
        self.projects
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, project)| project.as_ref())
            .ok_or_else(|| Error::ProjectNotRegistered {
                name: name.to_string(),
            })
    }

    pub fn artifact_source(&self, name: &str) -> Result<&dyn ArtifactSource> {
        self.get(name)?.artifacts().ok_or_else(|| Error::NoArtifacts {
            name: name.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(|(name, _)| name.as_str())
    }
}
