use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{run_build, ArtifactSource, BuildRequest, Project};
use crate::error::{Error, IoContext, Result};
use crate::runner::Invocation;
use crate::util::fs::copy_file;

/// The native half of the mod, built with cargo.
#[derive(Debug, Clone)]
pub struct CargoCrate {
    name: String,
    root: PathBuf,
    artifact_extensions: Vec<String>,
}

impl CargoCrate {
    pub fn new(name: &str, root: PathBuf, artifact_extensions: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            root,
            artifact_extensions,
        }
    }

    fn profile_dir(debug: bool) -> &'static str {
        if debug {
            "debug"
        } else {
            "release"
        }
    }

    /// Cargo writes to the workspace target directory when the crate is a
    /// workspace member, otherwise to the crate's own.
    fn output_dir(&self, debug: bool, source_root: &Path) -> Result<PathBuf> {
        let profile = Self::profile_dir(debug);
        let candidates = [
            source_root.join("target").join(profile),
            self.root.join("target").join(profile),
        ];
        candidates
            .iter()
            .find(|dir| dir.is_dir())
            .cloned()
            .ok_or_else(|| Error::MissingArtifacts {
                project: self.name.clone(),
                path: candidates[1].clone(),
            })
    }

    fn is_artifact(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.artifact_extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }
}

impl Project for CargoCrate {
    fn name(&self) -> &str {
        &self.name
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn build(&self, request: &BuildRequest<'_>) -> Result<()> {
        let mut invocation = Invocation::new("cargo", &self.root).arg("build");
        if !request.debug {
            invocation = invocation.arg("--release");
        }
        run_build(&self.name, invocation, request)
    }

    fn artifacts(&self) -> Option<&dyn ArtifactSource> {
        Some(self)
    }
}

impl ArtifactSource for CargoCrate {
    fn copy_artifacts(
        &self,
        debug: bool,
        source_root: &Path,
        destination: &Path,
    ) -> Result<Vec<PathBuf>> {
        let output_dir = self.output_dir(debug, source_root)?;
        debug!("Collecting {} artifacts from {}", self.name, output_dir.display());

        let mut copied = Vec::new();
        for entry in fs::read_dir(&output_dir).at(&output_dir)? {
            let path = entry.at(&output_dir)?.path();
            if !path.is_file() || !self.is_artifact(&path) {
                continue;
            }
            let Some(file_name) = path.file_name() else {
                continue;
            };
            let target = destination.join(file_name);
            copy_file(&path, &target)?;
            copied.push(target);
        }
        copied.sort();
        Ok(copied)
    }
}
