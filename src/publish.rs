use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::PublishConfig;
use crate::error::{Error, Result};
use crate::fetch::{extract_archive, Fetcher};
use crate::projects::OutputRedirect;
use crate::runner::{CommandRunner, Invocation};
use crate::util::fs::{ensure_dir, remove_dir_if_exists};

/// Staging area used only by publish builds.
///
/// ```text
/// Publish/
///   Builds/CurrentVersion/   files that end up in the bundle
///   Temp/Build/              managed build intermediates
///   Tools/                   packaging tool
///   Output/                  finished bundle
/// ```
#[derive(Debug, Clone)]
pub struct PublishState {
    root: PathBuf,
    package_name: String,
    tools_url: String,
    packager: PathBuf,
}

impl PublishState {
    pub const DIR: &'static str = "Publish";

    pub fn new(project_root: &Path, package_name: &str, config: &PublishConfig) -> Self {
        Self {
            root: project_root.join(Self::DIR),
            package_name: package_name.to_string(),
            tools_url: config.tools_url.clone(),
            packager: config.packager.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn build_output(&self) -> PathBuf {
        self.root.join("Builds").join("CurrentVersion")
    }

    pub fn temp_build(&self) -> PathBuf {
        self.root.join("Temp").join("Build")
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.root.join("Tools")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join("Output")
    }

    pub fn packager_path(&self) -> PathBuf {
        self.tools_dir().join(&self.packager)
    }

    pub fn redirect(&self) -> OutputRedirect {
        OutputRedirect {
            build_output: self.build_output(),
            temp_build: self.temp_build(),
        }
    }

    /// Remove anything left over from an earlier publish.
    pub fn cleanup(&self) -> Result<()> {
        if remove_dir_if_exists(&self.root)? {
            info!("Removed previous publish workspace {}", self.root.display());
        }
        Ok(())
    }

    /// Download and unpack the packaging tool into `Tools/`.
    pub fn get_tools(&self, fetcher: &dyn Fetcher) -> Result<()> {
        let tools_dir = self.tools_dir();
        ensure_dir(&tools_dir)?;

        let archive_name = self
            .tools_url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("Tools.zip");
        let archive = self.root.join(archive_name);

        fetcher
            .fetch(&self.tools_url, &archive)
            .map_err(|err| Error::Assembly(format!("could not download tools: {err}")))?;
        extract_archive(&archive, &tools_dir)
            .map_err(|err| Error::Assembly(format!("could not unpack tools: {err}")))?;

        let packager = self.packager_path();
        if !packager.is_file() {
            return Err(Error::Assembly(format!(
                "tools archive from {} does not contain {}",
                self.tools_url,
                self.packager.display()
            )));
        }
        Ok(())
    }

    /// Package everything under `Builds/CurrentVersion` into `Output/`.
    pub fn create_artifacts(&self, runner: &dyn CommandRunner) -> Result<PathBuf> {
        let packager = self.packager_path();
        if !packager.is_file() {
            return Err(Error::Assembly(format!(
                "packager {} is missing; tools were not provisioned",
                packager.display()
            )));
        }

        let output_dir = self.output_dir();
        ensure_dir(&output_dir)?;

        let invocation = Invocation::new(packager, &self.root)
            .arg("--modfolder")
            .arg(self.build_output().as_os_str())
            .arg("--packagename")
            .arg(&self.package_name)
            .arg("--outputfolder")
            .arg(output_dir.as_os_str());

        let output = runner.run(&invocation)?;
        if !output.success {
            return Err(Error::Assembly(output.diagnostics()));
        }
        info!("Publish bundle written to {}", output_dir.display());
        Ok(output_dir)
    }
}
