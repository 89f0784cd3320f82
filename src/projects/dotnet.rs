use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{run_build, BuildRequest, Project};
use crate::error::Result;
use crate::runner::Invocation;

/// The managed half of the mod, built with the dotnet CLI.
#[derive(Debug, Clone)]
pub struct DotnetProject {
    name: String,
    root: PathBuf,
}

impl DotnetProject {
    pub fn new(name: &str, root: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            root,
        }
    }
}

impl Project for DotnetProject {
    fn name(&self) -> &str {
        &self.name
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn build(&self, request: &BuildRequest<'_>) -> Result<()> {
        let invocation = match request.redirect {
            // Publishing always ships a release build into the staged folder.
            Some(redirect) => {
                let mut output_path = OsString::from("/p:OutputPath=");
                output_path.push(redirect.temp_build.as_os_str());
                output_path.push(std::path::MAIN_SEPARATOR_STR);

                Invocation::new("dotnet", &self.root)
                    .arg("publish")
                    .arg(self.root.as_os_str())
                    .args(["-c", "Release", "--self-contained", "false", "-o"])
                    .arg(redirect.build_output.as_os_str())
                    .arg(output_path)
            }
            None => Invocation::new("dotnet", &self.root)
                .arg("build")
                .arg(self.root.as_os_str())
                .args(["-c", if request.debug { "Debug" } else { "Release" }]),
        };
        run_build(&self.name, invocation, request)
    }
}
