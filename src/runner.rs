use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// A single external process to run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub current_dir: PathBuf,
    pub envs: Vec<(String, String)>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, current_dir: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.to_path_buf(),
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn envs<'a>(mut self, envs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.envs
            .extend(envs.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    /// True when any argument equals `value`.
    pub fn has_arg(&self, value: &str) -> bool {
        self.args.iter().any(|arg| arg == value)
    }

    /// Argument following `flag`, if present.
    pub fn arg_after(&self, flag: &str) -> Option<&OsString> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|index| self.args.get(index + 1))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Text worth showing the user when the process failed.
    pub fn diagnostics(&self) -> String {
        let mut text = String::new();
        if let Some(code) = self.code {
            text.push_str(&format!("exit code {code}\n"));
        }
        for stream in [&self.stderr, &self.stdout] {
            let trimmed = stream.trim();
            if !trimmed.is_empty() {
                text.push_str(trimmed);
                text.push('\n');
            }
        }
        text.trim_end().to_string()
    }
}

/// Runs toolchains and other helper processes synchronously.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;
}

/// Spawns real processes and waits for them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        info!("Running {invocation}");
        debug!(cwd = %invocation.current_dir.display(), envs = invocation.envs.len());

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.current_dir)
            .envs(invocation.envs.iter().map(|(k, v)| (k, v)))
            .output()
            .map_err(|source| Error::Io {
                path: invocation.program.clone(),
                source,
            })?;

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invocation_builder() {
        let invocation = Invocation::new("cargo", Path::new("/src"))
            .arg("build")
            .args(["--release"])
            .envs([("OPENGFD_PATH", "/x")]);

        assert_eq!(invocation.to_string(), "cargo build --release");
        assert!(invocation.has_arg("--release"));
        assert_eq!(invocation.arg_after("build"), Some(&OsString::from("--release")));
        assert_eq!(invocation.envs, vec![("OPENGFD_PATH".to_string(), "/x".to_string())]);
    }

    #[test]
    fn test_diagnostics_prefers_stderr() {
        let output = ProcessOutput {
            success: false,
            code: Some(101),
            stdout: "Compiling p5r-freecam\n".to_string(),
            stderr: "error[E0425]: cannot find value\n".to_string(),
        };
        let text = output.diagnostics();
        assert!(text.starts_with("exit code 101"));
        assert!(text.find("error[E0425]").unwrap() < text.find("Compiling").unwrap());
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation::new("modbuild-no-such-program", temp.path());
        let err = ProcessRunner.run(&invocation).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_captures_output_and_env() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation::new("sh", temp.path())
            .args(["-c", "echo \"$MODBUILD_TEST_VALUE\"; echo oops >&2; exit 3"])
            .envs([("MODBUILD_TEST_VALUE", "hello")]);

        let output = ProcessRunner.run(&invocation).unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.stderr.trim(), "oops");
    }
}
