use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can stop a build. None of these are recoverable.
#[derive(Debug, Error)]
pub enum Error {
    #[error("File {file} is missing from {root}! Please create this, then replace the file paths to point to repositories on your machine")]
    MissingLocalConfig { file: &'static str, root: PathBuf },

    #[error("Invalid local configuration {path}: {message}")]
    InvalidLocalConfig { path: PathBuf, message: String },

    #[error("Invalid project configuration {path}: {message}")]
    InvalidProjectConfig { path: PathBuf, message: String },

    #[error("The environment variable {0} is not defined!")]
    MissingVariable(String),

    #[error("Value {key} does not exist in the ENV list")]
    MissingValue { key: String },

    #[error("Value {key} already exists in the ENV list")]
    DuplicateKey { key: String },

    #[error("Project '{name}' is not registered")]
    ProjectNotRegistered { name: String },

    #[error("Project '{name}' does not produce copyable artifacts")]
    NoArtifacts { name: String },

    #[error("Unknown argument '{0}'")]
    UnknownArgument(String),

    #[error("Argument '{name}' expects {expected} value(s), got {found}")]
    MissingArgumentValue {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Expected a boolean value for '{name}', got {value} instead")]
    InvalidToggle { name: String, value: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    #[error("No build output found for '{project}' at {path}; did the build run?")]
    MissingArtifacts { project: String, path: PathBuf },

    #[error("Build of '{project}' failed:\n{diagnostics}")]
    BuildFailed { project: String, diagnostics: String },

    #[error("Failed to assemble publish bundle: {0}")]
    Assembly(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Attach a path to a raw `std::io::Error`.
pub(crate) trait IoContext<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::io(path, source))
    }
}
