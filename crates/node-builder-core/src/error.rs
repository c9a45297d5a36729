//! Error type shared by the builder, installer and driver

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop (or be reported during) a scaffolding run
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// A value outside an allow-list or a rejected free-text answer.
    /// Recovered by prompting again; never reaches the builder.
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Input stream closed: {0}")]
    InputClosed(#[source] io::Error),

    #[error("Directory '{}' already exists and is not empty", .0.display())]
    DirectoryConflict(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Template '{0}' not found")]
    TemplateMissing(String),

    #[error("Failed to render template '{name}': {source}")]
    TemplateRender {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported combination: {0}")]
    UnsupportedCombination(String),

    #[error("Command `{command}` failed: {status}")]
    ExternalCommandFailure { command: String, status: String },

    #[error("Invalid package manifest: {0}")]
    Manifest(String),
}

impl ScaffoldError {
    /// Map an IO error on `path` to the matching variant
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::WriteFailure { path, source },
        }
    }
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
