use std::path::PathBuf;
use thiserror::Error;

/// Error raised by an application entry point. Passed through untouched.
pub type ApplicationError = Box<dyn std::error::Error + Send + Sync>;

/// Central error type for the entire launcher.
/// Every module returns `Result<T, LauncherError>`.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Archive ─────────────────────────────────────────
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ── Metadata ────────────────────────────────────────
    #[error("Bundle metadata record ({path}) is missing")]
    MetadataMissing { path: String },

    #[error("Bundle metadata is missing entry {key}")]
    MetadataIncomplete { key: String },

    #[error("Metadata parse error at line {line}: {reason}")]
    MetadataParse { line: usize, reason: String },

    // ── Protocol ────────────────────────────────────────
    #[error("Invalid virtual URI: {0}")]
    InvalidUri(String),

    #[error("No protocol handler installed for scheme '{0}'")]
    UnknownScheme(String),

    #[error("A different protocol handler is already installed for scheme '{0}'")]
    HandlerAlreadyInstalled(String),

    #[error("Failed to open stream to '{uri}' in bundle context")]
    ResourceNotFound { uri: String },

    // ── Dynamic lookup ──────────────────────────────────
    #[error("Class not found in loading context: {0}")]
    ClassNotFound(String),

    #[error("No entry method registered for class {0}")]
    EntryMethodNotFound(String),

    // ── Application ─────────────────────────────────────
    #[error(transparent)]
    Application(ApplicationError),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
