//! Unified error types for the ovo scaffolding engine.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during template loading, substitution, and
/// materialization.
#[derive(Error, Debug)]
pub enum OvoError {
    // --- Template loading ---

    /// The template root directory does not exist or could not be read.
    #[error("template root not found at {path}")]
    TemplateRootNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template root exists but is not a directory.
    #[error("template root is not a directory: {0}")]
    TemplateRootNotADirectory(PathBuf),

    /// A symlink inside the template tree resolves outside the root.
    /// Rejected to prevent path-escape attacks via crafted templates.
    #[error("symlink escapes the template root: {path}")]
    SymlinkEscape { path: PathBuf },

    /// A template entry could not be read.
    #[error("failed to read template entry {path}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template path contains a non-UTF-8 component, so it cannot carry
    /// tokens and cannot be reproduced portably.
    #[error("template path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),

    /// The named built-in template does not exist.
    #[error("unknown template: {0} (supported: c, cpp-exe, cpp-lib)")]
    UnknownTemplate(String),

    // --- Project name ---

    /// The canonical project name failed identifier validation. Names must
    /// start with a letter and contain only letters, digits, hyphens, and
    /// underscores, so that derived variants are valid C identifiers.
    #[error("invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    // --- Substitution ---

    /// A template references a placeholder key absent from the variable
    /// table. Surfaced with the key and the entry path so the template can
    /// be fixed without inspecting engine internals.
    #[error("unresolved token '{key}' in template entry {path}")]
    UnresolvedToken { key: String, path: String },

    // --- Materialization ---

    /// The destination project directory already exists.
    #[error("destination already exists: {0}")]
    DestinationConflict(PathBuf),

    /// Writing a resolved entry to the destination failed.
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Project manifest ---

    /// The project manifest (`ovo.json`) was not found.
    #[error("manifest not found at {path}")]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project manifest exists but contains invalid JSON.
    #[error("failed to parse manifest at {path}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, OvoError>`.
pub type Result<T> = std::result::Result<T, OvoError>;
