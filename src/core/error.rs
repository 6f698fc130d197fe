//! Domain-specific error types for fixture construction and inspection.
//!
//! This module defines [`FixtureError`], the single error type returned by every
//! harness operation. It uses `thiserror` for ergonomic error definitions and
//! provides constructors for the common failure scenarios.
//!
//! # Public API
//! - [`FixtureError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, FixtureError>`
//!
//! # Error Categories
//! - **Filesystem**: directory creation, file reads and writes
//! - **VCS initialization**: the repository cannot be created at a path
//! - **VCS operations**: opening, staging, committing, switching branches
//! - **References**: a branch that does not resolve, or already exists
//! - **Input validation**: file names, commit messages, author identity

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error produced by a VCS backend.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Domain-specific error types for repo-fixtures
#[derive(Error, Debug)]
pub enum FixtureError {
    // Filesystem errors
    #[error("IO error at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // VCS errors
    #[error("Failed to initialize repository at '{path}': {source}")]
    VcsInit { path: PathBuf, source: BackendError },

    #[error("VCS operation '{operation}' failed: {source}")]
    VcsOperation {
        operation: String,
        source: BackendError,
    },

    #[error("Reference not found: {name}")]
    ReferenceNotFound { name: String },

    #[error("Branch already exists: {name}")]
    BranchExists { name: String },

    #[error("Invalid branch name '{name}'")]
    InvalidBranchName { name: String },

    // Input validation errors
    #[error("Invalid file name '{name}': must be a relative path inside the fixture")]
    InvalidFileName { name: String },

    #[error("Commit message must not be empty")]
    EmptyCommitMessage,

    #[error("Author identity must have a non-empty name and email")]
    InvalidAuthor,

    #[error("Timestamp {seconds} is out of range")]
    InvalidTimestamp { seconds: i64 },

    #[error("Clock step must be a positive number of seconds, got {step_seconds}")]
    InvalidClockStep { step_seconds: i64 },

    // Configuration errors
    #[error("Invalid fixture configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience type alias for Results using FixtureError
pub type Result<T> = std::result::Result<T, FixtureError>;

impl FixtureError {
    /// Create an I/O error tagged with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a repository initialization error
    pub fn vcs_init<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::VcsInit {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Create a VCS operation error for the named step
    pub fn vcs_operation<E>(operation: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::VcsOperation {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Create a reference not found error
    pub fn reference_not_found(name: impl Into<String>) -> Self {
        Self::ReferenceNotFound { name: name.into() }
    }

    /// Create a branch exists error
    pub fn branch_exists(name: impl Into<String>) -> Self {
        Self::BranchExists { name: name.into() }
    }

    /// Create an invalid file name error
    pub fn invalid_file_name(name: impl Into<String>) -> Self {
        Self::InvalidFileName { name: name.into() }
    }

    /// True only for "does not exist" conditions: an unresolved reference or a
    /// missing file. Every other failure, including permission errors, is false.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ReferenceNotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
