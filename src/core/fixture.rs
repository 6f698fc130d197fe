//! Fixture records and the values read back out of a fixture repository.
//!
//! # Public API
//! - [`RepositoryFixture`]: `{owner_name, repo_name, path}` handed to tests and
//!   to the mock hosting service
//! - [`FixtureDir`]: scoped owner of the fixture directory, removes it on drop
//! - [`Author`], [`CommitId`], [`CommitInfo`], [`HeadState`]: commit metadata

use crate::core::error::{FixtureError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One on-disk repository instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryFixture {
    pub owner_name: String,
    pub repo_name: String,
    pub path: PathBuf,
}

impl RepositoryFixture {
    /// `owner/repo`, the form hosting services use to address a repository.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner_name, self.repo_name)
    }
}

/// Owns the directory backing a [`RepositoryFixture`].
///
/// The directory is removed when the handle is dropped. Use [`FixtureDir::close`]
/// to observe removal errors, or [`FixtureDir::keep`] to leave the repository on
/// disk (for example while debugging a failing test).
#[derive(Debug)]
pub struct FixtureDir {
    fixture: RepositoryFixture,
    dir: TempDir,
}

impl FixtureDir {
    pub(crate) fn new(owner_name: &str, repo_name: &str, dir: TempDir) -> Self {
        let fixture = RepositoryFixture {
            owner_name: owner_name.to_string(),
            repo_name: repo_name.to_string(),
            path: dir.path().to_path_buf(),
        };
        Self { fixture, dir }
    }

    pub fn fixture(&self) -> &RepositoryFixture {
        &self.fixture
    }

    /// Absolute path of the repository working tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now, reporting any filesystem error.
    pub fn close(self) -> Result<()> {
        let path = self.fixture.path;
        self.dir.close().map_err(|e| FixtureError::io(path, e))
    }

    /// Disarm cleanup and return the record. The directory outlives the handle.
    pub fn keep(self) -> RepositoryFixture {
        let _ = self.dir.keep();
        self.fixture
    }
}

/// Commit author and committer identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Both fields must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(FixtureError::InvalidAuthor);
        }
        Ok(())
    }
}

impl Default for Author {
    fn default() -> Self {
        Self::new("test", "test@example.com")
    }
}

/// Hex object id of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitId(pub String);

impl CommitId {
    /// Abbreviated id, as shown by `git log --oneline`.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(7);
        &self.0[..end]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub id: CommitId,
    pub message: String,
    pub author: Author,
    pub timestamp: DateTime<Utc>,
}

/// What HEAD points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    Branch { name: String, commit: CommitId },
    Detached { commit: CommitId },
    /// HEAD names a branch that has no commits yet.
    Unborn { name: String },
}

impl HeadState {
    pub fn branch_name(&self) -> Option<&str> {
        match self {
            Self::Branch { name, .. } | Self::Unborn { name } => Some(name),
            Self::Detached { .. } => None,
        }
    }

    pub fn commit(&self) -> Option<&CommitId> {
        match self {
            Self::Branch { commit, .. } | Self::Detached { commit } => Some(commit),
            Self::Unborn { .. } => None,
        }
    }
}
