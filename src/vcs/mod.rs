//! Narrow version-control capability used by the fixture harness.
//!
//! The harness never talks to a git implementation directly. It drives a
//! [`VcsBackend`], which keeps fixture logic testable against the in-memory
//! [`MemoryBackend`] as well as real repositories through [`Git2Backend`].
//!
//! Call ordering the harness guarantees for every fixture:
//! init, then file writes, then `stage_all`, then `commit`.

pub mod git;
pub mod memory;

pub use git::Git2Backend;
pub use memory::MemoryBackend;

use crate::core::error::Result;
use crate::core::fixture::{Author, CommitId, CommitInfo, HeadState};
use chrono::{DateTime, Utc};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    pub bare: bool,
    /// Branch HEAD points at before the first commit.
    pub initial_branch: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            bare: false,
            initial_branch: "master".to_string(),
        }
    }
}

/// `refs/heads/<branch>`
pub fn branch_ref(branch: &str) -> String {
    format!("refs/heads/{branch}")
}

pub trait VcsBackend {
    /// Open handle on a non-bare repository's working tree.
    type Worktree;

    /// Create a repository at an existing, empty directory.
    fn init(&self, path: &Path, options: &InitOptions) -> Result<()>;

    fn open_worktree(&self, path: &Path) -> Result<Self::Worktree>;

    /// Stage every change in the working tree, deletions included.
    fn stage_all(&self, worktree: &mut Self::Worktree) -> Result<()>;

    /// Commit the staged tree on the current branch.
    fn commit(
        &self,
        worktree: &mut Self::Worktree,
        message: &str,
        author: &Author,
        when: DateTime<Utc>,
    ) -> Result<CommitId>;

    /// Switch HEAD and the working tree to `branch`.
    ///
    /// With `create`, the branch is first created at the current HEAD commit
    /// and an existing branch of that name is an error. Without it, a missing
    /// branch fails with `ReferenceNotFound` and nothing changes.
    fn checkout(&self, worktree: &mut Self::Worktree, branch: &str, create: bool) -> Result<()>;

    /// Resolve a full reference name such as `refs/heads/main`.
    fn resolve_reference(&self, worktree: &Self::Worktree, ref_name: &str) -> Result<CommitId>;

    fn head(&self, worktree: &Self::Worktree) -> Result<HeadState>;

    /// Commits reachable from HEAD, newest first.
    fn history(&self, worktree: &Self::Worktree) -> Result<Vec<CommitInfo>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_ref() {
        assert_eq!(branch_ref("feature"), "refs/heads/feature");
        assert_eq!(branch_ref("fix/bug-123"), "refs/heads/fix/bug-123");
    }
}
