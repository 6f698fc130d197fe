use crate::core::error::{FixtureError, Result};
use crate::core::files::{validate_file_name, write_file};
use crate::core::fixture::CommitId;
use crate::harness::FixtureHarness;
use crate::vcs::VcsBackend;
use log::info;
use std::path::Path;

impl<B: VcsBackend> FixtureHarness<B> {
    /// Overwrite (or create) `file_name`, stage the whole working tree and
    /// commit it on the current branch with the fixed author identity.
    ///
    /// An unchanged file still produces a commit if the backend allows it.
    pub fn write_and_commit(
        &self,
        fixture_path: &Path,
        file_name: &str,
        content: &[u8],
        message: &str,
    ) -> Result<CommitId> {
        if message.trim().is_empty() {
            return Err(FixtureError::EmptyCommitMessage);
        }
        validate_file_name(file_name)?;

        let mut worktree = self.backend.open_worktree(fixture_path)?;
        write_file(fixture_path, file_name, content)?;
        self.backend.stage_all(&mut worktree)?;
        let commit = self.backend.commit(
            &mut worktree,
            message,
            &self.config.author,
            self.clock.now(),
        )?;

        info!(
            "Committed {} in {} ({})",
            file_name,
            fixture_path.display(),
            commit.short()
        );
        Ok(commit)
    }

    /// [`write_and_commit`](Self::write_and_commit) on the default file.
    pub fn change_test_file(
        &self,
        fixture_path: &Path,
        content: &[u8],
        message: &str,
    ) -> Result<CommitId> {
        self.write_and_commit(fixture_path, &self.config.file_name, content, message)
    }
}
