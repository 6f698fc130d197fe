use crate::core::error::{FixtureError, Result};
use crate::core::fixture::HeadState;
use crate::harness::FixtureHarness;
use crate::vcs::{branch_ref, VcsBackend};
use log::{debug, info};
use std::path::Path;

impl<B: VcsBackend> FixtureHarness<B> {
    /// Switch the fixture to `branch_name`.
    ///
    /// With `create`, the branch is created at the current HEAD commit first;
    /// an existing branch of that name fails with `BranchExists`. Without it,
    /// a missing branch fails with `ReferenceNotFound` and HEAD stays put.
    pub fn checkout(&self, fixture_path: &Path, branch_name: &str, create: bool) -> Result<()> {
        let mut worktree = self.backend.open_worktree(fixture_path)?;
        self.backend.checkout(&mut worktree, branch_name, create)?;
        info!(
            "Switched {} to branch '{}' (created: {})",
            fixture_path.display(),
            branch_name,
            create
        );
        Ok(())
    }

    /// Whether `refs/heads/<branch_name>` resolves.
    ///
    /// Only "reference not found" becomes `false`, along with names that no
    /// branch could ever carry (`a..b`); any other failure is returned.
    pub fn branch_exists(&self, fixture_path: &Path, branch_name: &str) -> Result<bool> {
        let worktree = self.backend.open_worktree(fixture_path)?;
        match self.backend.resolve_reference(&worktree, &branch_ref(branch_name)) {
            Ok(_) => Ok(true),
            Err(FixtureError::ReferenceNotFound { name }) => {
                debug!("{name} does not exist in {}", fixture_path.display());
                Ok(false)
            }
            Err(FixtureError::InvalidBranchName { name }) => {
                debug!("{name} is not a valid branch name");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn current_branch(&self, fixture_path: &Path) -> Result<HeadState> {
        let worktree = self.backend.open_worktree(fixture_path)?;
        self.backend.head(&worktree)
    }
}
