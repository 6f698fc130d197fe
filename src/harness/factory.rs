use crate::core::dirs::{ensure_dir, make_absolute};
use crate::core::error::{FixtureError, Result};
use crate::core::files::write_file;
use crate::core::fixture::FixtureDir;
use crate::harness::FixtureHarness;
use crate::vcs::{InitOptions, VcsBackend};
use log::{debug, info};
use std::path::Path;

impl<B: VcsBackend> FixtureHarness<B> {
    /// Create a fresh repository in a new, uniquely named directory under
    /// `parent_dir`, holding the default file with `content` and exactly one
    /// commit.
    ///
    /// `parent_dir` must already exist. Any failure removes the partially built
    /// directory and is returned as is.
    pub fn create_repository(
        &self,
        owner_name: &str,
        repo_name: &str,
        content: &[u8],
        parent_dir: &Path,
    ) -> Result<FixtureDir> {
        let parent = make_absolute(parent_dir)?;
        let dir = tempfile::Builder::new()
            .prefix(&self.config.dir_prefix)
            .suffix(&self.config.dir_suffix)
            .tempdir_in(&parent)
            .map_err(|e| FixtureError::io(&parent, e))?;
        let fixture = FixtureDir::new(owner_name, repo_name, dir);
        let path = fixture.path().to_path_buf();
        debug!("Creating fixture {} at {}", fixture.fixture().full_name(), path.display());

        let init_options = InitOptions {
            bare: false,
            initial_branch: self.config.initial_branch.clone(),
        };
        self.backend.init(&path, &init_options)?;
        write_file(&path, &self.config.file_name, content)?;

        let mut worktree = self.backend.open_worktree(&path)?;
        self.backend.stage_all(&mut worktree)?;
        let commit = self.backend.commit(
            &mut worktree,
            &self.config.initial_message,
            &self.config.author,
            self.clock.now(),
        )?;

        info!(
            "Created fixture {} at {} ({})",
            fixture.fixture().full_name(),
            path.display(),
            commit.short()
        );
        Ok(fixture)
    }

    /// Like [`create_repository`](Self::create_repository), but `requested_dir`
    /// is created recursively when missing and resolved to an absolute path.
    pub fn create_repository_in(
        &self,
        owner_name: &str,
        repo_name: &str,
        content: &[u8],
        requested_dir: &Path,
    ) -> Result<FixtureDir> {
        ensure_dir(requested_dir)?;
        let parent = make_absolute(requested_dir)?;
        self.create_repository(owner_name, repo_name, content, &parent)
    }

    /// Create the fixture under the system temporary directory.
    pub fn create_repository_in_temp(
        &self,
        owner_name: &str,
        repo_name: &str,
        content: &[u8],
    ) -> Result<FixtureDir> {
        self.create_repository(owner_name, repo_name, content, &std::env::temp_dir())
    }
}
