//! Fixture construction and git-state introspection.
//!
//! [`FixtureHarness`] ties a [`VcsBackend`] to a [`FixtureConfig`] and a commit
//! [`Clock`]. Its operations are split by concern:
//! - `factory`: create a repository with its first commit
//! - `commit`: write a file and record a commit on the current branch
//! - `branch`: create, switch and probe branches
//!
//! Operations are synchronous. Different fixtures may be driven from different
//! threads; calls against the same fixture must be sequenced by the caller.

mod branch;
mod commit;
mod factory;

use crate::core::clock::Clock;
use crate::core::config::FixtureConfig;
use crate::core::error::Result;
use crate::core::files;
use crate::core::fixture::CommitInfo;
use crate::vcs::{Git2Backend, VcsBackend};
use std::path::Path;

#[derive(Debug)]
pub struct FixtureHarness<B: VcsBackend = Git2Backend> {
    config: FixtureConfig,
    backend: B,
    clock: Box<dyn Clock>,
}

impl FixtureHarness<Git2Backend> {
    /// Harness over real git repositories with the default configuration.
    pub fn new() -> Self {
        let config = FixtureConfig::default();
        let clock = config.timestamps.clock();
        Self {
            config,
            backend: Git2Backend,
            clock,
        }
    }

    pub fn with_config(config: FixtureConfig) -> Result<Self> {
        Self::with_backend(Git2Backend, config)
    }
}

impl Default for FixtureHarness<Git2Backend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: VcsBackend> FixtureHarness<B> {
    pub fn with_backend(backend: B, config: FixtureConfig) -> Result<Self> {
        config.validate()?;
        let clock = config.timestamps.clock();
        Ok(Self {
            config,
            backend,
            clock,
        })
    }

    /// Replace the clock built from the configuration.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Commits reachable from HEAD, newest first.
    pub fn history(&self, fixture_path: &Path) -> Result<Vec<CommitInfo>> {
        let worktree = self.backend.open_worktree(fixture_path)?;
        self.backend.history(&worktree)
    }

    pub fn commit_count(&self, fixture_path: &Path) -> Result<usize> {
        Ok(self.history(fixture_path)?.len())
    }

    /// Read the configured default file (`test.txt` unless overridden).
    pub fn read_test_file(&self, fixture_path: &Path) -> Result<Vec<u8>> {
        files::read_file(fixture_path, &self.config.file_name)
    }
}
