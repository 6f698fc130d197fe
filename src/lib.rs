//! Repo Fixtures - disposable, deterministic local git repositories for tests.
//!
//! Integration tests for tools that change many repositories at once need real
//! commits and branches without a network. This crate builds small repositories
//! on disk and reads their state back.
//!
//! # Public API
//! - [`FixtureHarness`]: create repositories, write commits, manage branches
//! - [`FixtureDir`] / [`RepositoryFixture`]: the scoped directory and its record
//! - [`read_file`], [`file_exists`]: working-tree inspection
//! - [`normalize_path`], [`index_of`]: helpers for matching command output
//! - [`vcs`]: the version-control capability, with git2 and in-memory backends
//!
//! # Example
//!
//! ```rust,no_run
//! use repo_fixtures::{read_file, FixtureHarness};
//!
//! # fn main() -> repo_fixtures::Result<()> {
//! let harness = FixtureHarness::new();
//! let fixture = harness.create_repository_in_temp("acme", "widgets", b"hello")?;
//! assert_eq!(read_file(fixture.path(), "test.txt")?, b"hello");
//!
//! harness.checkout(fixture.path(), "feature", true)?;
//! assert!(harness.branch_exists(fixture.path(), "feature")?);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod harness;
pub mod vcs;

// Re-export the public API for test crates
pub use crate::core::{
    file_exists, index_of, normalize_path, read_file, read_to_string, Author, CommitId,
    CommitInfo, FixtureConfig, FixtureDir, FixtureError, HeadState, RepositoryFixture, Result,
    TimestampMode,
};
pub use harness::FixtureHarness;
pub use vcs::{Git2Backend, MemoryBackend, VcsBackend};
