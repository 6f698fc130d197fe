//! Fixture setup and independent git inspection utilities
//!
//! Provides functions for creating fixtures in isolated parent directories and
//! for reading repository state with git2 directly, so assertions do not
//! depend on the code under test.

#![allow(dead_code)]

use repo_fixtures::{FixtureDir, FixtureHarness, Result};
use std::path::Path;
use tempfile::TempDir;

/// Test fixture setup result containing both the parent directory and the
/// fixture. The parent TempDir must outlive the fixture.
pub struct TestFixture {
    pub parent: TempDir,
    pub fixture: FixtureDir,
}

impl TestFixture {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        self.fixture.path()
    }
}

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Harness over real git repositories with the default configuration
pub fn harness() -> FixtureHarness {
    init_logging();
    FixtureHarness::new()
}

/// Creates a fixture owned by `acme/widgets` with the given default file content
///
/// # Example
///
/// ```rust,ignore
/// let harness = harness();
/// let repo = setup_fixture(&harness, "hello")?;
/// assert_eq!(read_file(repo.path(), "test.txt")?, b"hello");
/// ```
pub fn setup_fixture(harness: &FixtureHarness, content: &str) -> anyhow::Result<TestFixture> {
    let parent = TempDir::new()?;
    let fixture = harness.create_repository("acme", "widgets", content.as_bytes(), parent.path())?;
    Ok(TestFixture { parent, fixture })
}

/// Opens the fixture with git2 directly
pub fn open_repo(path: &Path) -> anyhow::Result<git2::Repository> {
    Ok(git2::Repository::open(path)?)
}

/// Number of commits reachable from HEAD, counted with git2
pub fn count_commits(path: &Path) -> anyhow::Result<usize> {
    let repo = open_repo(path)?;
    let mut revwalk = repo.revwalk()?;
    revwalk.push_head()?;
    Ok(revwalk.count())
}

/// Short name of the branch HEAD points at, read with git2
pub fn head_branch(path: &Path) -> anyhow::Result<String> {
    let repo = open_repo(path)?;
    let head = repo.head()?;
    Ok(head.shorthand().unwrap_or_default().to_string())
}

/// True when the index and working tree match HEAD exactly
pub fn is_clean(path: &Path) -> anyhow::Result<bool> {
    let repo = open_repo(path)?;
    let mut options = git2::StatusOptions::new();
    options.include_untracked(true);
    let clean = repo.statuses(Some(&mut options))?.is_empty();
    Ok(clean)
}

/// Writes garbage into a loose branch ref so lookups fail with something other
/// than "not found"
pub fn corrupt_branch_ref(path: &Path, branch: &str) -> Result<()> {
    let ref_path = path.join(".git").join("refs").join("heads").join(branch);
    std::fs::write(&ref_path, "this is not an object id\n")
        .map_err(|e| repo_fixtures::FixtureError::io(&ref_path, e))
}
