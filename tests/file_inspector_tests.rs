mod common;
use common::repository::*;
use repo_fixtures::{
    file_exists, index_of, normalize_path, read_file, read_to_string, FixtureError,
};

#[cfg(test)]
mod file_inspector_tests {
    use super::*;

    #[test]
    fn test_read_committed_file() -> anyhow::Result<()> {
        let harness = harness();
        let repo = setup_fixture(&harness, "hello")?;

        assert_eq!(read_to_string(repo.path(), "test.txt")?, "hello");
        Ok(())
    }

    #[test]
    fn test_read_missing_file_fails() -> anyhow::Result<()> {
        let harness = harness();
        let repo = setup_fixture(&harness, "hello")?;

        let err = read_file(repo.path(), "missing.txt").unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
        Ok(())
    }

    #[test]
    fn test_file_exists_tracks_commits() -> anyhow::Result<()> {
        let harness = harness();
        let repo = setup_fixture(&harness, "hello")?;

        assert!(file_exists(repo.path(), "test.txt")?);
        assert!(!file_exists(repo.path(), "new.txt")?);

        harness.write_and_commit(repo.path(), "new.txt", b"new", "Add new file")?;
        assert!(file_exists(repo.path(), "new.txt")?);
        Ok(())
    }

    #[test]
    fn test_file_exists_rejects_paths_outside_fixture() -> anyhow::Result<()> {
        let harness = harness();
        let repo = setup_fixture(&harness, "hello")?;

        let result = file_exists(repo.path(), "../test.txt");
        assert!(matches!(result, Err(FixtureError::InvalidFileName { .. })));
        Ok(())
    }

    #[test]
    fn test_normalized_fixture_path_matches_shell_output() -> anyhow::Result<()> {
        let root = tempfile::TempDir::new()?;
        let spaced = root.path().join("with space");
        let harness = harness();
        let fixture = harness.create_repository_in("acme", "widgets", b"hello", &spaced)?;

        let normalized = normalize_path(fixture.path());
        assert!(normalized.contains("with\\ space/"));
        assert!(!normalized.contains("with space"));
        Ok(())
    }

    #[test]
    fn test_index_of_orders_result_lists() {
        let repos = ["acme/a", "acme/b", "acme/c"];
        assert_eq!(index_of(&repos, &"acme/b"), Some(1));
        assert_eq!(index_of(&repos, &"acme/z"), None);
        assert!(index_of(&repos, &"acme/a") < index_of(&repos, &"acme/c"));
    }
}
