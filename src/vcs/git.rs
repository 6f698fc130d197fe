//! [`VcsBackend`] over real repositories through the `git2` library.
//!
//! # Key Features
//! - **Init**: non-bare by default, HEAD pointed at a configurable initial branch
//! - **Staging**: `add_all` + `update_all`, so deletions are staged too
//! - **Commits**: explicit author/committer signature built from the injected time
//! - **References**: libgit2 `NotFound` becomes [`FixtureError::ReferenceNotFound`],
//!   `Exists` becomes [`FixtureError::BranchExists`]; everything else stays a
//!   [`FixtureError::VcsOperation`]

use crate::core::error::{FixtureError, Result};
use crate::core::fixture::{Author, CommitId, CommitInfo, HeadState};
use crate::vcs::{branch_ref, InitOptions, VcsBackend};
use chrono::{DateTime, Utc};
use git2::build::CheckoutBuilder;
use git2::{
    Commit, ErrorCode, IndexAddOption, Repository, RepositoryInitOptions, Signature, Sort,
};
use log::debug;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Backend;

/// An opened, non-bare repository.
pub struct Git2Worktree {
    repo: Repository,
}

impl Git2Worktree {
    pub fn repository(&self) -> &Repository {
        &self.repo
    }
}

fn op(operation: &'static str) -> impl Fn(git2::Error) -> FixtureError {
    move |e| FixtureError::vcs_operation(operation, e)
}

fn is_unborn(e: &git2::Error) -> bool {
    matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

/// Map a reference lookup failure, keeping "not found" distinct from the rest.
fn reference_error(ref_name: &str, operation: &'static str, e: git2::Error) -> FixtureError {
    match e.code() {
        ErrorCode::NotFound => FixtureError::reference_not_found(ref_name),
        ErrorCode::InvalidSpec => FixtureError::InvalidBranchName {
            name: ref_name.to_string(),
        },
        _ => FixtureError::vcs_operation(operation, e),
    }
}

fn commit_info(commit: &Commit<'_>) -> Result<CommitInfo> {
    let author = commit.author();
    let seconds = author.when().seconds();
    let timestamp =
        DateTime::from_timestamp(seconds, 0).ok_or(FixtureError::InvalidTimestamp { seconds })?;

    Ok(CommitInfo {
        id: CommitId(commit.id().to_string()),
        message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        author: Author::new(
            String::from_utf8_lossy(author.name_bytes()),
            String::from_utf8_lossy(author.email_bytes()),
        ),
        timestamp,
    })
}

impl VcsBackend for Git2Backend {
    type Worktree = Git2Worktree;

    fn init(&self, path: &Path, options: &InitOptions) -> Result<()> {
        let mut init_options = RepositoryInitOptions::new();
        init_options
            .bare(options.bare)
            .no_reinit(true)
            .initial_head(&options.initial_branch);

        Repository::init_opts(path, &init_options).map_err(|e| FixtureError::vcs_init(path, e))?;
        debug!(
            "Initialized repository at {} (bare: {}, branch: {})",
            path.display(),
            options.bare,
            options.initial_branch
        );
        Ok(())
    }

    fn open_worktree(&self, path: &Path) -> Result<Git2Worktree> {
        let repo = Repository::open(path).map_err(op("open"))?;
        if repo.is_bare() {
            return Err(FixtureError::vcs_operation(
                "worktree",
                git2::Error::from_str("bare repository has no working tree"),
            ));
        }
        Ok(Git2Worktree { repo })
    }

    fn stage_all(&self, worktree: &mut Git2Worktree) -> Result<()> {
        let stage = op("stage");
        let mut index = worktree.repo.index().map_err(&stage)?;
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .map_err(&stage)?;
        index.update_all(["*"].iter(), None).map_err(&stage)?;
        index.write().map_err(&stage)?;
        debug!("Staged {} index entries", index.len());
        Ok(())
    }

    fn commit(
        &self,
        worktree: &mut Git2Worktree,
        message: &str,
        author: &Author,
        when: DateTime<Utc>,
    ) -> Result<CommitId> {
        if message.trim().is_empty() {
            return Err(FixtureError::EmptyCommitMessage);
        }
        author.validate()?;

        let commit_op = op("commit");
        let repo = &worktree.repo;
        let mut index = repo.index().map_err(&commit_op)?;
        let tree_id = index.write_tree().map_err(&commit_op)?;
        let tree = repo.find_tree(tree_id).map_err(&commit_op)?;

        let time = git2::Time::new(when.timestamp(), 0);
        let signature = Signature::new(&author.name, &author.email, &time).map_err(&commit_op)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit().map_err(&commit_op)?),
            Err(e) if is_unborn(&e) => None,
            Err(e) => return Err(commit_op(e)),
        };
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(&commit_op)?;
        debug!("Committed {oid} with {} parent(s)", parents.len());
        Ok(CommitId(oid.to_string()))
    }

    fn checkout(&self, worktree: &mut Git2Worktree, branch: &str, create: bool) -> Result<()> {
        let checkout_op = op("checkout");
        let repo = &worktree.repo;
        let ref_name = branch_ref(branch);

        if create {
            let head_commit = repo
                .head()
                .and_then(|head| head.peel_to_commit())
                .map_err(&checkout_op)?;
            repo.branch(branch, &head_commit, false)
                .map_err(|e| match e.code() {
                    ErrorCode::Exists => FixtureError::branch_exists(branch),
                    ErrorCode::InvalidSpec => FixtureError::InvalidBranchName {
                        name: branch.to_string(),
                    },
                    _ => FixtureError::vcs_operation("checkout", e),
                })?;
            // same commit, so the working tree needs no update
            repo.set_head(&ref_name).map_err(&checkout_op)?;
        } else {
            // resolve before touching anything so a missing branch changes nothing
            let reference = repo
                .find_reference(&ref_name)
                .map_err(|e| reference_error(&ref_name, "checkout", e))?;
            let target = reference.peel_to_commit().map_err(&checkout_op)?;
            repo.checkout_tree(target.as_object(), Some(CheckoutBuilder::new().safe()))
                .map_err(&checkout_op)?;
            repo.set_head(&ref_name).map_err(&checkout_op)?;
        }

        debug!("Checked out {ref_name} (create: {create})");
        Ok(())
    }

    fn resolve_reference(&self, worktree: &Git2Worktree, ref_name: &str) -> Result<CommitId> {
        let reference = worktree
            .repo
            .find_reference(ref_name)
            .map_err(|e| reference_error(ref_name, "resolve", e))?;
        let commit = reference.peel_to_commit().map_err(op("resolve"))?;
        Ok(CommitId(commit.id().to_string()))
    }

    fn head(&self, worktree: &Git2Worktree) -> Result<HeadState> {
        let repo = &worktree.repo;
        match repo.head() {
            Ok(head) => {
                let commit = CommitId(head.peel_to_commit().map_err(op("head"))?.id().to_string());
                if head.is_branch() {
                    Ok(HeadState::Branch {
                        name: String::from_utf8_lossy(head.shorthand_bytes()).into_owned(),
                        commit,
                    })
                } else {
                    Ok(HeadState::Detached { commit })
                }
            }
            Err(e) if is_unborn(&e) => {
                let head_ref = repo.find_reference("HEAD").map_err(op("head"))?;
                let target = head_ref.symbolic_target().unwrap_or_default();
                let name = target.strip_prefix("refs/heads/").unwrap_or(target);
                Ok(HeadState::Unborn {
                    name: name.to_string(),
                })
            }
            Err(e) => Err(FixtureError::vcs_operation("head", e)),
        }
    }

    fn history(&self, worktree: &Git2Worktree) -> Result<Vec<CommitInfo>> {
        let history_op = op("history");
        let repo = &worktree.repo;
        match repo.head() {
            Ok(_) => {}
            Err(e) if is_unborn(&e) => return Ok(Vec::new()),
            Err(e) => return Err(history_op(e)),
        }

        let mut revwalk = repo.revwalk().map_err(&history_op)?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .map_err(&history_op)?;
        revwalk.push_head().map_err(&history_op)?;

        revwalk
            .map(|oid| {
                let oid = oid.map_err(&history_op)?;
                let commit = repo.find_commit(oid).map_err(&history_op)?;
                commit_info(&commit)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::files::write_file;
    use tempfile::TempDir;

    fn init_repo() -> Result<(TempDir, Git2Worktree)> {
        let temp_dir = TempDir::new().map_err(|e| FixtureError::io("tempdir", e))?;
        Git2Backend.init(temp_dir.path(), &InitOptions::default())?;
        let worktree = Git2Backend.open_worktree(temp_dir.path())?;
        Ok((temp_dir, worktree))
    }

    fn commit_file(
        dir: &TempDir,
        worktree: &mut Git2Worktree,
        name: &str,
        content: &str,
        message: &str,
    ) -> Result<CommitId> {
        write_file(dir.path(), name, content.as_bytes())?;
        Git2Backend.stage_all(worktree)?;
        Git2Backend.commit(worktree, message, &Author::default(), Utc::now())
    }

    #[test]
    fn test_head_is_unborn_after_init() -> Result<()> {
        let (_temp_dir, worktree) = init_repo()?;
        assert_eq!(
            Git2Backend.head(&worktree)?,
            HeadState::Unborn {
                name: "master".to_string()
            }
        );
        assert!(Git2Backend.history(&worktree)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_init_twice_fails() -> Result<()> {
        let (temp_dir, _worktree) = init_repo()?;
        let result = Git2Backend.init(temp_dir.path(), &InitOptions::default());
        assert!(matches!(result, Err(FixtureError::VcsInit { .. })));
        Ok(())
    }

    #[test]
    fn test_commit_uses_injected_identity_and_time() -> Result<()> {
        let (temp_dir, mut worktree) = init_repo()?;
        write_file(temp_dir.path(), "a.txt", b"hello")?;
        Git2Backend.stage_all(&mut worktree)?;

        let when = DateTime::from_timestamp(1_600_000_000, 0).unwrap();
        let author = Author::new("fixture", "fixture@example.com");
        let id = Git2Backend.commit(&mut worktree, "Add a", &author, when)?;

        let history = Git2Backend.history(&worktree)?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, id);
        assert_eq!(history[0].message, "Add a");
        assert_eq!(history[0].author, author);
        assert_eq!(history[0].timestamp, when);
        Ok(())
    }

    #[test]
    fn test_stage_all_includes_deletions() -> Result<()> {
        let (temp_dir, mut worktree) = init_repo()?;
        commit_file(&temp_dir, &mut worktree, "gone.txt", "bye", "Add file")?;
        std::fs::remove_file(temp_dir.path().join("gone.txt"))
            .map_err(|e| FixtureError::io("gone.txt", e))?;
        Git2Backend.stage_all(&mut worktree)?;

        let index = worktree.repository().index().map_err(op("index"))?;
        assert!(index.get_path(Path::new("gone.txt"), 0).is_none());
        Ok(())
    }

    #[test]
    fn test_commit_rejects_empty_message() -> Result<()> {
        let (_temp_dir, mut worktree) = init_repo()?;
        let result = Git2Backend.commit(&mut worktree, "  ", &Author::default(), Utc::now());
        assert!(matches!(result, Err(FixtureError::EmptyCommitMessage)));
        Ok(())
    }

    #[test]
    fn test_resolve_missing_reference() -> Result<()> {
        let (temp_dir, mut worktree) = init_repo()?;
        commit_file(&temp_dir, &mut worktree, "a.txt", "a", "First commit")?;
        let result = Git2Backend.resolve_reference(&worktree, "refs/heads/nope");
        assert!(matches!(result, Err(FixtureError::ReferenceNotFound { .. })));
        Ok(())
    }

    #[test]
    fn test_create_existing_branch_is_surfaced() -> Result<()> {
        let (temp_dir, mut worktree) = init_repo()?;
        commit_file(&temp_dir, &mut worktree, "a.txt", "a", "First commit")?;
        Git2Backend.checkout(&mut worktree, "feature", true)?;
        let result = Git2Backend.checkout(&mut worktree, "feature", true);
        assert!(matches!(result, Err(FixtureError::BranchExists { .. })));
        Ok(())
    }

    #[test]
    fn test_checkout_restores_branch_tree() -> Result<()> {
        let (temp_dir, mut worktree) = init_repo()?;
        commit_file(&temp_dir, &mut worktree, "a.txt", "on master", "First commit")?;
        Git2Backend.checkout(&mut worktree, "feature", true)?;
        commit_file(&temp_dir, &mut worktree, "a.txt", "on feature", "Change a")?;

        Git2Backend.checkout(&mut worktree, "master", false)?;
        let content = std::fs::read_to_string(temp_dir.path().join("a.txt"))
            .map_err(|e| FixtureError::io("a.txt", e))?;
        assert_eq!(content, "on master");
        assert_eq!(Git2Backend.head(&worktree)?.branch_name(), Some("master"));
        Ok(())
    }

    #[test]
    fn test_open_bare_repository_has_no_worktree() -> Result<()> {
        let temp_dir = TempDir::new().map_err(|e| FixtureError::io("tempdir", e))?;
        let options = InitOptions {
            bare: true,
            ..InitOptions::default()
        };
        Git2Backend.init(temp_dir.path(), &options)?;
        let result = Git2Backend.open_worktree(temp_dir.path());
        assert!(matches!(result, Err(FixtureError::VcsOperation { .. })));
        Ok(())
    }

    #[test]
    fn test_open_non_repository() {
        let result = Git2Backend.open_worktree(Path::new("/tmp/definitely/not/a/git/repo"));
        assert!(matches!(result, Err(FixtureError::VcsOperation { .. })));
    }
}
