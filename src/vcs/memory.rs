//! In-memory [`VcsBackend`] for exercising harness logic without libgit2.
//!
//! Repository metadata (commits, branches, HEAD) lives in memory, keyed by
//! path. The working tree is still the real directory: `stage_all` snapshots
//! every file under it and switching branches rewrites those files. Every call
//! is appended to a log so tests can assert the order the harness used.

use crate::core::error::{FixtureError, Result};
use crate::core::fixture::{Author, CommitId, CommitInfo, HeadState};
use crate::vcs::{InitOptions, VcsBackend};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Relative path -> file content.
pub type Tree = BTreeMap<PathBuf, Vec<u8>>;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("no repository at '{0}'")]
    NotARepository(PathBuf),

    #[error("repository already exists at '{0}'")]
    AlreadyInitialized(PathBuf),

    #[error("bare repository has no working tree")]
    Bare,

    #[error("HEAD has no commits yet")]
    UnbornHead,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init(PathBuf),
    OpenWorktree(PathBuf),
    StageAll(PathBuf),
    Commit { path: PathBuf, message: String },
    Checkout { path: PathBuf, branch: String, create: bool },
    ResolveReference { path: PathBuf, ref_name: String },
}

#[derive(Debug)]
struct StoredCommit {
    info: CommitInfo,
    parent: Option<usize>,
    tree: Tree,
}

#[derive(Debug)]
struct MemoryRepo {
    bare: bool,
    head: String,
    branches: BTreeMap<String, usize>,
    commits: Vec<StoredCommit>,
    staged: Option<Tree>,
}

impl MemoryRepo {
    fn head_commit(&self) -> Option<usize> {
        self.branches.get(&self.head).copied()
    }

    fn head_tree(&self) -> Tree {
        self.head_commit()
            .map(|index| self.commits[index].tree.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct State {
    repos: HashMap<PathBuf, MemoryRepo>,
    calls: Vec<Call>,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

/// Handle returned by [`MemoryBackend::open_worktree`].
#[derive(Debug, Clone)]
pub struct MemoryWorktree {
    path: PathBuf,
}

fn snapshot(root: &Path) -> Result<Tree> {
    let mut tree = Tree::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| FixtureError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| FixtureError::io(&dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| FixtureError::io(&path, e))?;
            if file_type.is_dir() {
                pending.push(path);
            } else {
                let content = std::fs::read(&path).map_err(|e| FixtureError::io(&path, e))?;
                let relative = path.strip_prefix(root).unwrap_or(path.as_path()).to_path_buf();
                tree.insert(relative, content);
            }
        }
    }
    Ok(tree)
}

fn materialize(root: &Path, from: &Tree, to: &Tree) -> Result<()> {
    for stale in from.keys().filter(|path| !to.contains_key(*path)) {
        let path = root.join(stale);
        std::fs::remove_file(&path).map_err(|e| FixtureError::io(&path, e))?;
    }
    for (relative, content) in to {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FixtureError::io(parent, e))?;
        }
        std::fs::write(&path, content).map_err(|e| FixtureError::io(&path, e))?;
    }
    Ok(())
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every backend call so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Tree of the commit HEAD points at, `None` for unknown paths.
    pub fn head_tree(&self, path: &Path) -> Option<Tree> {
        self.lock().repos.get(path).map(MemoryRepo::head_tree)
    }
}

fn repo_mut<'a>(
    state: &'a mut State,
    path: &Path,
    operation: &'static str,
) -> Result<&'a mut MemoryRepo> {
    state.repos.get_mut(path).ok_or_else(|| {
        FixtureError::vcs_operation(operation, MemoryError::NotARepository(path.to_path_buf()))
    })
}

impl VcsBackend for MemoryBackend {
    type Worktree = MemoryWorktree;

    fn init(&self, path: &Path, options: &InitOptions) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Init(path.to_path_buf()));
        if state.repos.contains_key(path) {
            return Err(FixtureError::vcs_init(
                path,
                MemoryError::AlreadyInitialized(path.to_path_buf()),
            ));
        }
        state.repos.insert(
            path.to_path_buf(),
            MemoryRepo {
                bare: options.bare,
                head: options.initial_branch.clone(),
                branches: BTreeMap::new(),
                commits: Vec::new(),
                staged: None,
            },
        );
        Ok(())
    }

    fn open_worktree(&self, path: &Path) -> Result<MemoryWorktree> {
        let mut state = self.lock();
        state.calls.push(Call::OpenWorktree(path.to_path_buf()));
        let repo = repo_mut(&mut state, path, "open")?;
        if repo.bare {
            return Err(FixtureError::vcs_operation("worktree", MemoryError::Bare));
        }
        Ok(MemoryWorktree {
            path: path.to_path_buf(),
        })
    }

    fn stage_all(&self, worktree: &mut MemoryWorktree) -> Result<()> {
        let tree = snapshot(&worktree.path)?;
        let mut state = self.lock();
        state.calls.push(Call::StageAll(worktree.path.clone()));
        repo_mut(&mut state, &worktree.path, "stage")?.staged = Some(tree);
        Ok(())
    }

    fn commit(
        &self,
        worktree: &mut MemoryWorktree,
        message: &str,
        author: &Author,
        when: DateTime<Utc>,
    ) -> Result<CommitId> {
        if message.trim().is_empty() {
            return Err(FixtureError::EmptyCommitMessage);
        }
        author.validate()?;

        let mut state = self.lock();
        state.calls.push(Call::Commit {
            path: worktree.path.clone(),
            message: message.to_string(),
        });
        let repo = repo_mut(&mut state, &worktree.path, "commit")?;

        let tree = match repo.staged.take() {
            Some(tree) => tree,
            None => repo.head_tree(),
        };
        let id = CommitId(format!("{:040x}", repo.commits.len() + 1));
        let parent = repo.head_commit();
        repo.commits.push(StoredCommit {
            info: CommitInfo {
                id: id.clone(),
                message: message.to_string(),
                author: author.clone(),
                timestamp: when,
            },
            parent,
            tree,
        });
        let new_index = repo.commits.len() - 1;
        let head = repo.head.clone();
        repo.branches.insert(head, new_index);
        Ok(id)
    }

    fn checkout(&self, worktree: &mut MemoryWorktree, branch: &str, create: bool) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Checkout {
            path: worktree.path.clone(),
            branch: branch.to_string(),
            create,
        });
        let repo = repo_mut(&mut state, &worktree.path, "checkout")?;

        if create {
            let head_commit = repo
                .head_commit()
                .ok_or_else(|| FixtureError::vcs_operation("checkout", MemoryError::UnbornHead))?;
            if repo.branches.contains_key(branch) {
                return Err(FixtureError::branch_exists(branch));
            }
            repo.branches.insert(branch.to_string(), head_commit);
        } else {
            let target = *repo
                .branches
                .get(branch)
                .ok_or_else(|| FixtureError::reference_not_found(crate::vcs::branch_ref(branch)))?;
            let current = repo.head_tree();
            materialize(&worktree.path, &current, &repo.commits[target].tree)?;
        }

        repo.head = branch.to_string();
        Ok(())
    }

    fn resolve_reference(&self, worktree: &MemoryWorktree, ref_name: &str) -> Result<CommitId> {
        let mut state = self.lock();
        state.calls.push(Call::ResolveReference {
            path: worktree.path.clone(),
            ref_name: ref_name.to_string(),
        });
        let repo = repo_mut(&mut state, &worktree.path, "resolve")?;
        ref_name
            .strip_prefix("refs/heads/")
            .and_then(|branch| repo.branches.get(branch))
            .map(|index| repo.commits[*index].info.id.clone())
            .ok_or_else(|| FixtureError::reference_not_found(ref_name))
    }

    fn head(&self, worktree: &MemoryWorktree) -> Result<HeadState> {
        let mut state = self.lock();
        let repo = repo_mut(&mut state, &worktree.path, "head")?;
        Ok(match repo.head_commit() {
            Some(index) => HeadState::Branch {
                name: repo.head.clone(),
                commit: repo.commits[index].info.id.clone(),
            },
            None => HeadState::Unborn {
                name: repo.head.clone(),
            },
        })
    }

    fn history(&self, worktree: &MemoryWorktree) -> Result<Vec<CommitInfo>> {
        let mut state = self.lock();
        let repo = repo_mut(&mut state, &worktree.path, "history")?;
        let mut history = Vec::new();
        let mut next = repo.head_commit();
        while let Some(index) = next {
            let commit = &repo.commits[index];
            history.push(commit.info.clone());
            next = commit.parent;
        }
        Ok(history)
    }
}
