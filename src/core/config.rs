use crate::core::clock::TimestampMode;
use crate::core::error::{FixtureError, Result};
use crate::core::files::validate_file_name;
use crate::core::fixture::Author;
use serde::{Deserialize, Serialize};

/// Knobs shared by every fixture a harness creates.
///
/// Missing JSON fields fall back to [`FixtureConfig::default`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FixtureConfig {
    pub author: Author,
    /// Tracked file written by the initial commit.
    pub file_name: String,
    pub initial_message: String,
    pub dir_prefix: String,
    pub dir_suffix: String,
    pub initial_branch: String,
    pub timestamps: TimestampMode,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            author: Author::default(),
            file_name: "test.txt".to_string(),
            initial_message: "First commit".to_string(),
            dir_prefix: "multi-git-test-".to_string(),
            dir_suffix: ".git".to_string(),
            initial_branch: "master".to_string(),
            timestamps: TimestampMode::default(),
        }
    }
}

impl FixtureConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_initial_branch(mut self, branch: impl Into<String>) -> Self {
        self.initial_branch = branch.into();
        self
    }

    pub fn with_timestamps(mut self, timestamps: TimestampMode) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.author.validate()?;
        validate_file_name(&self.file_name)?;
        if self.initial_message.trim().is_empty() {
            return Err(FixtureError::EmptyCommitMessage);
        }
        if !git2::Branch::name_is_valid(&self.initial_branch).unwrap_or(false) {
            return Err(FixtureError::InvalidBranchName {
                name: self.initial_branch.clone(),
            });
        }
        if let TimestampMode::Stepping { step_seconds, .. } = self.timestamps {
            if step_seconds <= 0 {
                return Err(FixtureError::InvalidClockStep { step_seconds });
            }
        }
        Ok(())
    }
}
