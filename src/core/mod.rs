//! Core building blocks shared by the harness and the VCS backends.
//!
//! This module provides the fixture data model, error handling, configuration,
//! commit clocks and the working-tree file and path helpers.

pub mod clock;
pub mod config;
pub mod dirs;
pub mod error;
pub mod files;
pub mod fixture;
pub mod paths;

// === Error handling ===
// Core error type and result alias used throughout the crate
pub use error::{FixtureError, Result};

// === Data model ===
// Fixture records and the commit metadata read back from them
pub use fixture::{Author, CommitId, CommitInfo, FixtureDir, HeadState, RepositoryFixture};

// === Configuration ===
// Deterministic identity, naming and timestamp settings
pub use clock::{Clock, FixedClock, SteppingClock, SystemClock, TimestampMode};
pub use config::FixtureConfig;

// === Working-tree inspection ===
// File reads/existence checks and path normalization for output matching
pub use files::{file_exists, read_file, read_to_string, write_file};
pub use paths::{index_of, normalize_path};
