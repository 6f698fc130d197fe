//! Shared test utilities for repo-fixtures integration tests
//!
//! This module provides helpers to build fixtures against real git repositories
//! and to check their state independently of the harness, straight through git2.

pub mod assertions;
pub mod repository;
