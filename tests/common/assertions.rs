//! Common assertion helpers for error message validation
//!
//! Provides predicates for matching the rendered form of harness errors.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for a missing reference message
pub fn reference_not_found(branch: &str) -> impl Predicate<str> {
    predicates::str::contains("Reference not found")
        .and(predicates::str::contains(format!("refs/heads/{branch}")))
}

/// Creates a predicate that checks for a duplicate branch message
pub fn branch_already_exists(branch: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Branch already exists: {branch}"))
}

/// Creates a predicate that checks for a failed VCS step
pub fn vcs_operation_failed(operation: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("VCS operation '{operation}' failed"))
}
