//! Core domain models for pkgup
//!
//! This module contains the fundamental types used throughout the application:
//! - Release identifiers and releases
//! - Versions and their dewey sequences, with the ordering between them
//! - Resolution outcomes
//! - Summary of a resolution pass

mod dewey;
mod outcome;
mod release;
mod summary;
mod version;

pub use dewey::{Dewey, DeweyComponent, Suffix};
pub use outcome::{ResolutionOutcome, SkipReason, UpgradeReason};
pub use release::{Release, ReleaseId};
pub use summary::{UpgradeSummary, UPGRADE_COMMAND};
pub use version::{compare_versions, Version};
