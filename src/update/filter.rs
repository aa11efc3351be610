//! Package filter configuration
//!
//! This module provides the UpgradeFilter struct that encapsulates
//! the exclude/only options applied before resolution.

use crate::domain::SkipReason;

/// Package name that is always considered current
pub const RESERVED_NAME: &str = "quirks";

/// Filter configuration for upgrade resolution
#[derive(Debug, Clone, Default)]
pub struct UpgradeFilter {
    /// Packages to exclude from upgrades
    pub exclude: Vec<String>,
    /// If non-empty, only resolve these packages
    pub only: Vec<String>,
}

impl UpgradeFilter {
    /// Create a new UpgradeFilter with default settings (process all)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set packages to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set packages to include (only list)
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Check if a package should be processed based on filters
    pub fn should_process_package(&self, name: &str) -> bool {
        // --only wins over --exclude
        if !self.only.is_empty() {
            return self.only.iter().any(|p| p == name);
        }
        !self.exclude.iter().any(|p| p == name)
    }

    /// Reason for skipping a package, if it is filtered out
    pub fn skip_reason(&self, name: &str) -> Option<SkipReason> {
        if self.should_process_package(name) {
            None
        } else if !self.only.is_empty() {
            Some(SkipReason::NotInOnlyList)
        } else {
            Some(SkipReason::Excluded)
        }
    }

    /// Returns true for the reserved baseline package
    pub fn is_reserved(name: &str) -> bool {
        name == RESERVED_NAME
    }
}
