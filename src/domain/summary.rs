//! Resolution summary types
//!
//! Aggregates per-release outcomes and derives the upgrade command line.

use super::ResolutionOutcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Command used to apply upgrades
pub const UPGRADE_COMMAND: &str = "pkg_add -u";

/// Overall summary of one resolution pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeSummary {
    /// Outcomes in installed-package order
    pub outcomes: Vec<ResolutionOutcome>,
    /// Whether upgrades come from a snapshot mirror
    pub snapshot: bool,
}

impl UpgradeSummary {
    /// Creates a new UpgradeSummary
    pub fn new(snapshot: bool) -> Self {
        Self {
            outcomes: Vec::new(),
            snapshot,
        }
    }

    /// Adds an outcome
    pub fn add_outcome(&mut self, outcome: ResolutionOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns all upgrades
    pub fn upgrades(&self) -> impl Iterator<Item = &ResolutionOutcome> {
        self.outcomes.iter().filter(|o| o.is_upgrade())
    }

    /// Returns all skips
    pub fn skips(&self) -> impl Iterator<Item = &ResolutionOutcome> {
        self.outcomes.iter().filter(|o| o.is_skip())
    }

    /// Returns outcomes with no compatible candidate
    pub fn unmatched(&self) -> impl Iterator<Item = &ResolutionOutcome> {
        self.outcomes.iter().filter(|o| o.is_unmatched())
    }

    /// Returns the number of upgrades
    pub fn upgrade_count(&self) -> usize {
        self.upgrades().count()
    }

    /// Returns the number of up-to-date releases
    pub fn up_to_date_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_up_to_date()).count()
    }

    /// Returns the number of skips
    pub fn skip_count(&self) -> usize {
        self.skips().count()
    }

    /// Returns true if anything needs upgrading
    pub fn has_upgrades(&self) -> bool {
        self.upgrades().next().is_some()
    }

    /// Sorted, deduplicated `pkg_add -u` arguments
    pub fn upgrade_targets(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|o| o.target())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Full upgrade command line, or None when everything is current
    pub fn upgrade_command(&self) -> Option<String> {
        let targets = self.upgrade_targets();
        if targets.is_empty() {
            return None;
        }

        let mut command = UPGRADE_COMMAND.to_string();
        if self.snapshot {
            command.push_str(" -Dsnap");
        }
        for target in targets {
            command.push(' ');
            command.push_str(&target);
        }
        Some(command)
    }
}

impl Default for UpgradeSummary {
    fn default() -> Self {
        Self::new(false)
    }
}
