//! Resolution outcome types

use super::ReleaseId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a candidate supersedes the installed release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeReason {
    /// The candidate version is greater
    VersionBump,
    /// Same version, different metadata fingerprint
    SignatureChange,
}

impl fmt::Display for UpgradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeReason::VersionBump => write!(f, "version bump"),
            UpgradeReason::SignatureChange => write!(f, "signature change"),
        }
    }
}

/// Reason why an installed release was not resolved at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The candidate index has no package of this name
    NotInIndex,
    /// Package was excluded via --exclude
    Excluded,
    /// Package not in --only list
    NotInOnlyList,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotInIndex => write!(f, "not in index"),
            SkipReason::Excluded => write!(f, "excluded by --exclude"),
            SkipReason::NotInOnlyList => write!(f, "not in --only list"),
        }
    }
}

/// Result of resolving one installed release against its candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Nothing newer or different is available
    UpToDate {
        /// The installed release
        installed: ReleaseId,
    },
    /// A candidate supersedes the installed release
    Upgrade {
        /// The installed release
        installed: ReleaseId,
        /// The selected candidate
        candidate: ReleaseId,
        /// Why the candidate was selected
        reason: UpgradeReason,
        /// `pkg_add -u` argument for this package
        target: String,
    },
    /// No candidate shares the installed flavor and pkgpath
    NoCompatibleCandidate {
        /// The installed release
        installed: ReleaseId,
    },
    /// Resolution was not attempted
    Skipped {
        /// The installed release
        installed: ReleaseId,
        /// The reason for skipping
        reason: SkipReason,
    },
}

impl ResolutionOutcome {
    /// Creates an UpToDate outcome
    pub fn up_to_date(installed: ReleaseId) -> Self {
        ResolutionOutcome::UpToDate { installed }
    }

    /// Creates an Upgrade outcome
    pub fn upgrade(
        installed: ReleaseId,
        candidate: ReleaseId,
        reason: UpgradeReason,
        target: impl Into<String>,
    ) -> Self {
        ResolutionOutcome::Upgrade {
            installed,
            candidate,
            reason,
            target: target.into(),
        }
    }

    /// Creates a NoCompatibleCandidate outcome
    pub fn no_compatible_candidate(installed: ReleaseId) -> Self {
        ResolutionOutcome::NoCompatibleCandidate { installed }
    }

    /// Creates a Skipped outcome
    pub fn skip(installed: ReleaseId, reason: SkipReason) -> Self {
        ResolutionOutcome::Skipped { installed, reason }
    }

    /// Returns true if this is an upgrade
    pub fn is_upgrade(&self) -> bool {
        matches!(self, ResolutionOutcome::Upgrade { .. })
    }

    /// Returns true if the installed release is current
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, ResolutionOutcome::UpToDate { .. })
    }

    /// Returns true if this is a skip
    pub fn is_skip(&self) -> bool {
        matches!(self, ResolutionOutcome::Skipped { .. })
    }

    /// Returns true if no compatible candidate was found
    pub fn is_unmatched(&self) -> bool {
        matches!(self, ResolutionOutcome::NoCompatibleCandidate { .. })
    }

    /// Returns the installed release identifier
    pub fn installed(&self) -> &ReleaseId {
        match self {
            ResolutionOutcome::UpToDate { installed }
            | ResolutionOutcome::Upgrade { installed, .. }
            | ResolutionOutcome::NoCompatibleCandidate { installed }
            | ResolutionOutcome::Skipped { installed, .. } => installed,
        }
    }

    /// Returns the package name
    pub fn package_name(&self) -> &str {
        &self.installed().name
    }

    /// The `pkg_add -u` argument, for upgrades
    pub fn target(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::Upgrade { target, .. } => Some(target),
            _ => None,
        }
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionOutcome::Upgrade {
                installed,
                candidate,
                ..
            } => {
                write!(f, "{}->{}", installed, candidate.version)?;
                if !installed.is_unflavored() {
                    write!(f, "-{}", installed.flavor())?;
                }
                Ok(())
            }
            ResolutionOutcome::UpToDate { installed } => write!(f, "{}: up to date", installed),
            ResolutionOutcome::NoCompatibleCandidate { installed } => {
                write!(f, "{}: no compatible candidate", installed)
            }
            ResolutionOutcome::Skipped { installed, reason } => {
                write!(f, "{}: skipped ({})", installed, reason)
            }
        }
    }
}
