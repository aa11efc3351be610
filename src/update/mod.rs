//! Upgrade resolution for installed releases
//!
//! This module provides:
//! - Package filter configuration from CLI args and config
//! - Resolution engine that picks the candidate superseding an installed release

mod filter;

pub use filter::{UpgradeFilter, RESERVED_NAME};

use crate::domain::{Release, ResolutionOutcome, UpgradeReason};
use crate::fingerprint::signatures_match;

/// Resolution engine that decides whether an installed release should be upgraded
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    /// Filter configuration
    filter: UpgradeFilter,
}

impl Resolver {
    /// Create a new Resolver with the given filter
    pub fn new(filter: UpgradeFilter) -> Self {
        Self { filter }
    }

    /// Filter configuration in use
    pub fn filter(&self) -> &UpgradeFilter {
        &self.filter
    }

    /// Resolve one installed release against the candidates sharing its name
    pub fn resolve(&self, installed: &Release, candidates: &[Release]) -> ResolutionOutcome {
        if UpgradeFilter::is_reserved(installed.name()) {
            return ResolutionOutcome::up_to_date(installed.id.clone());
        }

        if let Some(reason) = self.filter.skip_reason(installed.name()) {
            return ResolutionOutcome::skip(installed.id.clone(), reason);
        }

        let compatible: Vec<&Release> = candidates
            .iter()
            .filter(|candidate| is_compatible(installed, candidate))
            .collect();
        if compatible.is_empty() {
            return ResolutionOutcome::no_compatible_candidate(installed.id.clone());
        }

        // never downgrade
        let upgrade = newest(installed, &compatible)
            .map(|best| (best, UpgradeReason::VersionBump))
            .or_else(|| {
                rebuilt(installed, &compatible).map(|best| (best, UpgradeReason::SignatureChange))
            });

        match upgrade {
            Some((best, reason)) => ResolutionOutcome::upgrade(
                installed.id.clone(),
                best.id.clone(),
                reason,
                installed.install_target(),
            ),
            None => ResolutionOutcome::up_to_date(installed.id.clone()),
        }
    }
}

/// Same flavor, and same pkgpath when both sides track one
fn is_compatible(installed: &Release, candidate: &Release) -> bool {
    if candidate.id.flavors != installed.id.flavors {
        return false;
    }
    match (&installed.pkgpath, &candidate.pkgpath) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// Both fingerprints known and different
fn signature_changed(installed: &Release, candidate: &Release) -> bool {
    match (&installed.signature, &candidate.signature) {
        (Some(local), Some(remote)) => !signatures_match(local, remote),
        _ => false,
    }
}

/// Greatest candidate strictly newer than the installed release.
///
/// Only candidates that beat the installed version take part, so the
/// `pre`/`rc` rank tie cannot hide a newer release. Ties go to the last
/// one in input order.
fn newest<'a>(installed: &Release, compatible: &[&'a Release]) -> Option<&'a Release> {
    compatible
        .iter()
        .copied()
        .filter(|candidate| candidate.version > installed.version)
        .max_by(|a, b| a.version.cmp(&b.version))
}

/// Last version-equal candidate whose fingerprint differs
fn rebuilt<'a>(installed: &Release, compatible: &[&'a Release]) -> Option<&'a Release> {
    compatible
        .iter()
        .rev()
        .copied()
        .find(|candidate| {
            candidate.version == installed.version && signature_changed(installed, candidate)
        })
}
