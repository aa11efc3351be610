//! Upgrade check orchestrator
//!
//! This module provides:
//! - Workflow coordination: read index → read package database → resolve
//! - Grouping of installed and candidate releases by package name
//! - Optional index freshness check against the mirror's signify date
//! - Error handling with partial continuation

use crate::config::Config;
use crate::domain::{Release, ResolutionOutcome, SkipReason, UpgradeSummary};
use crate::error::{AppError, IoError, ReleaseError};
use crate::index::{read_index, CandidateIndex, InstalledPackages};
use crate::signify::{signify_timestamp, IndexFreshness};
use crate::update::{Resolver, UpgradeFilter};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Orchestrator for coordinating an upgrade check
pub struct Orchestrator {
    config: Config,
}

/// Result of running the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorResult {
    /// Outcomes for every installed release
    pub summary: UpgradeSummary,
    /// Per-item errors (malformed identifiers, unreadable entries)
    pub errors: Vec<ReleaseError>,
    /// Index freshness, when a signify block was given
    pub freshness: Option<IndexFreshness>,
}

impl OrchestratorResult {
    /// Returns true if any per-item error was collected
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Orchestrator {
    /// Create a new orchestrator with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the check against the configured index and package database
    pub fn run(&self) -> Result<OrchestratorResult, AppError> {
        let (index, mut errors) = read_index(&self.config.index)?;
        debug!(
            releases = index.len(),
            "read candidate index {}",
            self.config.index.display()
        );

        let freshness = self.check_freshness(&index)?;

        let installed = InstalledPackages::load(&self.config.pkg_db)?;
        errors.extend(installed.errors.iter().cloned());

        let mut result = self.check(&installed.releases, &index);
        errors.append(&mut result.errors);
        for error in &errors {
            warn!("{}", error);
        }

        result.errors = errors;
        result.freshness = freshness;
        Ok(result)
    }

    /// Resolve installed releases against a candidate index
    pub fn check(&self, installed: &[Release], index: &CandidateIndex) -> OrchestratorResult {
        let resolver = Resolver::new(self.config.filter());
        let mut summary = UpgradeSummary::new(self.config.snapshot);

        let mut by_name: BTreeMap<&str, Vec<&Release>> = BTreeMap::new();
        for release in installed {
            by_name.entry(release.name()).or_default().push(release);
        }

        for (name, releases) in by_name {
            let candidates = index.candidates(name);
            if let Some(candidates) = candidates {
                candidates.iter().for_each(log_ambiguous_suffix);
            }

            for release in releases {
                log_ambiguous_suffix(release);

                let outcome = match candidates {
                    Some(candidates) => resolver.resolve(release, candidates),
                    None if UpgradeFilter::is_reserved(name) => resolver.resolve(release, &[]),
                    None => ResolutionOutcome::skip(
                        release.id.clone(),
                        resolver
                            .filter()
                            .skip_reason(name)
                            .unwrap_or(SkipReason::NotInIndex),
                    ),
                };

                match &outcome {
                    ResolutionOutcome::NoCompatibleCandidate { installed } => {
                        warn!(
                            "{}",
                            ReleaseError::no_compatible_candidate(installed.to_string())
                        );
                    }
                    ResolutionOutcome::Skipped { installed, reason } => {
                        debug!("skipping {}: {}", installed, reason);
                    }
                    ResolutionOutcome::Upgrade { reason, .. } => {
                        debug!("{} ({})", outcome, reason);
                    }
                    ResolutionOutcome::UpToDate { .. } => {}
                }
                summary.add_outcome(outcome);
            }
        }

        OrchestratorResult {
            summary,
            errors: Vec::new(),
            freshness: None,
        }
    }

    fn check_freshness(&self, index: &CandidateIndex) -> Result<Option<IndexFreshness>, AppError> {
        let Some(path) = &self.config.signify else {
            return Ok(None);
        };
        let Some(generated_at) = index.generated_at else {
            warn!("index has no generation date, skipping freshness check");
            return Ok(None);
        };

        let block = std::fs::read_to_string(path).map_err(|e| IoError::generic(path, e))?;
        let mirror_date = signify_timestamp(&block)?;
        let freshness = IndexFreshness::compare(&generated_at, &mirror_date);
        debug!(%generated_at, %mirror_date, "index freshness: {:?}", freshness);
        Ok(Some(freshness))
    }
}

fn log_ambiguous_suffix(release: &Release) {
    if let Some(suffix) = release.version.dewey().unrecognized_suffix() {
        debug!(
            "{}",
            ReleaseError::ambiguous_suffix(release.version.to_string(), suffix)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UpgradeReason;
    use std::path::PathBuf;

    fn config() -> Config {
        Config {
            pkg_db: PathBuf::from("/var/db/pkg"),
            index: PathBuf::from("index.pkgup"),
            signify: None,
            snapshot: false,
            cron: false,
            verbose: false,
            json: false,
            exclude: Vec::new(),
            only: Vec::new(),
        }
    }

    fn installed(text: &str, signature: &str, pkgpath: &str) -> Release {
        Release::parse(text)
            .unwrap()
            .with_signature(signature)
            .with_pkgpath(pkgpath)
    }

    const INDEX: &str = "\
2024-01-15T10:30:00Z
curl-8.5.0.tgz curl-8.5.0,0 net/curl
vim-9.0.2136-gtk3.tgz vim-9.0.2136-gtk3,0 editors/vim,gtk3
zsh-5.9.tgz zsh-5.9,0,c.97.1 shells/zsh
quirks-7.14.tgz quirks-7.14,0 devel/quirks
";

    #[test]
    fn test_check_outcomes_in_name_order() {
        let (index, _) = CandidateIndex::parse(INDEX);
        let releases = vec![
            installed("zsh-5.9", "zsh-5.9,0", "shells/zsh"),
            installed("curl-8.4.0", "curl-8.4.0,0", "net/curl"),
            installed("vim-9.0.2100-no_x11", "vim-9.0.2100-no_x11,0", "editors/vim,no_x11"),
            installed("gnupg-2.4.3", "gnupg-2.4.3,0", "security/gnupg"),
            installed("quirks-7.10", "quirks-7.10,0", "devel/quirks"),
        ];

        let result = Orchestrator::new(config()).check(&releases, &index);
        let names: Vec<_> = result
            .summary
            .outcomes
            .iter()
            .map(|o| o.package_name().to_string())
            .collect();
        assert_eq!(names, vec!["curl", "gnupg", "quirks", "vim", "zsh"]);

        let outcomes = &result.summary.outcomes;
        assert!(matches!(
            &outcomes[0],
            ResolutionOutcome::Upgrade { reason: UpgradeReason::VersionBump, .. }
        ));
        assert!(matches!(
            &outcomes[1],
            ResolutionOutcome::Skipped { reason: SkipReason::NotInIndex, .. }
        ));
        assert!(outcomes[2].is_up_to_date());
        assert!(outcomes[3].is_unmatched());
        assert!(matches!(
            &outcomes[4],
            ResolutionOutcome::Upgrade { reason: UpgradeReason::SignatureChange, .. }
        ));

        assert_eq!(
            result.summary.upgrade_command(),
            Some("pkg_add -u curl zsh".to_string())
        );
        assert!(!result.has_errors());
    }

    #[test]
    fn test_check_reserved_name_absent_from_index() {
        let index = CandidateIndex::new();
        let releases = vec![installed("quirks-7.10", "quirks-7.10,0", "devel/quirks")];
        let result = Orchestrator::new(config()).check(&releases, &index);
        assert!(result.summary.outcomes[0].is_up_to_date());
    }

    #[test]
    fn test_check_applies_filter() {
        let (index, _) = CandidateIndex::parse(INDEX);
        let releases = vec![
            installed("curl-8.4.0", "curl-8.4.0,0", "net/curl"),
            installed("zsh-5.9", "zsh-5.9,0", "shells/zsh"),
        ];
        let mut config = config();
        config.exclude = vec!["curl".to_string()];

        let result = Orchestrator::new(config).check(&releases, &index);
        assert_eq!(result.summary.skip_count(), 1);
        assert_eq!(result.summary.upgrade_targets(), vec!["zsh"]);
    }

    #[test]
    fn test_check_filter_reason_wins_over_not_in_index() {
        let (index, _) = CandidateIndex::parse(INDEX);
        let releases = vec![
            installed("gnupg-2.4.3", "gnupg-2.4.3,0", "security/gnupg"),
            installed("mutt-2.2.12", "mutt-2.2.12,0", "mail/mutt"),
        ];
        let mut config = config();
        config.only = vec!["mutt".to_string()];

        let result = Orchestrator::new(config).check(&releases, &index);
        let outcomes = &result.summary.outcomes;
        assert_eq!(
            outcomes[0],
            ResolutionOutcome::skip(releases[0].id.clone(), SkipReason::NotInOnlyList)
        );
        assert_eq!(
            outcomes[1],
            ResolutionOutcome::skip(releases[1].id.clone(), SkipReason::NotInIndex)
        );

        let mut config = self::config();
        config.exclude = vec!["gnupg".to_string()];
        let result = Orchestrator::new(config).check(&releases[..1], &index);
        assert_eq!(
            result.summary.outcomes[0],
            ResolutionOutcome::skip(releases[0].id.clone(), SkipReason::Excluded)
        );
    }

    #[test]
    fn test_check_snapshot_command() {
        let (index, _) = CandidateIndex::parse(INDEX);
        let releases = vec![installed("curl-8.4.0", "curl-8.4.0,0", "net/curl")];
        let mut config = config();
        config.snapshot = true;

        let result = Orchestrator::new(config).check(&releases, &index);
        assert_eq!(
            result.summary.upgrade_command(),
            Some("pkg_add -u -Dsnap curl".to_string())
        );
    }
}
