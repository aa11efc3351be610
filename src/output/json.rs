//! JSON output formatter for machine processing

use crate::domain::ResolutionOutcome;
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use crate::signify::IndexFreshness;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Whether upgrades come from a snapshot mirror
    snapshot: bool,
    /// Summary statistics
    summary: JsonSummary,
    /// `pkg_add -u` command line, if anything needs upgrading
    command: Option<String>,
    /// Per-release outcomes (up-to-date ones only in verbose mode)
    outcomes: Vec<&'a ResolutionOutcome>,
    /// Index freshness against the mirror
    #[serde(skip_serializing_if = "Option::is_none")]
    freshness: Option<IndexFreshness>,
    /// Errors encountered
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    upgrades: usize,
    up_to_date: usize,
    skips: usize,
    unmatched: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(
        &self,
        result: &OrchestratorResult,
        _report: &mut dyn Write,
        command: &mut dyn Write,
    ) -> std::io::Result<()> {
        let summary = &result.summary;
        let outcomes = summary
            .outcomes
            .iter()
            .filter(|o| self.verbosity == Verbosity::Verbose || !o.is_up_to_date())
            .collect();

        let output = JsonOutput {
            snapshot: summary.snapshot,
            summary: JsonSummary {
                upgrades: summary.upgrade_count(),
                up_to_date: summary.up_to_date_count(),
                skips: summary.skip_count(),
                unmatched: summary.unmatched().count(),
            },
            command: summary.upgrade_command(),
            outcomes,
            freshness: result.freshness,
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(command, "{}", json)
    }
}
