//! Text output formatter for human-readable display
//!
//! Report stream:
//! ```text
//! curl-8.4.0->8.5.0
//! vim-9.0.2100-gtk3->9.0.2136-gtk3
//!
//! to upgrade:
//! ```
//! Command stream:
//! ```text
//! pkg_add -u curl vim
//! ```

use crate::domain::{ResolutionOutcome, UpgradeSummary};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Format a single upgrade line
    fn format_upgrade_line(
        &self,
        outcome: &ResolutionOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let ResolutionOutcome::Upgrade {
            installed,
            candidate,
            reason,
            ..
        } = outcome
        else {
            return Ok(());
        };

        let flavor = if installed.is_unflavored() {
            String::new()
        } else {
            format!("-{}", installed.flavor())
        };

        if self.color {
            write!(
                writer,
                "{}{}{}{}",
                installed.to_string().dimmed(),
                "->".dimmed(),
                candidate.version.bright_white().bold(),
                flavor.bright_white().bold()
            )?;
        } else {
            write!(writer, "{}->{}{}", installed, candidate.version, flavor)?;
        }

        if self.verbosity == Verbosity::Verbose {
            let reason = format!(" ({})", reason);
            if self.color {
                write!(writer, "{}", reason.dimmed())?;
            } else {
                write!(writer, "{}", reason)?;
            }
        }
        writeln!(writer)
    }

    /// Format skipped and unmatched releases (verbose only)
    fn format_skips(&self, summary: &UpgradeSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        for outcome in summary.skips().chain(summary.unmatched()) {
            if self.color {
                writeln!(writer, "{}", outcome.to_string().dimmed())?;
            } else {
                writeln!(writer, "{}", outcome)?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(
        &self,
        result: &OrchestratorResult,
        report: &mut dyn Write,
        command: &mut dyn Write,
    ) -> std::io::Result<()> {
        let summary = &result.summary;

        if let Some(freshness) = result.freshness.filter(|f| !f.is_current()) {
            if self.color {
                writeln!(report, "{}", freshness.to_string().yellow())?;
            } else {
                writeln!(report, "{}", freshness)?;
            }
        }

        if self.verbosity == Verbosity::Verbose {
            self.format_skips(summary, report)?;
        }

        for outcome in summary.upgrades() {
            self.format_upgrade_line(outcome, report)?;
        }

        if summary.has_upgrades() {
            writeln!(report)?;
            if self.color {
                writeln!(report, "{}", "to upgrade:".green().bold())?;
            } else {
                writeln!(report, "to upgrade:")?;
            }
            if let Some(line) = summary.upgrade_command() {
                writeln!(command, "{}", line)?;
            }
        } else if self.verbosity != Verbosity::Quiet {
            if self.color {
                writeln!(report, "{}", "up to date".green())?;
            } else {
                writeln!(report, "up to date")?;
            }
        }

        Ok(())
    }
}
