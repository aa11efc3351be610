//! CLI argument parsing module for pkgup

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Package upgrade checker
#[derive(Parser, Debug, Clone)]
#[command(name = "pkgup", version, about = "Package upgrade checker")]
pub struct CliArgs {
    /// Package database directory (default: /var/db/pkg)
    #[arg(long, value_name = "DIR")]
    pub pkg_db: Option<PathBuf>,

    /// Candidate index file (pkgup index or mirror index.txt)
    #[arg(long, value_name = "FILE")]
    pub index: Option<PathBuf>,

    /// Mirror quirks signify block, compared against the index date
    #[arg(long, value_name = "FILE")]
    pub signify: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // General options
    /// Cron mode - only output when upgrades are available
    #[arg(short, long)]
    pub cron: bool,

    /// Upgrades come from a snapshot mirror (adds -Dsnap)
    #[arg(short, long)]
    pub snapshot: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    // Package filters
    /// Exclude specific packages (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Check only specific packages (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Auxiliary commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print `<file>.tgz <signature> <pkgpath>` index lines for packing lists
    Sign {
        /// Emit the SHA-256 digest form of the signature
        #[arg(long)]
        digest: bool,

        /// Signify block whose date becomes the index header line
        #[arg(long, value_name = "FILE")]
        signify: Option<PathBuf>,

        /// Packing list files (+CONTENTS)
        #[arg(required = true, value_name = "CONTENTS")]
        contents: Vec<PathBuf>,
    },

    /// Compare two version strings
    Vercmp {
        /// First version
        a: String,
        /// Second version
        b: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["pkgup"]);
        assert!(args.pkg_db.is_none());
        assert!(args.index.is_none());
        assert!(args.signify.is_none());
        assert!(args.config.is_none());
        assert!(!args.cron);
        assert!(!args.snapshot);
        assert!(!args.verbose);
        assert!(!args.json);
        assert!(args.exclude.is_empty());
        assert!(args.only.is_empty());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_paths() {
        let args = CliArgs::parse_from([
            "pkgup",
            "--pkg-db",
            "/tmp/pkg",
            "--index",
            "index.pkgup",
            "--signify",
            "quirks.sig",
        ]);
        assert_eq!(args.pkg_db, Some(PathBuf::from("/tmp/pkg")));
        assert_eq!(args.index, Some(PathBuf::from("index.pkgup")));
        assert_eq!(args.signify, Some(PathBuf::from("quirks.sig")));
    }

    #[test]
    fn test_short_flags() {
        let args = CliArgs::parse_from(["pkgup", "-c", "-s", "-v"]);
        assert!(args.cron);
        assert!(args.snapshot);
        assert!(args.verbose);
    }

    #[test]
    fn test_long_flags() {
        let args = CliArgs::parse_from(["pkgup", "--cron", "--snapshot", "--verbose", "--json"]);
        assert!(args.cron);
        assert!(args.snapshot);
        assert!(args.verbose);
        assert!(args.json);
    }

    #[test]
    fn test_exclude_multiple() {
        let args = CliArgs::parse_from(["pkgup", "--exclude", "firefox", "--exclude", "chromium"]);
        assert_eq!(args.exclude, vec!["firefox", "chromium"]);
    }

    #[test]
    fn test_only_multiple() {
        let args = CliArgs::parse_from(["pkgup", "--only", "curl", "--only", "wget"]);
        assert_eq!(args.only, vec!["curl", "wget"]);
    }

    #[test]
    fn test_sign_command() {
        let args = CliArgs::parse_from(["pkgup", "sign", "--digest", "a/+CONTENTS", "b/+CONTENTS"]);
        assert_eq!(
            args.command,
            Some(Command::Sign {
                digest: true,
                signify: None,
                contents: vec![PathBuf::from("a/+CONTENTS"), PathBuf::from("b/+CONTENTS")],
            })
        );
    }

    #[test]
    fn test_sign_requires_contents() {
        assert!(CliArgs::try_parse_from(["pkgup", "sign"]).is_err());
    }

    #[test]
    fn test_vercmp_command() {
        let args = CliArgs::parse_from(["pkgup", "vercmp", "1.0rc1", "1.0"]);
        assert_eq!(
            args.command,
            Some(Command::Vercmp {
                a: "1.0rc1".to_string(),
                b: "1.0".to_string(),
            })
        );
    }

    #[test]
    fn test_combined_flags() {
        let args = CliArgs::parse_from([
            "pkgup",
            "--index",
            "/tmp/index.pkgup",
            "-c",
            "--exclude",
            "firefox",
            "--json",
        ]);
        assert_eq!(args.index, Some(PathBuf::from("/tmp/index.pkgup")));
        assert!(args.cron);
        assert_eq!(args.exclude, vec!["firefox"]);
        assert!(args.json);
    }
}
