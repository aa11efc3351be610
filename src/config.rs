//! Runtime configuration
//!
//! Command line arguments merged over an optional TOML file:
//!
//! ```toml
//! pkg-db = "/var/db/pkg"
//! index = "/var/cache/pkgup/index.pkgup"
//! signify = "/var/cache/pkgup/quirks.sig"
//! snapshot = false
//! cron = true
//! exclude = ["firefox"]
//! only = []
//! ```

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::index::DEFAULT_PKG_DB;
use crate::update::UpgradeFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of a configuration file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub pkg_db: Option<PathBuf>,
    pub index: Option<PathBuf>,
    pub signify: Option<PathBuf>,
    pub snapshot: bool,
    pub cron: bool,
    pub exclude: Vec<String>,
    pub only: Vec<String>,
}

impl FileConfig {
    /// Parse configuration text; `path` is only used for error messages
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::parse_error(path, e.to_string()))
    }

    /// Read and parse a configuration file
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        Self::parse(path, &content)
    }
}

/// Effective configuration of a check run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub pkg_db: PathBuf,
    pub index: PathBuf,
    pub signify: Option<PathBuf>,
    pub snapshot: bool,
    pub cron: bool,
    pub verbose: bool,
    pub json: bool,
    pub exclude: Vec<String>,
    pub only: Vec<String>,
}

impl Config {
    /// Build the configuration from the command line, reading `--config` if given
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    /// Merge command line arguments over file values. CLI values win.
    pub fn merge(args: &CliArgs, file: FileConfig) -> Result<Self, ConfigError> {
        let index = args
            .index
            .clone()
            .or(file.index)
            .ok_or_else(|| ConfigError::missing_option("index"))?;

        let config = Self {
            pkg_db: args
                .pkg_db
                .clone()
                .or(file.pkg_db)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PKG_DB)),
            index,
            signify: args.signify.clone().or(file.signify),
            snapshot: args.snapshot || file.snapshot,
            cron: args.cron || file.cron,
            verbose: args.verbose,
            json: args.json,
            exclude: prefer_cli(&args.exclude, file.exclude),
            only: prefer_cli(&args.only, file.only),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = self.only.iter().find(|name| self.exclude.contains(name)) {
            return Err(ConfigError::conflicting_options(format!(
                "{} is both in the only and the exclude list",
                name
            )));
        }
        Ok(())
    }

    /// Package filter for the resolver
    pub fn filter(&self) -> UpgradeFilter {
        UpgradeFilter::new()
            .with_exclude(self.exclude.clone())
            .with_only(self.only.clone())
    }
}

fn prefer_cli(cli: &[String], file: Vec<String>) -> Vec<String> {
    if cli.is_empty() {
        file
    } else {
        cli.to_vec()
    }
}
