//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ReleaseError: per-release problems; never abort a batch
//! - IndexError: Issues reading the candidate index
//! - ConfigError: Issues with CLI or file configuration
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Candidate index related errors
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors scoped to a single release.
///
/// These are collected alongside the results of a run; the release in
/// question is skipped and processing continues with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    /// No `-`-delimited token of the identifier looks like a version
    #[error("couldn't find version in package identifier: {text:?}")]
    MalformedIdentifier { text: String },

    /// No candidate shares the installed flavor and pkgpath
    #[error("couldn't find a version candidate for {release} (unknown flavor?)")]
    NoCompatibleCandidate { release: String },

    /// A trailing suffix that is none of the recognized pre-release keywords
    #[error("unrecognized suffix '{suffix}' in version {version}, treated as no suffix")]
    AmbiguousSuffix { version: String, suffix: String },

    /// A package database entry whose packing list could not be read
    #[error("failed to read packing list for {release}: {message}")]
    UnreadableEntry { release: String, message: String },
}

/// Errors related to the candidate index
#[derive(Error, Debug)]
pub enum IndexError {
    /// Index file not found
    #[error("index file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read index file
    #[error("failed to read index file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Timestamp that is not RFC 3339
    #[error("invalid timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },

    /// Required option missing from both the command line and the config file
    #[error("missing option: {name}")]
    MissingOption { name: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReleaseError {
    /// Creates a new MalformedIdentifier error
    pub fn malformed_identifier(text: impl Into<String>) -> Self {
        ReleaseError::MalformedIdentifier { text: text.into() }
    }

    /// Creates a new NoCompatibleCandidate error
    pub fn no_compatible_candidate(release: impl Into<String>) -> Self {
        ReleaseError::NoCompatibleCandidate {
            release: release.into(),
        }
    }

    /// Creates a new AmbiguousSuffix diagnostic
    pub fn ambiguous_suffix(version: impl Into<String>, suffix: impl Into<String>) -> Self {
        ReleaseError::AmbiguousSuffix {
            version: version.into(),
            suffix: suffix.into(),
        }
    }

    /// Creates a new UnreadableEntry error
    pub fn unreadable_entry(release: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::UnreadableEntry {
            release: release.into(),
            message: message.into(),
        }
    }
}

impl IndexError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        IndexError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new InvalidTimestamp error
    pub fn invalid_timestamp(value: impl Into<String>, message: impl Into<String>) -> Self {
        IndexError::InvalidTimestamp {
            value: value.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new ConflictingOptions error
    pub fn conflicting_options(message: impl Into<String>) -> Self {
        ConfigError::ConflictingOptions {
            message: message.into(),
        }
    }

    /// Creates a new MissingOption error
    pub fn missing_option(name: impl Into<String>) -> Self {
        ConfigError::MissingOption { name: name.into() }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new Generic IO error
    pub fn generic(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Generic {
            path: path.into(),
            source,
        }
    }
}
