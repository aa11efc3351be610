//! Candidate index parsing
//!
//! Two line formats are accepted, and may be mixed:
//! - pkgup index: `<file>.tgz <signature> [<pkgpath>]`, optionally preceded by
//!   an RFC 3339 timestamp on the first line
//! - mirror `index.txt`: `ls -l` style lines whose last field is `<file>.tgz`
//!
//! Any other line is ignored.

use crate::domain::{Release, ReleaseId};
use crate::error::ReleaseError;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::collections::BTreeMap;

const PACKAGE_EXTENSION: &str = ".tgz";

/// Candidate releases grouped by package name
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    /// Quirks date at index generation time
    pub generated_at: Option<DateTime<FixedOffset>>,
    releases: BTreeMap<String, Vec<Release>>,
}

impl CandidateIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse index text. Malformed package file names are returned as per-item errors.
    pub fn parse(text: &str) -> (Self, Vec<ReleaseError>) {
        let mut index = Self::new();
        let mut errors = Vec::new();

        let mut lines = text.lines().peekable();
        if let Some(first) = lines.peek() {
            if let Ok(timestamp) = DateTime::parse_from_rfc3339(first.trim()) {
                index.generated_at = Some(timestamp);
                lines.next();
            }
        }

        for line in lines {
            match parse_line(line) {
                Some(Ok(release)) => index.insert(release),
                Some(Err(e)) => errors.push(e),
                None => {}
            }
        }

        (index, errors)
    }

    /// Add a release, keeping input order within its name
    pub fn insert(&mut self, release: Release) {
        self.releases
            .entry(release.name().to_string())
            .or_default()
            .push(release);
    }

    /// Candidates sharing a package name, in input order
    pub fn candidates(&self, name: &str) -> Option<&[Release]> {
        self.releases.get(name).map(Vec::as_slice)
    }

    /// Returns true if the index has any release of this name
    pub fn contains(&self, name: &str) -> bool {
        self.releases.contains_key(name)
    }

    /// Total number of releases
    pub fn len(&self) -> usize {
        self.releases.values().map(Vec::len).sum()
    }

    /// Returns true if the index holds no releases
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

/// First line of a pkgup index
pub fn index_header(generated_at: &DateTime<FixedOffset>) -> String {
    generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_line(line: &str) -> Option<Result<Release, ReleaseError>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let first = fields.first()?;

    if let Some(stem) = first.strip_suffix(PACKAGE_EXTENSION) {
        return Some(ReleaseId::parse(stem).map(|id| {
            let mut release = Release::new(id);
            if let Some(signature) = fields.get(1) {
                release = release.with_signature(*signature);
            }
            if let Some(pkgpath) = fields.get(2) {
                release = release.with_pkgpath(*pkgpath);
            }
            release
        }));
    }

    let stem = fields.last()?.strip_suffix(PACKAGE_EXTENSION)?;
    Some(ReleaseId::parse(stem).map(Release::new))
}
