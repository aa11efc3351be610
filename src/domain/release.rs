//! Release identifiers and releases
//!
//! A release identifier looks like `name-parts-VERSION[-flavor-parts]`,
//! e.g. `py3-foo-1.2.3p4v2-no_x11-python3`. The version token is the
//! rightmost `-`-delimited token starting with a digit.

use super::Version;
use crate::error::ReleaseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural parts of a release identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseId {
    /// Package name (everything before the version token)
    pub name: String,
    /// Raw version token, suffixes included
    pub version: String,
    /// Flavor tokens in identifier order
    pub flavors: Vec<String>,
}

impl ReleaseId {
    /// Creates a new ReleaseId from its parts
    pub fn new(name: impl Into<String>, version: impl Into<String>, flavors: Vec<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            flavors,
        }
    }

    /// Parse a release identifier, scanning tokens right-to-left for the version
    pub fn parse(text: &str) -> Result<Self, ReleaseError> {
        let tokens: Vec<&str> = text.split('-').collect();

        let position = tokens
            .iter()
            .rposition(|token| is_version_token(token))
            .ok_or_else(|| ReleaseError::malformed_identifier(text))?;

        let name = tokens[..position].join("-");
        if name.is_empty() {
            return Err(ReleaseError::malformed_identifier(text));
        }

        let flavors = tokens[position + 1..]
            .iter()
            .map(|flavor| flavor.to_string())
            .collect();
        Ok(Self::new(name, tokens[position], flavors))
    }

    /// Flavor tokens joined the way they appear in the identifier
    pub fn flavor(&self) -> String {
        self.flavors.join("-")
    }

    /// Returns true if the release has no flavor
    pub fn is_unflavored(&self) -> bool {
        self.flavors.is_empty()
    }

    /// Same identifier with flavor tokens sorted alphabetically
    pub fn with_sorted_flavors(&self) -> Self {
        let mut flavors = self.flavors.clone();
        flavors.sort();
        Self::new(self.name.clone(), self.version.clone(), flavors)
    }
}

/// A version token starts with an ASCII digit
fn is_version_token(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
}

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)?;
        for flavor in &self.flavors {
            write!(f, "-{}", flavor)?;
        }
        Ok(())
    }
}

/// A parsed release together with the metadata used to resolve upgrades
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Identifier parts
    pub id: ReleaseId,
    /// Version parsed from `id.version`
    pub version: Version,
    /// Rendered metadata fingerprint, when known
    pub signature: Option<String>,
    /// Port path the release was built from, when known
    pub pkgpath: Option<String>,
    /// Installed as a branch (`@option is-branch`)
    pub is_branch: bool,
}

impl Release {
    /// Creates a new Release from an identifier
    pub fn new(id: ReleaseId) -> Self {
        let version = Version::parse(&id.version);
        Self {
            id,
            version,
            signature: None,
            pkgpath: None,
            is_branch: false,
        }
    }

    /// Parse a release from its identifier string
    pub fn parse(text: &str) -> Result<Self, ReleaseError> {
        ReleaseId::parse(text).map(Self::new)
    }

    /// Sets the signature (builder pattern)
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Sets the pkgpath (builder pattern)
    pub fn with_pkgpath(mut self, pkgpath: impl Into<String>) -> Self {
        self.pkgpath = Some(pkgpath.into());
        self
    }

    /// Marks the release as a branch (builder pattern)
    pub fn with_branch(mut self, is_branch: bool) -> Self {
        self.is_branch = is_branch;
        self
    }

    /// Returns the package name
    pub fn name(&self) -> &str {
        &self.id.name
    }

    /// Argument naming this package on the `pkg_add -u` command line
    pub fn install_target(&self) -> String {
        match (&self.pkgpath, self.is_branch) {
            (Some(pkgpath), true) => format!("{}%{}", self.id.name, pkgpath),
            _ => self.id.name.clone(),
        }
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let id = ReleaseId::parse("foo-1.0").unwrap();
        assert_eq!(id.name, "foo");
        assert_eq!(id.version, "1.0");
        assert!(id.flavors.is_empty());
        assert!(id.is_unflavored());
    }

    #[test]
    fn test_parse_multi_part_name_and_flavors() {
        let id = ReleaseId::parse("x-y-1.2.3p4-flavor1-flavor2").unwrap();
        assert_eq!(id.name, "x-y");
        assert_eq!(id.version, "1.2.3p4");
        assert_eq!(id.flavors, vec!["flavor1", "flavor2"]);
        assert_eq!(id.flavor(), "flavor1-flavor2");
    }

    #[test]
    fn test_parse_picks_rightmost_version_token() {
        // "2" in the name must not be taken for the version
        let id = ReleaseId::parse("py3-foo-2-1.4v0-python3").unwrap();
        assert_eq!(id.name, "py3-foo-2");
        assert_eq!(id.version, "1.4v0");
        assert_eq!(id.flavors, vec!["python3"]);
    }

    #[test]
    fn test_parse_name_with_leading_digit() {
        let id = ReleaseId::parse("0ad-0.0.26p3").unwrap();
        assert_eq!(id.name, "0ad");
        assert_eq!(id.version, "0.0.26p3");
    }

    #[test]
    fn test_parse_no_version() {
        let err = ReleaseId::parse("foo-bar-baz").unwrap_err();
        assert_eq!(err, ReleaseError::malformed_identifier("foo-bar-baz"));
    }

    #[test]
    fn test_parse_empty_name() {
        assert!(ReleaseId::parse("1.0").is_err());
        assert!(ReleaseId::parse("-1.0").is_err());
        assert!(ReleaseId::parse("").is_err());
    }

    #[test]
    fn test_display_round_trips_identifier() {
        let text = "vim-9.0.2136-gtk3-perl";
        assert_eq!(ReleaseId::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn test_with_sorted_flavors() {
        let id = ReleaseId::parse("foo-1.0-python3-no_x11").unwrap();
        assert_eq!(id.with_sorted_flavors().to_string(), "foo-1.0-no_x11-python3");
        // input untouched
        assert_eq!(id.flavors, vec!["python3", "no_x11"]);
    }

    #[test]
    fn test_release_parse_builds_version() {
        let release = Release::parse("foo-1.2p3").unwrap();
        assert_eq!(release.name(), "foo");
        assert_eq!(release.version.patch_level(), Some(3));
        assert!(release.signature.is_none());
        assert!(!release.is_branch);
    }

    #[test]
    fn test_install_target_plain() {
        let release = Release::parse("python-3.11.7").unwrap().with_pkgpath("lang/python/3.11");
        assert_eq!(release.install_target(), "python");
    }

    #[test]
    fn test_install_target_branch() {
        let release = Release::parse("python-3.11.7")
            .unwrap()
            .with_pkgpath("lang/python/3.11")
            .with_branch(true);
        assert_eq!(release.install_target(), "python%lang/python/3.11");
    }

    #[test]
    fn test_serde_release_id() {
        let id = ReleaseId::parse("foo-1.0-bar").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ReleaseId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
