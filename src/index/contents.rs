//! Packing list (`+CONTENTS`) parsing

use crate::domain::{Release, ReleaseId};
use crate::fingerprint::Fingerprint;

const NAME_PREFIX: &str = "@name ";
const PKGPATH_PREFIX: &str = "@comment pkgpath=";
const BRANCH_OPTION: &str = "@option is-branch";

/// Metadata extracted from a packing list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackingList {
    /// First `@name` declaration
    pub name: Option<String>,
    /// Metadata fingerprint
    pub fingerprint: Fingerprint,
    /// Port path from `@comment pkgpath=`
    pub pkgpath: Option<String>,
    /// Whether the package is installed as a branch
    pub is_branch: bool,
}

impl PackingList {
    /// Parse a packing list
    pub fn parse(contents: &str) -> Self {
        let name = contents
            .lines()
            .find_map(|line| line.strip_prefix(NAME_PREFIX))
            .map(str::to_string);
        let pkgpath = contents.lines().find_map(parse_pkgpath);
        let is_branch = contents.lines().any(|line| line == BRANCH_OPTION);

        Self {
            name,
            fingerprint: Fingerprint::from_contents(contents),
            pkgpath,
            is_branch,
        }
    }

    /// Attach this metadata to an identifier, using the plain fingerprint as signature
    pub fn into_release(self, id: ReleaseId) -> Release {
        let mut release = Release::new(id)
            .with_signature(self.fingerprint.to_string())
            .with_branch(self.is_branch);
        if let Some(pkgpath) = self.pkgpath {
            release = release.with_pkgpath(pkgpath);
        }
        release
    }

    /// `<name>.tgz <signature> [<pkgpath>]` candidate index line
    pub fn index_line(&self, digest: bool) -> Option<String> {
        let name = self.name.as_deref()?;
        let mut line = format!("{}.tgz {}", name, self.fingerprint.render(digest));
        if let Some(pkgpath) = &self.pkgpath {
            line.push(' ');
            line.push_str(pkgpath);
        }
        Some(line)
    }
}

/// `@comment pkgpath=net/curl ftp=yes` -> `net/curl`
fn parse_pkgpath(line: &str) -> Option<String> {
    let value = line.strip_prefix(PKGPATH_PREFIX)?;
    let end = value.find([' ', ',']).unwrap_or(value.len());
    let pkgpath = &value[..end];
    (!pkgpath.is_empty()).then(|| pkgpath.to_string())
}
