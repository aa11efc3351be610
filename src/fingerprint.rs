//! Metadata fingerprints of packing lists
//!
//! A fingerprint canonicalizes the `@name`, `@version`, `@depend` and
//! `@wantlib` declarations of a package so that two builds with the same
//! version string but different dependencies or libraries can be told apart.
//!
//! Layout: names (declaration order), version or `0`, sorted unique
//! dependencies prefixed with `@`, sorted libraries; joined with `,`.

use crate::domain::ReleaseId;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;

/// Separator between fingerprint parts
pub const SEPARATOR: char = ',';

/// Version part used when the packing list has no `@version`
const DEFAULT_VERSION: &str = "0";

/// A packing list declaration relevant to the fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Declaration<'a> {
    Name(&'a str),
    Version(&'a str),
    Depend(&'a str),
    Wantlib(&'a str),
}

impl<'a> Declaration<'a> {
    fn classify(line: &'a str) -> Option<Self> {
        let (keyword, argument) = line.split_once(' ')?;
        match keyword {
            "@name" => Some(Declaration::Name(argument)),
            "@version" => Some(Declaration::Version(argument)),
            "@depend" => Some(Declaration::Depend(argument)),
            "@wantlib" => Some(Declaration::Wantlib(argument)),
            _ => None,
        }
    }
}

/// Canonical metadata fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    parts: Vec<String>,
}

impl Fingerprint {
    /// Build a fingerprint from packing list lines
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names = Vec::new();
        let mut version = None;
        let mut depends = BTreeSet::new();
        let mut wantlibs = Vec::new();

        for line in lines {
            match Declaration::classify(line) {
                Some(Declaration::Name(name)) => names.push(name.to_string()),
                Some(Declaration::Version(v)) => {
                    version.get_or_insert_with(|| v.to_string());
                }
                Some(Declaration::Depend(argument)) => {
                    if let Some(depend) = canonical_dependency(argument) {
                        depends.insert(depend);
                    }
                }
                Some(Declaration::Wantlib(lib)) => wantlibs.push(lib.to_string()),
                None => {}
            }
        }
        wantlibs.sort();

        let mut parts = names;
        parts.push(version.unwrap_or_else(|| DEFAULT_VERSION.to_string()));
        parts.extend(depends);
        parts.extend(wantlibs);

        Self { parts }
    }

    /// Build a fingerprint from a whole packing list
    pub fn from_contents(contents: &str) -> Self {
        Self::from_lines(contents.lines())
    }

    /// The canonical parts, in fingerprint order
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// SHA-256 of the plain form, standard base64
    pub fn digest(&self) -> String {
        digest(&self.to_string())
    }

    /// Plain or digest form
    pub fn render(&self, digest: bool) -> String {
        if digest {
            self.digest()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.parts.iter();
        if let Some(first) = parts.next() {
            write!(f, "{}", first)?;
        }
        for part in parts {
            write!(f, "{}{}", SEPARATOR, part)?;
        }
        Ok(())
    }
}

/// `@<base identifier>` with flavors in alphabetical order.
///
/// The base identifier is the third `:`-field of the declaration
/// (`pkgpath:pattern:default`); declarations without one are ignored.
fn canonical_dependency(argument: &str) -> Option<String> {
    let base = argument.split(':').nth(2)?;
    let canonical = match ReleaseId::parse(base) {
        Ok(id) => id.with_sorted_flavors().to_string(),
        Err(_) => base.to_string(),
    };
    Some(format!("@{}", canonical))
}

/// SHA-256 of a plain signature, standard base64
pub fn digest(plain: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(Sha256::digest(plain.as_bytes()))
}

/// Length of a base64-encoded SHA-256 digest
const DIGEST_LEN: usize = 44;

/// Shape of a digest: 44 standard base64 characters ending in one `=` pad
pub fn is_digest(signature: &str) -> bool {
    signature.len() == DIGEST_LEN
        && signature.ends_with('=')
        && signature[..DIGEST_LEN - 1]
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Compare two rendered signatures, either of which may be in digest form
pub fn signatures_match(a: &str, b: &str) -> bool {
    match (is_digest(a), is_digest(b)) {
        (false, true) => digest(a) == b,
        (true, false) => a == digest(b),
        _ => a == b,
    }
}
