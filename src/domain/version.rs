//! Package versions: `<dewey>[p<patch>][v<epoch>]`
//!
//! Ordering, from most to least significant:
//! - epoch (`v3`), absent below any value
//! - dewey sequence, see [`Dewey`]
//! - patch level (`p2`), absent below any value

use super::Dewey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A parsed package version
#[derive(Debug, Clone)]
pub struct Version {
    epoch: Option<u64>,
    dewey: Dewey,
    patch_level: Option<u64>,
    raw: String,
}

impl Version {
    /// Parse a version token. Never fails: fragments that don't match the
    /// grammar stay in the dewey string.
    pub fn parse(text: &str) -> Self {
        let (rest, epoch) = strip_counter(text, 'v');
        let (dewey, patch_level) = strip_counter(rest, 'p');

        Self {
            epoch,
            dewey: Dewey::parse(dewey),
            patch_level,
            raw: text.to_string(),
        }
    }

    /// Epoch (`vN`), if present
    pub fn epoch(&self) -> Option<u64> {
        self.epoch
    }

    /// Patch level (`pN`), if present
    pub fn patch_level(&self) -> Option<u64> {
        self.patch_level
    }

    /// The dewey sequence
    pub fn dewey(&self) -> &Dewey {
        &self.dewey
    }

    /// The version text this value was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Strip a trailing `<marker><digits>` counter
fn strip_counter(text: &str, marker: char) -> (&str, Option<u64>) {
    let Some(position) = text.rfind(marker) else {
        return (text, None);
    };
    let digits = &text[position + marker.len_utf8()..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return (text, None);
    }
    match digits.parse() {
        Ok(value) => (&text[..position], Some(value)),
        Err(_) => (text, None),
    }
}

/// Compare two versions
pub fn compare_versions(a: &Version, b: &Version) -> Ordering {
    a.epoch
        .cmp(&b.epoch)
        .then_with(|| a.dewey.cmp(&b.dewey))
        .then_with(|| a.patch_level.cmp(&b.patch_level))
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        compare_versions(self, other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_versions(self, other)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for Version {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
