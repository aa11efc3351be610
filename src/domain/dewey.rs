//! Dewey sequences: the dotted core of a version string
//!
//! `1.0.3rc2` splits into the components `1`, `0`, `3` with an `rc`
//! pre-release suffix of value 2 on the last component.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Pre-release suffix recognized on the last dewey component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suffix {
    Alpha,
    Beta,
    Pre,
    Rc,
    /// No suffix at all
    Release,
    /// Post-release patch level (`pl`)
    Pl,
}

impl Suffix {
    /// Keywords recognized in version strings, with their suffix
    const KEYWORDS: [(&'static str, Suffix); 5] = [
        ("alpha", Suffix::Alpha),
        ("beta", Suffix::Beta),
        ("pre", Suffix::Pre),
        ("rc", Suffix::Rc),
        ("pl", Suffix::Pl),
    ];

    /// Position in the suffix ordering; `pre` and `rc` share a rank
    pub fn rank(self) -> u8 {
        match self {
            Suffix::Alpha => 0,
            Suffix::Beta => 1,
            Suffix::Pre | Suffix::Rc => 2,
            Suffix::Release => 3,
            Suffix::Pl => 4,
        }
    }

    /// Keyword as written in a version string (empty for a plain release)
    pub fn keyword(self) -> &'static str {
        match self {
            Suffix::Alpha => "alpha",
            Suffix::Beta => "beta",
            Suffix::Pre => "pre",
            Suffix::Rc => "rc",
            Suffix::Release => "",
            Suffix::Pl => "pl",
        }
    }
}

/// One `.`-separated component: a leading number and an alphabetic tail
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeweyComponent {
    /// Leading digit run; `None` sorts below every number
    pub number: Option<u64>,
    /// Whatever follows the digit run, compared by codepoint
    pub tail: String,
}

impl DeweyComponent {
    /// Split a component into its leading number and tail
    pub fn parse(text: &str) -> Self {
        let (digits, tail) = split_digits(text);
        Self {
            number: parse_number(digits),
            tail: tail.to_string(),
        }
    }
}

/// The dewey sequence of a version, with its optional pre-release suffix
#[derive(Debug, Clone)]
pub struct Dewey {
    components: Vec<DeweyComponent>,
    suffix: Suffix,
    suffix_value: Option<u64>,
    raw: String,
}

impl Dewey {
    /// Parse a dewey string such as `1.0.3rc2`
    pub fn parse(text: &str) -> Self {
        let mut parts: Vec<&str> = text.split('.').collect();
        let mut suffix = Suffix::Release;
        let mut suffix_value = None;

        if let Some(last) = parts.last_mut() {
            if let Some((number, kind, value)) = split_suffix(last) {
                *last = number;
                suffix = kind;
                suffix_value = value;
            }
        }

        Self {
            components: parts.into_iter().map(DeweyComponent::parse).collect(),
            suffix,
            suffix_value,
            raw: text.to_string(),
        }
    }

    /// The dotted components, suffix removed
    pub fn components(&self) -> &[DeweyComponent] {
        &self.components
    }

    /// Pre-release suffix of the last component
    pub fn suffix(&self) -> Suffix {
        self.suffix
    }

    /// Numeric value following the suffix keyword; 0 when absent
    pub fn suffix_value(&self) -> u64 {
        self.suffix_value.unwrap_or(0)
    }

    /// Tail of the last component that looks like a keyword with a number
    /// (`dev3`, `b2`) but is none of the recognized ones.
    pub fn unrecognized_suffix(&self) -> Option<&str> {
        if self.suffix != Suffix::Release {
            return None;
        }
        let tail = self.components.last()?.tail.as_str();
        let letters = tail.trim_end_matches(|c: char| c.is_ascii_digit());
        let looks_like_keyword = !letters.is_empty()
            && letters.len() < tail.len()
            && letters.chars().all(|c| c.is_ascii_alphabetic());
        looks_like_keyword.then_some(tail)
    }

    fn compare_suffix(&self, other: &Self) -> Ordering {
        if self.suffix == other.suffix {
            return self.suffix_value().cmp(&other.suffix_value());
        }
        self.suffix.rank().cmp(&other.suffix.rank())
    }
}

impl PartialEq for Dewey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Dewey {}

impl PartialOrd for Dewey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dewey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.components.iter().zip(&other.components) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }

        // 1.0rc1 < 1.0.1: extra components win before suffixes are looked at
        self.components
            .len()
            .cmp(&other.components.len())
            .then_with(|| self.compare_suffix(other))
    }
}

impl fmt::Display for Dewey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Split off the leading ASCII digit run
fn split_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Numbers too large for u64 saturate rather than fail
fn parse_number(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        None
    } else {
        Some(digits.parse().unwrap_or(u64::MAX))
    }
}

/// Match `<digits><keyword><digits?>` on a last component, returning the
/// number part, the suffix kind and its value.
fn split_suffix(component: &str) -> Option<(&str, Suffix, Option<u64>)> {
    let (digits, rest) = split_digits(component);
    if digits.is_empty() || rest.is_empty() {
        return None;
    }

    Suffix::KEYWORDS.iter().find_map(|(keyword, kind)| {
        let value = rest.strip_prefix(keyword)?;
        if value.chars().all(|c| c.is_ascii_digit()) {
            Some((digits, *kind, parse_number(value)))
        } else {
            None
        }
    })
}
