//! Signify comment timestamps and index freshness

use crate::error::IndexError;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

const DATE_PREFIX: &str = "date=";

/// Extract and parse the `date=` line of a signify comment block
pub fn signify_timestamp(block: &str) -> Result<DateTime<FixedOffset>, IndexError> {
    let value = block
        .lines()
        .find_map(|line| line.strip_prefix(DATE_PREFIX))
        .ok_or_else(|| {
            IndexError::invalid_timestamp("", "could not find date in signify block")
        })?;
    parse_timestamp(value)
}

/// Parse an RFC 3339 timestamp
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, IndexError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map_err(|e| IndexError::invalid_timestamp(value, e.to_string()))
}

/// How the index generation date relates to the mirror's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexFreshness {
    Current,
    IndexNewer,
    IndexOlder,
}

impl IndexFreshness {
    /// Compare the index timestamp against the mirror timestamp
    pub fn compare(index: &DateTime<FixedOffset>, mirror: &DateTime<FixedOffset>) -> Self {
        match index.cmp(mirror) {
            Ordering::Equal => IndexFreshness::Current,
            Ordering::Greater => IndexFreshness::IndexNewer,
            Ordering::Less => IndexFreshness::IndexOlder,
        }
    }

    pub fn is_current(&self) -> bool {
        *self == IndexFreshness::Current
    }
}

impl fmt::Display for IndexFreshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexFreshness::Current => write!(f, "index matches packages on configured mirror"),
            IndexFreshness::IndexNewer => {
                write!(f, "index appears to be newer than packages on configured mirror")
            }
            IndexFreshness::IndexOlder => {
                write!(f, "index appears to be older than packages on configured mirror")
            }
        }
    }
}
