//! Index and package database readers
//!
//! This module provides functionality to:
//! - Parse candidate indexes (pkgup index and mirror index.txt)
//! - Parse local packing lists
//! - Enumerate the installed package database

mod contents;
mod installed;
mod pkgup;

pub use contents::PackingList;
pub use installed::{InstalledPackages, CONTENTS_FILE, DEFAULT_PKG_DB};
pub use pkgup::{index_header, CandidateIndex};

use crate::error::{IndexError, ReleaseError};
use std::path::Path;

/// Read and parse a candidate index file
pub fn read_index(path: &Path) -> Result<(CandidateIndex, Vec<ReleaseError>), IndexError> {
    if !path.exists() {
        return Err(IndexError::not_found(path));
    }
    let content = std::fs::read_to_string(path).map_err(|e| IndexError::read_error(path, e))?;
    Ok(CandidateIndex::parse(&content))
}
