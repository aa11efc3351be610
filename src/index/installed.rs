//! Package database enumeration
//!
//! Every sub-directory of the package database is named after an installed
//! release identifier and holds that release's `+CONTENTS` packing list.

use super::PackingList;
use crate::domain::{Release, ReleaseId};
use crate::error::{IoError, ReleaseError};
use std::path::Path;
use tracing::debug;

/// Packing list file name inside each database entry
pub const CONTENTS_FILE: &str = "+CONTENTS";

/// Default package database location
pub const DEFAULT_PKG_DB: &str = "/var/db/pkg";

/// Installed releases read from a package database
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    /// Releases in sorted entry order
    pub releases: Vec<Release>,
    /// Entries that could not be turned into a release
    pub errors: Vec<ReleaseError>,
}

impl InstalledPackages {
    /// Read every entry of the package database
    pub fn load(pkg_db: &Path) -> Result<Self, IoError> {
        if !pkg_db.is_dir() {
            return Err(IoError::directory_not_found(pkg_db));
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(pkg_db).map_err(|e| IoError::generic(pkg_db, e))? {
            let entry = entry.map_err(|e| IoError::generic(pkg_db, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            entries.push(entry.file_name().to_string_lossy().into_owned());
        }
        entries.sort();

        let mut installed = Self::default();
        for name in entries {
            match load_entry(pkg_db, &name) {
                Ok(release) => installed.releases.push(release),
                Err(e) => installed.errors.push(e),
            }
        }

        debug!(
            releases = installed.releases.len(),
            errors = installed.errors.len(),
            "loaded package database {}",
            pkg_db.display()
        );
        Ok(installed)
    }
}

fn load_entry(pkg_db: &Path, name: &str) -> Result<Release, ReleaseError> {
    let id = ReleaseId::parse(name)?;
    let path = pkg_db.join(name).join(CONTENTS_FILE);
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| ReleaseError::unreadable_entry(name, e.to_string()))?;
    Ok(PackingList::parse(&contents).into_release(id))
}
