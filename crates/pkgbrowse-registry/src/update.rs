//! Refreshing the local snapshot from its remote origin.

use std::path::Path;

use pkgbrowse_utils::fs::{modified_elapsed, write_atomic};
use tracing::{debug, info};

use crate::{
    error::Result,
    loader::{decode_snapshot, fetch_remote},
};

/// What [`refresh_snapshot`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The local snapshot is younger than the refresh interval.
    Fresh,
    /// A new snapshot was downloaded and written.
    Updated { packages: usize, bytes: usize },
}

/// Whether the file at `dest` is recent enough to skip a refresh.
pub fn is_fresh<P: AsRef<Path>>(dest: P, interval_ms: u128) -> bool {
    modified_elapsed(dest).is_some_and(|elapsed| elapsed.as_millis() < interval_ms)
}

/// Downloads the snapshot at `remote_url` and replaces `dest` with it.
///
/// The download is skipped when `dest` was modified less than `interval_ms`
/// ago, unless `force` is set. The body must parse as a snapshot before
/// anything is written; the write itself goes through a temporary file so
/// concurrent readers see either the old or the new document.
///
/// # Errors
///
/// Fails on transport errors, non-success statuses, unparseable bodies and
/// write failures.
pub fn refresh_snapshot<P: AsRef<Path>>(
    remote_url: &str,
    dest: P,
    force: bool,
    interval_ms: u128,
) -> Result<RefreshOutcome> {
    let dest = dest.as_ref();

    if !force && is_fresh(dest, interval_ms) {
        debug!("Snapshot at {} is fresh, skipping download", dest.display());
        return Ok(RefreshOutcome::Fresh);
    }

    let content = fetch_remote(remote_url)?;
    let bytes = content.len();
    let document = decode_snapshot(&content)?;

    write_atomic(dest, &content)?;

    info!(
        "Wrote snapshot with {} packages to {}",
        document.packages.len(),
        dest.display()
    );

    Ok(RefreshOutcome::Updated {
        packages: document.packages.len(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::error::RegistryError;

    #[test]
    fn test_is_fresh() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("packages.json");

        assert!(!is_fresh(&path, u128::MAX));

        fs::write(&path, "{}").unwrap();
        assert!(is_fresh(&path, u128::MAX));
        assert!(!is_fresh(&path, 0));
    }

    #[test]
    fn test_refresh_skips_fresh_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("packages.json");
        fs::write(&path, "{}").unwrap();

        let outcome = refresh_snapshot("not a url", &path, false, u128::MAX).unwrap();
        assert_eq!(outcome, RefreshOutcome::Fresh);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_forced_refresh_with_bad_url_fails_without_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("packages.json");
        fs::write(&path, "{}").unwrap();

        let result = refresh_snapshot("not a url", &path, true, u128::MAX);
        assert!(matches!(result, Err(RegistryError::InvalidUrl(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
