use std::path::PathBuf;

use nu_ansi_term::Color::{Cyan, Green};
use pkgbrowse_core::{error::BrowseError, BrowseResult};
use pkgbrowse_registry::{refresh_snapshot, RefreshOutcome};
use pkgbrowse_utils::bytes::format_bytes;
use tracing::{debug, info};

use crate::utils::Colored;

pub async fn update_snapshot(
    remote_url: String,
    dest: PathBuf,
    force: bool,
    interval_ms: u128,
) -> BrowseResult<()> {
    debug!(
        remote = remote_url,
        dest = %dest.display(),
        force = force,
        "updating snapshot"
    );

    let target = dest.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        refresh_snapshot(&remote_url, &target, force, interval_ms)
    })
    .await
    .map_err(|err| BrowseError::Custom(format!("snapshot update panicked: {err}")))??;

    match outcome {
        RefreshOutcome::Fresh => {
            info!(
                "Snapshot at {} is up to date (use --force to download anyway)",
                Colored(Cyan, dest.display())
            );
        }
        RefreshOutcome::Updated {
            packages,
            bytes,
        } => {
            info!(
                "Updated {} with {} package entries ({})",
                Colored(Cyan, dest.display()),
                Colored(Green, packages),
                format_bytes(bytes as u64, 2)
            );
        }
    }

    Ok(())
}
