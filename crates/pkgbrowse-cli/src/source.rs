use std::path::PathBuf;

use pkgbrowse_config::config::{is_remote, Config};
use pkgbrowse_core::{
    error::BrowseError, get_package_by_name, get_packages_and_metadata, BrowseResult, Catalog,
};
use pkgbrowse_registry::{Package, SnapshotSource};
use pkgbrowse_utils::path::resolve_path;

/// Picks the snapshot the commands read from. The `--snapshot` flag wins over
/// `PKGBROWSE_SNAPSHOT`, which wins over the config file.
pub fn resolve_source(flag: Option<&str>, config: &Config) -> BrowseResult<SnapshotSource> {
    let location = match flag {
        Some(location) if is_remote(location) => location.to_string(),
        Some(location) => resolve_path(location)?.display().to_string(),
        None => config.get_snapshot()?,
    };

    Ok(SnapshotSource::parse(&location)?)
}

/// The local file `update` writes to.
pub fn resolve_update_target(flag: Option<&str>, config: &Config) -> BrowseResult<PathBuf> {
    match resolve_source(flag, config)? {
        SnapshotSource::File(path) => Ok(path),
        SnapshotSource::Remote(url) => {
            Err(BrowseError::Custom(format!(
                "snapshot `{url}` is remote; point --snapshot or the config at a local file to update it"
            )))
        }
    }
}

/// Loads the consolidated catalog off the async runtime.
pub async fn load_catalog(source: &SnapshotSource) -> BrowseResult<Catalog> {
    let source = source.clone();
    tokio::task::spawn_blocking(move || get_packages_and_metadata(&source))
        .await
        .map_err(|err| BrowseError::Custom(format!("catalog loader panicked: {err}")))
}

pub async fn load_package(source: &SnapshotSource, name: &str) -> BrowseResult<Option<Package>> {
    let source = source.clone();
    let name = name.to_string();
    tokio::task::spawn_blocking(move || get_package_by_name(&source, &name))
        .await
        .map_err(|err| BrowseError::Custom(format!("package loader panicked: {err}")))
}
