//! Catalog entry points.
//!
//! [`load_catalog`] propagates load failures. [`get_packages_and_metadata`] and
//! [`get_package_by_name`] are fail-soft: a snapshot that cannot be fetched or
//! parsed yields an empty catalog or `None`, and the failure is only logged.

use pkgbrowse_registry::{Metadata, Package, SnapshotDocument, SnapshotLoader};
use tracing::{debug, error};

use crate::{consolidate::consolidate, lookup::lookup_package, BrowseResult};

/// The consolidated package list together with the snapshot's metadata.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    pub packages: Vec<Package>,
    pub metadata: Metadata,
}

impl Catalog {
    /// Consolidates a loaded snapshot using its own repository priority.
    pub fn from_document(document: SnapshotDocument) -> Self {
        let SnapshotDocument {
            packages,
            details,
            metadata,
        } = document;

        let packages = consolidate(packages, &details, &metadata.repo_priority);

        Self {
            packages,
            metadata,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|pkg| pkg.name == name)
    }
}

pub fn load_catalog<L: SnapshotLoader + ?Sized>(loader: &L) -> BrowseResult<Catalog> {
    let document = loader.load()?;
    debug!(
        "Loaded snapshot: {} entries, {} details",
        document.packages.len(),
        document.details.len()
    );
    Ok(Catalog::from_document(document))
}

/// Loads and consolidates the catalog, returning an empty one on failure.
pub fn get_packages_and_metadata<L: SnapshotLoader + ?Sized>(loader: &L) -> Catalog {
    match load_catalog(loader) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("Failed to load package catalog: {}", err);
            Catalog::default()
        }
    }
}

/// Looks up a single package, returning `None` when it is missing or the
/// snapshot cannot be loaded.
pub fn get_package_by_name<L: SnapshotLoader + ?Sized>(loader: &L, name: &str) -> Option<Package> {
    match loader.load() {
        Ok(document) => lookup_package(&document.packages, &document.details, name),
        Err(err) => {
            error!("Failed to load package {}: {}", name, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pkgbrowse_registry::{PackageDetail, RegistryError};

    use super::*;

    struct FailingLoader;

    impl SnapshotLoader for FailingLoader {
        fn load(&self) -> pkgbrowse_registry::Result<SnapshotDocument> {
            Err(RegistryError::FailedToFetchRemote(
                "https://example.org/packages.json [503 Service Unavailable]".into(),
            ))
        }
    }

    fn document() -> SnapshotDocument {
        serde_json::from_str(
            r#"{
                "packages": [
                    {"name": "x", "version": "1.0", "description": "first", "repo": "community", "source_repo": "community"},
                    {"name": "x", "version": "1.1", "description": "second", "repo": "main", "source_repo": "main"},
                    {"name": "only-base", "version": "0.1", "description": "no detail", "repo": "main"}
                ],
                "details": {
                    "x": {"license": "MIT"},
                    "detail-only": {"version": "3.0", "repo": "extra"}
                },
                "metadata": {
                    "total_packages": 2,
                    "repositories": {"main": 2, "community": 1},
                    "repo_priority": ["main", "community"]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_catalog_consolidates_with_document_priority() {
        let catalog = get_packages_and_metadata(&document());

        let names: Vec<_> = catalog.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["only-base", "x"]);

        let x = catalog.find("x").unwrap();
        assert_eq!(x.version, "1.1");
        assert_eq!(x.license.as_deref(), Some("MIT"));
        assert_eq!(catalog.metadata.total_packages, 2);
    }

    #[test]
    fn test_failure_yields_empty_catalog() {
        let catalog = get_packages_and_metadata(&FailingLoader);
        assert!(catalog.is_empty());
        assert_eq!(catalog.metadata, Metadata::default());
        assert_eq!(catalog.metadata.total_packages, 0);
    }

    #[test]
    fn test_load_catalog_propagates_failure() {
        assert!(load_catalog(&FailingLoader).is_err());
    }

    #[test]
    fn test_package_by_name() {
        let doc = document();

        let x = get_package_by_name(&doc, "x").unwrap();
        assert_eq!(x.version, "1.0");
        assert_eq!(x.license.as_deref(), Some("MIT"));

        assert!(get_package_by_name(&doc, "only-base").is_none());

        let detail_only = get_package_by_name(&doc, "detail-only").unwrap();
        assert_eq!(detail_only.version, "3.0");
        assert_eq!(detail_only.repo, "extra");

        assert!(get_package_by_name(&FailingLoader, "x").is_none());
    }

    #[test]
    fn test_from_document_without_priority() {
        let doc = SnapshotDocument {
            packages: vec![
                Package {
                    name: "b".into(),
                    source_repo: Some("community".into()),
                    ..Default::default()
                },
                Package {
                    name: "a".into(),
                    ..Default::default()
                },
                Package {
                    name: "b".into(),
                    source_repo: Some("main".into()),
                    ..Default::default()
                },
            ],
            details: HashMap::<String, PackageDetail>::new(),
            metadata: Metadata::default(),
        };

        let catalog = Catalog::from_document(doc);
        assert_eq!(catalog.packages.len(), 2);
        assert_eq!(catalog.packages[0].name, "a");
        assert_eq!(
            catalog.packages[1].source_repo.as_deref(),
            Some("community")
        );
    }
}
