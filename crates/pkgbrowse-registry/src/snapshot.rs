//! The catalog snapshot document.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::package::{Package, PackageDetail};

/// Catalog-wide information published alongside the packages.
///
/// Every field defaults, so a zeroed `Metadata` is what consumers receive when
/// the snapshot could not be loaded.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Metadata {
    pub total_packages: u64,

    /// Package count per logical repository, in document order.
    pub repositories: IndexMap<String, u64>,

    /// Package count per source repository, in document order.
    pub source_repositories: IndexMap<String, u64>,

    pub architectures: IndexMap<String, u64>,

    /// Source repositories ordered from highest to lowest priority.
    pub repo_priority: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_package_size_mb: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_installed_size_mb: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpine_version: Option<String>,
}

/// The whole document the loader reads: the flat package list, the detail map
/// keyed by package name, and the catalog metadata. All three keys are required.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct SnapshotDocument {
    pub packages: Vec<Package>,
    pub details: HashMap<String, PackageDetail>,
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_document_parse() {
        let doc: SnapshotDocument = serde_json::from_str(
            r#"{
                "packages": [
                    {"name": "curl", "version": "8.5.0-r0", "description": "URL retrieval utility", "repo": "main", "source_repo": "alpine-main"}
                ],
                "details": {
                    "curl": {"license": "curl", "package_size": 123456}
                },
                "metadata": {
                    "total_packages": 1,
                    "repositories": {"main": 1},
                    "source_repositories": {"alpine-main": 1},
                    "architectures": {"x86_64": 1},
                    "repo_priority": ["shaanos-core", "alpine-main", "alpine-community"],
                    "last_updated": "2024-05-01T12:00:00Z"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(doc.packages.len(), 1);
        assert_eq!(doc.details["curl"].license.as_deref(), Some("curl"));
        assert_eq!(doc.metadata.repo_priority[1], "alpine-main");
        assert_eq!(doc.metadata.repositories.get("main"), Some(&1));
        assert!(doc.metadata.total_package_size_mb.is_none());
    }

    #[test]
    fn test_snapshot_with_float_size_loads() {
        let doc: SnapshotDocument = serde_json::from_str(
            r#"{"packages":[{"name":"a","package_size":1024.0}],"details":{"a":{"installed_size":2048.0}},"metadata":{}}"#,
        )
        .unwrap();

        assert_eq!(doc.packages[0].package_size, Some(1024));
        assert_eq!(doc.details["a"].installed_size, Some(2048));
    }

    #[test]
    fn test_snapshot_requires_top_level_keys() {
        let result: Result<SnapshotDocument, _> =
            serde_json::from_str(r#"{"packages": [], "metadata": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_metadata_missing_priority_is_empty() {
        let metadata: Metadata = serde_json::from_str(r#"{"total_packages": 3}"#).unwrap();
        assert_eq!(metadata.total_packages, 3);
        assert!(metadata.repo_priority.is_empty());
        assert!(metadata.repositories.is_empty());
    }

    #[test]
    fn test_metadata_counts_keep_document_order() {
        let metadata: Metadata = serde_json::from_str(
            r#"{"repositories": {"community": 10, "main": 4, "testing": 1}}"#,
        )
        .unwrap();
        let keys: Vec<_> = metadata.repositories.keys().map(String::as_str).collect();
        assert_eq!(keys, ["community", "main", "testing"]);
    }
}
