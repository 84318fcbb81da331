use std::collections::HashMap;

use pkgbrowse_registry::{Package, PackageDetail};

use crate::merge::merge_detail;

/// Resolves a single package by name.
///
/// A name is only found when the detail map has a record for it. The record is
/// merged onto the first base entry with that name, or onto an empty package
/// when there is none. Repository priority plays no part here, so the result
/// may differ from the consolidated winner for the same name.
pub fn lookup_package(
    packages: &[Package],
    details: &HashMap<String, PackageDetail>,
    name: &str,
) -> Option<Package> {
    let detail = details.get(name)?;
    let base = packages
        .iter()
        .find(|pkg| pkg.name == name)
        .cloned()
        .unwrap_or_default();

    Some(merge_detail(base, detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, source_repo: &str, version: &str) -> Package {
        Package {
            name: name.into(),
            version: version.into(),
            repo: "main".into(),
            source_repo: Some(source_repo.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_requires_detail_record() {
        let packages = vec![pkg("curl", "alpine-main", "8.5.0-r0")];
        assert!(lookup_package(&packages, &HashMap::new(), "curl").is_none());
    }

    #[test]
    fn test_lookup_uses_first_base_entry() {
        let packages = vec![
            pkg("curl", "alpine-community", "8.4.0-r0"),
            pkg("curl", "alpine-main", "8.5.0-r0"),
        ];
        let mut details = HashMap::new();
        details.insert(
            "curl".to_string(),
            PackageDetail {
                license: Some("curl".into()),
                ..Default::default()
            },
        );

        let found = lookup_package(&packages, &details, "curl").unwrap();
        assert_eq!(found.source_repo.as_deref(), Some("alpine-community"));
        assert_eq!(found.version, "8.4.0-r0");
        assert_eq!(found.license.as_deref(), Some("curl"));
    }

    #[test]
    fn test_lookup_detail_without_base() {
        let mut details = HashMap::new();
        details.insert(
            "orphan".to_string(),
            PackageDetail {
                version: Some("0.1".into()),
                ..Default::default()
            },
        );

        let found = lookup_package(&[], &details, "orphan").unwrap();
        assert_eq!(found.name, "");
        assert_eq!(found.version, "0.1");
    }
}
