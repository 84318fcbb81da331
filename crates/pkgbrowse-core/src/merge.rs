use pkgbrowse_registry::{Package, PackageDetail};

/// Overlays `detail` onto `base`, field by field.
///
/// Every field the detail carries replaces the base value; fields the detail
/// lacks keep whatever the base had.
pub fn merge_detail(mut base: Package, detail: &PackageDetail) -> Package {
    macro_rules! overlay_required {
        ($($field:ident),* $(,)?) => {
            $(
                if let Some(value) = &detail.$field {
                    base.$field = value.clone();
                }
            )*
        };
    }

    macro_rules! overlay {
        ($($field:ident),* $(,)?) => {
            $(
                if let Some(value) = &detail.$field {
                    base.$field = Some(value.clone());
                }
            )*
        };
    }

    overlay_required!(name, version, description, repo);
    overlay!(
        source_repo,
        architecture,
        architectures,
        url,
        license,
        package_size,
        installed_size,
        origin,
        maintainer,
        build_time,
        dependencies,
        provides,
        install_if,
        checksum,
    );

    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_overrides_present_fields() {
        let base = Package {
            name: "x".into(),
            version: "1.0".into(),
            description: "base description".into(),
            repo: "main".into(),
            license: Some("MIT".into()),
            ..Default::default()
        };
        let detail = PackageDetail {
            version: Some("2.0".into()),
            maintainer: Some("Jane Doe <jane@example.org>".into()),
            ..Default::default()
        };

        let merged = merge_detail(base, &detail);
        assert_eq!(merged.version, "2.0");
        assert_eq!(merged.description, "base description");
        assert_eq!(merged.license.as_deref(), Some("MIT"));
        assert_eq!(
            merged.maintainer.as_deref(),
            Some("Jane Doe <jane@example.org>")
        );
    }

    #[test]
    fn test_empty_detail_is_identity() {
        let base = Package {
            name: "x".into(),
            version: "1.0".into(),
            source_repo: Some("alpine-main".into()),
            package_size: Some(1024),
            ..Default::default()
        };
        let merged = merge_detail(base.clone(), &PackageDetail::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn test_merge_onto_empty_base() {
        let detail = PackageDetail {
            name: Some("ghost".into()),
            repo: Some("community".into()),
            dependencies: Some(vec!["so:libc.musl-x86_64.so.1".into()]),
            ..Default::default()
        };
        let merged = merge_detail(Package::default(), &detail);
        assert_eq!(merged.name, "ghost");
        assert_eq!(merged.repo, "community");
        assert_eq!(merged.version, "");
        assert_eq!(merged.dependencies.as_ref().map(Vec::len), Some(1));
    }
}
