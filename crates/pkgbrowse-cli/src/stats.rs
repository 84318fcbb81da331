use indexmap::IndexMap;
use nu_ansi_term::Color::{Cyan, Green, Magenta, Yellow};
use pkgbrowse_core::{BrowseResult, Catalog};
use pkgbrowse_registry::SnapshotSource;
use tabled::{
    builder::Builder,
    settings::{themes::BorderCorrection, Panel, Style},
};
use tracing::{debug, info, warn};

use crate::{
    source::load_catalog,
    utils::{format_mib, icon_or, Colored, Icons},
};

fn counts(map: &IndexMap<String, u64>) -> String {
    map.iter()
        .map(|(name, count)| format!("{name}: {}", Colored(Cyan, count)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn stats_table(catalog: &Catalog) -> Builder {
    let metadata = &catalog.metadata;
    let mut builder = Builder::new();

    builder.push_record([
        format!("{} Total Packages", icon_or(Icons::PACKAGE, "#")),
        Colored(Green, metadata.total_packages).to_string(),
    ]);

    builder.push_record([
        format!("{} Repositories", icon_or(Icons::REPO, "#")),
        format!(
            "{}\n{}",
            Colored(Green, metadata.repositories.len()),
            counts(&metadata.repositories)
        ),
    ]);

    builder.push_record([
        format!("{} Source Repositories", icon_or(Icons::REPO, "#")),
        format!(
            "{}\n{}",
            Colored(Green, metadata.source_repositories.len()),
            counts(&metadata.source_repositories)
        ),
    ]);

    if !metadata.architectures.is_empty() {
        builder.push_record([
            format!("{} Architectures", icon_or(Icons::ARCH, "#")),
            counts(&metadata.architectures),
        ]);
    }

    if !metadata.repo_priority.is_empty() {
        builder.push_record([
            format!("{} Priority", icon_or(Icons::VERSION, "#")),
            metadata
                .repo_priority
                .iter()
                .enumerate()
                .map(|(idx, repo)| format!("{}. {repo}", idx + 1))
                .collect::<Vec<_>>()
                .join("\n"),
        ]);
    }

    if let Some(ref version) = metadata.alpine_version {
        builder.push_record([
            format!("{} Alpine Version", icon_or(Icons::ORIGIN, "#")),
            version.clone(),
        ]);
    }

    if let Some(size) = metadata.total_package_size_mb {
        builder.push_record([
            format!("{} Total Package Size", icon_or(Icons::SIZE, "#")),
            Colored(Magenta, format_mib(size)).to_string(),
        ]);
    }

    if let Some(size) = metadata.total_installed_size_mb {
        builder.push_record([
            format!("{} Total Installed Size", icon_or(Icons::SIZE, "#")),
            Colored(Magenta, format_mib(size)).to_string(),
        ]);
    }

    if let Some(ref updated) = metadata.last_updated {
        builder.push_record([
            format!("{} Last Updated", icon_or(Icons::CALENDAR, "#")),
            Colored(Yellow, updated).to_string(),
        ]);
    }

    builder
}

pub async fn show_stats(source: &SnapshotSource) -> BrowseResult<()> {
    debug!(source = %source, "showing catalog statistics");

    let catalog = load_catalog(source).await?;
    if catalog.is_empty() {
        warn!("No packages available from {}", source);
    }

    let table = stats_table(&catalog)
        .build()
        .with(Panel::header("Catalog Statistics"))
        .with(Style::rounded())
        .with(BorderCorrection {})
        .to_string();

    info!(
        total_packages = catalog.metadata.total_packages,
        consolidated = catalog.packages.len(),
        repositories = catalog.metadata.repositories.len(),
        source_repositories = catalog.metadata.source_repositories.len(),
        last_updated = catalog.metadata.last_updated,
        "\n{table}"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use pkgbrowse_registry::Metadata;
    use serial_test::serial;

    use super::*;
    use crate::utils::COLOR;

    #[test]
    #[serial]
    fn test_stats_table() {
        *COLOR.write().unwrap() = false;

        let mut metadata = Metadata {
            total_packages: 3,
            repo_priority: vec!["shaanos-core".into(), "alpine-main".into()],
            total_package_size_mb: Some(12.5),
            last_updated: Some("2024-05-01T12:00:00Z".into()),
            ..Default::default()
        };
        metadata.repositories.insert("main".into(), 2);
        metadata.repositories.insert("community".into(), 1);

        let catalog = Catalog {
            packages: vec![],
            metadata,
        };

        let rendered = stats_table(&catalog).build().to_string();
        assert!(rendered.contains("main: 2"));
        assert!(rendered.contains("community: 1"));
        assert!(rendered.contains("1. shaanos-core"));
        assert!(rendered.contains("12.50 MiB"));
        assert!(rendered.contains("2024-05-01T12:00:00Z"));
        assert!(!rendered.contains("Alpine Version"));
        assert!(!rendered.contains("Installed Size"));
    }
}
