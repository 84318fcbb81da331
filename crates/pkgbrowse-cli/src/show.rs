use nu_ansi_term::Color::{Blue, Cyan, Green, Magenta, Yellow};
use pkgbrowse_core::{error::BrowseError, BrowseResult};
use pkgbrowse_registry::{Package, SnapshotSource};
use pkgbrowse_utils::bytes::format_bytes;
use tabled::{
    builder::Builder,
    settings::{peaker::PriorityMax, Style, Width},
};
use tracing::{debug, info};

use crate::{
    source::load_package,
    utils::{format_timestamp, icon_or, term_width, vec_string, Colored, Icons},
};

fn label(icon: &str, text: &str) -> String {
    let icon = icon_or(icon, "");
    if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    }
}

fn push_list(builder: &mut Builder, icon: &str, text: &str, values: Option<&Vec<String>>) {
    if let Some(values) = values.filter(|v| !v.is_empty()) {
        builder.push_record([label(icon, text), values.join("\n")]);
    }
}

/// Lays out the detail view of a package. Fields the package does not carry
/// are left out.
pub fn detail_table(package: &Package) -> Builder {
    let mut builder = Builder::new();

    builder.push_record([
        label(Icons::PACKAGE, "Name"),
        Colored(Blue, &package.name).to_string(),
    ]);

    if !package.description.is_empty() {
        builder.push_record([
            label(Icons::DESCRIPTION, "Description"),
            package.description.clone(),
        ]);
    }

    if !package.version.is_empty() {
        builder.push_record([
            label(Icons::VERSION, "Version"),
            Colored(Blue, &package.version).to_string(),
        ]);
    }

    if !package.repo.is_empty() {
        let repo = match package.source_repo {
            Some(ref source) => format!("{} ({})", Colored(Green, &package.repo), source),
            None => Colored(Green, &package.repo).to_string(),
        };
        builder.push_record([label(Icons::REPO, "Repository"), repo]);
    }

    if let Some(size) = package.package_size {
        builder.push_record([
            label(Icons::SIZE, "Package Size"),
            Colored(Magenta, format_bytes(size, 2)).to_string(),
        ]);
    }

    if let Some(size) = package.installed_size {
        builder.push_record([
            label(Icons::SIZE, "Installed Size"),
            Colored(Magenta, format_bytes(size, 2)).to_string(),
        ]);
    }

    if let Some(ref license) = package.license {
        builder.push_record([label(Icons::LICENSE, "License"), license.clone()]);
    }

    if let Some(ref origin) = package.origin {
        builder.push_record([label(Icons::ORIGIN, "Origin"), origin.clone()]);
    }

    if let Some(ref maintainer) = package.maintainer {
        builder.push_record([label(Icons::MAINTAINER, "Maintainer"), maintainer.clone()]);
    }

    if let Some(build_time) = package.build_time {
        builder.push_record([
            label(Icons::CALENDAR, "Build Time"),
            format_timestamp(build_time),
        ]);
    }

    if let Some(ref arch) = package.architecture {
        builder.push_record([
            label(Icons::ARCH, "Architecture"),
            Colored(Cyan, arch).to_string(),
        ]);
    }

    if let Some(arches) = package.architectures.as_ref().filter(|a| !a.is_empty()) {
        builder.push_record([label(Icons::ARCH, "Supported Architectures"), arches.join(", ")]);
    }

    if let Some(ref url) = package.url {
        builder.push_record([
            label(Icons::HOME, "Website"),
            Colored(Blue, url).to_string(),
        ]);
    }

    push_list(&mut builder, Icons::DEPENDENCY, "Provides", package.provides.as_ref());
    push_list(
        &mut builder,
        Icons::DEPENDENCY,
        "Dependencies",
        package.dependencies.as_ref(),
    );
    push_list(
        &mut builder,
        Icons::DEPENDENCY,
        "Install If",
        package.install_if.as_ref(),
    );

    if let Some(ref checksum) = package.checksum {
        builder.push_record([
            label(Icons::CHECKSUM, "Checksum"),
            Colored(Yellow, checksum).to_string(),
        ]);
    }

    builder
}

pub async fn show_package(source: &SnapshotSource, name: &str) -> BrowseResult<()> {
    debug!(name = name, "showing package details");

    let package = load_package(source, name)
        .await?
        .ok_or_else(|| BrowseError::PackageNotFound(name.to_string()))?;

    let table = detail_table(&package)
        .build()
        .with(Style::rounded())
        .with(Width::wrap(term_width()).priority(PriorityMax::default()))
        .to_string();

    info!(
        pkg_name = package.name,
        version = package.version,
        description = package.description,
        repo = package.repo,
        source_repo = package.source_repo,
        license = package.license,
        origin = package.origin,
        maintainer = package.maintainer,
        url = package.url,
        package_size = package.package_size,
        installed_size = package.installed_size,
        build_time = package.build_time,
        architecture = package.architecture,
        architectures = vec_string(package.architectures.as_ref()),
        dependencies = vec_string(package.dependencies.as_ref()),
        provides = vec_string(package.provides.as_ref()),
        install_if = vec_string(package.install_if.as_ref()),
        checksum = package.checksum,
        "\n{table}"
    );

    Ok(())
}
