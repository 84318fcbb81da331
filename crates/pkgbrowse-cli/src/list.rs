use nu_ansi_term::Color::{Blue, Cyan, Green, LightRed, Magenta, Yellow};
use pkgbrowse_core::{
    browse::{page_count, BrowseAction, BrowseState, PageView},
    BrowseResult,
};
use pkgbrowse_registry::{Package, SnapshotSource};
use pkgbrowse_utils::bytes::format_bytes;
use tabled::{
    builder::Builder,
    settings::{themes::BorderCorrection, Panel, Style},
};
use tracing::{debug, info, warn};

use crate::{
    cli::FilterArgs,
    source::load_catalog,
    utils::{display_settings, icon_or, Colored, Icons},
};

/// Builds the browse state for a command line invocation.
///
/// Facet values given more than once are selected once. The requested page is
/// clamped against the filtered result.
pub fn browse_state(
    packages: &[Package],
    query: Option<String>,
    filters: &FilterArgs,
    page_size: usize,
) -> BrowseState {
    let mut state = BrowseState::default();

    if let Some(query) = query {
        state = state.reduce(BrowseAction::Search(query), 0);
    }
    for repo in &filters.repo {
        if !state.repos.contains(repo) {
            state = state.reduce(BrowseAction::ToggleRepo(repo.clone()), 0);
        }
    }
    for arch in &filters.arch {
        if !state.arches.contains(arch) {
            state = state.reduce(BrowseAction::ToggleArch(arch.clone()), 0);
        }
    }

    let pages = page_count(state.filter(packages).len(), page_size);
    state.reduce(BrowseAction::GoTo(filters.page), pages)
}

fn print_page(view: &PageView<'_>) {
    for package in &view.items {
        info!(
            pkg_name = package.name,
            version = package.version,
            repo = package.repo,
            source_repo = package.source_repo,
            description = package.description,
            size = package.package_size,
            "{} {} | {} | {}{}",
            Colored(Blue, &package.name),
            Colored(LightRed, &package.version),
            Colored(Green, &package.repo),
            package.description,
            package
                .package_size
                .map(|size| format!(" ({})", Colored(Magenta, format_bytes(size, 2))))
                .unwrap_or_default()
        );
    }
}

fn print_summary(title: &str, view: &PageView<'_>, state: &BrowseState) {
    let settings = display_settings();
    let page = if view.page_count == 0 { 0 } else { view.page };

    if settings.icons() {
        let mut builder = Builder::new();
        builder.push_record([
            format!("{} Found", Icons::PACKAGE),
            format!(
                "{} (showing {})",
                Colored(Cyan, view.total_matches),
                Colored(Green, view.items.len())
            ),
        ]);
        builder.push_record([
            format!("{} Page", Icons::CALENDAR),
            format!("{} of {}", Colored(Cyan, page), Colored(Cyan, view.page_count)),
        ]);
        if state.active_filter_count() > 0 {
            let selected: Vec<&str> = state
                .repos
                .iter()
                .chain(state.arches.iter())
                .map(String::as_str)
                .collect();
            builder.push_record([
                format!("{} Filters", Icons::REPO),
                format!(
                    "{} ({})",
                    Colored(Yellow, state.active_filter_count()),
                    selected.join(", ")
                ),
            ]);
        }

        let table = builder
            .build()
            .with(Panel::header(title))
            .with(Style::rounded())
            .with(BorderCorrection {})
            .to_string();

        info!("\n{table}");
    } else {
        info!(
            "{}",
            Colored(
                Cyan,
                format!(
                    "Showing {} of {} (page {} of {}, {} filters)",
                    view.items.len(),
                    view.total_matches,
                    page,
                    view.page_count,
                    state.active_filter_count()
                )
            )
        );
    }
}

async fn browse(
    source: &SnapshotSource,
    title: &str,
    query: Option<String>,
    filters: FilterArgs,
    page_size: usize,
) -> BrowseResult<()> {
    let catalog = load_catalog(source).await?;
    if catalog.is_empty() {
        warn!("No packages available from {}", source);
        return Ok(());
    }

    let state = browse_state(&catalog.packages, query, &filters, page_size);
    if state.page != filters.page {
        warn!(
            "Page {} is out of range, showing page {}",
            filters.page, state.page
        );
    }

    let view = state.view(&catalog.packages, page_size);
    print_page(&view);
    print_summary(title, &view, &state);

    Ok(())
}

pub async fn list_packages(
    source: &SnapshotSource,
    filters: FilterArgs,
    page_size: usize,
) -> BrowseResult<()> {
    debug!(repo = ?filters.repo, arch = ?filters.arch, page = filters.page, "listing packages");
    browse(source, "Packages", None, filters, page_size).await
}

pub async fn search_packages(
    source: &SnapshotSource,
    query: String,
    filters: FilterArgs,
    page_size: usize,
) -> BrowseResult<()> {
    debug!(query = query, repo = ?filters.repo, arch = ?filters.arch, "searching packages");
    let title = format!("{} Search Results", icon_or("🔍", ">"));
    browse(source, &title, Some(query), filters, page_size).await
}
