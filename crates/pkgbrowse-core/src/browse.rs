//! Search, faceting and pagination over a consolidated catalog.
//!
//! Browsing state is an explicit [`BrowseState`] value updated through
//! [`BrowseState::reduce`]; nothing here holds global state. A page view is
//! computed from the state and the package list on demand.

use indexmap::IndexSet;
use pkgbrowse_registry::Package;
use pkgbrowse_utils::string::contains_ignore_case;

/// Number of pages needed for `total` items. Zero items need zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// The slice of `items` shown on the one-based `page`.
///
/// Pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

fn clamp_page(page: usize, pages: usize) -> usize {
    page.clamp(1, pages.max(1))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseAction {
    Search(String),
    ToggleRepo(String),
    ToggleArch(String),
    NextPage,
    PrevPage,
    GoTo(usize),
    ClearFilters,
}

/// Search text, facet selections and the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    pub search: String,
    pub repos: IndexSet<String>,
    pub arches: IndexSet<String>,
    pub page: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            search: String::new(),
            repos: IndexSet::new(),
            arches: IndexSet::new(),
            page: 1,
        }
    }
}

impl BrowseState {
    /// Applies `action` and returns the new state.
    ///
    /// Changing the search text or a facet returns to the first page. Page
    /// navigation is clamped to `[1, pages]`, treating zero pages as one.
    pub fn reduce(mut self, action: BrowseAction, pages: usize) -> Self {
        match action {
            BrowseAction::Search(text) => {
                self.search = text;
                self.page = 1;
            }
            BrowseAction::ToggleRepo(repo) => {
                if !self.repos.shift_remove(&repo) {
                    self.repos.insert(repo);
                }
                self.page = 1;
            }
            BrowseAction::ToggleArch(arch) => {
                if !self.arches.shift_remove(&arch) {
                    self.arches.insert(arch);
                }
                self.page = 1;
            }
            BrowseAction::NextPage => {
                self.page = clamp_page(self.page.saturating_add(1), pages);
            }
            BrowseAction::PrevPage => {
                self.page = clamp_page(self.page.saturating_sub(1), pages);
            }
            BrowseAction::GoTo(page) => {
                self.page = clamp_page(page, pages);
            }
            BrowseAction::ClearFilters => {
                self.repos.clear();
                self.arches.clear();
                self.page = 1;
            }
        }
        self
    }

    /// Number of selected facet values.
    pub fn active_filter_count(&self) -> usize {
        self.repos.len() + self.arches.len()
    }

    pub fn matches(&self, pkg: &Package) -> bool {
        if !self.search.is_empty()
            && !contains_ignore_case(&pkg.name, &self.search)
            && !contains_ignore_case(&pkg.description, &self.search)
        {
            return false;
        }

        if !self.repos.is_empty() && !self.repos.contains(&pkg.repo) {
            return false;
        }

        if !self.arches.is_empty() {
            let supported = pkg.architectures.as_deref().unwrap_or_default();
            if !supported.iter().any(|arch| self.arches.contains(arch)) {
                return false;
            }
        }

        true
    }

    /// Packages passing the search and both facets, in catalog order.
    pub fn filter<'a>(&self, packages: &'a [Package]) -> Vec<&'a Package> {
        packages.iter().filter(|pkg| self.matches(pkg)).collect()
    }

    /// The page of filtered packages the state currently points at.
    pub fn view<'a>(&self, packages: &'a [Package], page_size: usize) -> PageView<'a> {
        let filtered = self.filter(packages);
        let total_matches = filtered.len();
        let pages = page_count(total_matches, page_size);
        let page = clamp_page(self.page, pages);
        let items = paginate(&filtered, page, page_size).to_vec();

        PageView {
            items,
            page,
            page_count: pages,
            total_matches,
        }
    }
}

/// One page of browse results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub items: Vec<&'a Package>,
    pub page: usize,
    pub page_count: usize,
    pub total_matches: usize,
}

impl PageView<'_> {
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// The package currently opened in the detail view, if any.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn select(&mut self, name: impl Into<String>) {
        self.selected = Some(name.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Resolves the selection against `packages`.
    pub fn resolve<'a>(&self, packages: &'a [Package]) -> Option<&'a Package> {
        let name = self.selected.as_deref()?;
        packages.iter().find(|pkg| pkg.name == name)
    }
}
