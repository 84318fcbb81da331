//! Reduces the raw package list of a snapshot to one entry per name.
//!
//! The raw list may contain the same package several times, once per source
//! repository it was ingested from. Consolidation merges every entry with its
//! detail record, keeps a single winner per name according to the repository
//! priority list, and sorts the winners by name.

use std::collections::HashMap;

use indexmap::{map::Entry, IndexMap};
use pkgbrowse_registry::{Package, PackageDetail};
use pkgbrowse_utils::string::locale_cmp;
use tracing::{debug, trace};

use crate::merge::merge_detail;

/// Position of `source_repo` in the priority list; lower is better.
///
/// `None` means the source is missing or not listed, which ranks below every
/// listed source.
pub fn priority_rank(source_repo: Option<&str>, priority: &[String]) -> Option<usize> {
    let source_repo = source_repo?;
    priority.iter().position(|repo| repo == source_repo)
}

/// Whether a candidate with rank `candidate` displaces the current winner.
///
/// Only a listed candidate can displace, and only when the winner is unlisted
/// or strictly worse. Ties keep the first-seen winner.
fn displaces(current: Option<usize>, candidate: Option<usize>) -> bool {
    match (candidate, current) {
        (Some(_), None) => true,
        (Some(new), Some(old)) => new < old,
        (None, _) => false,
    }
}

/// Merges, deduplicates and sorts the raw package list.
///
/// Entries whose merged name is empty are discarded. The result holds at most
/// one package per name, ordered by [`locale_cmp`] on the name.
pub fn consolidate(
    raw: Vec<Package>,
    details: &HashMap<String, PackageDetail>,
    priority: &[String],
) -> Vec<Package> {
    let total = raw.len();
    let mut winners: IndexMap<String, Package> = IndexMap::with_capacity(total);

    for pkg in raw {
        let merged = match details.get(&pkg.name) {
            Some(detail) => merge_detail(pkg, detail),
            None => pkg,
        };

        if merged.name.is_empty() {
            continue;
        }

        match winners.entry(merged.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(merged);
            }
            Entry::Occupied(mut slot) => {
                let current = priority_rank(slot.get().source_repo.as_deref(), priority);
                let candidate = priority_rank(merged.source_repo.as_deref(), priority);

                if displaces(current, candidate) {
                    trace!(
                        "{}: {:?} displaces {:?}",
                        merged.name,
                        merged.source_repo,
                        slot.get().source_repo
                    );
                    slot.insert(merged);
                }
            }
        }
    }

    let mut packages: Vec<Package> = winners.into_values().collect();
    packages.sort_by(|a, b| locale_cmp(&a.name, &b.name));

    debug!(
        "Consolidated {} raw entries into {} packages",
        total,
        packages.len()
    );

    packages
}
