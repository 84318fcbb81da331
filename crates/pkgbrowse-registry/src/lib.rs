//! Snapshot loading for the pkgbrowse catalog browser.
//!
//! This crate owns the data contracts of a catalog snapshot and the I/O that
//! produces one.
//!
//! # Overview
//!
//! A snapshot is a single JSON document (optionally zstd-compressed) with three
//! required keys:
//! - `packages`: the flat list of [`Package`] entries, possibly with duplicates
//! - `details`: extended [`PackageDetail`] records keyed by package name
//! - `metadata`: catalog-wide [`Metadata`], including the repository priority
//!
//! Snapshots are read through the [`SnapshotLoader`] trait, implemented for
//! [`SnapshotSource`] (a URL or a file) and for an in-memory
//! [`SnapshotDocument`].
//!
//! # Example
//!
//! ```no_run
//! use pkgbrowse_registry::{SnapshotLoader, SnapshotSource};
//!
//! fn count() -> pkgbrowse_registry::Result<usize> {
//!     let source = SnapshotSource::parse("https://example.org/packages.json")?;
//!     Ok(source.load()?.packages.len())
//! }
//! ```

pub mod error;
pub mod http_client;
pub mod loader;
pub mod package;
pub mod snapshot;
pub mod update;

pub use error::{ErrorContext, RegistryError, Result};
pub use loader::{decode_snapshot, fetch_remote, SnapshotLoader, SnapshotSource, ZST_MAGIC_BYTES};
pub use package::{Package, PackageDetail};
pub use snapshot::{Metadata, SnapshotDocument};
pub use update::{refresh_snapshot, RefreshOutcome};
