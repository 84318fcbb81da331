//! Error types for the registry crate.
//!
//! This module defines [`RegistryError`], the error type used throughout
//! the crate, along with helper traits for error context.

use miette::Diagnostic;
use pkgbrowse_utils::error::FileSystemError;
use thiserror::Error;

/// Errors that can occur while loading or refreshing a catalog snapshot.
#[derive(Error, Diagnostic, Debug)]
pub enum RegistryError {
    #[error("Error while {action}: {source}")]
    #[diagnostic(code(pkgbrowse_registry::io))]
    IoError {
        action: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(
        code(pkgbrowse_registry::http),
        help("Check your network connection and the snapshot URL")
    )]
    UreqError(#[from] ureq::Error),

    #[error("Failed to fetch from remote source: {0}")]
    #[diagnostic(
        code(pkgbrowse_registry::fetch_remote),
        help("Verify the snapshot URL is correct and accessible")
    )]
    FailedToFetchRemote(String),

    #[error(transparent)]
    #[diagnostic(
        code(pkgbrowse_registry::json),
        help("The snapshot document may be corrupted or in an invalid format")
    )]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    #[diagnostic(
        code(pkgbrowse_registry::invalid_url),
        help("Ensure the URL is valid and properly formatted")
    )]
    InvalidUrl(String),

    #[error("Snapshot content is empty")]
    #[diagnostic(
        code(pkgbrowse_registry::empty_snapshot),
        help("The snapshot file appears to be truncated; run `pkgbrowse update --force`")
    )]
    EmptySnapshot,

    #[error(transparent)]
    #[diagnostic(code(pkgbrowse_registry::filesystem))]
    FileSystem(#[from] FileSystemError),

    #[error("{0}")]
    #[diagnostic(code(pkgbrowse_registry::custom))]
    Custom(String),
}

/// A specialized Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Extension trait for adding context to I/O errors.
pub trait ErrorContext<T> {
    /// Adds context to an error, describing what action was being performed.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            RegistryError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
