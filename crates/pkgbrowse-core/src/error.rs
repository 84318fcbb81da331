//! Error types for pkgbrowse-core.

use miette::Diagnostic;
use pkgbrowse_config::error::ConfigError;
use pkgbrowse_registry::RegistryError;
use pkgbrowse_utils::error::PathError;
use thiserror::Error;

use crate::BrowseResult;

/// Core error type for catalog operations.
#[derive(Error, Diagnostic, Debug)]
pub enum BrowseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    #[diagnostic(code(pkgbrowse::path), help("Check the path and referenced variables"))]
    PathError(#[from] PathError),

    #[error("Error while {action}")]
    #[diagnostic(code(pkgbrowse::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(pkgbrowse::toml), help("Check your configuration syntax"))]
    TomlError(#[from] toml::ser::Error),

    #[error("Package '{0}' not found")]
    #[diagnostic(
        code(pkgbrowse::package_not_found),
        help("Run 'pkgbrowse update' to refresh the snapshot, or check the package name")
    )]
    PackageNotFound(String),

    #[error("{0}")]
    #[diagnostic(code(pkgbrowse::error))]
    Custom(String),
}

pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> BrowseResult<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> BrowseResult<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            BrowseError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BrowseError::PackageNotFound("nonexistent".into());
        assert_eq!(err.to_string(), "Package 'nonexistent' not found");

        let err: BrowseError = RegistryError::EmptySnapshot.into();
        assert_eq!(err.to_string(), "Snapshot content is empty");
    }

    #[test]
    fn test_io_context() {
        let result: std::io::Result<()> = Err(std::io::Error::other("boom"));
        let err = result
            .with_context(|| "reading config".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "Error while reading config");
    }
}
