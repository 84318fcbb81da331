use miette::Diagnostic;
use pkgbrowse_utils::error::{PathError, UtilsError};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(pkgbrowse_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(pkgbrowse_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(pkgbrowse_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("Invalid page size: {0}")]
    #[diagnostic(
        code(pkgbrowse_config::invalid_page_size),
        help("page_size must be greater than zero")
    )]
    InvalidPageSize(usize),

    #[error("Snapshot location is empty")]
    #[diagnostic(
        code(pkgbrowse_config::empty_snapshot),
        help("Set `snapshot` to a file path or an http(s) URL")
    )]
    EmptySnapshotLocation,

    #[error("Invalid remote URL: {0}")]
    #[diagnostic(
        code(pkgbrowse_config::invalid_remote_url),
        help("`remote_url` must start with http:// or https://")
    )]
    InvalidRemoteUrl(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(pkgbrowse_config::io))]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(pkgbrowse_config::utils))]
    Utils(#[from] UtilsError),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(code(pkgbrowse_config::toml))]
    Toml(#[from] toml_edit::TomlError),

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(code(pkgbrowse_config::unexpected_toml_item))]
    UnexpectedTomlItem(String),
}

impl From<PathError> for ConfigError {
    fn from(err: PathError) -> Self {
        Self::Utils(UtilsError::Path(err))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
