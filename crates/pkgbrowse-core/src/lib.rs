use error::BrowseError;

pub mod browse;
pub mod catalog;
pub mod consolidate;
pub mod error;
pub mod lookup;
pub mod merge;

pub use catalog::{get_package_by_name, get_packages_and_metadata, load_catalog, Catalog};

pub type BrowseResult<T> = std::result::Result<T, BrowseError>;
