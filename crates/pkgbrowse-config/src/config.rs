use std::{
    fs,
    path::PathBuf,
    sync::{LazyLock, RwLock},
};

use documented::{Documented, DocumentedFields};
use pkgbrowse_utils::{
    path::{resolve_path, xdg_config_home, xdg_data_home},
    time::interval_millis,
};
use serde::{Deserialize, Serialize};
use toml_edit::DocumentMut;
use tracing::{debug, info};

use crate::{
    annotations::annotate_toml_table,
    display::DisplaySettings,
    error::{ConfigError, Result},
};

pub const DEFAULT_REMOTE_URL: &str = "https://shaanos-packages-browser-json.pages.dev/packages.json";
pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const DEFAULT_UPDATE_INTERVAL: &str = "1d";

/// Application's configuration
#[derive(Clone, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Config {
    /// Where the catalog snapshot is read from: a file path or an http(s) URL.
    /// Default: $XDG_DATA_HOME/pkgbrowse/packages.json
    pub snapshot: Option<String>,

    /// Remote snapshot document downloaded by `pkgbrowse update`.
    pub remote_url: Option<String>,

    /// Number of packages shown per page.
    /// Default: 50
    pub page_size: Option<usize>,

    /// Minimum age of the local snapshot before `update` downloads it again
    /// (e.g., "12h", "1d", "always", "never").
    /// Default: "1d"
    pub update_interval: Option<String>,

    /// Timeout in seconds for snapshot downloads.
    /// Default: no timeout
    pub request_timeout: Option<u64>,

    /// Output display settings.
    pub display: Option<DisplaySettings>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("PKGBROWSE_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("pkgbrowse").join("config.toml"),
    })
});

pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG.write().unwrap();
    *global_config = Some(config);
    Ok(())
}

pub fn get_config() -> Config {
    {
        let config_guard = CONFIG.read().unwrap();
        if let Some(config) = config_guard.as_ref() {
            return config.clone();
        }
    }

    let mut config_guard = CONFIG.write().unwrap();
    config_guard
        .get_or_insert_with(Config::default_config)
        .clone()
}

impl Config {
    pub fn default_config() -> Self {
        let snapshot = xdg_data_home().join("pkgbrowse").join("packages.json");

        Self {
            snapshot: Some(snapshot.display().to_string()),
            remote_url: Some(DEFAULT_REMOTE_URL.to_string()),
            page_size: Some(DEFAULT_PAGE_SIZE),
            update_interval: Some(DEFAULT_UPDATE_INTERVAL.to_string()),
            request_timeout: None,
            display: Some(DisplaySettings::default()),
        }
    }

    /// Creates a new configuration by loading it from the configuration file.
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        let config_path = CONFIG_PATH.read().unwrap().to_path_buf();

        let mut config = match fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "config file {} not found, using defaults",
                    config_path.display()
                );
                Self::default_config()
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    /// Validates the configuration and fills in unset fields with their defaults.
    pub fn resolve(&mut self) -> Result<()> {
        let defaults = Self::default_config();

        if let Some(page_size) = self.page_size {
            if page_size == 0 {
                return Err(ConfigError::InvalidPageSize(page_size));
            }
        }

        if let Some(ref snapshot) = self.snapshot {
            if snapshot.trim().is_empty() {
                return Err(ConfigError::EmptySnapshotLocation);
            }
        }

        if let Some(ref remote_url) = self.remote_url {
            if !is_remote(remote_url) {
                return Err(ConfigError::InvalidRemoteUrl(remote_url.clone()));
            }
        }

        if self.snapshot.is_none() {
            self.snapshot = defaults.snapshot;
        }
        if self.remote_url.is_none() {
            self.remote_url = defaults.remote_url;
        }
        self.page_size.get_or_insert(DEFAULT_PAGE_SIZE);
        if self.update_interval.is_none() {
            self.update_interval = defaults.update_interval;
        }
        if self.display.is_none() {
            self.display = defaults.display;
        }

        Ok(())
    }

    /// Returns the snapshot location the loader reads from.
    ///
    /// `PKGBROWSE_SNAPSHOT` overrides the configured value. URLs are returned
    /// untouched; file paths are expanded and made absolute.
    pub fn get_snapshot(&self) -> Result<String> {
        let location = match std::env::var("PKGBROWSE_SNAPSHOT") {
            Ok(env_location) => env_location,
            Err(_) => {
                match self.snapshot.clone() {
                    Some(snapshot) => snapshot,
                    None => Self::default_config().snapshot.unwrap_or_default(),
                }
            }
        };

        if location.trim().is_empty() {
            return Err(ConfigError::EmptySnapshotLocation);
        }

        if is_remote(&location) {
            return Ok(location);
        }

        Ok(resolve_path(&location)?.display().to_string())
    }

    pub fn get_remote_url(&self) -> String {
        self.remote_url
            .clone()
            .unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string())
    }

    pub fn page_size(&self) -> usize {
        self.page_size
            .filter(|&size| size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn update_interval(&self) -> u128 {
        interval_millis(
            self.update_interval
                .as_deref()
                .unwrap_or(DEFAULT_UPDATE_INTERVAL),
        )
    }

    pub fn display(&self) -> DisplaySettings {
        self.display.clone().unwrap_or_default()
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        annotate_toml_table::<Config>(doc.as_table_mut(), true)?;

        if let Some(display_item) = doc.get_mut("display") {
            if let Some(display_table) = display_item.as_table_mut() {
                annotate_toml_table::<DisplaySettings>(display_table, false)?;
            }
        }

        Ok(doc)
    }
}

/// Whether a location names an http(s) resource rather than a local file.
pub fn is_remote(location: &str) -> bool {
    let location = location.trim_start();
    location.starts_with("http://") || location.starts_with("https://")
}

pub fn generate_default_config() -> Result<()> {
    let config_path = CONFIG_PATH.read().unwrap().to_path_buf();

    if config_path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    let def_config = Config::default_config();
    let annotated_doc = def_config.to_annotated_document()?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&config_path, annotated_doc.to_string())?;
    info!(
        "Default configuration file generated with documentation at: {}",
        config_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempfile::tempdir;

    use super::*;
    use crate::test_utils::with_env;

    #[test]
    fn test_default_config_creation() {
        let config = Config::default_config();

        assert_eq!(config.page_size, Some(DEFAULT_PAGE_SIZE));
        assert_eq!(config.remote_url.as_deref(), Some(DEFAULT_REMOTE_URL));
        assert_eq!(config.update_interval.as_deref(), Some("1d"));
        assert!(config
            .snapshot
            .as_deref()
            .unwrap()
            .ends_with("pkgbrowse/packages.json"));
    }

    #[test]
    fn test_config_resolve_rejects_zero_page_size() {
        let mut config = Config::default_config();
        config.page_size = Some(0);

        let result = config.resolve();
        assert!(matches!(result, Err(ConfigError::InvalidPageSize(0))));
    }

    #[test]
    fn test_config_resolve_rejects_empty_snapshot() {
        let mut config = Config::default_config();
        config.snapshot = Some("  ".to_string());

        let result = config.resolve();
        assert!(matches!(result, Err(ConfigError::EmptySnapshotLocation)));
    }

    #[test]
    fn test_config_resolve_rejects_non_http_remote() {
        let mut config = Config::default_config();
        config.remote_url = Some("ftp://mirror.example.org/packages.json".to_string());

        let result = config.resolve();
        assert!(matches!(result, Err(ConfigError::InvalidRemoteUrl(_))));
    }

    #[test]
    fn test_config_resolve_sets_defaults() {
        let mut config: Config = toml::from_str("page_size = 25").unwrap();
        config.resolve().unwrap();

        assert_eq!(config.page_size(), 25);
        assert_eq!(config.get_remote_url(), DEFAULT_REMOTE_URL);
        assert_eq!(config.update_interval(), 24 * 3_600_000);
        assert!(config.snapshot.is_some());
        assert!(config.display().icons());
    }

    #[test]
    #[serial]
    fn test_get_snapshot_keeps_urls() {
        std::env::remove_var("PKGBROWSE_SNAPSHOT");
        let mut config = Config::default_config();
        config.snapshot = Some("https://mirror.example.org/packages.json".to_string());

        assert_eq!(
            config.get_snapshot().unwrap(),
            "https://mirror.example.org/packages.json"
        );
    }

    #[test]
    #[serial]
    fn test_get_snapshot_env_override() {
        with_env(vec![("PKGBROWSE_SNAPSHOT", "/srv/catalog/packages.json")], || {
            let config = Config::default_config();
            assert_eq!(config.get_snapshot().unwrap(), "/srv/catalog/packages.json");
        });
    }

    #[test]
    fn test_update_interval_keywords() {
        let mut config = Config::default_config();

        config.update_interval = Some("always".to_string());
        assert_eq!(config.update_interval(), 0);

        config.update_interval = Some("never".to_string());
        assert_eq!(config.update_interval(), u128::MAX);

        config.update_interval = Some("12h".to_string());
        assert_eq!(config.update_interval(), 12 * 3_600_000);
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.org/packages.json"));
        assert!(is_remote("http://localhost:8080/packages.json"));
        assert!(!is_remote("/srv/packages.json"));
        assert!(!is_remote("public/packages.json"));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default_config();
        let serialized = toml::to_string(&config).unwrap();

        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.page_size, config.page_size);
        assert_eq!(deserialized.snapshot, config.snapshot);
    }

    #[test]
    #[serial]
    fn test_generate_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pkgbrowse").join("config.toml");
        *CONFIG_PATH.write().unwrap() = path.clone();

        generate_default_config().unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("remote_url"));

        let result = generate_default_config();
        assert!(matches!(result, Err(ConfigError::ConfigAlreadyExists)));
    }
}
