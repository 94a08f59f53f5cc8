use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub pack: PackConfig,
    pub network: NetworkConfig,
    pub data: DataConfig,
}

/// Pack wizard behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Maximum number of items a single pack may hold.
    pub max_items: usize,
    /// Route opened after the success modal is dismissed.
    pub listing_route: String,
    /// Ticks a notification stays visible.
    pub notification_ttl_ticks: u32,
}

/// RPC connection settings handed to the transaction builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub rpc_endpoint: String,
}

/// Data directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file; defaults in use
    Missing(PathBuf),
    /// File failed to parse; defaults in use
    Invalid { path: PathBuf, error: String },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => log::info!("Loaded config from {}", path.display()),
            ConfigSource::Missing(path) => {
                log::debug!("No config file at {}, using defaults", path.display())
            }
            ConfigSource::Invalid { path, error } => {
                log::warn!("Failed to parse config at {}: {error}, using defaults", path.display())
            }
        }
    }
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            max_items: 100,
            listing_route: "/artworks".to_string(),
            notification_ttl_ticks: 60,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_endpoint: "https://api.devnet.solana.com".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/pack-wizard/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let (config, source) = Self::read_from(path);
        source.log();
        config
    }

    /// Like [`AppConfig::load`], but reports where the values came from
    /// instead of logging it, for callers that set up logging afterwards.
    pub fn read() -> (Self, ConfigSource) {
        Self::read_from(&Self::config_path())
    }

    pub fn read_from(path: &Path) -> (Self, ConfigSource) {
        let path = path.to_path_buf();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, ConfigSource::File(path)),
                Err(e) => (
                    Self::default(),
                    ConfigSource::Invalid {
                        path,
                        error: e.to_string(),
                    },
                ),
            },
            Err(_) => (Self::default(), ConfigSource::Missing(path)),
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("pack-wizard"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("pack-wizard").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
