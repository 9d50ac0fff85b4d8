//! Wishlist configuration module
//!
//! Provides configuration types for the wishlist store. Values are resolved
//! from defaults, then an optional TOML file, then the environment.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default key of the persisted partition-map blob
pub const DEFAULT_STORAGE_KEY: &str = "wishlist";
/// Default key of the serialized user record
pub const DEFAULT_USER_KEY: &str = "user";
/// Default key of the session token
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Wishlist store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistConfig {
    /// Key under which the whole `{ actorId: items[] }` blob is stored
    pub storage_key: String,
    /// Key holding the serialized current user
    pub user_key: String,
    /// Key holding the session token
    pub token_key: String,
    /// Root directory for file-backed storage
    pub data_dir: PathBuf,
    /// Optional per-value byte ceiling
    pub quota_bytes: Option<usize>,
}

impl Default for WishlistConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            user_key: DEFAULT_USER_KEY.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            data_dir: default_data_dir(),
            quota_bytes: None,
        }
    }
}

impl WishlistConfig {
    /// Create a new WishlistConfigBuilder
    pub fn builder() -> WishlistConfigBuilder {
        WishlistConfigBuilder::default()
    }

    /// Resolve configuration from defaults and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().env().build()
    }

    /// Resolve configuration from a TOML file, then the environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::builder().file(path)?.env().build()
    }

    /// Keys whose change means the current actor may have changed
    pub fn identity_keys(&self) -> [&str; 2] {
        [self.user_key.as_str(), self.token_key.as_str()]
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("storage_key", &self.storage_key),
            ("user_key", &self.user_key),
            ("token_key", &self.token_key),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingValue(name));
            }
        }

        if self.storage_key == self.user_key
            || self.storage_key == self.token_key
            || self.user_key == self.token_key
        {
            return Err(ConfigError::KeyCollision(format!(
                "storage_key={}, user_key={}, token_key={}",
                self.storage_key, self.user_key, self.token_key
            )));
        }

        if self.quota_bytes == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "quota_bytes",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Platform data directory for file-backed storage
fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
    path.push("storefront");
    path
}

/// On-disk shape of the TOML config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    storage_key: Option<String>,
    user_key: Option<String>,
    token_key: Option<String>,
    data_dir: Option<PathBuf>,
    quota_bytes: Option<usize>,
}

/// Builder for WishlistConfig
#[derive(Debug, Default)]
pub struct WishlistConfigBuilder {
    storage_key: Option<String>,
    user_key: Option<String>,
    token_key: Option<String>,
    data_dir: Option<PathBuf>,
    quota_bytes: Option<usize>,
    env_error: Option<ConfigError>,
}

impl WishlistConfigBuilder {
    /// Set the storage key
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    /// Set the user record key
    pub fn user_key(mut self, key: impl Into<String>) -> Self {
        self.user_key = Some(key.into());
        self
    }

    /// Set the session token key
    pub fn token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = Some(key.into());
        self
    }

    /// Set the file storage root
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set a per-value byte ceiling
    pub fn quota_bytes(mut self, limit: usize) -> Self {
        self.quota_bytes = Some(limit);
        self
    }

    /// Merge values from a TOML file
    pub fn file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let file: FileConfig =
            toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;

        self.storage_key = file.storage_key.or(self.storage_key);
        self.user_key = file.user_key.or(self.user_key);
        self.token_key = file.token_key.or(self.token_key);
        self.data_dir = file.data_dir.or(self.data_dir);
        self.quota_bytes = file.quota_bytes.or(self.quota_bytes);
        Ok(self)
    }

    /// Merge values from `WISHLIST_*` environment variables
    pub fn env(mut self) -> Self {
        if let Ok(key) = std::env::var("WISHLIST_STORAGE_KEY") {
            self.storage_key = Some(key);
        }
        if let Ok(key) = std::env::var("WISHLIST_USER_KEY") {
            self.user_key = Some(key);
        }
        if let Ok(key) = std::env::var("WISHLIST_TOKEN_KEY") {
            self.token_key = Some(key);
        }
        if let Ok(dir) = std::env::var("WISHLIST_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(raw) = std::env::var("WISHLIST_QUOTA_BYTES") {
            match raw.parse::<usize>() {
                Ok(limit) => self.quota_bytes = Some(limit),
                Err(e) => {
                    self.env_error = Some(ConfigError::InvalidValue {
                        field: "WISHLIST_QUOTA_BYTES",
                        message: e.to_string(),
                    })
                }
            }
        }
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<WishlistConfig, ConfigError> {
        if let Some(err) = self.env_error {
            return Err(err);
        }

        let defaults = WishlistConfig::default();
        let config = WishlistConfig {
            storage_key: self.storage_key.unwrap_or(defaults.storage_key),
            user_key: self.user_key.unwrap_or(defaults.user_key),
            token_key: self.token_key.unwrap_or(defaults.token_key),
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            quota_bytes: self.quota_bytes.or(defaults.quota_bytes),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
    #[error("storage keys must be distinct ({0})")]
    KeyCollision(String),
    #[error("failed to read config file {0}")]
    Io(String),
    #[error("failed to parse config file: {0}")]
    Parse(String),
}
