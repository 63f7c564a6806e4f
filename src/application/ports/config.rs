//! Configuration store port interface

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for configuration persistence
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored configuration, or an empty config if none exists
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist the given configuration
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Path to the backing config file
    fn path(&self) -> PathBuf;

    /// Whether a config file exists
    fn exists(&self) -> bool;

    /// Create the config file with defaults; fails if it already exists
    async fn init(&self) -> Result<(), ConfigError>;
}
