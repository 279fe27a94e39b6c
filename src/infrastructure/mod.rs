//! Infrastructure layer with external service adapters.

/// Backend REST client.
pub mod api;
/// Application configuration.
pub mod config;
/// Token storage adapters.
pub mod storage;

pub use api::ApiClient;
pub use config::{
    AppConfig, CliArgs, ConfigError, ConfigOrigin, LoadedConfig, LogLevel, StateConfig,
    StorageManager,
};
pub use storage::{KeyringTokenStorage, MemoryTokenStorage};
