//! Application configuration.

pub mod app_config;
pub mod args;
pub mod state_config;
pub mod storage;

pub use app_config::{AppConfig, DEFAULT_API_URL, DisplayConfig, LogLevel};
pub use args::{
    CliArgs, Command, JobsiteArgs, JobsiteCommand, RecordArgs, RecordCommand, RecordFilterArgs,
    RoleCommand, UserArgs, UserCommand,
};
pub use state_config::StateConfig;
pub use storage::{ConfigError, ConfigOrigin, LoadedConfig, StorageManager};
