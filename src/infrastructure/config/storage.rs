use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use super::state_config::StateConfig;
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";
const STATE_FILE_NAME: &str = "state.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

/// How [`StorageManager::load_config`] arrived at its configuration.
///
/// Config loads before logging is initialised, so the outcome is kept and
/// reported through [`ConfigOrigin::log`] once a subscriber exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    Read(PathBuf),
    Created(PathBuf),
    Malformed { path: PathBuf, error: String },
}

impl ConfigOrigin {
    pub fn log(&self) {
        match self {
            Self::Read(path) => debug!(path = ?path, "Loaded config file"),
            Self::Created(path) => info!(path = ?path, "Config file not found, created default"),
            Self::Malformed { path, error } => {
                warn!(path = ?path, error = %error, "Failed to parse config file, using defaults");
            }
        }
    }
}

/// Configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub origin: ConfigOrigin,
}

/// Reads and writes `config.toml` and `state.toml`.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Create a new `StorageManager` rooted at the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Creates a new `StorageManager` with a specific directory.
    #[must_use]
    pub const fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Ensures the configuration directory exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        if !self.config_dir.exists() {
            info!(path = ?self.config_dir, "Creating configuration directory");
            fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Loads the application configuration, writing defaults on first run.
    ///
    /// A file that fails to parse is left untouched and defaults are used.
    /// Nothing is logged here; call [`ConfigOrigin::log`] on the result.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            Path::to_path_buf,
        );

        if !config_path.exists() {
            let config = AppConfig::default();
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            Self::save_to_file(&config_path, &config)?;
            return Ok(LoadedConfig {
                config,
                origin: ConfigOrigin::Created(config_path),
            });
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(match toml::from_str::<AppConfig>(&content) {
            Ok(config) => LoadedConfig {
                config,
                origin: ConfigOrigin::Read(config_path),
            },
            Err(e) => LoadedConfig {
                config: AppConfig::default(),
                origin: ConfigOrigin::Malformed {
                    path: config_path,
                    error: e.to_string(),
                },
            },
        })
    }

    /// Loads remembered state; missing or malformed files yield defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read.
    pub fn load_state(&self) -> Result<StateConfig, ConfigError> {
        let state_path = self.config_dir.join(STATE_FILE_NAME);

        if !state_path.exists() {
            return Ok(StateConfig::default());
        }

        let content = fs::read_to_string(&state_path)?;
        match toml::from_str::<StateConfig>(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(error = %e, "Failed to parse state file, resetting state");
                Ok(StateConfig::default())
            }
        }
    }

    /// Saves remembered state.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save_state(&self, state: &StateConfig) -> Result<(), ConfigError> {
        self.ensure_config_dir()?;
        let state_path = self.config_dir.join(STATE_FILE_NAME);
        Self::save_to_file(&state_path, state)
    }

    /// Loads the state, applies `change`, and writes it back.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or written.
    pub fn update_state(&self, change: impl FnOnce(&mut StateConfig)) -> Result<(), ConfigError> {
        let mut state = self.load_state()?;
        let before = state.clone();
        change(&mut state);
        if state == before {
            return Ok(());
        }
        self.save_state(&state)
    }

    fn save_to_file<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(data)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::JobsiteId;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_config_dir_creates_directory() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("crewclock");
        let manager = StorageManager::with_dir(config_path.clone());

        assert!(!config_path.exists());
        manager.ensure_config_dir().unwrap();
        assert!(config_path.exists());
    }

    #[test]
    fn test_load_config_creates_default_if_missing() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let loaded = manager.load_config(None).unwrap();
        assert!(loaded.config.persist_token);
        assert!(matches!(loaded.origin, ConfigOrigin::Created(_)));

        let written = fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(written.contains("api_url"));
    }

    #[test]
    fn test_load_config_handles_malformed_file() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        let config_file = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_file, "api_url = [").unwrap();

        let loaded = manager.load_config(None).unwrap();
        assert_eq!(loaded.config.api_url, crate::infrastructure::config::DEFAULT_API_URL);
        assert!(matches!(loaded.origin, ConfigOrigin::Malformed { .. }));
        let content = fs::read_to_string(&config_file).unwrap();
        assert_eq!(content, "api_url = [");
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_malformed_config_warning_reaches_subscriber() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(dir.path().join(CONFIG_FILE_NAME), "log_level = 7").unwrap();

        let loaded = manager.load_config(None).unwrap();

        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || loaded.origin.log());

        let output = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Failed to parse config file, using defaults"));
        assert!(output.contains("config.toml"));
    }

    #[test]
    fn test_load_config_from_override_path() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "request_timeout_secs = 5\n").unwrap();

        let loaded = manager.load_config(Some(&custom)).unwrap();
        assert_eq!(loaded.config.request_timeout_secs, 5);
        assert_eq!(loaded.origin, ConfigOrigin::Read(custom));
    }

    #[test]
    fn test_save_and_load_state() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let state = StateConfig {
            last_jobsite_id: Some(JobsiteId(12)),
            last_email: Some("crew@example.com".to_string()),
        };
        manager.save_state(&state).unwrap();

        assert_eq!(manager.load_state().unwrap(), state);
    }

    #[test]
    fn test_update_state_keeps_other_fields() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        manager
            .update_state(|state| state.last_email = Some("a@b.co".into()))
            .unwrap();
        manager
            .update_state(|state| state.last_jobsite_id = Some(JobsiteId(3)))
            .unwrap();

        let state = manager.load_state().unwrap();
        assert_eq!(state.last_email.as_deref(), Some("a@b.co"));
        assert_eq!(state.last_jobsite_id, Some(JobsiteId(3)));
    }

    #[test]
    fn test_missing_state_is_default() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("nested"));

        assert_eq!(manager.load_state().unwrap(), StateConfig::default());
        assert!(!dir.path().join("nested").exists());
    }
}
