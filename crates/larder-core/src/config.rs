use std::{
    fs,
    path::PathBuf,
    sync::{LazyLock, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::ConfigError,
    utils::{build_path, home_config_path, home_data_path},
    LarderResult,
};

type Result<T> = std::result::Result<T, ConfigError>;

/// Application's configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Path to the SQLite database holding the package registry.
    pub db_path: Option<String>,

    /// Limit the number of search results to display
    pub search_limit: Option<usize>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("LARDER_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => PathBuf::from(home_config_path())
            .join("larder")
            .join("config.toml"),
    })
});

pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG.write().unwrap();
    *global_config = Some(config);
    Ok(())
}

fn ensure_config_initialized() {
    let mut config_guard = CONFIG.write().unwrap();
    if config_guard.is_none() {
        *config_guard = Some(Config::default_config());
    }
}

pub fn get_config() -> Config {
    {
        let config_guard = CONFIG.read().unwrap();
        if let Some(config) = config_guard.as_ref() {
            return config.clone();
        }
    }

    ensure_config_initialized();

    CONFIG.read().unwrap().as_ref().unwrap().clone()
}

/// Points the loaded configuration at a different database file. The
/// `LARDER_DB` environment variable still wins over this.
pub fn set_db_path(path: &str) {
    ensure_config_initialized();

    let mut config = CONFIG.write().unwrap();
    if let Some(config) = config.as_mut() {
        config.db_path = Some(path.to_string());
    }
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            db_path: Some(format!("{}/larder/larder.db", home_data_path())),
            search_limit: Some(20),
        }
    }

    /// Creates a new configuration by loading it from the configuration file.
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        let config_path = CONFIG_PATH.read().unwrap().to_path_buf();

        let mut config = match fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str::<Config>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default_config(),
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve();

        Ok(config)
    }

    fn resolve(&mut self) {
        self.search_limit.get_or_insert(20);
        if self.db_path.is_none() {
            self.db_path = Some(format!("{}/larder/larder.db", home_data_path()));
        }
    }

    pub fn get_db_path(&self) -> LarderResult<PathBuf> {
        if let Ok(env_path) = std::env::var("LARDER_DB") {
            return build_path(&env_path);
        }
        if let Some(db_path) = &self.db_path {
            return build_path(db_path);
        }
        build_path(&format!("{}/larder/larder.db", home_data_path()))
    }
}

pub fn generate_default_config() -> Result<()> {
    let config_path = CONFIG_PATH.read().unwrap().to_path_buf();

    if config_path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let serialized = toml::to_string_pretty(&Config::default_config())?;
    fs::write(&config_path, &serialized)?;
    info!("Default config written at: {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::with_env;

    fn with_config_path<F: FnOnce()>(path: &Path, f: F) {
        let old = CONFIG_PATH.read().unwrap().clone();
        *CONFIG_PATH.write().unwrap() = path.to_path_buf();
        f();
        *CONFIG_PATH.write().unwrap() = old;
    }

    #[test]
    #[serial]
    fn default_config_follows_xdg_data_home() {
        with_env(vec![("XDG_DATA_HOME", Some("/custom/data"))], || {
            let config = Config::default_config();
            assert_eq!(
                config.db_path.as_deref(),
                Some("/custom/data/larder/larder.db")
            );
            assert_eq!(config.search_limit, Some(20));
        });
    }

    #[test]
    #[serial]
    fn missing_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        with_config_path(&tmp.path().join("config.toml"), || {
            let config = Config::new().unwrap();
            assert!(config.db_path.is_some());
            assert_eq!(config.search_limit, Some(20));
        });
    }

    #[test]
    #[serial]
    fn partial_file_is_resolved_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "db_path = \"/srv/registry/larder.db\"\n").unwrap();

        with_config_path(&config_path, || {
            let config = Config::new().unwrap();
            assert_eq!(config.db_path.as_deref(), Some("/srv/registry/larder.db"));
            assert_eq!(config.search_limit, Some(20));
        });
    }

    #[test]
    #[serial]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "db_path = [unclosed\n").unwrap();

        with_config_path(&config_path, || {
            assert!(matches!(
                Config::new(),
                Err(ConfigError::TomlDeError(_))
            ));
        });
    }

    #[test]
    #[serial]
    fn db_path_env_overrides_config() {
        let config = Config {
            db_path: Some("/from/config/larder.db".into()),
            search_limit: Some(20),
        };

        with_env(vec![("LARDER_DB", Some("/from/env/larder.db"))], || {
            let path = config.get_db_path().unwrap();
            assert_eq!(path, PathBuf::from("/from/env/larder.db"));
        });

        with_env(vec![("LARDER_DB", None)], || {
            let path = config.get_db_path().unwrap();
            assert_eq!(path, PathBuf::from("/from/config/larder.db"));
        });
    }

    #[test]
    #[serial]
    fn generate_default_config_refuses_overwrite() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("larder").join("config.toml");

        with_config_path(&config_path, || {
            generate_default_config().unwrap();
            assert!(config_path.exists());

            let written = fs::read_to_string(&config_path).unwrap();
            let parsed: Config = toml::from_str(&written).unwrap();
            assert_eq!(parsed.search_limit, Some(20));

            assert!(matches!(
                generate_default_config(),
                Err(ConfigError::ConfigAlreadyExists)
            ));
        });
    }

    #[test]
    #[serial]
    fn get_config_falls_back_when_uninitialized() {
        let old = CONFIG.write().unwrap().take();
        let config = get_config();
        assert!(config.db_path.is_some());
        *CONFIG.write().unwrap() = old;
    }

    #[test]
    #[serial]
    fn set_db_path_replaces_loaded_value() {
        let old = CONFIG.write().unwrap().take();

        set_db_path("/override/larder.db");
        let config = get_config();
        assert_eq!(config.db_path.as_deref(), Some("/override/larder.db"));

        *CONFIG.write().unwrap() = old;
    }
}
