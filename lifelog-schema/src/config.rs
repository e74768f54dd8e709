//! Layered configuration for the schema engine.
//!
//! Sources are merged in precedence order (later sources override earlier
//! ones):
//! 1. Default values
//! 2. `lifelog.toml`, `lifelog.yaml`, `lifelog.yml`, `lifelog.json` in the
//!    configuration directory
//! 3. Environment variables with the `LIFELOG_` prefix; `__` separates
//!    nested keys (`LIFELOG_STORAGE__BACKEND=yaml`)
//!
//! Nothing is cached. Every load reads the sources fresh.

use crate::error::ConfigError;
use crate::types::Locale;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LIFELOG_";

/// Configuration file names probed in the configuration directory
pub const CONFIG_FILES: [&str; 4] = [
    "lifelog.toml",
    "lifelog.yaml",
    "lifelog.yml",
    "lifelog.json",
];

/// Which [`crate::store::SchemaStore`] implementation to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Yaml,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Yaml => "yaml",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding one subdirectory per tenant (YAML backend only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Tenant whose data this process works on
    pub tenant: String,
    /// Language for standard field labels
    pub locale: Locale,
    pub storage: StorageConfig,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            tenant: "default".to_string(),
            locale: Locale::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl SchemaConfig {
    /// Load configuration using the current directory for config files.
    pub fn load() -> Result<Self, ConfigError> {
        let dir = std::env::current_dir().map_err(|_| ConfigError::DirectoryNotFound {
            path: PathBuf::from("."),
        })?;
        Self::load_from(&dir)
    }

    /// Load configuration with config files read from `dir`.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        if !dir.is_dir() {
            return Err(ConfigError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let config: SchemaConfig = Self::figment(dir).extract()?;
        config.validate()?;

        debug!(
            tenant = %config.tenant,
            backend = config.storage.backend.as_str(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Build the figment with all sources in precedence order.
    pub fn figment(dir: &Path) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(SchemaConfig::default()));

        for name in CONFIG_FILES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            debug!(path = %path.display(), "loading config file");
            figment = match name.rsplit('.').next() {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Yaml::file(path)),
            };
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Yaml && self.storage.root.is_none() {
            return Err(ConfigError::MissingStorageRoot {
                backend: self.storage.backend.as_str().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        for key in [
            "LIFELOG_TENANT",
            "LIFELOG_LOCALE",
            "LIFELOG_STORAGE__BACKEND",
            "LIFELOG_STORAGE__ROOT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_without_sources() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let config = SchemaConfig::load_from(dir.path()).unwrap();
        assert_eq!(config, SchemaConfig::default());
        assert_eq!(config.tenant, "default");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    #[serial]
    fn toml_file_overrides_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("lifelog.toml"),
            "tenant = \"alice\"\nlocale = \"ko\"\n\n[storage]\nbackend = \"yaml\"\nroot = \"/var/lib/lifelog\"\n",
        )
        .unwrap();

        let config = SchemaConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.tenant, "alice");
        assert_eq!(config.locale, Locale::Ko);
        assert_eq!(config.storage.backend, StorageBackend::Yaml);
        assert_eq!(config.storage.root, Some(PathBuf::from("/var/lib/lifelog")));
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lifelog.yaml"), "tenant: alice\nlocale: ko\n").unwrap();
        env::set_var("LIFELOG_TENANT", "bob");

        let config = SchemaConfig::load_from(dir.path()).unwrap();
        clear_env();

        assert_eq!(config.tenant, "bob");
        assert_eq!(config.locale, Locale::Ko);
    }

    #[test]
    #[serial]
    fn env_nested_keys_use_double_underscore() {
        clear_env();
        let dir = TempDir::new().unwrap();
        env::set_var("LIFELOG_STORAGE__BACKEND", "yaml");
        env::set_var("LIFELOG_STORAGE__ROOT", "/tmp/lifelog");

        let config = SchemaConfig::load_from(dir.path()).unwrap();
        clear_env();

        assert_eq!(config.storage.backend, StorageBackend::Yaml);
        assert_eq!(config.storage.root, Some(PathBuf::from("/tmp/lifelog")));
    }

    #[test]
    #[serial]
    fn yaml_backend_requires_root() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("lifelog.json"),
            r#"{"storage": {"backend": "yaml"}}"#,
        )
        .unwrap();

        let err = SchemaConfig::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingStorageRoot { .. }));
    }

    #[test]
    #[serial]
    fn invalid_value_is_a_load_error() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lifelog.yaml"), "locale: fr\n").unwrap();
        let err = SchemaConfig::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Load { .. }));
    }

    #[test]
    fn missing_directory_is_reported() {
        let err = SchemaConfig::load_from(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ConfigError::DirectoryNotFound { .. }));
    }
}
