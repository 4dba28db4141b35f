//! Configuration management for the moving-penetration manifest
//!
//! This module provides configuration loading with multi-source precedence
//! and zero-config defaults: without any configuration the built-in suite
//! is used and logging stays at `info`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ManifestConfig, ManifestFormat};
use crate::constants::{config as paths, env, naming};
use crate::errors::{ConfigError, ConfigResult};

/// Application configuration for TOML serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Manifest selection settings
    pub manifest: ManifestConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly manifest configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfigToml {
    /// Manifest file to load (unset = built-in suite)
    pub source: Option<PathBuf>,
    /// Manifest file format (unset = infer from extension)
    pub format: Option<ManifestFormat>,
    /// Subdirectory holding reference outputs
    pub gold_dir: String,
}

impl Default for ManifestConfigToml {
    fn default() -> Self {
        Self {
            source: None,
            format: None,
            gold_dir: naming::GOLD_DIR.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Convert to the runtime manifest configuration
    pub fn to_runtime_config(&self) -> ManifestConfig {
        self.manifest.to_runtime_config()
    }

    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (if exists)
    /// 3. Environment variables
    ///
    /// CLI arguments are applied by the caller on top of the result.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let config_path = match &config_file_override {
            Some(path) => Some(path.clone()),
            None => Self::find_config_file(),
        };

        if let Some(path) = config_path {
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                config = Self::load_from_file(&path).await?;
            } else if config_file_override.is_some() {
                return Err(ConfigError::NotFound { path });
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides through a lookup function
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(file) = lookup(env::MANIFEST_FILE).filter(|v| !v.is_empty()) {
            debug!("{} overrides manifest source: {}", env::MANIFEST_FILE, file);
            self.manifest.source = Some(PathBuf::from(file));
        }

        if let Some(level) = lookup(env::LOG_LEVEL).filter(|v| !v.is_empty()) {
            debug!("{} overrides log level: {}", env::LOG_LEVEL, level);
            self.logging.level = level;
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> ConfigResult<()> {
        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: "Expected one of error, warn, info, debug, trace".to_string(),
            });
        }

        if Path::new(&self.manifest.gold_dir).is_absolute() {
            return Err(ConfigError::InvalidValue {
                field: "manifest.gold_dir".to_string(),
                value: self.manifest.gold_dir.clone(),
                reason: "Must be relative to the test directory".to_string(),
            });
        }

        Ok(())
    }

    /// Write a default config file to the user config directory
    ///
    /// Returns the path, and whether a new file was created.
    pub async fn initialize_default(force: bool) -> ConfigResult<(PathBuf, bool)> {
        let config_path = Self::default_config_path().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_dir".to_string(),
            value: String::new(),
            reason: "Could not determine user config directory".to_string(),
        })?;

        if config_path.exists() && !force {
            return Ok((config_path, false));
        }

        info!("Creating default configuration file...");
        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Read {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&config_path, Self::generate_default_config_content())
            .await
            .map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;

        Ok((config_path, true))
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![
            PathBuf::from(".").join(paths::LOCAL_FILE),
            PathBuf::from(".").join(paths::FALLBACK_FILE),
        ];
        search_paths.extend(Self::default_config_path());

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(paths::APP_DIR).join("config.toml"))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# Moving-penetration manifest configuration
# You can customize any of these settings to suit your needs.

[manifest]
# Manifest file to load instead of the built-in suite
# (.toml, .json or a legacy .py spec file)
# source = "tests/2d_moving_penetration_tests/2d_moving_penetration_tests.py"

# Force a format instead of inferring it from the extension
# format = "legacy"

# Subdirectory of the test directory holding reference outputs
gold_dir = "{}"

[logging]
level = "info"  # error, warn, info, debug, trace
"#,
            naming::GOLD_DIR
        )
    }
}

impl ManifestConfigToml {
    /// Convert to runtime ManifestConfig
    pub fn to_runtime_config(&self) -> ManifestConfig {
        ManifestConfig {
            source: self.source.clone(),
            format: self.format,
            gold_dir: self.gold_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.manifest.gold_dir, "gold");
        assert_eq!(config.to_runtime_config(), ManifestConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_generation() {
        let content = AppConfig::generate_default_config_content();

        // Should be valid TOML
        let parsed: AppConfig = toml::from_str(&content).unwrap();

        assert_eq!(parsed, AppConfig::default());
        assert!(content.contains("[manifest]"));
        assert!(content.contains("[logging]"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (env::MANIFEST_FILE, "suite.toml"),
            (env::LOG_LEVEL, "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.manifest.source, Some(PathBuf::from("suite.toml")));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|_| Some(String::new()));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut config = AppConfig::default();
        config.manifest.gold_dir = "/abs/gold".to_string();
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_config_loading_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        // Should fail when explicitly specified
        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_config_loading_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let test_config = r#"
[manifest]
source = "suite/tests.json"
format = "json"
"#;
        tokio::fs::write(&config_path, test_config).await.unwrap();

        let config = AppConfig::load_from_file(&config_path).await.unwrap();
        let runtime = config.to_runtime_config();

        assert_eq!(runtime.source, Some(PathBuf::from("suite/tests.json")));
        assert_eq!(runtime.format, Some(ManifestFormat::Json));
        // Unspecified values keep their defaults
        assert_eq!(runtime.gold_dir, "gold");
        assert_eq!(config.logging.level, "info");
    }

    #[tokio::test]
    async fn test_config_loading_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        tokio::fs::write(&config_path, "[manifest\nsource = ")
            .await
            .unwrap();

        let result = AppConfig::load_from_file(&config_path).await;
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }
}
