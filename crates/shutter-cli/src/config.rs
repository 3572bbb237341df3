//! CLI configuration management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Gallery API server URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Upload size ceiling in megabytes.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_api_url() -> String {
    "http://localhost:5799".to_string()
}

fn default_max_file_size_mb() -> u64 {
    50
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            max_file_size_mb: default_max_file_size_mb(),
            output_format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl CliConfig {
    /// Load configuration from file.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let dirs = directories::ProjectDirs::from("pics", "shutter", "shutter-cli")
            .ok_or("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Set a configuration value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "api_url" => self.api_url = value.to_string(),
            "max_file_size_mb" => {
                self.max_file_size_mb = value
                    .parse()
                    .map_err(|_| format!("Invalid size: {value}"))?;
            }
            "output_format" => {
                self.output_format = match value {
                    "table" => OutputFormat::Table,
                    "json" => OutputFormat::Json,
                    _ => return Err(format!("Invalid output format: {value}")),
                };
            }
            _ => return Err(format!("Unknown config key: {key}")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_keys() {
        let mut config = CliConfig::default();
        config.set("api_url", "http://gallery:9000").unwrap();
        config.set("max_file_size_mb", "10").unwrap();
        config.set("output_format", "json").unwrap();
        assert_eq!(config.api_url, "http://gallery:9000");
        assert_eq!(config.max_file_size_mb, 10);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut config = CliConfig::default();
        assert!(config.set("nope", "x").is_err());
        assert!(config.set("max_file_size_mb", "many").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = CliConfig::default();
        config.set("api_url", "http://gallery:9000").unwrap();
        config.save_to(&path).unwrap();

        let loaded = CliConfig::load_from(&path).unwrap();
        assert_eq!(loaded.api_url, "http://gallery:9000");
        assert_eq!(loaded.max_file_size_mb, 50);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = CliConfig::load_from(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(loaded.api_url, default_api_url());
    }
}
