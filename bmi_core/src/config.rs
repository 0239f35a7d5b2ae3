//! Configuration file support for the BMI tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bmi/config.toml`.

use crate::history::DEFAULT_HISTORY_KEY;
use crate::{Error, Gender, HeightUnit, Result, WeightUnit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub defaults: InputDefaults,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Key the history log is stored under
    #[serde(default = "default_history_key")]
    pub history_key: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_key: default_history_key(),
        }
    }
}

/// Units and gender assumed when not given explicitly
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct InputDefaults {
    #[serde(default)]
    pub height_unit: HeightUnit,

    #[serde(default)]
    pub weight_unit: WeightUnit,

    #[serde(default)]
    pub gender: Gender,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bmi")
}

fn default_history_key() -> String {
    DEFAULT_HISTORY_KEY.to_string()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bmi")
            .join("config.toml")
    }

    /// Check values serde can't express
    pub fn validate(&self) -> Result<()> {
        if self.data.history_key.trim().is_empty() {
            return Err(Error::Config("data.history_key must not be empty".into()));
        }
        crate::storage::validate_key(&self.data.history_key).map_err(|_| {
            Error::Config(format!(
                "data.history_key {:?} may only contain ASCII letters, digits, '-', '_' and '.', and must not start with '.'",
                self.data.history_key
            ))
        })?;
        Ok(())
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.history_key, "bmi-history");
        assert!(config.data.data_dir.ends_with("bmi"));
        assert_eq!(config.defaults.height_unit, HeightUnit::Cm);
        assert_eq!(config.defaults.weight_unit, WeightUnit::Kg);
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bmi").join("config.toml");

        let mut config = Config::default();
        config.defaults.weight_unit = WeightUnit::Lbs;
        config.defaults.gender = Gender::Female;
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.defaults.weight_unit, WeightUnit::Lbs);
        assert_eq!(parsed.defaults.gender, Gender::Female);
        assert_eq!(parsed.data.history_key, config.data.history_key);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[defaults]
height_unit = "ft"
weight_unit = "lbs"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.defaults.height_unit, HeightUnit::Ft);
        assert_eq!(config.defaults.weight_unit, WeightUnit::Lbs);
        assert_eq!(config.defaults.gender, Gender::Male); // default
        assert_eq!(config.data.history_key, "bmi-history"); // default
    }

    #[test]
    fn test_empty_history_key_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[data]\nhistory_key = \"  \"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_unstorable_history_key_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        for key in ["my history", "../history", ".hidden", "a/b"] {
            std::fs::write(&path, format!("[data]\nhistory_key = {:?}\n", key)).unwrap();
            assert!(
                matches!(Config::load_from(&path), Err(Error::Config(_))),
                "key {:?} should be rejected",
                key
            );
        }

        std::fs::write(&path, "[data]\nhistory_key = \"alt-history.v2\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data.history_key, "alt-history.v2");
    }
}
