//! Configuration file support for Vitalcalc.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/vitalcalc/config.toml`.

use crate::{Error, HeightUnit, Result, StoreConfig, WeightUnit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub units: UnitsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// History slot names
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_calorie_slot")]
    pub calorie_slot: String,

    #[serde(default = "default_bmi_slot")]
    pub bmi_slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            calorie_slot: default_calorie_slot(),
            bmi_slot: default_bmi_slot(),
        }
    }
}

/// Units preselected for the BMI calculator
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UnitsConfig {
    #[serde(default)]
    pub weight: WeightUnit,

    #[serde(default)]
    pub height: HeightUnit,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("vitalcalc")
}

fn default_calorie_slot() -> String {
    StoreConfig::default().calorie_slot
}

fn default_bmi_slot() -> String {
    StoreConfig::default().bmi_slot
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
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
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("vitalcalc").join("config.toml")
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

    /// Check that the slot names can be used as file names and do not collide
    pub fn validate(&self) -> Result<()> {
        let slots = [&self.storage.calorie_slot, &self.storage.bmi_slot];
        for slot in slots {
            if slot.trim().is_empty() {
                return Err(Error::Config("History slot names must not be empty".into()));
            }
            if slot.contains(['/', '\\']) || slot.starts_with('.') {
                return Err(Error::Config(format!(
                    "Invalid history slot name: {:?}",
                    slot
                )));
            }
        }
        if self.storage.calorie_slot == self.storage.bmi_slot {
            return Err(Error::Config(
                "Calorie and BMI history must use different slots".into(),
            ));
        }
        Ok(())
    }

    /// Slot names for the history store
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            calorie_slot: self.storage.calorie_slot.clone(),
            bmi_slot: self.storage.bmi_slot.clone(),
        }
    }
}
