use crate::error::{FieldlogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for fieldlog, stored as config.json in the app config dir.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldlogConfig {
    /// Relocated storage root chosen by the operator. `None` means the
    /// platform default data directory is used.
    #[serde(default)]
    pub storage_root: Option<PathBuf>,
}

impl FieldlogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FieldlogError::Io)?;
        let config: FieldlogConfig =
            serde_json::from_str(&content).map_err(FieldlogError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FieldlogError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FieldlogError::Serialization)?;
        fs::write(config_path, content).map_err(FieldlogError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_missing_config() {
        let temp_dir = env::temp_dir().join("fieldlog_test_config_missing");
        let _ = fs::remove_dir_all(&temp_dir);

        let config = FieldlogConfig::load(&temp_dir).unwrap();
        assert_eq!(config, FieldlogConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = env::temp_dir().join("fieldlog_test_config_save");
        let _ = fs::remove_dir_all(&temp_dir);

        let config = FieldlogConfig {
            storage_root: Some(PathBuf::from("/srv/inspections")),
        };
        config.save(&temp_dir).unwrap();

        let loaded = FieldlogConfig::load(&temp_dir).unwrap();
        assert_eq!(loaded.storage_root, Some(PathBuf::from("/srv/inspections")));

        // Cleanup
        let _ = fs::remove_dir_all(&temp_dir);
    }
}
