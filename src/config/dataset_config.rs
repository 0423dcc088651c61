use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::mask::ClassMapping;
use crate::error::{DatasetError, Result};

/// Layout and class table of a segmentation dataset root.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Subfolder holding the input images
    pub images_dir: PathBuf,

    /// Subfolder holding the label masks
    pub masks_dir: PathBuf,

    /// Raw mask intensity -> class index table
    pub class_mapping: ClassMapping,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("images"),
            masks_dir: PathBuf::from("masks"),
            class_mapping: ClassMapping::default(),
        }
    }
}

impl DatasetConfig {
    /// Load a config from a JSON file.
    ///
    /// # Returns
    /// * `Ok(defaults)` if the file does not exist
    /// * `Ok(config)` if the file parses
    /// * `Err(DatasetError::Config)` if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config file at {:?}. Using defaults.", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(DatasetError::Config {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        let config = serde_json::from_str(&contents).map_err(|e| DatasetError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent folders as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| DatasetError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, json)?;
        info!("Config saved to {:?}", path);
        Ok(())
    }

    pub fn images_path(&self, root: &Path) -> PathBuf {
        root.join(&self.images_dir)
    }

    pub fn masks_path(&self, root: &Path) -> PathBuf {
        root.join(&self.masks_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = DatasetConfig::default();
        assert_eq!(config.images_dir, PathBuf::from("images"));
        assert_eq!(config.masks_dir, PathBuf::from("masks"));
        assert_eq!(config.class_mapping, ClassMapping::default());
        assert_eq!(
            config.images_path(Path::new("/root")),
            PathBuf::from("/root/images")
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DatasetConfig::load(&dir.path().join("dataset.json")).unwrap();
        assert_eq!(config, DatasetConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataset.json");
        fs::write(&path, r#"{ "masks_dir": "labels" }"#).unwrap();

        let config = DatasetConfig::load(&path).unwrap();
        assert_eq!(config.images_dir, PathBuf::from("images"));
        assert_eq!(config.masks_dir, PathBuf::from("labels"));
        assert_eq!(config.class_mapping.num_classes(), 6);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataset.json");
        fs::write(&path, "{ not json").unwrap();

        let err = DatasetConfig::load(&path).unwrap_err();
        assert!(matches!(err, DatasetError::Config { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg").join("dataset.json");
        let config = DatasetConfig {
            images_dir: PathBuf::from("rgb"),
            masks_dir: PathBuf::from("gt"),
            class_mapping: ClassMapping::new([(1, 0), (2, 1)]),
        };

        config.save(&path).unwrap();
        let loaded = DatasetConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
