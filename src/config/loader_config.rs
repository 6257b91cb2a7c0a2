use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::error::{LoaderError, LoaderResult};

/// Loader configuration
///
/// Replaces the hardcoded debug switch and validation ratio with values that
/// are passed to the loader at construction. Missing fields in a config file
/// take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Fraction of each category's videos assigned to validation.
    /// Set to 0 to train the final model on training + validation videos.
    pub val_ratio: f64,

    /// Only load the first `test_video_limit` annotation files
    pub test_mode: bool,

    /// Must be at least 1
    pub test_video_limit: usize,

    /// Extension of annotation files, without the dot
    pub annotation_extension: String,

    /// Extension of frame images, without the dot
    pub frame_extension: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            val_ratio: 0.2,
            test_mode: false,
            test_video_limit: 3,
            annotation_extension: "txt".to_string(),
            frame_extension: "jpg".to_string(),
        }
    }
}

impl LoaderConfig {
    /// Check value ranges
    pub fn validate(&self) -> LoaderResult<()> {
        if !self.val_ratio.is_finite() || !(0.0..=1.0).contains(&self.val_ratio) {
            return Err(LoaderError::InvalidSplitRatio(self.val_ratio));
        }
        if self.test_video_limit == 0 {
            return Err(LoaderError::Config(
                "test_video_limit must be at least 1".to_string(),
            ));
        }
        if self.annotation_extension.is_empty() {
            return Err(LoaderError::Config(
                "annotation_extension must not be empty".to_string(),
            ));
        }
        if self.frame_extension.is_empty() {
            return Err(LoaderError::Config(
                "frame_extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of annotation files to process out of `found`
    pub fn video_limit(&self, found: usize) -> usize {
        if self.test_mode {
            found.min(self.test_video_limit)
        } else {
            found
        }
    }

    /// Default location of the config file in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "visdrone-sot-loader")
            .map(|dirs| dirs.config_dir().join("loader_config.json"))
    }

    /// Load the config from `path`, or return defaults if the file doesn't
    /// exist, is corrupted or holds invalid values
    pub fn load_from(path: &Path) -> Self {
        info!("Loading loader config from: {:?}", path);

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<LoaderConfig>(&contents) {
                Ok(config) => match config.validate() {
                    Ok(()) => {
                        info!("Successfully loaded loader config");
                        return config;
                    }
                    Err(e) => {
                        warn!("Invalid loader config: {}. Using defaults.", e);
                    }
                },
                Err(e) => {
                    warn!("Failed to parse loader config: {}. Using defaults.", e);
                }
            },
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read loader config: {}. Using defaults.", e);
                } else {
                    info!("No loader config found. Using defaults.");
                }
            }
        }

        Self::default()
    }

    /// Load from [`LoaderConfig::default_path`], falling back to defaults
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("Could not determine config directory. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save the config to `path` as pretty JSON
    pub fn save_to(&self, path: &Path) -> LoaderResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LoaderError::Config(format!("failed to serialize: {}", e)))?;
        fs::write(path, json)?;
        info!("Loader config saved to: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LoaderConfig::default();
        assert_eq!(config.val_ratio, 0.2);
        assert!(!config.test_mode);
        assert_eq!(config.test_video_limit, 3);
        assert_eq!(config.annotation_extension, "txt");
        assert_eq!(config.frame_extension, "jpg");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_ratio() {
        for ratio in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
            let config = LoaderConfig {
                val_ratio: ratio,
                ..LoaderConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(LoaderError::InvalidSplitRatio(_))
            ));
        }
    }

    #[test]
    fn test_validate_rejects_zero_test_video_limit() {
        let config = LoaderConfig {
            test_mode: true,
            test_video_limit: 0,
            ..LoaderConfig::default()
        };
        assert!(matches!(config.validate(), Err(LoaderError::Config(_))));
    }

    #[test]
    fn test_video_limit_only_in_test_mode() {
        let mut config = LoaderConfig::default();
        assert_eq!(config.video_limit(10), 10);
        config.test_mode = true;
        assert_eq!(config.video_limit(10), 3);
        assert_eq!(config.video_limit(2), 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LoaderConfig = serde_json::from_str(r#"{"val_ratio": 0.0}"#).unwrap();
        assert_eq!(config.val_ratio, 0.0);
        assert_eq!(config.frame_extension, "jpg");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("loader_config.json");
        let config = LoaderConfig {
            val_ratio: 0.5,
            test_mode: true,
            ..LoaderConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(LoaderConfig::load_from(&path), config);
    }

    #[test]
    fn test_load_invalid_falls_back_to_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("loader_config.json");
        fs::write(&path, r#"{"val_ratio": 3.0}"#).unwrap();
        assert_eq!(LoaderConfig::load_from(&path), LoaderConfig::default());
        fs::write(&path, "not json").unwrap();
        assert_eq!(LoaderConfig::load_from(&path), LoaderConfig::default());
        assert_eq!(
            LoaderConfig::load_from(&tmp.path().join("missing.json")),
            LoaderConfig::default()
        );
    }
}
