//! Persistent settings for the app resolver CLI.
//! Stored in the platform-specific config directory via `directories::ProjectDirs`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::resolver::{MatcherConfig, DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_MIN_TOKEN_SIMILARITY};

/// Settings persistence errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot determine config directory")]
    NoConfigDir,
    #[error("Failed to write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Resolver settings that can be saved and loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Predefined app map file; empty uses the bundled map
    pub predefined_map_path: String,
    /// ADB device ID (optional)
    pub device_id: String,
    /// Minimum Jaccard similarity for reordered names
    pub min_token_similarity: f64,
    /// Maximum edit distance for misspelled names
    pub max_edit_distance: usize,
    /// Delay after launching an app, in milliseconds
    pub launch_delay_ms: u64,
    /// Refresh the catalog from the device on startup
    pub auto_refresh: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            predefined_map_path: String::new(),
            device_id: String::new(),
            min_token_similarity: DEFAULT_MIN_TOKEN_SIMILARITY,
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            launch_delay_ms: 1000,
            auto_refresh: true,
        }
    }
}

impl ResolverSettings {
    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "moderras", "app-resolver")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path.
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.json"))
    }

    /// Load settings from the config file, falling back to defaults.
    pub fn load() -> Self {
        Self::settings_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`, falling back to defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        fs::read_to_string(path)
            .map(|content| Self::from_json(&content))
            .unwrap_or_default()
    }

    /// Parse settings, backfilling invalid values from defaults.
    pub fn from_json(content: &str) -> Self {
        serde_json::from_str::<Self>(content)
            .unwrap_or_default()
            .sanitized()
    }

    /// Replace values the matcher cannot use with their defaults.
    ///
    /// Call again after applying overrides from other sources.
    pub fn sanitized(mut self) -> Self {
        if !MatcherConfig::is_valid_token_similarity(self.min_token_similarity) {
            tracing::warn!(
                "Invalid min_token_similarity {}, using {}",
                self.min_token_similarity,
                DEFAULT_MIN_TOKEN_SIMILARITY
            );
            self.min_token_similarity = DEFAULT_MIN_TOKEN_SIMILARITY;
        }
        self
    }

    /// Save settings to the config file.
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Device ID, if one is configured.
    pub fn device(&self) -> Option<&str> {
        if self.device_id.is_empty() {
            None
        } else {
            Some(&self.device_id)
        }
    }

    /// Matcher thresholds from these settings.
    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig::default()
            .with_min_token_similarity(self.min_token_similarity)
            .with_max_edit_distance(self.max_edit_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_defaults() {
        let settings = ResolverSettings::default();
        assert!(settings.predefined_map_path.is_empty());
        assert!(settings.device().is_none());
        assert_eq!(settings.matcher_config(), MatcherConfig::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = ResolverSettings::from_json(r#"{"device_id": "emulator-5554"}"#);
        assert_eq!(settings.device(), Some("emulator-5554"));
        assert_eq!(settings.max_edit_distance, DEFAULT_MAX_EDIT_DISTANCE);
        assert!(settings.auto_refresh);
    }

    #[test]
    fn test_invalid_similarity_backfilled() {
        for raw in ["1.5", "0.0", "-1"] {
            let json = format!(r#"{{"min_token_similarity": {}}}"#, raw);
            let settings = ResolverSettings::from_json(&json);
            assert_eq!(
                settings.min_token_similarity, DEFAULT_MIN_TOKEN_SIMILARITY,
                "accepted {}",
                raw
            );
        }
    }

    #[test]
    fn test_sanitized_after_override() {
        for bad in [f64::NAN, 0.0, -1.0, 1.5] {
            let mut settings = ResolverSettings::default();
            settings.min_token_similarity = bad;
            let settings = settings.sanitized();
            assert_eq!(settings.min_token_similarity, DEFAULT_MIN_TOKEN_SIMILARITY);
        }

        let mut settings = ResolverSettings::default();
        settings.min_token_similarity = 0.8;
        assert_eq!(settings.sanitized().min_token_similarity, 0.8);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = env::temp_dir()
            .join("app_resolver_test_settings")
            .join("settings.json");
        let settings = ResolverSettings {
            predefined_map_path: "/data/app_map.json".to_string(),
            device_id: "emulator-5554".to_string(),
            min_token_similarity: 0.75,
            max_edit_distance: 2,
            launch_delay_ms: 250,
            auto_refresh: false,
        };

        settings.save_to(&path).unwrap();
        assert_eq!(ResolverSettings::load_from(&path), settings);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = env::temp_dir().join("app_resolver_missing_settings.json");
        assert_eq!(ResolverSettings::load_from(&path), ResolverSettings::default());
    }

    #[test]
    fn test_garbage_is_default() {
        assert_eq!(ResolverSettings::from_json("nope"), ResolverSettings::default());
    }

    #[test]
    fn test_matcher_config() {
        let settings = ResolverSettings {
            max_edit_distance: 1,
            min_token_similarity: 0.75,
            ..Default::default()
        };
        let config = settings.matcher_config();
        assert_eq!(config.max_edit_distance, 1);
        assert_eq!(config.min_token_similarity, 0.75);
    }
}
