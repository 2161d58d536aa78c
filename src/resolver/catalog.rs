//! Catalog building from installed-application records.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tier::{MappingTier, TierKind};

/// One installed application as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Stable package identifier, e.g. `com.android.chrome`.
    pub identifier: String,
    /// Human-readable label shown by the launcher.
    pub display_name: String,
    pub is_enabled: bool,
    /// Whether the app has a user-facing entry point.
    pub is_launchable: bool,
}

impl ApplicationRecord {
    /// Create an enabled, launchable record.
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            is_enabled: true,
            is_launchable: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    pub fn with_launchable(mut self, launchable: bool) -> Self {
        self.is_launchable = launchable;
        self
    }

    /// Whether this record contributes to a catalog.
    pub fn is_eligible(&self) -> bool {
        self.is_enabled && self.is_launchable
    }
}

/// Inventory file errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read inventory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse inventory {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Build a name-to-identifier mapping from application records.
///
/// Disabled or non-launchable records are skipped. Colliding names resolve to
/// the later record. An empty input yields an empty tier.
pub fn build(records: &[ApplicationRecord]) -> MappingTier {
    let eligible = records.iter().filter(|r| r.is_eligible());
    let tier = MappingTier::from_pairs(
        TierKind::Dynamic,
        eligible.map(|r| (r.display_name.as_str(), r.identifier.clone())),
    );

    tracing::debug!(
        "Catalog built: {} records in, {} entries out",
        records.len(),
        tier.len()
    );
    tier
}

/// Load application records from a JSON inventory file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ApplicationRecord>, CatalogError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_build_filters_ineligible() {
        let records = vec![
            ApplicationRecord::new("com.android.chrome", "Chrome"),
            ApplicationRecord::new("com.example.off", "Disabled").with_enabled(false),
            ApplicationRecord::new("com.example.svc", "Service").with_launchable(false),
        ];

        let tier = build(&records);
        assert_eq!(tier.kind(), TierKind::Dynamic);
        assert_eq!(tier.len(), 1);
        assert!(tier.get_exact("Chrome").is_some());
        assert!(tier.get_exact("Disabled").is_none());
        assert!(tier.get_exact("Service").is_none());
    }

    #[test]
    fn test_build_keys_are_normalized() {
        let records = vec![ApplicationRecord::new("com.example.gc", "Game_Center")];
        let tier = build(&records);
        assert_eq!(tier.iter().next().unwrap().key(), "Game Center");
    }

    #[test]
    fn test_build_collision_last_wins() {
        let records = vec![
            ApplicationRecord::new("com.example.first", "Notes"),
            ApplicationRecord::new("com.example.second", "Notes"),
        ];
        let tier = build(&records);
        assert_eq!(tier.len(), 1);
        assert_eq!(
            tier.get_exact("Notes").unwrap().identifier(),
            "com.example.second"
        );
    }

    #[test]
    fn test_build_empty_input() {
        assert!(build(&[]).is_empty());
    }

    #[test]
    fn test_build_does_not_mutate_input() {
        let records = vec![ApplicationRecord::new("com.example.gc", "Game-Center")];
        let before = records.clone();
        let _ = build(&records);
        assert_eq!(records, before);
    }

    #[test]
    fn test_load_records() {
        let path = env::temp_dir().join("app_resolver_test_inventory.json");
        let records = vec![
            ApplicationRecord::new("com.android.chrome", "Chrome"),
            ApplicationRecord::new("com.example.off", "Off").with_enabled(false),
        ];
        fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, records);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_records_errors() {
        let missing = env::temp_dir().join("app_resolver_missing_inventory.json");
        assert!(matches!(load_records(&missing), Err(CatalogError::Io { .. })));

        let path = env::temp_dir().join("app_resolver_bad_inventory.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_records(&path), Err(CatalogError::Parse { .. })));
        let _ = fs::remove_file(&path);
    }
}
