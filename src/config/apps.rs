//! Bundled app name to package name mapping used when no device catalog is available.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::resolver::{MappingTier, TierKind};

/// Raw bundled mapping from app display names to Android package names.
pub const BUNDLED_APP_MAP: &str = include_str!("../../assets/app_map.json");

static BUNDLED_TIER: Lazy<MappingTier> = Lazy::new(|| predefined_tier_or_empty(BUNDLED_APP_MAP));

/// Predefined mapping load errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read app map {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse app map: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a flat `{"display name": "package"}` JSON object into a predefined tier.
pub fn parse_predefined(json: &str) -> Result<MappingTier, ConfigError> {
    let map: BTreeMap<String, String> = serde_json::from_str(json)?;
    Ok(MappingTier::from_pairs(TierKind::Predefined, map))
}

/// Load a predefined tier from a JSON file.
pub fn load_predefined_file(path: impl AsRef<Path>) -> Result<MappingTier, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_predefined(&content)
}

/// Parse predefined data, degrading to an empty tier on failure.
pub fn predefined_tier_or_empty(json: &str) -> MappingTier {
    parse_predefined(json).unwrap_or_else(|e| {
        tracing::error!("Error loading predefined app map: {}", e);
        MappingTier::empty(TierKind::Predefined)
    })
}

/// Load a predefined tier from `path`, degrading to an empty tier on failure.
pub fn predefined_file_or_empty(path: impl AsRef<Path>) -> MappingTier {
    load_predefined_file(path).unwrap_or_else(|e| {
        tracing::error!("Error loading predefined app map: {}", e);
        MappingTier::empty(TierKind::Predefined)
    })
}

/// The tier parsed from the bundled mapping.
pub fn bundled_predefined_tier() -> MappingTier {
    BUNDLED_TIER.clone()
}
