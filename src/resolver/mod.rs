//! App name resolution: free-form application names to package identifiers.
//!
//! The resolver keeps two mapping tiers, one built from the device's installed
//! applications and one bundled with the crate, and always answers from exactly
//! one of them. Queries go through a cascade of exact, token-set and
//! edit-distance matching.
//!
//! # Example
//! ```
//! use app_resolver::resolver::{AppResolver, ApplicationRecord, MatchStrategy};
//!
//! let resolver = AppResolver::initialize(r#"{ "Chrome": "com.android.chrome" }"#);
//! assert_eq!(resolver.resolve("chorme").as_deref(), Some("com.android.chrome"));
//!
//! resolver.refresh(&[ApplicationRecord::new("com.example.gc", "Game Center")]);
//! let hit = resolver.resolve_detailed("Center Game").unwrap();
//! assert_eq!(hit.identifier, "com.example.gc");
//! assert_eq!(hit.strategy, MatchStrategy::TokenSimilarity(1.0));
//! ```

mod catalog;
mod matcher;
mod normalize;
mod similarity;
mod store;
mod tier;

pub use catalog::{build as build_catalog, load_records, ApplicationRecord, CatalogError};
pub use matcher::{
    FuzzyMatcher, MatchResult, MatchStrategy, MatcherConfig, DEFAULT_MAX_EDIT_DISTANCE,
    DEFAULT_MIN_TOKEN_SIMILARITY,
};
pub use normalize::normalize;
pub use similarity::{jaccard, levenshtein};
pub use store::{ActiveSnapshot, MappingStore, RefreshOutcome, StoreState};
pub use tier::{MappingTier, TierEntry, TierKind};

use crate::config;

/// Resolves application names against the authoritative mapping tier.
#[derive(Debug)]
pub struct AppResolver {
    store: MappingStore,
    matcher: FuzzyMatcher,
}

impl AppResolver {
    /// Create a resolver over an already built predefined tier.
    pub fn new(predefined: MappingTier, matcher_config: MatcherConfig) -> Self {
        Self {
            store: MappingStore::new(predefined),
            matcher: FuzzyMatcher::new(matcher_config),
        }
    }

    /// Create a resolver from predefined JSON data (`{"name": "package"}`).
    ///
    /// Unparsable data yields an empty predefined tier and an error log.
    pub fn initialize(predefined_json: &str) -> Self {
        Self::new(
            config::predefined_tier_or_empty(predefined_json),
            MatcherConfig::default(),
        )
    }

    /// Create a resolver over the bundled predefined mapping.
    pub fn bundled() -> Self {
        Self::new(config::bundled_predefined_tier(), MatcherConfig::default())
    }

    /// Rebuild the dynamic tier from freshly enumerated applications.
    pub fn refresh(&self, records: &[ApplicationRecord]) -> RefreshOutcome {
        self.store.refresh(records)
    }

    /// Resolve `query` to a package identifier.
    pub fn resolve(&self, query: &str) -> Option<String> {
        self.resolve_detailed(query).map(|m| m.identifier)
    }

    /// Resolve `query`, keeping the matched key and strategy.
    pub fn resolve_detailed(&self, query: &str) -> Option<MatchResult> {
        let tier = self.store.active_mapping();
        tracing::debug!("Looking up package name for '{}' in {} mapping", query, tier.kind());

        match self.matcher.resolve(query, &tier) {
            Some(found) => {
                tracing::info!(
                    "Found in {} mapping ({}): '{}' -> '{}' (key: '{}')",
                    found.tier,
                    found.strategy,
                    query,
                    found.identifier,
                    found.matched_key
                );
                Some(found)
            }
            None => {
                tracing::warn!("Not found in {} mapping: '{}'", tier.kind(), query);
                None
            }
        }
    }

    /// Display name for a package identifier, if the active tier knows it.
    pub fn app_name(&self, identifier: &str) -> Option<String> {
        self.store
            .active_mapping()
            .reverse_lookup(identifier)
            .map(str::to_string)
    }

    pub fn state(&self) -> StoreState {
        self.store.state()
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    pub fn matcher_config(&self) -> &MatcherConfig {
        self.matcher.config()
    }
}
