//! Two-tier mapping store with an atomically swapped active snapshot.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use super::catalog::{self, ApplicationRecord};
use super::tier::{MappingTier, TierKind};

/// Which tier currently answers lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    DynamicActive,
    PredefinedActive,
}

/// Result of a catalog refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub state: StoreState,
    /// Entries in the now-active tier.
    pub entries: usize,
}

/// The authoritative tier at a point in time.
#[derive(Debug, Clone)]
pub struct ActiveSnapshot {
    pub tier: Arc<MappingTier>,
    /// Set when the tier came from a refresh.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl ActiveSnapshot {
    pub fn state(&self) -> StoreState {
        match self.tier.kind() {
            TierKind::Dynamic => StoreState::DynamicActive,
            TierKind::Predefined => StoreState::PredefinedActive,
        }
    }
}

/// Owns the predefined and dynamic tiers and decides which one is active.
///
/// Lookups clone the active handle and work on it without holding the lock,
/// so a concurrent refresh never exposes a partially built tier.
#[derive(Debug)]
pub struct MappingStore {
    predefined: Arc<MappingTier>,
    active: RwLock<ActiveSnapshot>,
}

impl MappingStore {
    /// Create a store in the predefined-active state.
    pub fn new(predefined: MappingTier) -> Self {
        let predefined = Arc::new(predefined);
        Self {
            active: RwLock::new(ActiveSnapshot {
                tier: Arc::clone(&predefined),
                refreshed_at: None,
            }),
            predefined,
        }
    }

    /// Rebuild the dynamic tier from `records`.
    ///
    /// A non-empty catalog becomes the active tier. An empty one discards any
    /// previous dynamic tier and reverts to the predefined tier.
    pub fn refresh(&self, records: &[ApplicationRecord]) -> RefreshOutcome {
        let dynamic = catalog::build(records);

        let snapshot = if dynamic.is_empty() {
            tracing::warn!(
                "No dynamic apps discovered, falling back to predefined mapping ({} entries)",
                self.predefined.len()
            );
            ActiveSnapshot {
                tier: Arc::clone(&self.predefined),
                refreshed_at: None,
            }
        } else {
            tracing::info!(
                "App mapping refreshed: {} apps discovered, using dynamic mapping",
                dynamic.len()
            );
            for entry in dynamic.iter() {
                tracing::debug!("  '{}' -> '{}'", entry.key(), entry.identifier());
            }
            ActiveSnapshot {
                tier: Arc::new(dynamic),
                refreshed_at: Some(Utc::now()),
            }
        };

        let outcome = RefreshOutcome {
            state: snapshot.state(),
            entries: snapshot.tier.len(),
        };

        let mut guard = self.active.write().unwrap_or_else(|e| e.into_inner());
        *guard = snapshot;

        outcome
    }

    /// The tier that currently answers lookups.
    pub fn active(&self) -> ActiveSnapshot {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Shorthand for the active tier handle.
    pub fn active_mapping(&self) -> Arc<MappingTier> {
        self.active().tier
    }

    pub fn state(&self) -> StoreState {
        self.active().state()
    }

    pub fn predefined(&self) -> &MappingTier {
        &self.predefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn store() -> MappingStore {
        MappingStore::new(MappingTier::from_pairs(
            TierKind::Predefined,
            [("Chrome", "com.android.chrome"), ("Maps", "com.google.maps")],
        ))
    }

    #[test]
    fn test_initial_state_is_predefined() {
        let store = store();
        assert_eq!(store.state(), StoreState::PredefinedActive);
        assert_eq!(store.active_mapping().len(), 2);
        assert!(store.active().refreshed_at.is_none());
    }

    #[test]
    fn test_refresh_switches_to_dynamic() {
        let store = store();
        let outcome = store.refresh(&[ApplicationRecord::new("com.example.notes", "Notes")]);

        assert_eq!(outcome.state, StoreState::DynamicActive);
        assert_eq!(outcome.entries, 1);
        let active = store.active();
        assert_eq!(active.tier.kind(), TierKind::Dynamic);
        assert!(active.refreshed_at.is_some());
        // Tiers are never merged.
        assert!(active.tier.get_exact("Chrome").is_none());
    }

    #[test]
    fn test_empty_refresh_reverts_to_predefined() {
        let store = store();
        store.refresh(&[ApplicationRecord::new("com.example.notes", "Notes")]);
        assert_eq!(store.state(), StoreState::DynamicActive);

        let outcome = store.refresh(&[]);
        assert_eq!(outcome.state, StoreState::PredefinedActive);
        assert_eq!(outcome.entries, 2);
        assert!(store.active_mapping().get_exact("Notes").is_none());
    }

    #[test]
    fn test_all_ineligible_counts_as_empty() {
        let store = store();
        let outcome = store.refresh(&[
            ApplicationRecord::new("com.example.off", "Off").with_enabled(false),
        ]);
        assert_eq!(outcome.state, StoreState::PredefinedActive);
    }

    #[test]
    fn test_held_snapshot_survives_refresh() {
        let store = store();
        let before = store.active_mapping();
        store.refresh(&[ApplicationRecord::new("com.example.notes", "Notes")]);

        assert_eq!(before.kind(), TierKind::Predefined);
        assert!(before.get_exact("Chrome").is_some());
        assert_eq!(store.active_mapping().kind(), TierKind::Dynamic);
    }

    #[test]
    fn test_concurrent_readers_see_whole_tiers() {
        let store = Arc::new(store());
        let records: Vec<ApplicationRecord> = (0..50)
            .map(|i| ApplicationRecord::new(format!("com.example.app{}", i), format!("App {}", i)))
            .collect();

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for round in 0..100 {
                    if round % 2 == 0 {
                        store.refresh(&records);
                    } else {
                        store.refresh(&[]);
                    }
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let tier = store.active_mapping();
                        match tier.kind() {
                            TierKind::Dynamic => assert_eq!(tier.len(), 50),
                            TierKind::Predefined => assert_eq!(tier.len(), 2),
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
