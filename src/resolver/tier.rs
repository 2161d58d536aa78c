//! Immutable name-to-identifier mapping snapshots.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use super::normalize::{fold, normalize, tokens};

/// Which tier a snapshot was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    /// Built from the live application enumeration.
    Dynamic,
    /// Loaded from the bundled static resource.
    Predefined,
}

impl TierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierKind::Dynamic => "dynamic",
            TierKind::Predefined => "predefined",
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single key of a tier with its precomputed comparison forms.
#[derive(Debug, Clone)]
pub struct TierEntry {
    key: String,
    folded: String,
    tokens: HashSet<String>,
    identifier: String,
}

impl TierEntry {
    /// Normalized key, case preserved.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lower-cased key.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Lower-cased token set of the key.
    pub fn tokens(&self) -> &HashSet<String> {
        &self.tokens
    }

    /// Package identifier the key maps to.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// An immutable mapping from normalized names to package identifiers.
///
/// Keys are unique case-insensitively. Iteration order is lexicographic on the
/// lower-cased key, which is also the tie-break order of the fuzzy matcher.
#[derive(Debug, Clone)]
pub struct MappingTier {
    kind: TierKind,
    entries: Vec<TierEntry>,
    index: HashMap<String, usize>,
}

impl MappingTier {
    /// Create an empty tier.
    pub fn empty(kind: TierKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a tier from raw `(display name, identifier)` pairs.
    ///
    /// Names are normalized; names that normalize to nothing are dropped. When
    /// two names fold to the same key, the later pair wins.
    pub fn from_pairs<I, K, V>(kind: TierKind, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut by_folded: BTreeMap<String, (String, String)> = BTreeMap::new();

        for (name, identifier) in pairs {
            let key = normalize(name.as_ref());
            if key.is_empty() {
                continue;
            }
            by_folded.insert(fold(&key), (key, identifier.into()));
        }

        let entries: Vec<TierEntry> = by_folded
            .into_iter()
            .map(|(folded, (key, identifier))| TierEntry {
                tokens: tokens(&key).into_iter().collect(),
                key,
                folded,
                identifier,
            })
            .collect();

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.folded.clone(), i))
            .collect();

        Self {
            kind,
            entries,
            index,
        }
    }

    pub fn kind(&self) -> TierKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = &TierEntry> {
        self.entries.iter()
    }

    /// Case-insensitive lookup by name; separators are normalized first.
    pub fn get_exact(&self, name: &str) -> Option<&TierEntry> {
        self.index
            .get(&fold(&normalize(name)))
            .and_then(|&i| self.entries.get(i))
    }

    /// First key (in iteration order) mapping to `identifier`.
    pub fn reverse_lookup(&self, identifier: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.identifier == identifier)
            .map(|e| e.key.as_str())
    }
}
