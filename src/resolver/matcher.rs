//! Three-stage fuzzy matching cascade: exact, token similarity, edit distance.

use std::collections::HashSet;
use std::fmt;

use super::normalize::{fold, normalize, tokens};
use super::similarity::{jaccard, levenshtein};
use super::tier::{MappingTier, TierEntry, TierKind};

/// Minimum Jaccard similarity accepted by the token stage (inclusive).
pub const DEFAULT_MIN_TOKEN_SIMILARITY: f64 = 0.5;

/// Maximum edit distance accepted by the edit-distance stage (inclusive).
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 3;

/// How a query was matched to a tier key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchStrategy {
    ExactCaseSensitive,
    ExactCaseInsensitive,
    /// Jaccard similarity of the token sets.
    TokenSimilarity(f64),
    /// Levenshtein distance of the lower-cased names.
    EditDistance(usize),
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::ExactCaseSensitive => write!(f, "exact"),
            MatchStrategy::ExactCaseInsensitive => write!(f, "exact (case-insensitive)"),
            MatchStrategy::TokenSimilarity(score) => write!(f, "token similarity {:.2}", score),
            MatchStrategy::EditDistance(distance) => write!(f, "edit distance {}", distance),
        }
    }
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Package identifier to launch.
    pub identifier: String,
    /// Tier key that won.
    pub matched_key: String,
    pub strategy: MatchStrategy,
    /// Tier the key was found in.
    pub tier: TierKind,
}

impl MatchResult {
    fn from_entry(entry: &TierEntry, strategy: MatchStrategy, tier: TierKind) -> Self {
        Self {
            identifier: entry.identifier().to_string(),
            matched_key: entry.key().to_string(),
            strategy,
            tier,
        }
    }
}

/// Acceptance thresholds for the fuzzy stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    pub min_token_similarity: f64,
    pub max_edit_distance: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_token_similarity: DEFAULT_MIN_TOKEN_SIMILARITY,
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
        }
    }
}

impl MatcherConfig {
    /// Whether `min` is usable as a token similarity threshold.
    ///
    /// Must be finite and in `(0, 1]`; at zero or below, keys sharing no token
    /// with the query would pass the token stage.
    pub fn is_valid_token_similarity(min: f64) -> bool {
        min.is_finite() && min > 0.0 && min <= 1.0
    }

    /// Set the minimum token similarity. Invalid values keep the current one.
    pub fn with_min_token_similarity(mut self, min: f64) -> Self {
        if Self::is_valid_token_similarity(min) {
            self.min_token_similarity = min;
        } else {
            tracing::warn!(
                "Ignoring invalid token similarity threshold {}, keeping {}",
                min,
                self.min_token_similarity
            );
        }
        self
    }

    /// Replace an invalid token similarity threshold with the default.
    pub fn sanitized(mut self) -> Self {
        if !Self::is_valid_token_similarity(self.min_token_similarity) {
            self.min_token_similarity = DEFAULT_MIN_TOKEN_SIMILARITY;
        }
        self
    }

    /// Set the maximum edit distance.
    pub fn with_max_edit_distance(mut self, max: usize) -> Self {
        self.max_edit_distance = max;
        self
    }
}

/// Stateless matcher over a borrowed tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher {
    config: MatcherConfig,
}

impl FuzzyMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Resolve `query` against `tier`.
    ///
    /// Stages run in order and the first one with a candidate wins. Returns
    /// `None` when every stage misses or the query normalizes to nothing.
    pub fn resolve(&self, query: &str, tier: &MappingTier) -> Option<MatchResult> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return None;
        }

        self.exact(&normalized, tier)
            .or_else(|| self.token_similarity(&normalized, tier))
            .or_else(|| self.edit_distance(&normalized, tier))
    }

    fn exact(&self, normalized: &str, tier: &MappingTier) -> Option<MatchResult> {
        let entry = tier.get_exact(normalized)?;
        let strategy = if entry.key() == normalized {
            MatchStrategy::ExactCaseSensitive
        } else {
            MatchStrategy::ExactCaseInsensitive
        };
        Some(MatchResult::from_entry(entry, strategy, tier.kind()))
    }

    fn token_similarity(&self, normalized: &str, tier: &MappingTier) -> Option<MatchResult> {
        let query_tokens = tokens(normalized);
        if query_tokens.len() <= 1 {
            return None;
        }
        let query_set: HashSet<String> = query_tokens.into_iter().collect();

        let mut best: Option<(&TierEntry, f64)> = None;
        for entry in tier.iter() {
            let score = jaccard(&query_set, entry.tokens());
            if score < self.config.min_token_similarity {
                continue;
            }
            // Strict comparison keeps the earliest key on ties.
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((entry, score));
            }
        }

        best.map(|(entry, score)| {
            MatchResult::from_entry(entry, MatchStrategy::TokenSimilarity(score), tier.kind())
        })
    }

    fn edit_distance(&self, normalized: &str, tier: &MappingTier) -> Option<MatchResult> {
        let folded = fold(normalized);
        let query_len = folded.chars().count();
        let max = self.config.max_edit_distance;

        let mut best: Option<(&TierEntry, usize)> = None;
        for entry in tier.iter() {
            // Length difference is a lower bound on the distance.
            if query_len.abs_diff(entry.folded().chars().count()) > max {
                continue;
            }
            let distance = levenshtein(&folded, entry.folded());
            if distance > max {
                continue;
            }
            if best.map_or(true, |(_, top)| distance < top) {
                best = Some((entry, distance));
            }
        }

        best.map(|(entry, distance)| {
            MatchResult::from_entry(entry, MatchStrategy::EditDistance(distance), tier.kind())
        })
    }
}
