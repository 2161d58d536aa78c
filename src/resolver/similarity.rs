//! String similarity measures used by the fuzzy matcher.

use std::collections::HashSet;
use std::hash::Hash;

/// Levenshtein edit distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Jaccard similarity of two sets: `|A ∩ B| / |A ∪ B|`.
///
/// Two empty sets are considered dissimilar.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_levenshtein_known_values() {
        assert_eq!(levenshtein("Chrome", "Chrome"), 0);
        assert_eq!(levenshtein("Chrome", "Chorme"), 2);
        assert_eq!(levenshtein("Chrome", "Chrme"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abcd", ""), 4);
    }

    #[test]
    fn test_levenshtein_symmetric() {
        assert_eq!(levenshtein("maps", "weather"), levenshtein("weather", "maps"));
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("微信", "微博"), 1);
        assert_eq!(levenshtein("星穹铁道", "星穹"), 2);
    }

    #[test]
    fn test_jaccard_values() {
        assert_eq!(jaccard(&set(&["game", "center"]), &set(&["game", "center"])), 1.0);
        let partial = jaccard(&set(&["game", "center"]), &set(&["game", "center", "pro"]));
        assert!((partial - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(jaccard(&set(&["game"]), &set(&["game", "center"])), 0.5);
        assert_eq!(jaccard(&set(&["a"]), &set(&["b"])), 0.0);
    }

    #[test]
    fn test_jaccard_empty() {
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&["a"]), &set(&[])), 0.0);
    }
}
