//! Name normalization shared by catalog keys and incoming queries.

/// Characters treated as word separators in application names.
const SEPARATORS: &[char] = &[
    '.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}', '<', '>', '\\', '/',
    '-', '_',
];

/// Normalize a display name or query for comparison.
///
/// Separator punctuation becomes a space, surrounding whitespace is trimmed and
/// internal whitespace runs collapse to a single space. Case is preserved;
/// comparisons fold case separately via [`fold`].
///
/// # Example
/// ```
/// use app_resolver::resolver::normalize;
///
/// assert_eq!(normalize("  Game_Center  "), "Game Center");
/// assert_eq!(normalize("Booking.com"), "Booking com");
/// ```
pub fn normalize(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-folded form of an already normalized name.
pub fn fold(normalized: &str) -> String {
    normalized.to_lowercase()
}

/// Split a normalized name into lower-cased tokens.
pub fn tokens(normalized: &str) -> Vec<String> {
    normalized.split_whitespace().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_styles_converge() {
        assert_eq!(normalize("Game Center"), "Game Center");
        assert_eq!(normalize("Game-Center"), "Game Center");
        assert_eq!(normalize("Game_Center"), "Game Center");
        assert_eq!(normalize("Game  /  Center"), "Game Center");
    }

    #[test]
    fn test_trim_and_collapse() {
        assert_eq!(normalize("   Chrome\t\n"), "Chrome");
        assert_eq!(normalize("Android  System   Settings"), "Android System Settings");
        assert_eq!(normalize("(Beta) [Maps]"), "Beta Maps");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("...---___"), "");
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(normalize("YouTube"), "YouTube");
        assert_eq!(fold("YouTube"), "youtube");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Game Center",
            "  Game--Center!! ",
            "Booking.com",
            "\"Quoted\" <name>",
            "崩坏：星穹铁道",
            "a\\b/c",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_tokens_lowercase() {
        assert_eq!(tokens("Game Center"), vec!["game", "center"]);
        assert!(tokens("").is_empty());
    }
}
