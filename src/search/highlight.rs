//! Fuzzy-match highlight ranges for search result titles.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Character ranges of `text` matched by `term`, as `(start, end)` with an
/// exclusive end.
///
/// Consecutive matched characters are merged into one range. Returns an empty
/// list when the term does not match (the backend may match on director or
/// description instead of the title).
#[must_use]
pub fn highlight_ranges(text: &str, term: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    let term = term.trim();
    if term.is_empty() {
        return Vec::new();
    }

    let Some((_score, indices)) = matcher.fuzzy_indices(text, term) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_match_is_one_range() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight_ranges("The Matrix", "matrix", &matcher), vec![(4, 10)]);
    }

    #[test]
    fn scattered_match_splits_ranges() {
        let matcher = SkimMatcherV2::default();
        let ranges = highlight_ranges("Blade Runner", "bdr", &matcher);
        assert!(ranges.len() >= 2);
        assert_eq!(ranges[0], (0, 1));
    }

    #[test]
    fn no_match_no_ranges() {
        let matcher = SkimMatcherV2::default();
        assert!(highlight_ranges("Heat", "zz", &matcher).is_empty());
        assert!(highlight_ranges("Heat", "  ", &matcher).is_empty());
    }
}
