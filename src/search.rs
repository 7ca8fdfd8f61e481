//! Collection search: score every candidate, keep the matches, rank them.

use crate::matcher::PatternMatcher;
use crate::text::SearchText;
use crate::{IndexType, ScoreType, SearchConfig};

/// One ranked search hit, borrowing the candidate from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<'a, T: ?Sized> {
    /// The candidate this result refers to.
    pub candidate: &'a T,
    /// Total match score; always positive for returned results.
    pub score: ScoreType,
    /// Matched byte offsets, grouped by pattern segment.
    pub matches: Vec<IndexType>,
}

/// Scores `candidates` against `pattern` and returns the matches best first.
///
/// `get_text` extracts the searchable text from a candidate, so collections
/// of richer types (path entries, history records) can be searched without
/// copying their strings out. Results are ordered by descending score;
/// equal scores fall back to ascending text length, preferring the tighter
/// match. An empty pattern matches nothing.
///
/// One [`PatternMatcher`] is allocated for the whole call and its scratch
/// buffers are reused across every candidate.
pub fn search<'a, T, S, I, F>(pattern: &str, candidates: I, get_text: F, config: SearchConfig) -> Vec<SearchResult<'a, T>>
where
    T: ?Sized,
    S: SearchText + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> &'a S,
{
    if pattern.is_empty() {
        return Vec::new();
    }

    let mut matcher = PatternMatcher::new(pattern, config);

    let mut total = 0usize;
    let mut results = Vec::new();
    for candidate in candidates {
        total += 1;
        let m = matcher.match_text(get_text(candidate));
        if m.is_match() {
            results.push(SearchResult {
                candidate,
                score: m.score,
                matches: m.matches,
            });
        }
    }

    results.sort_by(|lhs, rhs| {
        rhs.score.cmp(&lhs.score).then_with(|| {
            let lhs_len = get_text(lhs.candidate).search_bytes().len();
            let rhs_len = get_text(rhs.candidate).search_bytes().len();
            lhs_len.cmp(&rhs_len)
        })
    });

    debug!("search {:?}: {} of {total} candidates matched", matcher.pattern(), results.len());

    results
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
