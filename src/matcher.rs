//! The per-candidate matching walk and its reusable scratch state.
//!
//! [`PatternMatcher`] binds a pattern to a set of scratch buffers (one best
//! run per pattern position plus an index staging buffer) that are reused
//! across every candidate scored through it. The walk itself is greedy: once
//! the best run for a pattern position is found, the scan for the next
//! position starts right after it. This deliberately forfeits overlapping
//! alternatives in exchange for a single forward pass per pattern position.

use crate::score;
use crate::text::SearchText;
use crate::{MatchMode, SearchConfig};

/// Longest pattern considered, in bytes. Longer patterns are silently
/// truncated so the scratch buffers stay bounded.
pub const MAX_PATTERN_LEN: usize = 1024;

/// Score and matched byte positions for one candidate.
///
/// A `score` of zero (or below) means the candidate did not match; `matches`
/// is empty in that case. Positions are listed per pattern segment in the
/// order segments were scanned, so with space-separated pattern words they
/// are not necessarily ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMatch {
    /// Total heuristic score; positive means the candidate matched.
    pub score: i32,
    /// Byte offsets of the matched candidate characters.
    pub matches: Vec<usize>,
}

impl PatternMatch {
    /// True when the candidate actually matched.
    pub fn is_match(&self) -> bool {
        self.score > 0
    }
}

/// A pattern bound to reusable match buffers.
///
/// Owns all scratch needed to score a candidate, so repeated calls to
/// [`match_text`](Self::match_text) allocate nothing beyond the returned
/// match list. The `&mut self` receiver is the ownership contract: one
/// matcher serves one in-flight search at a time and must not be shared
/// across threads mid-search.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
    config: SearchConfig,
    /// Best run found so far, indexed by pattern position.
    runs: Vec<PatternMatch>,
    /// Staging area for candidate positions before a run is committed.
    staged: Vec<usize>,
}

impl PatternMatcher {
    /// Binds `pattern` to a fresh set of scratch buffers.
    pub fn new(pattern: &str, config: SearchConfig) -> Self {
        let mut pattern = pattern;
        if pattern.len() > MAX_PATTERN_LEN {
            let mut end = MAX_PATTERN_LEN;
            while !pattern.is_char_boundary(end) {
                end -= 1;
            }
            trace!("pattern truncated from {} to {end} bytes", pattern.len());
            pattern = &pattern[..end];
        }

        let len = pattern.len();
        Self {
            pattern: pattern.to_owned(),
            config,
            runs: vec![PatternMatch::default(); len],
            staged: vec![0; len],
        }
    }

    /// The pattern this matcher was built for, after truncation.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Scores `candidate` against the pattern.
    ///
    /// Returns a zero-score [`PatternMatch`] when the candidate does not
    /// match (including the empty-pattern and empty-candidate cases).
    pub fn match_text<T: SearchText + ?Sized>(&mut self, candidate: &T) -> PatternMatch {
        self.walk(candidate.search_bytes())
    }

    /// Walks the pattern over `text`, recording the best run per pattern
    /// position, then folds the runs into one aggregate match.
    fn walk(&mut self, text: &[u8]) -> PatternMatch {
        let pattern = self.pattern.as_bytes();
        let match_mode = self.config.match_mode;

        let filename_start = match match_mode {
            MatchMode::Filenames | MatchMode::SourceFiles => {
                memchr::memrchr2(b'/', b'\\', text).map_or(0, |i| i + 1)
            }
            MatchMode::PlainStrings => 0,
        };

        let mut str_start = 0;
        let mut unmatched_from_pattern = 0;

        let mut p = 0;
        while p < pattern.len() {
            self.runs[p].score = 0;

            // A space in the pattern restarts the scan at the beginning of
            // the candidate, allowing pattern words to match out of order.
            if pattern[p] == b' ' {
                str_start = 0;
                p += 1;
                continue;
            }

            let mut best_len = 0;

            let mut i = str_start;
            while i < text.len() {
                let run_len = find_run(pattern, p, text, i);
                if run_len > 0 {
                    // The run starts at i, so the staged positions are just
                    // consecutive offsets.
                    for (k, slot) in self.staged[..run_len].iter_mut().enumerate() {
                        *slot = i + k;
                    }

                    let run_score = score::score_run(text, filename_start, match_mode, &self.staged[..run_len])
                        + score::whole_word_bonus(pattern, p, run_len);

                    if run_score > self.runs[p].score {
                        best_len = run_len;

                        let run = &mut self.runs[p];
                        run.score = run_score;
                        run.matches.clear();
                        run.matches.extend_from_slice(&self.staged[..run_len]);

                        // Skip the candidate characters consumed by this run
                        // so the next pattern position scans past them.
                        i += run_len - 1;
                        str_start = i + 1;
                    }
                }
                i += 1;
            }

            if self.runs[p].score > 0 {
                // The whole run's pattern characters are consumed by this
                // segment; only the first position carries the score.
                p += best_len;
            } else {
                unmatched_from_pattern += 1;
                // Allow some unmatched characters (typos etc...)
                if unmatched_from_pattern > self.config.max_unmatched_characters_from_pattern {
                    return PatternMatch::default();
                }
                p += 1;
            }
        }

        self.aggregate()
    }

    /// Merges the per-position runs into one score and one position list.
    fn aggregate(&self) -> PatternMatch {
        let pattern_len = self.pattern.len();

        let mut out = PatternMatch {
            score: 0,
            matches: Vec::with_capacity(pattern_len),
        };

        let mut p = 0;
        while p < pattern_len {
            let run = &self.runs[p];
            if run.score > 0 {
                out.score += run.score;
                out.matches.extend_from_slice(&run.matches);
                // Runs longer than one character store their score only at
                // the first pattern index.
                p += run.matches.len();
            } else {
                p += 1;
            }
        }

        out
    }
}

/// Finds the longest case-insensitive run of `pattern[p..]` matching
/// `text[i..]`. Returns 0 as soon as the first characters differ, which is
/// the hot path over a large candidate list.
#[inline]
fn find_run(pattern: &[u8], p: usize, text: &[u8], i: usize) -> usize {
    if score::to_lower(pattern[p]) != score::to_lower(text[i]) {
        return 0;
    }

    let mut len = 1;
    while p + len < pattern.len() && i + len < text.len() && score::to_lower(pattern[p + len]) == score::to_lower(text[i + len]) {
        len += 1;
    }
    len
}

/// One-shot convenience over [`PatternMatcher`] for single-candidate use.
///
/// Allocates fresh scratch per call; when re-scoring many candidates against
/// the same pattern, build one [`PatternMatcher`] and reuse it instead.
pub fn match_one<T: SearchText + ?Sized>(pattern: &str, candidate: &T, config: SearchConfig) -> PatternMatch {
    PatternMatcher::new(pattern, config).match_text(candidate)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;
    use crate::SearchConfigBuilder;

    fn filenames() -> SearchConfig {
        SearchConfigBuilder::default()
            .match_mode(MatchMode::Filenames)
            .build()
            .unwrap()
    }

    #[test]
    fn test_find_run_lengths() {
        assert_eq!(find_run(b"abc", 0, b"xabcx", 1), 3);
        assert_eq!(find_run(b"abc", 0, b"xabx", 1), 2);
        assert_eq!(find_run(b"abc", 0, b"xxx", 0), 0);
        // Case-insensitive on both sides
        assert_eq!(find_run(b"ABC", 0, b"abc", 0), 3);
        assert_eq!(find_run(b"abc", 0, b"ABC", 0), 3);
        // Stops at the end of either side
        assert_eq!(find_run(b"abcdef", 0, b"abc", 0), 3);
        assert_eq!(find_run(b"abc", 2, b"c", 0), 1);
    }

    #[test]
    fn test_match_simple_substring() {
        let m = match_one("status", "git status", SearchConfig::default());
        assert!(m.is_match());
        assert_eq!(m.matches, vec![4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_match_case_insensitive() {
        let m = match_one("BHN", "BaseHierarchyNode.cpp", filenames());
        assert!(m.is_match());
        assert_eq!(m.matches, vec![0, 4, 13]);
    }

    #[test]
    fn test_no_match_returns_zero() {
        let m = match_one("xyz", "abc", SearchConfig::default());
        assert_eq!(m.score, 0);
        assert!(m.matches.is_empty());
        assert!(!m.is_match());
    }

    #[test]
    fn test_empty_inputs_degrade_to_no_match() {
        assert!(!match_one("", "anything", SearchConfig::default()).is_match());
        assert!(!match_one("abc", "", SearchConfig::default()).is_match());
        assert!(!match_one("", "", SearchConfig::default()).is_match());
    }

    #[test]
    fn test_unmatched_budget_allows_partial_patterns() {
        // 'q' and 'z' miss entirely; with the default budget of 2 the
        // candidate still matches on "ab".
        let m = match_one("aqbz", "xaxbx", SearchConfig::default());
        assert!(m.is_match());

        // A third miss exceeds the budget and rejects the candidate.
        let m = match_one("aqbzw", "xaxbx", SearchConfig::default());
        assert!(!m.is_match());
    }

    #[test]
    fn test_unmatched_budget_zero_requires_full_match() {
        let config = SearchConfigBuilder::default()
            .max_unmatched_characters_from_pattern(0usize)
            .build()
            .unwrap();
        assert!(match_one("ab", "xaxbx", config).is_match());
        assert!(!match_one("abq", "xaxbx", config).is_match());
    }

    #[test]
    fn test_space_restarts_scan_from_beginning() {
        // "node" matches first, then "base" restarts from the string start
        // and matches earlier positions.
        let m = match_one("node base", "BaseHierarchyNode.cpp", filenames());
        assert!(m.is_match());
        assert_eq!(m.matches, vec![13, 14, 15, 16, 0, 1, 2, 3]);
    }

    #[test]
    fn test_matches_reproduce_pattern_segments() {
        let pattern = "hierarchy node base";
        let text = "BaseHierarchyNode.cpp";
        let m = match_one(pattern, text, filenames());
        assert!(m.is_match());

        // Every index is in bounds and the matched bytes, concatenated in
        // segment order, case-fold to the pattern without its spaces.
        let folded: Vec<u8> = m
            .matches
            .iter()
            .map(|&i| text.as_bytes()[i].to_ascii_lowercase())
            .collect();
        let expected: Vec<u8> = pattern.bytes().filter(|&b| b != b' ').collect();
        assert_eq!(folded, expected);
    }

    #[test]
    fn test_matcher_reuse_is_consistent() {
        let mut matcher = PatternMatcher::new("bhn", filenames());
        let first = matcher.match_text("BaseHierarchyNode.cpp");
        let other = matcher.match_text("quartz crystal");
        let again = matcher.match_text("BaseHierarchyNode.cpp");

        assert!(first.is_match());
        assert!(!other.is_match());
        assert_eq!(first, again);
    }

    #[test]
    fn test_pattern_truncated_to_cap() {
        let long = "a".repeat(MAX_PATTERN_LEN + 100);
        let matcher = PatternMatcher::new(&long, SearchConfig::default());
        assert_eq!(matcher.pattern().len(), MAX_PATTERN_LEN);
    }

    #[test]
    fn test_pattern_truncation_respects_char_boundaries() {
        // A multi-byte character straddling the cap is dropped entirely.
        let mut long = "a".repeat(MAX_PATTERN_LEN - 1);
        long.push('é');
        let matcher = PatternMatcher::new(&long, SearchConfig::default());
        assert_eq!(matcher.pattern().len(), MAX_PATTERN_LEN - 1);
    }

    #[test]
    fn test_binary_candidate_is_bounds_safe() {
        let noise: Vec<u8> = (0u8..=255).collect();
        let m = match_one("abc", noise.as_slice(), SearchConfig::default());
        for &i in &m.matches {
            assert!(i < noise.len());
        }
    }

    #[test]
    fn test_greedy_skip_ahead_forfeits_overlapping_run() {
        // The run "aa" at position 0 is recorded first and the scan jumps
        // past it, so the longer run "aab" starting at position 1 is never
        // probed. Greedy by design.
        let m = match_one("aab", "aaab", SearchConfig::default());
        assert!(m.is_match());
        assert_eq!(m.matches, vec![0, 1, 3]);
    }
}
