//! Heuristic scoring of a single sequential match run.
//!
//! All tuning constants live in one block below. The defaults reproduce the
//! reference ranking for the scenarios in the test suite; changing them
//! changes relative ordering, not which candidates match.

use crate::MatchMode;

// ---------------------------------------------------------------------------
// Tuning constants
// ---------------------------------------------------------------------------

/// Every scored run starts out with this.
pub(crate) const START_SCORE: i32 = 5;
/// Bonus per adjacent matched character beyond the first in a run.
pub(crate) const SEQUENTIAL_BONUS: i32 = 20;
/// Bonus if the match occurs right after a separator.
pub(crate) const SEPARATOR_BONUS: i32 = 20;
/// Bonus if the match is uppercase and the previous character is lowercase.
pub(crate) const CAMEL_BONUS: i32 = 30;
/// Extra bonus when the very first character of the filename is matched.
pub(crate) const FIRST_LETTER_BONUS: i32 = 25;
/// Bonus per matched character inside the filename region.
pub(crate) const FILENAME_BONUS: i32 = 15;
/// Bonus per run character when the run covers a whole pattern word.
pub(crate) const WHOLE_WORD_BONUS: i32 = 20;
/// Flat bonus for candidates with a known source file extension.
pub(crate) const SOURCE_FILE_BONUS: i32 = 2;
/// Penalty per filename-region character before the first match.
pub(crate) const LEADING_LETTER_PENALTY: i32 = -2;
/// The leading letter penalty never grows past this.
pub(crate) const MAX_LEADING_LETTER_PENALTY: i32 = -10;
/// Penalty per three unmatched filename-region characters.
pub(crate) const UNMATCHED_LETTER_PENALTY: i32 = -1;

// ---------------------------------------------------------------------------
// Byte classification
// ---------------------------------------------------------------------------

// ASCII case folding via bit 0x20. Only correct for ASCII letters; other
// bytes classify arbitrarily, which affects bonus scoring but never whether
// a candidate matches.
const CASE_BIT: u8 = 0x20;

#[inline]
pub(crate) fn is_lower(b: u8) -> bool {
    b & CASE_BIT != 0
}

#[inline]
pub(crate) fn is_upper(b: u8) -> bool {
    b & CASE_BIT == 0
}

#[inline]
pub(crate) fn to_lower(b: u8) -> u8 {
    b | CASE_BIT
}

#[inline]
fn is_separator_byte(b: u8) -> bool {
    matches!(b, b'\\' | b'/' | b'_' | b' ')
}

/// Separator test with boundary convention: out-of-bounds indices count as
/// separators, so runs touching either end of the text behave like runs
/// bounded by a word break.
#[inline]
pub(crate) fn is_separator(text: &[u8], index: Option<usize>) -> bool {
    match index.and_then(|i| text.get(i)) {
        Some(&b) => is_separator_byte(b),
        None => true,
    }
}

/// True when the candidate ends in one of the known source extensions.
pub(crate) fn is_source_file(text: &[u8]) -> bool {
    text.ends_with(b".cpp") || text.ends_with(b".py") || text.ends_with(b".cs") || text.ends_with(b".c")
}

// ---------------------------------------------------------------------------
// Run scoring
// ---------------------------------------------------------------------------

/// Scores one contiguous run of matched positions in `text`.
///
/// `filename_start` is the index just past the last path separator (0 when
/// there is none, which makes the whole string the "filename region").
pub(crate) fn score_run(text: &[u8], filename_start: usize, match_mode: MatchMode, run: &[usize]) -> i32 {
    let mut score = START_SCORE;

    let mut matches_in_filename = 0i32;
    let mut first_match_in_filename = None;

    // Neighbor and filename-region bonuses
    for &curr in run {
        if matches!(match_mode, MatchMode::Filenames | MatchMode::SourceFiles) {
            let prev = curr.checked_sub(1);
            let prev_is_separator = is_separator(text, prev);
            let prev_is_lower = prev_is_separator || prev.is_some_and(|i| is_lower(text[i]));

            // Camel case
            if prev_is_lower && is_upper(text[curr]) {
                score += CAMEL_BONUS;
            }
            // Separator
            else if prev_is_separator {
                score += SEPARATOR_BONUS;
            }
        }

        if curr >= filename_start {
            if first_match_in_filename.is_none() {
                first_match_in_filename = Some(curr);
            }

            score += FILENAME_BONUS;
            if curr == filename_start {
                // First letter of the filename
                score += FIRST_LETTER_BONUS;
            }
            matches_in_filename += 1;
        }
    }

    if match_mode == MatchMode::SourceFiles && is_source_file(text) {
        score += SOURCE_FILE_BONUS;
    }

    // Leading letter penalty, clamped
    if let Some(first) = first_match_in_filename {
        let leading = LEADING_LETTER_PENALTY * (first - filename_start) as i32;
        score += leading.max(MAX_LEADING_LETTER_PENALTY);
    }

    // Unmatched letter penalty over the filename region
    let region_len = text.len().saturating_sub(filename_start) as i32;
    let unmatched = (region_len - matches_in_filename) / 3;
    score += (UNMATCHED_LETTER_PENALTY * unmatched).min(0);

    // Sequential match bonus
    score += SEQUENTIAL_BONUS * (run.len() as i32 - 1);

    score
}

/// Whole-word bonus: awarded when the run covers a complete separator-bounded
/// word of the *pattern*.
pub(crate) fn whole_word_bonus(pattern: &[u8], run_start: usize, run_len: usize) -> i32 {
    let starts_word = is_separator(pattern, run_start.checked_sub(1));
    let ends_word = is_separator(pattern, Some(run_start + run_len));

    if starts_word && ends_word {
        WHOLE_WORD_BONUS * run_len as i32
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
