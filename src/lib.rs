//! Fuzzy substring matching and ranking for "quick open" style filtering.
//!
//! Given a user-typed pattern and a collection of candidate strings (file
//! paths, command history entries, ...), this crate scores every candidate by
//! how well it matches the pattern, records the byte positions that matched,
//! and returns the candidates sorted best first. Matching is strictly
//! subsequence based: each pattern character (or contiguous run of pattern
//! characters) must appear in the candidate in order, case-insensitively,
//! with a small budget of pattern characters allowed to miss entirely.
//! Space-separated pattern tokens may match out of order.
//!
//! Scoring is heuristic and tuned for file paths: camel-case humps, word
//! separators, and the filename region after the last path separator all
//! attract bonuses, while leading and unmatched characters are penalized.
//!
//! # Examples
//!
//! ```
//! use fuzzy_search::{MatchMode, SearchConfigBuilder, search};
//!
//! let files = ["src/main.rs", "src/matcher.rs", "README.md"];
//!
//! let config = SearchConfigBuilder::default()
//!     .match_mode(MatchMode::Filenames)
//!     .build()
//!     .unwrap();
//!
//! let results = search("mat", files.iter(), |s| *s, config);
//! assert_eq!(results[0].candidate, &"src/matcher.rs");
//! assert_eq!(results[0].matches, vec![4, 5, 6]);
//! ```
//!
//! For repeated matching against the same pattern (incremental re-scoring as
//! results stream in), hold on to a [`PatternMatcher`] and call
//! [`PatternMatcher::match_text`]; its internal buffers are reused across
//! calls instead of being reallocated per candidate.

#![warn(missing_docs)]

#[macro_use]
extern crate log;

use derive_builder::Builder;

mod matcher;
mod score;
mod search;
mod text;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use crate::matcher::{MAX_PATTERN_LEN, PatternMatch, PatternMatcher, match_one};
pub use crate::search::{SearchResult, search};
pub use crate::text::SearchText;

/// Score assigned to a match; zero or negative means "not matched".
pub type ScoreType = i32;
/// Byte offset into a candidate string.
pub type IndexType = usize;

//------------------------------------------------------------------------------
/// Selects which bonus rules apply while scoring.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchMode {
    /// Plain strings, no path-aware bonuses (command history, menu entries).
    #[default]
    PlainStrings,
    /// File paths: camel-case, separator and filename-region bonuses apply.
    Filenames,
    /// Like [`MatchMode::Filenames`], plus a flat bonus for known source
    /// file extensions (`.c`, `.py`, `.cs`, `.cpp`).
    SourceFiles,
}

/// Configuration for one search call. Passed by value, never mutated.
///
/// Use [`SearchConfigBuilder`] to override individual fields:
///
/// ```
/// use fuzzy_search::{MatchMode, SearchConfigBuilder};
///
/// let config = SearchConfigBuilder::default()
///     .match_mode(MatchMode::SourceFiles)
///     .max_unmatched_characters_from_pattern(0)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Bonus rule set to apply.
    #[builder(default)]
    pub match_mode: MatchMode,
    /// How many pattern characters may fail to match anywhere in a candidate
    /// before the candidate is rejected outright.
    #[builder(default = "2")]
    pub max_unmatched_characters_from_pattern: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            max_unmatched_characters_from_pattern: 2,
        }
    }
}
