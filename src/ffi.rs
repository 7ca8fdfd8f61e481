//! C ABI marshaling shim for embedding into non-Rust hosts.
//!
//! A thin value-type boundary over [`PatternMatcher`]: an opaque pattern
//! handle created once per search session, a match call taking a raw
//! NUL-terminated string, and a fixed-layout result struct whose match
//! buffer is owned by the caller after the call returns.
//!
//! ```c
//! FuzzySearchPattern *p = fuzzy_search_pattern_new("bhn", FUZZY_SEARCH_SOURCE_FILES, 2);
//! FuzzySearchMatch m = fuzzy_search_match(p, "BaseHierarchyNode.cpp");
//! /* ... use m.score / m.matches[0..m.matches_len] ... */
//! fuzzy_search_matches_free(m.matches, m.matches_len);
//! fuzzy_search_pattern_free(p);
//! ```

use std::ffi::{CStr, c_char, c_int};
use std::ptr;

use crate::{MatchMode, PatternMatcher, SearchConfig};

/// `match_mode` value selecting [`MatchMode::PlainStrings`].
pub const FUZZY_SEARCH_STRINGS: c_int = 0;
/// `match_mode` value selecting [`MatchMode::Filenames`].
pub const FUZZY_SEARCH_FILENAMES: c_int = 1;
/// `match_mode` value selecting [`MatchMode::SourceFiles`].
pub const FUZZY_SEARCH_SOURCE_FILES: c_int = 2;

/// Opaque pattern handle holding the pattern and its scratch buffers.
///
/// Created by [`fuzzy_search_pattern_new`], destroyed by
/// [`fuzzy_search_pattern_free`]. Must not be used from two threads at once.
pub struct FuzzySearchPattern(PatternMatcher);

/// Fixed-layout match result returned over the C boundary.
///
/// When `score` is zero the candidate did not match and `matches` is NULL.
/// Otherwise `matches` points to a heap buffer of `matches_len` byte offsets
/// whose ownership transfers to the caller; release it with
/// [`fuzzy_search_matches_free`].
#[repr(C)]
pub struct FuzzySearchMatch {
    /// Total match score; positive means matched.
    pub score: c_int,
    /// Matched byte offsets, or NULL when not matched.
    pub matches: *mut usize,
    /// Number of entries behind `matches`.
    pub matches_len: usize,
}

impl FuzzySearchMatch {
    fn no_match() -> Self {
        Self {
            score: 0,
            matches: ptr::null_mut(),
            matches_len: 0,
        }
    }
}

/// Creates a pattern handle for `pattern` with the given mode and unmatched
/// character budget.
///
/// Returns NULL when `pattern` is NULL or not valid UTF-8. Unknown
/// `match_mode` values fall back to plain string matching; a negative
/// `max_unmatched` is treated as zero.
///
/// # Safety
///
/// `pattern` must be NULL or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fuzzy_search_pattern_new(
    pattern: *const c_char,
    match_mode: c_int,
    max_unmatched: c_int,
) -> *mut FuzzySearchPattern {
    if pattern.is_null() {
        return ptr::null_mut();
    }

    let pattern = unsafe { CStr::from_ptr(pattern) };
    let Ok(pattern) = pattern.to_str() else {
        return ptr::null_mut();
    };

    let match_mode = match match_mode {
        FUZZY_SEARCH_FILENAMES => MatchMode::Filenames,
        FUZZY_SEARCH_SOURCE_FILES => MatchMode::SourceFiles,
        _ => MatchMode::PlainStrings,
    };
    let config = SearchConfig {
        match_mode,
        max_unmatched_characters_from_pattern: max_unmatched.max(0) as usize,
    };

    Box::into_raw(Box::new(FuzzySearchPattern(PatternMatcher::new(pattern, config))))
}

/// Destroys a handle returned by [`fuzzy_search_pattern_new`]. NULL is a
/// no-op.
///
/// # Safety
///
/// `handle` must be NULL or a pointer previously returned by
/// [`fuzzy_search_pattern_new`] that has not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fuzzy_search_pattern_free(handle: *mut FuzzySearchPattern) {
    if !handle.is_null() {
        drop(unsafe { Box::from_raw(handle) });
    }
}

/// Scores `text` against the pattern behind `handle`.
///
/// # Safety
///
/// `handle` must be a live handle from [`fuzzy_search_pattern_new`] (or
/// NULL), `text` a valid NUL-terminated string (or NULL); NULL inputs yield
/// a zero-score result.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fuzzy_search_match(handle: *mut FuzzySearchPattern, text: *const c_char) -> FuzzySearchMatch {
    if handle.is_null() || text.is_null() {
        return FuzzySearchMatch::no_match();
    }

    let matcher = unsafe { &mut (*handle).0 };
    let text = unsafe { CStr::from_ptr(text) };

    let result = matcher.match_text(text);
    if !result.is_match() {
        return FuzzySearchMatch::no_match();
    }

    let mut matches = result.matches.into_boxed_slice();
    let out = FuzzySearchMatch {
        score: result.score,
        matches: matches.as_mut_ptr(),
        matches_len: matches.len(),
    };
    std::mem::forget(matches);
    out
}

/// Releases a match buffer handed out by [`fuzzy_search_match`]. NULL is a
/// no-op.
///
/// # Safety
///
/// `matches`/`matches_len` must come from a single [`fuzzy_search_match`]
/// result that has not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fuzzy_search_matches_free(matches: *mut usize, matches_len: usize) {
    if !matches.is_null() {
        drop(unsafe { Vec::from_raw_parts(matches, matches_len, matches_len) });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
