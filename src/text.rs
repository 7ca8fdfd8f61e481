//! Candidate text abstraction.
//!
//! The matcher is byte oriented: candidates only need to expose their raw
//! bytes. Implementations are provided for the representations callers
//! typically hold (string slices, owned strings, byte buffers, C strings),
//! so the algorithm is written once instead of per representation.

use std::ffi::CStr;

/// A candidate text the matcher can score.
///
/// Matching operates on raw bytes and is defined for ASCII-ish text; other
/// byte values are never misinterpreted as matches, they just score without
/// the letter-case bonuses. Match indices returned by the matcher are byte
/// offsets into the slice returned here.
pub trait SearchText {
    /// The raw bytes to match against.
    fn search_bytes(&self) -> &[u8];
}

impl SearchText for str {
    fn search_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl SearchText for String {
    fn search_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl SearchText for [u8] {
    fn search_bytes(&self) -> &[u8] {
        self
    }
}

impl SearchText for Vec<u8> {
    fn search_bytes(&self) -> &[u8] {
        self
    }
}

impl SearchText for CStr {
    fn search_bytes(&self) -> &[u8] {
        self.to_bytes()
    }
}

impl<T: SearchText + ?Sized> SearchText for &T {
    fn search_bytes(&self) -> &[u8] {
        (**self).search_bytes()
    }
}
