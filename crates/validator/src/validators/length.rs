//! Presence and length rules
//!
//! Both operate on the trimmed value and count Unicode scalar values, so
//! `"  ab "` has length 2 and a whitespace-only value counts as empty.

use crate::foundation::ValidationError;

#[inline]
fn trimmed_len(input: &str) -> usize {
    input.trim().chars().count()
}

// ============================================================================
// REQUIRED
// ============================================================================

crate::validator! {
    /// Fails on empty, missing or whitespace-only values.
    pub Required for str;
    rule(input) { !input.trim().is_empty() }
    error(input) { ValidationError::required() }
    fn required();
}

// ============================================================================
// MIN LENGTH
// ============================================================================

crate::validator! {
    /// Validates that the trimmed value has at least `min` characters.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinLength { min: usize } for str;
    rule(self, input) { trimmed_len(input) >= self.min }
    error(self, input) { ValidationError::min_length(self.min, trimmed_len(input)) }
    fn min_length(min: usize);
}

// ============================================================================
// MAX LENGTH
// ============================================================================

crate::validator! {
    /// Validates that the trimmed value has at most `max` characters.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MaxLength { max: usize } for str;
    rule(self, input) { trimmed_len(input) <= self.max }
    error(self, input) { ValidationError::max_length(self.max, trimmed_len(input)) }
    fn max_length(max: usize);
}
