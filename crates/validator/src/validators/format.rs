//! Regular-expression format rules
//!
//! Both rules match against the trimmed value. The email pattern is a
//! pragmatic shape check, not an RFC 5322 parser.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::{Validate, ValidationError};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap()
});

// ============================================================================
// EMAIL
// ============================================================================

crate::validator! {
    /// Validates an email address shape (`local@domain.tld`).
    pub Email for str;
    rule(input) { EMAIL_REGEX.is_match(input.trim()) }
    error(input) {
        ValidationError::new("invalid_email", "Invalid email address")
            .with_param("expected", "email")
    }
    fn email();
}

// ============================================================================
// PATTERN
// ============================================================================

/// Validates that the trimmed value matches a regular expression.
///
/// The pattern is used as written; anchor it (`^...$`) to require a full
/// match.
///
/// ```
/// use fieldcheck_validator::validators::Pattern;
/// use fieldcheck_validator::foundation::Validate;
///
/// let plate = Pattern::new(r"^[A-Z]{3}-?\d{4}$").unwrap();
/// assert!(plate.validate("ABC-1234").is_ok());
/// assert!(plate.validate("abc").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    message: Cow<'static, str>,
}

impl Pattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex compiler error for malformed patterns.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: Cow::Borrowed("Invalid format"),
        })
    }

    /// Replaces the default failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns the source pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Validate for Pattern {
    type Input = str;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if self.regex.is_match(input.trim()) {
            Ok(())
        } else {
            Err(ValidationError::invalid_format(self.regex.as_str().to_owned())
                .with_message(self.message.clone()))
        }
    }
}

/// Compiles a [`Pattern`] rule.
///
/// # Errors
///
/// Returns the regex compiler error for malformed patterns.
pub fn matches(pattern: &str) -> Result<Pattern, regex::Error> {
    Pattern::new(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        let validator = email();
        assert!(validator.validate("user@example.com").is_ok());
        assert!(validator.validate(" user.name+tag@mail.example.org ").is_ok());
        assert!(validator.validate("invalid").is_err());
        assert!(validator.validate("@example.com").is_err());
        assert!(validator.validate("user@").is_err());
        assert!(validator.validate("user@localhost").is_err());
        assert!(validator.validate("").is_err());
    }

    #[test]
    fn test_pattern() {
        let validator = matches(r"^\d{3}-\d{4}$").unwrap().with_message("Use 000-0000");
        assert!(validator.validate("123-4567").is_ok());
        let err = validator.validate("invalid").unwrap_err();
        assert_eq!(err.code, "invalid_format");
        assert_eq!(err.message, "Use 000-0000");
        assert_eq!(err.param("pattern"), Some(r"^\d{3}-\d{4}$"));
    }

    #[test]
    fn test_pattern_rejects_bad_regex() {
        assert!(matches("(unclosed").is_err());
    }
}
