//! Closure-backed rule

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{Validate, ValidationError};

/// A rule defined by a predicate: `true` passes.
///
/// ```
/// use fieldcheck_validator::validators::custom;
/// use fieldcheck_validator::foundation::Validate;
///
/// let even = custom("even_length", "Length must be even", |v: &str| v.len() % 2 == 0);
/// assert!(even.validate("ab").is_ok());
/// assert_eq!(even.validate("abc").unwrap_err().code, "even_length");
/// ```
#[derive(Clone)]
pub struct Predicate<F> {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    f: F,
}

impl<F> Predicate<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    /// Wraps `f`, reporting `code` / `message` when it returns `false`.
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        f: F,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("code", &self.code)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl<F> Validate for Predicate<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    type Input = str;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if (self.f)(input) {
            Ok(())
        } else {
            Err(ValidationError::new(self.code.clone(), self.message.clone()))
        }
    }
}

/// Creates a [`Predicate`] rule.
pub fn custom<F>(
    code: impl Into<Cow<'static, str>>,
    message: impl Into<Cow<'static, str>>,
    f: F,
) -> Predicate<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    Predicate::new(code, message, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_receives_raw_value() {
        let rule = custom("no_padding", "No surrounding spaces", |v: &str| v.trim() == v);
        assert!(rule.validate("abc").is_ok());
        assert!(rule.validate(" abc").is_err());
    }

    #[test]
    fn test_debug_hides_closure() {
        let rule = custom("c", "m", |_: &str| true);
        assert!(format!("{rule:?}").starts_with("Predicate { code: \"c\""));
    }
}
