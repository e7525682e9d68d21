//! FIELD combinator - binds a value-level rule to a field name
//!
//! [`Field`] turns any `Validate<Input = str>` into a [`FieldRule`]: the
//! inner rule stays field-agnostic and the binding stamps the field name
//! (and an optional message override) onto every error it lets through.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::foundation::{FieldRule, Validate, ValidationError};

// ============================================================================
// FIELD COMBINATOR
// ============================================================================

/// A rule bound to a field.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::combinators::Field;
/// use fieldcheck_validator::foundation::FieldRule;
/// use fieldcheck_validator::validators::min_length;
///
/// let rule = Field::new("username", min_length(3)).with_message("Too short");
///
/// let error = rule.validate("ab").unwrap_err();
/// assert_eq!(error.field(), Some("username"));
/// assert_eq!(error.message, "Too short");
/// assert_eq!(error.code, "min_length");
/// ```
pub struct Field<V> {
    name: Arc<str>,
    message: Option<Cow<'static, str>>,
    validator: V,
}

impl<V> Field<V> {
    /// Binds `validator` to the field `name`.
    pub fn new(name: impl Into<Arc<str>>, validator: V) -> Self {
        Self {
            name: name.into(),
            message: None,
            validator,
        }
    }

    /// Overrides the message of every error this binding produces.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub(crate) fn set_message(&mut self, message: Cow<'static, str>) {
        self.message = Some(message);
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a reference to the inner validator.
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Extracts the field name and the inner validator.
    pub fn into_parts(self) -> (Arc<str>, V) {
        (self.name, self.validator)
    }

    /// Attaches the field name and the message override to an error.
    pub(crate) fn decorate(&self, error: ValidationError) -> ValidationError {
        let error = error.with_field(self.name.to_string());
        match &self.message {
            Some(message) => error.with_message(message.clone()),
            None => error,
        }
    }
}

impl<V: Clone> Clone for Field<V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            message: self.message.clone(),
            validator: self.validator.clone(),
        }
    }
}

// Debug impl - the inner validator may be a closure or a trait object
impl<V> fmt::Debug for Field<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("validator", &std::any::type_name::<V>())
            .finish()
    }
}

// ============================================================================
// FIELD RULE IMPLEMENTATION
// ============================================================================

impl<V> FieldRule for Field<V>
where
    V: Validate<Input = str> + Send + Sync,
{
    fn field(&self) -> &str {
        &self.name
    }

    fn error_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        self.validator
            .validate(value)
            .map_err(|error| self.decorate(error))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{max_length, required};

    #[test]
    fn test_field_stamps_name() {
        let rule = Field::new("email", required());
        let error = rule.validate("").unwrap_err();
        assert_eq!(error.field(), Some("email"));
        assert_eq!(error.message, "This field is required");
        assert_eq!(rule.error_message(), None);
    }

    #[test]
    fn test_field_message_override_keeps_code() {
        let rule = Field::new("bio", max_length(3)).with_message("Keep it short");
        let error = rule.validate("long text").unwrap_err();
        assert_eq!(error.code, "max_length");
        assert_eq!(error.message, "Keep it short");
        assert_eq!(rule.error_message(), Some("Keep it short"));
    }

    #[test]
    fn test_field_passes_through_success() {
        let rule = Field::new("bio", max_length(3));
        assert!(rule.validate("ok").is_ok());
    }

    #[test]
    fn test_into_parts() {
        let (name, validator) = Field::new("bio", max_length(3)).into_parts();
        assert_eq!(&*name, "bio");
        assert_eq!(validator.max, 3);
    }
}
