//! Core traits for the validation system
//!
//! Two layers:
//!
//! - [`Validate`] is a value-level rule: it looks at one input and knows
//!   nothing about fields.
//! - [`FieldRule`] is the leaf capability a chain is made of: a rule bound to
//!   a field name, with an optional message override. It is object-safe so
//!   chains can hold heterogeneous rules behind `Arc<dyn FieldRule>`.

use std::sync::Arc;

use crate::foundation::ValidationError;

// ============================================================================
// VALUE-LEVEL RULE
// ============================================================================

/// A pure predicate over one input value.
///
/// Implementations must be referentially transparent: calling `validate`
/// twice with the same input yields the same result and touches no shared
/// state.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::foundation::{Validate, ValidationError};
///
/// struct NoSpaces;
///
/// impl Validate for NoSpaces {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.contains(' ') {
///             Err(ValidationError::new("no_spaces", "Spaces are not allowed"))
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(NoSpaces.validate("abc").is_ok());
/// assert!(NoSpaces.validate("a b").is_err());
/// ```
pub trait Validate {
    /// The type of input being validated (`str` for every built-in rule).
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Arc<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

/// Type-erased string rule, as stored by the builders.
pub type DynValidate = dyn Validate<Input = str> + Send + Sync;

// ============================================================================
// FIELD-BOUND RULE
// ============================================================================

/// A leaf validator bound to one field of a value bag.
///
/// Missing values are handed to `validate` as `""`; a rule that must reject
/// absence (like `required`) does so by rejecting the empty string.
pub trait FieldRule: Send + Sync {
    /// The key this rule reads from the value bag.
    fn field(&self) -> &str;

    /// Message surfaced on failure; `None` keeps the rule's default message.
    fn error_message(&self) -> Option<&str> {
        None
    }

    /// Checks one raw value. Errors carry the field name.
    fn validate(&self, value: &str) -> Result<(), ValidationError>;
}

impl<R: FieldRule + ?Sized> FieldRule for Arc<R> {
    fn field(&self) -> &str {
        (**self).field()
    }

    fn error_message(&self) -> Option<&str> {
        (**self).error_message()
    }

    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        (**self).validate(value)
    }
}

// ============================================================================
// TESTS
// ============================================================================
