//! Fluent chain builder
//!
//! [`ValidationBuilder`] accumulates rules for exactly one field and
//! materializes them as a [`Chain`]. Misuse (an empty field name, a
//! malformed pattern, `message()` before any rule) is remembered and
//! reported by [`build`](ValidationBuilder::build) so the chaining methods
//! never have to return `Result`.
//!
//! # Examples
//!
//! ```
//! use fieldcheck_validator::builder::ValidationBuilder;
//!
//! let cpf = ValidationBuilder::field("cpf")
//!     .required()
//!     .cpf()
//!     .message("Enter the 11 digits of your CPF")
//!     .not_repeated_digits(11)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(cpf.len(), 3);
//! assert_eq!(cpf.evaluate("123").unwrap_err().message, "Enter the 11 digits of your CPF");
//! assert_eq!(cpf.evaluate("000.000.000-00").unwrap_err().code, "repeated_digits");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::chain::{Chain, SharedRule};
use crate::combinators::Field;
use crate::foundation::{DynValidate, SchemaError, Validate};
use crate::validators::{
    DigitCode, Pattern, custom, email, max_length, min_length, not_repeated_digits, required,
};

/// Accumulates the ordered rules of one field.
#[derive(Debug)]
#[must_use = "builder methods must be chained or built"]
pub struct ValidationBuilder {
    field: Arc<str>,
    rules: Vec<Field<Box<DynValidate>>>,
    error: Option<SchemaError>,
}

impl ValidationBuilder {
    /// Starts a chain for `name`.
    pub fn field(name: impl Into<Arc<str>>) -> Self {
        Self {
            field: name.into(),
            rules: Vec::new(),
            error: None,
        }
    }

    /// Field this builder is scoped to.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field
    }

    /// Appends any value-level rule.
    pub fn rule<V>(mut self, validator: V) -> Self
    where
        V: Validate<Input = str> + Send + Sync + 'static,
    {
        let boxed: Box<DynValidate> = Box::new(validator);
        self.rules.push(Field::new(Arc::clone(&self.field), boxed));
        self
    }

    /// Overrides the message of the most recently appended rule.
    ///
    /// Calling it before any rule is recorded as
    /// [`SchemaError::MessageWithoutRule`] and surfaces from `build`.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        if let Some(last) = self.rules.last_mut() {
            last.set_message(message.into());
        } else {
            let field = self.field.to_string();
            self.fail(SchemaError::MessageWithoutRule(field));
        }
        self
    }

    /// Fails on empty, missing or whitespace-only values.
    pub fn required(self) -> Self {
        self.rule(required())
    }

    /// At least `n` characters after trimming.
    pub fn min(self, n: usize, message: impl Into<Cow<'static, str>>) -> Self {
        self.rule(min_length(n)).message(message)
    }

    /// At most `n` characters after trimming.
    pub fn max(self, n: usize, message: impl Into<Cow<'static, str>>) -> Self {
        self.rule(max_length(n)).message(message)
    }

    /// Brazilian postal code (8 digits).
    pub fn cep(self) -> Self {
        self.rule(DigitCode::cep())
    }

    /// Brazilian CPF (11 digits).
    pub fn cpf(self) -> Self {
        self.rule(DigitCode::cpf())
    }

    /// Brazilian CNPJ (14 digits).
    pub fn cnpj(self) -> Self {
        self.rule(DigitCode::cnpj())
    }

    /// Exactly `n` digits once punctuation is stripped.
    pub fn digits(self, n: usize) -> Self {
        self.rule(DigitCode::new(n))
    }

    /// Rejects one digit repeated `n` times.
    pub fn not_repeated_digits(self, n: usize) -> Self {
        self.rule(not_repeated_digits(n))
    }

    /// Email address shape.
    pub fn email(self) -> Self {
        self.rule(email())
    }

    /// Regular expression match.
    ///
    /// A pattern that fails to compile is recorded as
    /// [`SchemaError::InvalidPattern`] and surfaces from `build`.
    pub fn matches(mut self, pattern: &str, message: impl Into<Cow<'static, str>>) -> Self {
        match Pattern::new(pattern) {
            Ok(compiled) => self.rule(compiled.with_message(message)),
            Err(err) => {
                self.fail(SchemaError::InvalidPattern {
                    field: self.field.to_string(),
                    reason: err.to_string(),
                });
                self
            }
        }
    }

    /// Closure rule; `predicate` returning `false` fails with `code` and
    /// `message`.
    pub fn custom<F>(
        self,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rule(custom(code, message, predicate))
    }

    /// Materializes the chain.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::EmptyFieldName`] when the field name is empty
    /// - the first misuse recorded while chaining
    pub fn build(self) -> Result<Chain, SchemaError> {
        if self.field.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        if let Some(error) = self.error {
            return Err(error);
        }

        tracing::debug!(field = %self.field, rules = self.rules.len(), "chain built");

        let rules = self
            .rules
            .into_iter()
            .map(|rule| Arc::new(rule) as SharedRule)
            .collect();
        Ok(Chain::new(self.field, rules))
    }

    fn fail(&mut self, error: SchemaError) {
        // keep the first
        self.error.get_or_insert(error);
    }
}
