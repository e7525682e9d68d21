//! Fluent async chain builder
//!
//! Mixes synchronous rules (added through [`rules`](AsyncValidationBuilder::rules))
//! with external checks, in one ordered chain.
//!
//! ```
//! use fieldcheck_validator::asynchronous::{AsyncValidationBuilder, CheckError};
//!
//! let email = AsyncValidationBuilder::field("email")
//!     .rules(|b| b.required().email())
//!     .check(|email: String| async move { Ok::<_, CheckError>(email != "ana@example.com") })
//!     .message("Email already registered")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(email.len(), 3);
//! assert_eq!(email.external_count(), 1);
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use super::chain::AsyncChain;
use super::check::{CheckError, RemoteCheck};
use super::rule::{AsyncFieldRule, Immediate, Overridden, SharedAsyncRule};
use crate::builder::ValidationBuilder;
use crate::foundation::SchemaError;

struct Entry {
    rule: SharedAsyncRule,
    message: Option<Cow<'static, str>>,
}

/// Accumulates the ordered async rules of one field.
#[must_use = "builder methods must be chained or built"]
pub struct AsyncValidationBuilder {
    field: Arc<str>,
    rules: Vec<Entry>,
    error: Option<SchemaError>,
}

impl AsyncValidationBuilder {
    /// Starts a chain for `name`.
    pub fn field(name: impl Into<Arc<str>>) -> Self {
        Self {
            field: name.into(),
            rules: Vec::new(),
            error: None,
        }
    }

    /// Appends synchronous rules declared on a [`ValidationBuilder`] scoped
    /// to the same field.
    pub fn rules(mut self, declare: impl FnOnce(ValidationBuilder) -> ValidationBuilder) -> Self {
        match declare(ValidationBuilder::field(Arc::clone(&self.field))).build() {
            Ok(chain) => {
                self.rules.extend(chain.into_iter().map(|rule| Entry {
                    rule: Arc::new(Immediate::new(rule)),
                    message: None,
                }));
            }
            Err(error) => self.fail(error),
        }
        self
    }

    /// Appends an external check; see [`RemoteCheck`].
    pub fn check<F, Fut>(self, check: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, CheckError>> + Send + 'static,
    {
        let rule = RemoteCheck::new(Arc::clone(&self.field), check);
        self.rule(rule)
    }

    /// Appends any async rule bound to this builder's field.
    ///
    /// A rule reporting another field is recorded as
    /// [`SchemaError::FieldMismatch`] and surfaces from `build`.
    pub fn rule(mut self, rule: impl AsyncFieldRule + 'static) -> Self {
        if rule.field() == &*self.field {
            self.rules.push(Entry {
                rule: Arc::new(rule),
                message: None,
            });
        } else {
            let error = SchemaError::FieldMismatch {
                expected: self.field.to_string(),
                found: rule.field().to_owned(),
            };
            self.fail(error);
        }
        self
    }

    /// Overrides the rejection message of the most recently appended rule.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        if let Some(last) = self.rules.last_mut() {
            last.message = Some(message.into());
        } else {
            let field = self.field.to_string();
            self.fail(SchemaError::MessageWithoutRule(field));
        }
        self
    }

    /// Materializes the chain.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::EmptyFieldName`] when the field name is empty
    /// - the first misuse recorded while chaining
    pub fn build(self) -> Result<AsyncChain, SchemaError> {
        if self.field.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        if let Some(error) = self.error {
            return Err(error);
        }

        tracing::debug!(field = %self.field, rules = self.rules.len(), "async chain built");

        let rules = self
            .rules
            .into_iter()
            .map(|entry| match entry.message {
                Some(message) => Arc::new(Overridden::new(entry.rule, message)) as SharedAsyncRule,
                None => entry.rule,
            })
            .collect();
        Ok(AsyncChain::new(self.field, rules))
    }

    fn fail(&mut self, error: SchemaError) {
        self.error.get_or_insert(error);
    }
}

impl std::fmt::Debug for AsyncValidationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncValidationBuilder")
            .field("field", &self.field)
            .field("rules", &self.rules.len())
            .field("error", &self.error)
            .finish()
    }
}
