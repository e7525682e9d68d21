//! Async rule capability and adapters

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::chain::SharedRule;
use crate::foundation::ValidationError;

/// A leaf rule whose verdict may need to wait, e.g. on a uniqueness lookup.
///
/// Rules that leave the process report [`is_external`](Self::is_external);
/// the composite throttles and time-limits those and leaves the rest alone.
#[async_trait]
pub trait AsyncFieldRule: Send + Sync {
    /// The key this rule reads from the value bag.
    fn field(&self) -> &str;

    /// Message surfaced on failure; `None` keeps the rule's default message.
    fn error_message(&self) -> Option<&str> {
        None
    }

    /// Whether the rule performs an out-of-process check.
    fn is_external(&self) -> bool {
        false
    }

    /// Checks one raw value. Errors carry the field name.
    async fn validate(&self, value: &str) -> Result<(), ValidationError>;
}

/// Shared handle to a type-erased async rule.
pub type SharedAsyncRule = Arc<dyn AsyncFieldRule>;

#[async_trait]
impl<R: AsyncFieldRule + ?Sized> AsyncFieldRule for Arc<R> {
    fn field(&self) -> &str {
        (**self).field()
    }

    fn error_message(&self) -> Option<&str> {
        (**self).error_message()
    }

    fn is_external(&self) -> bool {
        (**self).is_external()
    }

    async fn validate(&self, value: &str) -> Result<(), ValidationError> {
        (**self).validate(value).await
    }
}

// ============================================================================
// IMMEDIATE
// ============================================================================

/// A synchronous rule lifted into an async chain. Resolves without
/// suspending.
#[derive(Clone)]
pub struct Immediate(SharedRule);

impl Immediate {
    /// Lifts `rule`.
    pub fn new(rule: SharedRule) -> Self {
        Self(rule)
    }
}

impl fmt::Debug for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Immediate").field(&self.0.field()).finish()
    }
}

#[async_trait]
impl AsyncFieldRule for Immediate {
    fn field(&self) -> &str {
        self.0.field()
    }

    fn error_message(&self) -> Option<&str> {
        self.0.error_message()
    }

    async fn validate(&self, value: &str) -> Result<(), ValidationError> {
        self.0.validate(value)
    }
}

// ============================================================================
// MESSAGE OVERRIDE
// ============================================================================

/// Replaces the message of rule failures. Unavailable checks keep their own
/// message so the form can tell "rejected" from "could not verify".
pub(crate) struct Overridden {
    inner: SharedAsyncRule,
    message: Cow<'static, str>,
}

impl Overridden {
    pub(crate) fn new(inner: SharedAsyncRule, message: Cow<'static, str>) -> Self {
        Self { inner, message }
    }
}

#[async_trait]
impl AsyncFieldRule for Overridden {
    fn field(&self) -> &str {
        self.inner.field()
    }

    fn error_message(&self) -> Option<&str> {
        Some(&self.message)
    }

    fn is_external(&self) -> bool {
        self.inner.is_external()
    }

    async fn validate(&self, value: &str) -> Result<(), ValidationError> {
        self.inner.validate(value).await.map_err(|error| {
            if error.is_check_unavailable() {
                error
            } else {
                error.with_message(self.message.clone())
            }
        })
    }
}
