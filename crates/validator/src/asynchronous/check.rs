//! Injected external checks
//!
//! A [`RemoteCheck`] adapts a caller-supplied closure (database lookup,
//! HTTP call, ...) into an [`AsyncFieldRule`]. The closure answers
//! `Ok(true)` to accept, `Ok(false)` to reject, and `Err` when it could not
//! decide; the last case never escapes as an error, it becomes a field
//! failure of kind [`CheckUnavailable`](crate::foundation::ErrorKind::CheckUnavailable).

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::rule::AsyncFieldRule;
use crate::foundation::ValidationError;

/// Why an external check could not produce a verdict.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CheckError {
    /// The check ran and errored.
    #[error("external check failed: {0}")]
    Failed(String),

    /// The check exceeded its time budget.
    #[error("external check timed out after {0:?}")]
    TimedOut(Duration),
}

impl CheckError {
    /// Creates a [`CheckError::Failed`] from any displayable reason.
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::Failed(reason.to_string())
    }
}

/// An out-of-process check bound to a field.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::asynchronous::{AsyncFieldRule, CheckError, RemoteCheck};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let taken = ["ana@example.com"];
/// let unique = RemoteCheck::new("email", move |email: String| async move {
///     Ok::<_, CheckError>(!taken.contains(&email.as_str()))
/// })
/// .with_message("Email already registered");
///
/// assert!(unique.validate("bob@example.com").await.is_ok());
/// let error = unique.validate("ana@example.com").await.unwrap_err();
/// assert_eq!(error.message, "Email already registered");
/// # }
/// ```
pub struct RemoteCheck<F> {
    field: Arc<str>,
    code: Cow<'static, str>,
    message: Option<Cow<'static, str>>,
    check: F,
}

impl<F, Fut> RemoteCheck<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, CheckError>> + Send,
{
    /// Binds `check` to `field`.
    pub fn new(field: impl Into<Arc<str>>, check: F) -> Self {
        Self {
            field: field.into(),
            code: Cow::Borrowed("rejected"),
            message: None,
            check,
        }
    }

    /// Sets the error code reported when the check rejects the value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the message reported when the check rejects the value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<F> fmt::Debug for RemoteCheck<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCheck")
            .field("field", &self.field)
            .field("code", &self.code)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut> AsyncFieldRule for RemoteCheck<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, CheckError>> + Send,
{
    fn field(&self) -> &str {
        &self.field
    }

    fn error_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn is_external(&self) -> bool {
        true
    }

    async fn validate(&self, value: &str) -> Result<(), ValidationError> {
        match (self.check)(value.to_owned()).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or(Cow::Borrowed("Value was rejected"));
                Err(ValidationError::new(self.code.clone(), message)
                    .with_field(self.field.to_string()))
            }
            Err(error) => {
                tracing::warn!(field = %self.field, %error, "external check failed");
                Err(ValidationError::check_unavailable(&error)
                    .with_field(self.field.to_string()))
            }
        }
    }
}
