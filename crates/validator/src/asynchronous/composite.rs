//! Async multi-field validation with latest-wins supersession
//!
//! Fields are evaluated concurrently; rules inside a field run in order and
//! stop at the first failure. External rules share one semaphore
//! (`max_concurrent_checks`) and each call is bounded by `check_timeout`.
//!
//! A pass claims every field it evaluates. When a newer pass (or a
//! [`validate_field`](AsyncValidationComposite::validate_field) call) claims
//! one of those fields, every in-flight check of the older pass is
//! cancelled and the older pass resolves to [`Outcome::Superseded`].

use std::borrow::Cow;
use std::sync::Arc;

use futures::future::join_all;
use indexmap::IndexMap;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::chain::AsyncChain;
use super::check::CheckError;
use super::inflight::InFlight;
use super::rule::{AsyncFieldRule, SharedAsyncRule};
use crate::bag::ValueBag;
use crate::composite::{group_rules, index_chains};
use crate::config::AsyncValidationConfig;
use crate::foundation::{SchemaError, ValidationError};
use crate::report::ErrorReport;

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of an async pass that may have been overtaken by a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The pass ran to completion and is the latest for its fields.
    Complete(T),
    /// A newer pass claimed one of this pass's fields first; discard.
    Superseded,
}

/// Outcome of a whole-bag pass.
pub type PassOutcome = Outcome<Result<(), ErrorReport>>;

/// Outcome of a single-field pass.
pub type FieldOutcome = Outcome<Result<(), ValidationError>>;

impl<T> Outcome<T> {
    /// Returns `true` for [`Outcome::Superseded`].
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }

    /// The completed value, or `None` when superseded.
    pub fn into_complete(self) -> Option<T> {
        match self {
            Self::Complete(value) => Some(value),
            Self::Superseded => None,
        }
    }

    /// Maps the completed value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Complete(value) => Outcome::Complete(f(value)),
            Self::Superseded => Outcome::Superseded,
        }
    }
}

impl Outcome<Result<(), ErrorReport>> {
    /// The error report of a completed, failing pass.
    pub fn report(&self) -> Option<&ErrorReport> {
        match self {
            Self::Complete(Err(report)) => Some(report),
            _ => None,
        }
    }

    /// Returns `true` for a completed pass with no failures.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Complete(Ok(())))
    }
}

// ============================================================================
// COMPOSITE
// ============================================================================

/// Field → async chain bindings evaluated together.
///
/// Clones share the schema, the check limiter and the in-flight registry, so
/// a clone handed to another task still supersedes (and is superseded by)
/// the original.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::asynchronous::{AsyncValidationBuilder, AsyncValidationComposite, CheckError};
/// use fieldcheck_validator::rules;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), fieldcheck_validator::foundation::SchemaError> {
/// let email = AsyncValidationBuilder::field("email")
///     .rules(|b| b.required().email())
///     .check(|email: String| async move { Ok::<_, CheckError>(email != "ana@example.com") })
///     .message("Email already registered")
///     .build()?;
/// let schema = AsyncValidationComposite::build(rules![email])?;
///
/// let outcome = schema.validate(&[("email", "ana@example.com")]).await;
/// let report = outcome.report().unwrap();
/// assert_eq!(report.get("email").unwrap().message, "Email already registered");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AsyncValidationComposite {
    schema: Arc<IndexMap<Arc<str>, AsyncChain>>,
    config: AsyncValidationConfig,
    permits: Arc<Semaphore>,
    inflight: Arc<InFlight>,
}

impl AsyncValidationComposite {
    /// Builds a schema from a flat async rule sequence with the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::EmptySchema`] when `rules` is empty
    /// - [`SchemaError::EmptyFieldName`] when a rule reports an empty field
    pub fn build(rules: impl IntoIterator<Item = SharedAsyncRule>) -> Result<Self, SchemaError> {
        Self::build_with_config(rules, AsyncValidationConfig::default())
    }

    /// Like [`build`](Self::build), with explicit limits.
    ///
    /// # Errors
    ///
    /// As [`build`](Self::build), plus [`SchemaError::InvalidConfig`].
    pub fn build_with_config(
        rules: impl IntoIterator<Item = SharedAsyncRule>,
        config: AsyncValidationConfig,
    ) -> Result<Self, SchemaError> {
        config.validate()?;
        let groups = group_rules(rules, |rule: &SharedAsyncRule| rule.field())?;
        let schema = groups
            .into_iter()
            .map(|(field, rules)| (Arc::clone(&field), AsyncChain::new(field, rules)))
            .collect();
        Ok(Self::assembled(schema, config))
    }

    /// Builds a schema from whole async chains, one per field.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::DuplicateField`] when two chains share a field
    /// - [`SchemaError::EmptySchema`] when the chains hold no rules
    pub fn from_chains(chains: impl IntoIterator<Item = AsyncChain>) -> Result<Self, SchemaError> {
        Self::from_chains_with_config(chains, AsyncValidationConfig::default())
    }

    /// Like [`from_chains`](Self::from_chains), with explicit limits.
    ///
    /// # Errors
    ///
    /// As [`from_chains`](Self::from_chains), plus [`SchemaError::InvalidConfig`].
    pub fn from_chains_with_config(
        chains: impl IntoIterator<Item = AsyncChain>,
        config: AsyncValidationConfig,
    ) -> Result<Self, SchemaError> {
        config.validate()?;
        let schema = index_chains(chains, AsyncChain::field_arc, AsyncChain::len)?;
        Ok(Self::assembled(schema, config))
    }

    fn assembled(schema: IndexMap<Arc<str>, AsyncChain>, config: AsyncValidationConfig) -> Self {
        tracing::debug!(
            fields = schema.len(),
            external = schema.values().map(AsyncChain::external_count).sum::<usize>(),
            max_concurrent_checks = config.max_concurrent_checks,
            check_timeout = ?config.check_timeout,
            "async validation composite built"
        );
        Self {
            schema: Arc::new(schema),
            permits: Arc::new(Semaphore::new(config.max_concurrent_checks)),
            config,
            inflight: Arc::new(InFlight::default()),
        }
    }

    /// Limits this composite was built with.
    pub fn config(&self) -> &AsyncValidationConfig {
        &self.config
    }

    /// Registered fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.schema.keys().map(|field| &**field)
    }

    /// Chain registered for `field`.
    pub fn chain(&self, field: &str) -> Option<&AsyncChain> {
        self.schema.get(field)
    }

    /// Evaluates every chain against `bag`, all fields concurrently.
    ///
    /// Values are read from the bag before the first suspension point.
    /// Resolves to [`Outcome::Superseded`] when a newer pass claimed any of
    /// the fields before this one finished.
    pub async fn validate<B: ValueBag + Sync + ?Sized>(&self, bag: &B) -> PassOutcome {
        let generation = self.inflight.next_generation();
        // Shared by all fields: losing any one of them stops the others too
        let token = CancellationToken::new();
        let work: Vec<_> = self
            .schema
            .iter()
            .map(|(field, chain)| {
                let value = bag.value(field).map(Cow::into_owned).unwrap_or_default();
                self.inflight.claim(field, generation, &token);
                (field, chain, value)
            })
            .collect();

        let span = tracing::debug_span!("validation_pass", generation, fields = work.len());
        async move {
            let results = join_all(
                work.iter()
                    .map(|(_, chain, value)| self.run_field(chain, value, &token)),
            )
            .await;

            let mut superseded = token.is_cancelled();
            for (field, ..) in &work {
                superseded |= !self.inflight.release(field, generation);
            }
            if superseded {
                tracing::debug!("validation pass superseded");
                return Outcome::Superseded;
            }

            let mut report = ErrorReport::new();
            for ((field, ..), result) in work.iter().zip(results) {
                match result {
                    Some(Ok(())) => {}
                    Some(Err(error)) => {
                        report.insert(field.to_string(), error);
                    }
                    // A cancelled field always loses its claim, handled above
                    None => return Outcome::Superseded,
                }
            }

            tracing::debug!(failed = report.len(), "validation pass finished");
            Outcome::Complete(report.into_result())
        }
        .instrument(span)
        .await
    }

    /// Evaluates one field's chain, superseding older work on that field.
    ///
    /// A field without a chain completes with `Ok(())`.
    pub async fn validate_field(&self, field: &str, value: &str) -> FieldOutcome {
        let Some((field, chain)) = self.schema.get_key_value(field) else {
            return Outcome::Complete(Ok(()));
        };

        let generation = self.inflight.next_generation();
        let token = CancellationToken::new();
        self.inflight.claim(field, generation, &token);
        let span = tracing::debug_span!("field_pass", generation, field = %field);

        async move {
            let result = self.run_field(chain, value, &token).await;
            let released = self.inflight.release(field, generation);
            match result {
                Some(result) if released => Outcome::Complete(result),
                _ => {
                    tracing::debug!("field pass superseded");
                    Outcome::Superseded
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Runs one chain unless `token` is cancelled first; `None` when
    /// cancelled.
    async fn run_field(
        &self,
        chain: &AsyncChain,
        value: &str,
        token: &CancellationToken,
    ) -> Option<Result<(), ValidationError>> {
        tokio::select! {
            biased;
            () = token.cancelled() => None,
            result = self.evaluate(chain, value) => Some(result),
        }
    }

    async fn evaluate(&self, chain: &AsyncChain, value: &str) -> Result<(), ValidationError> {
        for (index, rule) in chain.iter().enumerate() {
            let result = if rule.is_external() {
                self.run_external(&**rule, value).await
            } else {
                rule.validate(value).await
            };

            if let Err(error) = result {
                tracing::trace!(
                    field = chain.field(),
                    rule = index,
                    code = %error.code,
                    "async chain short-circuited"
                );
                return Err(error);
            }
        }
        Ok(())
    }

    async fn run_external(
        &self,
        rule: &dyn AsyncFieldRule,
        value: &str,
    ) -> Result<(), ValidationError> {
        let Ok(_permit) = self.permits.acquire().await else {
            return Err(unavailable(rule, &CheckError::failed("check limiter closed")));
        };

        let timeout = self.config.check_timeout;
        match tokio::time::timeout(timeout, rule.validate(value)).await {
            Ok(result) => result,
            Err(_) => {
                let error = CheckError::TimedOut(timeout);
                tracing::warn!(field = rule.field(), %error, "external check timed out");
                Err(unavailable(rule, &error))
            }
        }
    }
}

fn unavailable(rule: &dyn AsyncFieldRule, error: &CheckError) -> ValidationError {
    ValidationError::check_unavailable(error).with_field(rule.field().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asynchronous::AsyncValidationBuilder;
    use crate::rules;

    #[test]
    fn test_outcome_helpers() {
        let done: PassOutcome = Outcome::Complete(Ok(()));
        assert!(done.is_valid());
        assert!(done.report().is_none());
        assert!(Outcome::<()>::Superseded.is_superseded());
        assert_eq!(Outcome::Complete(2).map(|n| n * 2).into_complete(), Some(4));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let chain = AsyncValidationBuilder::field("a")
            .rules(|b| b.required())
            .build()
            .unwrap();
        let config = AsyncValidationConfig::default().with_max_concurrent_checks(0);
        let err = AsyncValidationComposite::build_with_config(rules![chain], config).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_sync_only_schema() {
        let chain = AsyncValidationBuilder::field("a")
            .rules(|b| b.required())
            .build()
            .unwrap();
        let schema = AsyncValidationComposite::from_chains([chain]).unwrap();

        let outcome = schema.validate(&[("a", "")]).await;
        assert_eq!(outcome.report().unwrap().get("a").unwrap().code, "required");
        assert!(schema.validate(&[("a", "x")]).await.is_valid());
        assert_eq!(
            schema.validate_field("missing", "").await,
            Outcome::Complete(Ok(()))
        );
    }
}
