//! Error types for validation failures and schema misuse
//!
//! Two kinds of error live here and they never mix:
//!
//! - [`ValidationError`] is *data*: the structured outcome of a failing rule,
//!   returned from `validate` and collected into an
//!   [`ErrorReport`](crate::report::ErrorReport).
//! - [`SchemaError`] is a programmer error raised while a chain or composite
//!   is being built. It is never produced at validation time.
//!
//! All string fields of [`ValidationError`] use `Cow<'static, str>` so the
//! common case of static codes and messages does not allocate.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeStruct, Serializer};

// ============================================================================
// ERROR KIND
// ============================================================================

/// Distinguishes ordinary rule failures from failures of the machinery that
/// performs an external check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The value was inspected and rejected.
    #[default]
    Rule,
    /// The value could not be inspected: the external check errored or
    /// timed out.
    CheckUnavailable,
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation error.
///
/// Leaf rules create errors without a field; the field binding attaches the
/// field name (and an optional message override) before the error leaves the
/// chain.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("min_length", "Too short")
///     .with_field("username")
///     .with_param("min", "5");
///
/// assert_eq!(error.field(), Some("username"));
/// assert_eq!(error.param("min"), Some("5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling.
    ///
    /// Examples: "required", "min_length", "invalid_format"
    pub code: Cow<'static, str>,

    /// Human-readable message.
    pub message: Cow<'static, str>,

    /// Field the failing rule was bound to.
    pub field: Option<Cow<'static, str>>,

    /// Ordered key-value parameters describing the failure
    /// (e.g. `[("min", "5"), ("actual", "3")]`).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// Whether the rule rejected the value or could not run.
    pub kind: ErrorKind,
}

impl ValidationError {
    /// Creates a new rule failure with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
            kind: ErrorKind::Rule,
        }
    }

    /// Sets the field this error belongs to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Replaces the message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Sets the error kind.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the field name, if bound.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns true when the error reports an unavailable external check
    /// rather than a rejected value.
    #[must_use]
    pub fn is_check_unavailable(&self) -> bool {
        self.kind == ErrorKind::CheckUnavailable
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Params<'a>(&'a [(Cow<'static, str>, Cow<'static, str>)]);

        impl Serialize for Params<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (k, v) in self.0 {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }

        let mut state = serializer.serialize_struct("ValidationError", 5)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("params", &Params(&self.params))?;
        state.end()
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "required" error.
    pub fn required() -> Self {
        Self::new("required", "This field is required")
    }

    /// Creates a "min_length" error.
    pub fn min_length(min: usize, actual: usize) -> Self {
        Self::new("min_length", format!("Must be at least {min} characters"))
            .with_param("min", min.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "max_length" error.
    pub fn max_length(max: usize, actual: usize) -> Self {
        Self::new("max_length", format!("Must be at most {max} characters"))
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates an "invalid_format" error naming the pattern that failed.
    pub fn invalid_format(pattern: impl Into<Cow<'static, str>>) -> Self {
        Self::new("invalid_format", "Invalid format").with_param("pattern", pattern)
    }

    /// Creates a "check_unavailable" error for a failed or timed-out external
    /// check.
    pub fn check_unavailable(reason: impl fmt::Display) -> Self {
        Self::new(
            "check_unavailable",
            "This value could not be verified right now",
        )
        .with_param("reason", reason.to_string())
        .with_kind(ErrorKind::CheckUnavailable)
    }
}

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// Misuse detected while building a chain, a composite or a configuration.
///
/// These are raised at construction time only; a successfully built schema
/// never produces a `SchemaError` while validating.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A chain (or a hand-written rule) was bound to an empty field name.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// Two whole chains were supplied for the same field.
    #[error("field '{0}' is declared by more than one chain")]
    DuplicateField(String),

    /// A composite was built from zero rules.
    #[error("schema contains no rules")]
    EmptySchema,

    /// `message()` was called before any rule was appended.
    #[error("message override on field '{0}' has no rule to apply to")]
    MessageWithoutRule(String),

    /// A regular expression handed to `matches()` failed to compile.
    #[error("invalid pattern for field '{field}': {reason}")]
    InvalidPattern {
        /// Field the pattern was declared on.
        field: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A rule bound to another field was appended to a chain.
    #[error("rule for field '{found}' cannot join the chain of field '{expected}'")]
    FieldMismatch {
        /// Field the chain is scoped to.
        expected: String,
        /// Field the rule reports.
        found: String,
    },

    /// A configuration value is out of range or failed to parse.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

// ============================================================================
// TESTS
// ============================================================================
