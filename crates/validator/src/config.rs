//! Async validation configuration
//!
//! ```
//! use std::time::Duration;
//! use fieldcheck_validator::config::AsyncValidationConfig;
//!
//! let config = AsyncValidationConfig::from_json(r#"{ "check_timeout": "750ms" }"#).unwrap();
//! assert_eq!(config.check_timeout, Duration::from_millis(750));
//! assert_eq!(config.max_concurrent_checks, 16);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::SchemaError;

/// Limits applied to external checks run by the async composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsyncValidationConfig {
    /// Upper bound for one external check; a slower check reports the field
    /// as unavailable.
    #[serde(with = "humantime_serde")]
    pub check_timeout: Duration,

    /// External checks allowed in flight at once, across all fields and
    /// passes of one composite.
    pub max_concurrent_checks: usize,
}

impl Default for AsyncValidationConfig {
    fn default() -> Self {
        Self {
            check_timeout: Duration::from_secs(5),
            max_concurrent_checks: 16,
        }
    }
}

impl AsyncValidationConfig {
    /// Sets the per-check timeout.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_check_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout = timeout;
        self
    }

    /// Sets the concurrency limit for external checks.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_concurrent_checks(mut self, limit: usize) -> Self {
        self.max_concurrent_checks = limit;
        self
    }

    /// Checks that every limit is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidConfig`] for a zero timeout or a zero
    /// concurrency limit.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.check_timeout.is_zero() {
            return Err(SchemaError::InvalidConfig(
                "check_timeout must be greater than 0".into(),
            ));
        }
        if self.max_concurrent_checks == 0 {
            return Err(SchemaError::InvalidConfig(
                "max_concurrent_checks must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON document; absent keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidConfig`] for malformed JSON or
    /// out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SchemaError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
