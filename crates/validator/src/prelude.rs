//! Prelude module for convenient imports.
//!
//! Provides a single `use fieldcheck_validator::prelude::*;` import that
//! brings in the traits, builders, composites and built-in rules.
//!
//! # Examples
//!
//! ```rust
//! use fieldcheck_validator::prelude::*;
//!
//! let zip = ValidationBuilder::field("zip").required().cep().build().unwrap();
//! let schema = ValidationComposite::from_chains([zip]).unwrap();
//! assert!(schema.validate(&[("zip", "01310-930")]).is_ok());
//! ```

// ============================================================================
// FOUNDATION: Core traits and errors
// ============================================================================

pub use crate::foundation::{ErrorKind, FieldRule, SchemaError, Validate, ValidationError};

// ============================================================================
// BUILDING AND EVALUATION
// ============================================================================

pub use crate::bag::ValueBag;
pub use crate::builder::ValidationBuilder;
pub use crate::chain::{Chain, SharedRule};
pub use crate::combinators::Field;
pub use crate::composite::ValidationComposite;
pub use crate::config::AsyncValidationConfig;
pub use crate::normalize::remove_special_characters;
pub use crate::report::ErrorReport;
pub use crate::{rules, validator};

// ============================================================================
// VALIDATORS: All built-in rules
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// ASYNC-GATED: Async adapter
// ============================================================================

#[cfg(feature = "async")]
pub use crate::asynchronous::{
    AsyncChain, AsyncFieldRule, AsyncValidationBuilder, AsyncValidationComposite, CheckError,
    FieldOutcome, Outcome, PassOutcome, RemoteCheck,
};
