//! Core validation types and traits
//!
//! - **Traits**: [`Validate`] (value-level rule), [`FieldRule`] (rule bound
//!   to a field)
//! - **Errors**: [`ValidationError`] (rule failure, returned as data),
//!   [`SchemaError`] (construction-time misuse), [`ErrorKind`]
//!
//! # Architecture
//!
//! ## 1. Rules are pure
//!
//! A rule inspects one string and returns `Ok(())` or a
//! [`ValidationError`]. It never panics on malformed input; malformed input
//! is exactly what it reports.
//!
//! ## 2. Fields are bound late
//!
//! Value-level rules don't know which field they guard. The builder wraps
//! each one in a [`Field`](crate::combinators::Field) binding that stamps
//! the field name (and an optional message override) onto the error.
//!
//! ## 3. Errors vs. misuse
//!
//! ```rust
//! use fieldcheck_validator::prelude::*;
//!
//! // Misuse fails at build time...
//! assert_eq!(
//!     ValidationBuilder::field("").required().build().unwrap_err(),
//!     SchemaError::EmptyFieldName,
//! );
//!
//! // ...while a failing rule is just data.
//! let chain = ValidationBuilder::field("name").required().build().unwrap();
//! let error = chain.evaluate("").unwrap_err();
//! assert_eq!(error.code, "required");
//! ```

pub mod error;
pub mod traits;

pub use error::{ErrorKind, SchemaError, ValidationError};
pub use traits::{DynValidate, FieldRule, Validate};
