//! # fieldcheck-validator
//!
//! A field-validation composition engine: declare an ordered chain of rules
//! per input field, compose the chains into one schema, and evaluate whole
//! forms into a field-keyed error report.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use fieldcheck_validator::prelude::*;
//!
//! let name = ValidationBuilder::field("name").required().min(3, "Too short").build()?;
//! let cpf = ValidationBuilder::field("cpf").required().cpf().not_repeated_digits(11).build()?;
//! let schema = ValidationComposite::build(rules![name, cpf])?;
//!
//! let form = HashMap::from([("name", "Ana Lima"), ("cpf", "111.111.111-11")]);
//! let report = schema.validate(&form).unwrap_err();
//!
//! assert!(!report.contains("name"));
//! assert_eq!(report.get("cpf").unwrap().code, "repeated_digits");
//! # Ok::<(), SchemaError>(())
//! ```
//!
//! ## Layers
//!
//! - **Leaf rules** ([`validators`]) implement [`Validate`](foundation::Validate)
//!   over a string and know nothing about fields. Write new ones with the
//!   [`validator!`] macro or by hand.
//! - **Chains** ([`builder::ValidationBuilder`] → [`chain::Chain`]) bind rules
//!   to one field, in order, stopping at the first failure.
//! - **Composites** ([`composite::ValidationComposite`]) evaluate many chains
//!   against a [`bag::ValueBag`] and return an [`report::ErrorReport`].
//! - **Async** (`async` feature, [`asynchronous`]) adds external checks with
//!   timeouts, bounded concurrency and latest-wins cancellation.

// ValidationError is returned by value from every rule; boxing it would add an
// allocation to each failing call.
#![allow(clippy::result_large_err)]

pub mod bag;
pub mod builder;
pub mod chain;
pub mod combinators;
pub mod composite;
pub mod config;
pub mod foundation;
mod macros;
pub mod normalize;
pub mod prelude;
pub mod report;
pub mod validators;

#[cfg(feature = "async")]
pub mod asynchronous;
