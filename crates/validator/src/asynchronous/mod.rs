//! Async validation adapter
//!
//! The async sibling of [`ValidationComposite`](crate::composite::ValidationComposite)
//! for chains that include out-of-process checks.
//!
//! - [`AsyncFieldRule`]: the async leaf capability; [`Immediate`] lifts sync rules
//! - [`RemoteCheck`]: an injected closure as a rule; faults become
//!   [`CheckUnavailable`](crate::foundation::ErrorKind::CheckUnavailable) failures
//! - [`AsyncValidationBuilder`] / [`AsyncChain`]: one field's ordered rules
//! - [`AsyncValidationComposite`]: concurrent fields, latest-wins per field
//!
//! Enabled by the `async` feature (on by default).

pub mod builder;
pub mod chain;
pub mod check;
pub mod composite;
mod inflight;
pub mod rule;

pub use builder::AsyncValidationBuilder;
pub use chain::AsyncChain;
pub use check::{CheckError, RemoteCheck};
pub use composite::{AsyncValidationComposite, FieldOutcome, Outcome, PassOutcome};
pub use rule::{AsyncFieldRule, Immediate, SharedAsyncRule};
