//! Rule combinators
//!
//! - [`Field`]: binds a value-level rule to a field name, producing a
//!   [`FieldRule`](crate::foundation::FieldRule)

pub mod field;

pub use field::Field;
