//! Built-in leaf rules
//!
//! Every rule here implements [`Validate<Input = str>`](crate::foundation::Validate)
//! and knows nothing about fields; bind one with
//! [`Field`](crate::combinators::Field) or through
//! [`ValidationBuilder`](crate::builder::ValidationBuilder).
//!
//! # Categories
//!
//! - **Presence & length**: [`Required`], [`MinLength`], [`MaxLength`]
//! - **Digit codes**: [`DigitCode`] (CEP, CPF, CNPJ, any length), [`NotRepeatedDigits`]
//! - **Formats**: [`Email`], [`Pattern`]
//! - **Ad hoc**: [`Predicate`]
//!
//! # Examples
//!
//! ```rust
//! use fieldcheck_validator::foundation::Validate;
//! use fieldcheck_validator::validators::{cpf, not_repeated_digits};
//!
//! assert!(cpf().validate("529.982.247-25").is_ok());
//! assert!(not_repeated_digits(11).validate("111.111.111-11").is_err());
//! ```

pub mod custom;
pub mod digits;
pub mod format;
pub mod length;

pub use custom::{Predicate, custom};
pub use digits::{DigitCode, NotRepeatedDigits, cep, cnpj, cpf, digits, not_repeated_digits};
pub use format::{Email, Pattern, email, matches};
pub use length::{MaxLength, MinLength, Required, max_length, min_length, required};
