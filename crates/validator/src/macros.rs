//! Macros for creating rules and schemas with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`validator!`]: Create a value-level rule (struct + `Validate` impl + factory fn)
//! - [`rules!`]: Flatten several chains into one rule sequence for a composite
//!
//! # Examples
//!
//! ```rust
//! use fieldcheck_validator::validator;
//! use fieldcheck_validator::foundation::{Validate, ValidationError};
//!
//! validator! {
//!     /// Rejects values containing whitespace.
//!     pub NoWhitespace for str;
//!     rule(input) { !input.chars().any(char::is_whitespace) }
//!     error(input) { ValidationError::new("no_whitespace", "Whitespace is not allowed") }
//!     fn no_whitespace();
//! }
//!
//! assert!(no_whitespace().validate("abc").is_ok());
//! assert!(no_whitespace().validate("a c").is_err());
//! ```

// ============================================================================
// VALIDATOR MACRO
// ============================================================================

/// Creates a value-level rule: struct definition, `Validate` implementation,
/// constructor, and factory function.
///
/// `#[derive(Debug, Clone)]` is always applied. Add extra derives via `#[derive(...)]`.
///
/// # Variants
///
/// **Unit rule** (zero-sized, no fields):
/// ```rust,ignore
/// validator! {
///     pub Required for str;
///     rule(input) { !input.trim().is_empty() }
///     error(input) { ValidationError::required() }
///     fn required();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// validator! {
///     #[derive(Copy, PartialEq, Eq, Hash)]
///     pub MinLength { min: usize } for str;
///     rule(self, input) { input.trim().chars().count() >= self.min }
///     error(self, input) { ValidationError::min_length(self.min, input.len()) }
///     fn min_length(min: usize);
/// }
/// ```
#[macro_export]
macro_rules! validator {
    // ── Unit rule (no fields) + factory fn ───────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
        fn $factory:ident();
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name for $input;
            rule($inp) $rule
            error($einp) $err
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Unit rule (no fields), no factory ────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&self, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };

    // ── Struct with fields + auto new + factory fn ───────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } for $input;
            rule($self_, $inp) $rule
            error($self2, $einp) $err
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Struct with fields + auto new, no factory ────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&$self_, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };
}

// ============================================================================
// RULES MACRO
// ============================================================================

/// Flattens several chains into one rule sequence, in argument order.
///
/// The result feeds straight into
/// [`ValidationComposite::build`](crate::composite::ValidationComposite::build)
/// (or its async sibling).
///
/// ```rust,ignore
/// let schema = ValidationComposite::build(rules![email_chain, cep_chain])?;
/// ```
#[macro_export]
macro_rules! rules {
    ($first:expr $(,)?) => {
        ::std::iter::IntoIterator::into_iter($first)
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        ::std::iter::IntoIterator::into_iter($first)$(.chain($rest))+
    };
}

// ============================================================================
// TESTS
// ============================================================================
