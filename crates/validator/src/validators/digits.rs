//! Numeric document and postal-code rules
//!
//! Every rule here first normalizes the input with
//! [`remove_special_characters`], so masked (`"01310-930"`) and raw
//! (`"01310930"`) inputs are judged alike.
//!
//! - [`DigitCode`]: exactly N ASCII digits (CEP, CPF, CNPJ, or any length)
//! - [`NotRepeatedDigits`]: rejects one digit repeated N times

use crate::foundation::{Validate, ValidationError};
use crate::normalize::remove_special_characters;

// ============================================================================
// DIGIT CODE
// ============================================================================

/// Validates that the normalized value is exactly `length` ASCII digits.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::validators::DigitCode;
/// use fieldcheck_validator::foundation::Validate;
///
/// let cep = DigitCode::cep();
/// assert!(cep.validate("01310-930").is_ok());
/// assert!(cep.validate("0131093").is_err());
/// assert!(cep.validate("abcde-fgh").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitCode {
    /// Expected digit count.
    pub length: usize,
    /// Error code reported on mismatch.
    pub code: &'static str,
    /// Default message reported on mismatch.
    pub message: &'static str,
}

impl DigitCode {
    /// A code of exactly `length` digits.
    #[must_use]
    pub const fn new(length: usize) -> Self {
        Self {
            length,
            code: "invalid_digits",
            message: "Invalid number of digits",
        }
    }

    /// Brazilian postal code: 8 digits.
    #[must_use]
    pub const fn cep() -> Self {
        Self {
            length: 8,
            code: "invalid_cep",
            message: "Invalid postal code",
        }
    }

    /// Brazilian individual taxpayer number: 11 digits.
    #[must_use]
    pub const fn cpf() -> Self {
        Self {
            length: 11,
            code: "invalid_cpf",
            message: "Invalid CPF",
        }
    }

    /// Brazilian company taxpayer number: 14 digits.
    #[must_use]
    pub const fn cnpj() -> Self {
        Self {
            length: 14,
            code: "invalid_cnpj",
            message: "Invalid CNPJ",
        }
    }

    fn matches(&self, normalized: &str) -> bool {
        normalized.len() == self.length && normalized.bytes().all(|b| b.is_ascii_digit())
    }
}

impl Validate for DigitCode {
    type Input = str;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let normalized = remove_special_characters(input);
        if self.matches(&normalized) {
            Ok(())
        } else {
            Err(ValidationError::new(self.code, self.message)
                .with_param("expected_digits", self.length.to_string()))
        }
    }
}

/// Creates a [`DigitCode`] of exactly `length` digits.
#[must_use]
pub const fn digits(length: usize) -> DigitCode {
    DigitCode::new(length)
}

/// Creates a postal code (CEP) rule.
#[must_use]
pub const fn cep() -> DigitCode {
    DigitCode::cep()
}

/// Creates a CPF format rule.
#[must_use]
pub const fn cpf() -> DigitCode {
    DigitCode::cpf()
}

/// Creates a CNPJ format rule.
#[must_use]
pub const fn cnpj() -> DigitCode {
    DigitCode::cnpj()
}

// ============================================================================
// REPEATED DIGITS
// ============================================================================

/// Returns true when `normalized` is one digit repeated `length` times.
fn is_repeated_digit(normalized: &str, length: usize) -> bool {
    let bytes = normalized.as_bytes();
    bytes.len() == length
        && bytes
            .first()
            .is_some_and(|&first| first.is_ascii_digit() && bytes.iter().all(|&b| b == first))
}

crate::validator! {
    /// Rejects trivially fake numbers such as `"00000000000"`.
    ///
    /// The normalized input fails when it is exactly `length` copies of one
    /// ASCII digit 0–9. Values of any other shape pass, so pair it with a
    /// [`DigitCode`] for format.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub NotRepeatedDigits { length: usize } for str;
    rule(self, input) { !is_repeated_digit(&remove_special_characters(input), self.length) }
    error(self, input) {
        ValidationError::new("repeated_digits", "Value cannot be a single repeated digit")
            .with_param("length", self.length.to_string())
    }
    fn not_repeated_digits(length: usize);
}
