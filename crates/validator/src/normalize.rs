//! Input normalization
//!
//! Format rules compare a *normalized* form of the input, so `"01310-930"`
//! and `"01310930"` are judged the same. A [`Normalizer`] is an explicit,
//! ordered list of [`Step`]s: each step runs exactly once, in order, on the
//! output of the previous one, and normalization ends after the last step.

use std::borrow::Cow;

/// Punctuation removed by [`remove_special_characters`].
pub const SPECIAL_CHARACTERS: &[char] = &['/', '\\', '.', '-'];

/// One normalization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Remove every occurrence of the listed characters.
    Strip(&'static [char]),
    /// Trim leading and trailing whitespace.
    Trim,
    /// Keep ASCII digits only.
    DigitsOnly,
}

impl Step {
    fn apply(self, input: &str) -> String {
        match self {
            Step::Strip(chars) => input.chars().filter(|c| !chars.contains(c)).collect(),
            Step::Trim => input.trim().to_owned(),
            Step::DigitsOnly => input.chars().filter(char::is_ascii_digit).collect(),
        }
    }
}

/// An ordered normalization pipeline.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::normalize::{Normalizer, Step};
///
/// let digits = Normalizer::new(vec![Step::Trim, Step::DigitsOnly]);
/// assert_eq!(digits.apply(" (11) 98765-4321 "), "11987654321");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Normalizer {
    steps: Cow<'static, [Step]>,
}

impl Normalizer {
    /// Strip [`SPECIAL_CHARACTERS`], then trim.
    pub const SPECIAL_CHARACTERS: Normalizer =
        Normalizer::from_static(&[Step::Strip(SPECIAL_CHARACTERS), Step::Trim]);

    /// Creates a pipeline from owned steps.
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Cow::Owned(steps),
        }
    }

    /// Creates a pipeline from a static step list (usable in `const`).
    pub const fn from_static(steps: &'static [Step]) -> Self {
        Self {
            steps: Cow::Borrowed(steps),
        }
    }

    /// Returns the steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Runs every step in order.
    pub fn apply(&self, input: &str) -> String {
        self.steps
            .iter()
            .fold(input.to_owned(), |value, step| step.apply(&value))
    }
}

/// Strips `/ \ . -` and trims surrounding whitespace.
///
/// ```
/// use fieldcheck_validator::normalize::remove_special_characters;
///
/// assert_eq!(remove_special_characters(" 123.456.789-09 "), "12345678909");
/// assert_eq!(remove_special_characters("01310-930"), "01310930");
/// ```
pub fn remove_special_characters(input: &str) -> String {
    Normalizer::SPECIAL_CHARACTERS.apply(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_every_special_character() {
        assert_eq!(remove_special_characters(r"12/34\56.78-90"), "1234567890");
    }

    #[test]
    fn test_leaves_other_characters() {
        assert_eq!(remove_special_characters("ab c(1)"), "ab c(1)");
    }

    #[test]
    fn test_trim_runs_after_strip() {
        assert_eq!(remove_special_characters("- 123 -"), "123");
    }

    #[test]
    fn test_step_order_is_respected() {
        let strip_then_digits = Normalizer::new(vec![Step::Strip(&['1']), Step::DigitsOnly]);
        assert_eq!(strip_then_digits.apply("a1b2"), "2");
        assert_eq!(strip_then_digits.steps().len(), 2);
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        assert_eq!(Normalizer::new(Vec::new()).apply(" x "), " x ");
    }
}
