//! Field-keyed error reports
//!
//! An [`ErrorReport`] holds at most one [`ValidationError`] per field, keyed
//! in the order fields were declared in the schema. Only failing fields
//! appear; a composite never hands out an empty report.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::foundation::ValidationError;

/// Field → first failing error.
///
/// Serializes as a JSON object `{field: {code, message, field, kind, params}}`.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::foundation::ValidationError;
/// use fieldcheck_validator::report::ErrorReport;
///
/// let mut report = ErrorReport::new();
/// report.insert("a", ValidationError::required().with_field("a"));
/// report.insert("a", ValidationError::new("ignored", "second error"));
///
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.get("a").map(|e| e.code.as_ref()), Some("required"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    errors: IndexMap<String, ValidationError>,
}

impl ErrorReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` for `field` unless the field already failed.
    ///
    /// Returns `true` when the error was recorded.
    pub fn insert(&mut self, field: impl Into<String>, error: ValidationError) -> bool {
        match self.errors.entry(field.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(error);
                true
            }
        }
    }

    /// Error recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.get(field)
    }

    /// Returns `true` if `field` failed.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Failing fields, in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates `(field, error)` pairs in schema order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ValidationError> {
        self.errors.iter()
    }

    /// Field → message, for form layers that only display text.
    #[must_use]
    pub fn messages(&self) -> BTreeMap<&str, &str> {
        self.errors
            .iter()
            .map(|(field, error)| (field.as_str(), error.message.as_ref()))
            .collect()
    }

    /// Returns `true` if any field failed because an external check could
    /// not run.
    #[must_use]
    pub fn has_unavailable_checks(&self) -> bool {
        self.errors.values().any(ValidationError::is_check_unavailable)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the report itself when it holds at least one error.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation", self.errors.len())?;
        for error in self.errors.values() {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

impl IntoIterator for ErrorReport {
    type Item = (String, ValidationError);
    type IntoIter = indexmap::map::IntoIter<String, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorReport {
    type Item = (&'a String, &'a ValidationError);
    type IntoIter = indexmap::map::Iter<'a, String, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl Extend<(String, ValidationError)> for ErrorReport {
    fn extend<T: IntoIterator<Item = (String, ValidationError)>>(&mut self, iter: T) {
        for (field, error) in iter {
            self.insert(field, error);
        }
    }
}

impl FromIterator<(String, ValidationError)> for ErrorReport {
    fn from_iter<T: IntoIterator<Item = (String, ValidationError)>>(iter: T) -> Self {
        let mut report = Self::new();
        report.extend(iter);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn report() -> ErrorReport {
        [
            ("b".to_owned(), ValidationError::min_length(3, 2).with_field("b")),
            ("a".to_owned(), ValidationError::required().with_field("a")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_keeps_insertion_order() {
        assert_eq!(report().fields().collect::<Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn test_first_error_wins() {
        let mut report = report();
        assert!(!report.insert("a", ValidationError::new("late", "late")));
        assert_eq!(report.get("a").unwrap().code, "required");
        assert!(report.contains("b"));
        assert!(!report.contains("c"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ErrorReport::new().into_result(), Ok(()));
        assert!(report().into_result().is_err());
    }

    #[test]
    fn test_messages() {
        let report = report();
        let messages = report.messages();
        assert_eq!(messages["a"], "This field is required");
        assert_eq!(messages["b"], "Must be at least 3 characters");
    }

    #[test]
    fn test_serializes_as_object() {
        let value = serde_json::to_value(report()).unwrap();
        assert_eq!(
            value["a"],
            json!({
                "code": "required",
                "message": "This field is required",
                "field": "a",
                "kind": "rule",
                "params": {}
            })
        );
        assert_eq!(value["b"]["params"]["actual"], "2");
    }

    #[test]
    fn test_display_lists_errors() {
        let text = report().to_string();
        assert!(text.starts_with("2 field(s) failed validation"));
        assert!(text.contains("[a] required: This field is required"));
    }
}
