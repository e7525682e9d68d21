//! Immutable per-field rule sequences
//!
//! A [`Chain`] is what [`ValidationBuilder::build`](crate::builder::ValidationBuilder::build)
//! produces: the rules of one field, in insertion order, shared behind an
//! `Arc<[..]>` so composites can clone it freely.

use std::fmt;
use std::sync::Arc;

use crate::foundation::{FieldRule, ValidationError};

/// Shared handle to a type-erased field rule.
pub type SharedRule = Arc<dyn FieldRule>;

/// The ordered rules bound to one field.
#[derive(Clone)]
pub struct Chain {
    field: Arc<str>,
    rules: Arc<[SharedRule]>,
}

impl Chain {
    pub(crate) fn new(field: Arc<str>, rules: Vec<SharedRule>) -> Self {
        Self {
            field,
            rules: rules.into(),
        }
    }

    /// Field every rule in this chain reads.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub(crate) fn field_arc(&self) -> &Arc<str> {
        &self.field
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[SharedRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` for a chain without rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates the rules in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, SharedRule> {
        self.rules.iter()
    }

    /// Runs the rules in order and returns the first failure.
    ///
    /// Rules after the first failure are not called.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing rule, stamped with the field
    /// name.
    pub fn evaluate(&self, value: &str) -> Result<(), ValidationError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Err(error) = rule.validate(value) {
                tracing::trace!(
                    field = %self.field,
                    rule = index,
                    code = %error.code,
                    "chain short-circuited"
                );
                return Err(error);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("field", &self.field)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl IntoIterator for Chain {
    type Item = SharedRule;
    type IntoIter = std::vec::IntoIter<SharedRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.to_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a SharedRule;
    type IntoIter = std::slice::Iter<'a, SharedRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
