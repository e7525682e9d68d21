//! Multi-field validation
//!
//! A [`ValidationComposite`] is the schema of a whole form: one [`Chain`]
//! per field, in declaration order. It is built once and evaluated once per
//! submission against any [`ValueBag`].
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use fieldcheck_validator::prelude::*;
//!
//! let a = ValidationBuilder::field("a").required().build()?;
//! let b = ValidationBuilder::field("b").min(3, "Too short").build()?;
//! let schema = ValidationComposite::build(rules![a, b])?;
//!
//! let report = schema
//!     .validate(&HashMap::from([("a", ""), ("b", "okay")]))
//!     .unwrap_err();
//!
//! assert_eq!(report.fields().collect::<Vec<_>>(), ["a"]);
//! # Ok::<(), SchemaError>(())
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::bag::ValueBag;
use crate::chain::{Chain, SharedRule};
use crate::foundation::{FieldRule, SchemaError, ValidationError};
use crate::report::ErrorReport;

// ============================================================================
// SCHEMA ASSEMBLY
// ============================================================================

/// Groups a flat rule sequence by field, keeping first-seen field order and
/// each field's relative rule order.
pub(crate) fn group_rules<R>(
    rules: impl IntoIterator<Item = R>,
    field_of: impl Fn(&R) -> &str,
) -> Result<IndexMap<Arc<str>, Vec<R>>, SchemaError> {
    let mut groups: IndexMap<Arc<str>, Vec<R>> = IndexMap::new();

    for rule in rules {
        let field = field_of(&rule);
        if field.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        if let Some(group) = groups.get_mut(field) {
            group.push(rule);
        } else {
            groups.insert(Arc::from(field), vec![rule]);
        }
    }

    if groups.is_empty() {
        return Err(SchemaError::EmptySchema);
    }
    Ok(groups)
}

/// Indexes whole chains by field, rejecting duplicates.
pub(crate) fn index_chains<C>(
    chains: impl IntoIterator<Item = C>,
    field_of: impl Fn(&C) -> &Arc<str>,
    len_of: impl Fn(&C) -> usize,
) -> Result<IndexMap<Arc<str>, C>, SchemaError> {
    let mut schema: IndexMap<Arc<str>, C> = IndexMap::new();
    let mut total = 0;

    for chain in chains {
        let field = Arc::clone(field_of(&chain));
        if field.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        total += len_of(&chain);
        match schema.entry(field) {
            Entry::Occupied(entry) => {
                return Err(SchemaError::DuplicateField(entry.key().to_string()));
            }
            Entry::Vacant(entry) => {
                entry.insert(chain);
            }
        }
    }

    if total == 0 {
        return Err(SchemaError::EmptySchema);
    }
    Ok(schema)
}

// ============================================================================
// COMPOSITE
// ============================================================================

/// Field → chain bindings evaluated together.
///
/// Immutable once built; clone it freely (chains are shared).
#[derive(Debug, Clone)]
pub struct ValidationComposite {
    schema: IndexMap<Arc<str>, Chain>,
}

impl ValidationComposite {
    /// Builds a schema from a flat rule sequence, typically the
    /// concatenation of several chains (see [`rules!`](crate::rules)).
    ///
    /// Rules for the same field are merged in the order given.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::EmptySchema`] when `rules` is empty
    /// - [`SchemaError::EmptyFieldName`] when a rule reports an empty field
    pub fn build(rules: impl IntoIterator<Item = SharedRule>) -> Result<Self, SchemaError> {
        let groups = group_rules(rules, |rule: &SharedRule| rule.field())?;
        let schema: IndexMap<_, _> = groups
            .into_iter()
            .map(|(field, rules)| (Arc::clone(&field), Chain::new(field, rules)))
            .collect();

        Ok(Self::assembled(schema))
    }

    /// Builds a schema from whole chains, one per field.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::DuplicateField`] when two chains share a field
    /// - [`SchemaError::EmptySchema`] when the chains hold no rules
    pub fn from_chains(chains: impl IntoIterator<Item = Chain>) -> Result<Self, SchemaError> {
        let schema = index_chains(chains, Chain::field_arc, Chain::len)?;
        Ok(Self::assembled(schema))
    }

    fn assembled(schema: IndexMap<Arc<str>, Chain>) -> Self {
        tracing::debug!(
            fields = schema.len(),
            rules = schema.values().map(Chain::len).sum::<usize>(),
            "validation composite built"
        );
        Self { schema }
    }

    /// Evaluates every chain against `bag`.
    ///
    /// Missing values read as `""`; bag entries without a chain are ignored.
    /// The report lists fields in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a non-empty [`ErrorReport`] with the first failure of every
    /// failing field.
    pub fn validate<B: ValueBag + ?Sized>(&self, bag: &B) -> Result<(), ErrorReport> {
        let mut report = ErrorReport::new();

        for (field, chain) in &self.schema {
            let value = bag.value(field).unwrap_or_default();
            if let Err(error) = chain.evaluate(&value) {
                report.insert(field.to_string(), error);
            }
        }

        tracing::debug!(
            fields = self.schema.len(),
            failed = report.len(),
            "validation pass finished"
        );
        report.into_result()
    }

    /// Evaluates one field's chain; a field without a chain passes.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule's error.
    pub fn validate_field(&self, field: &str, value: &str) -> Result<(), ValidationError> {
        self.schema
            .get(field)
            .map_or(Ok(()), |chain| chain.evaluate(value))
    }

    /// Chain registered for `field`.
    #[must_use]
    pub fn chain(&self, field: &str) -> Option<&Chain> {
        self.schema.get(field)
    }

    /// Registered fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.schema.keys().map(|field| &**field)
    }

    /// Number of registered fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.schema.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ValidationBuilder;
    use crate::rules;
    use pretty_assertions::assert_eq;

    fn chain(field: &str) -> Chain {
        ValidationBuilder::field(field).required().build().unwrap()
    }

    #[test]
    fn test_build_merges_same_field_in_order() {
        let first = ValidationBuilder::field("pin").required().build().unwrap();
        let second = ValidationBuilder::field("pin").digits(4).build().unwrap();
        let other = chain("name");

        let schema = ValidationComposite::build(rules![first, other, second]).unwrap();

        assert_eq!(schema.fields().collect::<Vec<_>>(), ["pin", "name"]);
        assert_eq!(schema.chain("pin").unwrap().len(), 2);
        assert_eq!(schema.validate_field("pin", "").unwrap_err().code, "required");
        assert_eq!(schema.validate_field("pin", "12").unwrap_err().code, "invalid_digits");
    }

    #[test]
    fn test_build_rejects_empty() {
        let err = ValidationComposite::build(Vec::<SharedRule>::new()).unwrap_err();
        assert_eq!(err, SchemaError::EmptySchema);
    }

    #[test]
    fn test_from_chains_rejects_duplicates() {
        let err = ValidationComposite::from_chains([chain("a"), chain("b"), chain("a")])
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("a".into()));
    }

    #[test]
    fn test_from_chains_rejects_ruleless_schema() {
        let empty = ValidationBuilder::field("a").build().unwrap();
        let err = ValidationComposite::from_chains([empty]).unwrap_err();
        assert_eq!(err, SchemaError::EmptySchema);
    }

    #[test]
    fn test_missing_values_read_as_empty() {
        let schema = ValidationComposite::from_chains([chain("a")]).unwrap();
        let report = schema.validate(&[("other", "x")]).unwrap_err();
        assert_eq!(report.get("a").unwrap().code, "required");
        assert!(!report.contains("other"));
    }

    #[test]
    fn test_unregistered_field_passes_validate_field() {
        let schema = ValidationComposite::from_chains([chain("a")]).unwrap();
        assert!(schema.validate_field("zzz", "").is_ok());
        assert_eq!(schema.field_count(), 1);
    }
}
