//! Immutable per-field async rule sequences

use std::fmt;
use std::sync::Arc;

use super::rule::{AsyncFieldRule, Immediate, SharedAsyncRule};
use crate::chain::Chain;

/// The ordered async rules bound to one field.
#[derive(Clone)]
pub struct AsyncChain {
    field: Arc<str>,
    rules: Arc<[SharedAsyncRule]>,
}

impl AsyncChain {
    pub(crate) fn new(field: Arc<str>, rules: Vec<SharedAsyncRule>) -> Self {
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

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` for a chain without rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates the rules in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, SharedAsyncRule> {
        self.rules.iter()
    }

    /// Number of rules that leave the process.
    pub fn external_count(&self) -> usize {
        self.rules.iter().filter(|rule| rule.is_external()).count()
    }
}

/// Lifts every synchronous rule, keeping order.
impl From<Chain> for AsyncChain {
    fn from(chain: Chain) -> Self {
        let field = Arc::clone(chain.field_arc());
        let rules = chain
            .into_iter()
            .map(|rule| Arc::new(Immediate::new(rule)) as SharedAsyncRule)
            .collect();
        Self::new(field, rules)
    }
}

impl fmt::Debug for AsyncChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncChain")
            .field("field", &self.field)
            .field("rules", &self.rules.len())
            .field("external", &self.external_count())
            .finish()
    }
}

impl IntoIterator for AsyncChain {
    type Item = SharedAsyncRule;
    type IntoIter = std::vec::IntoIter<SharedAsyncRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.to_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a AsyncChain {
    type Item = &'a SharedAsyncRule;
    type IntoIter = std::slice::Iter<'a, SharedAsyncRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
