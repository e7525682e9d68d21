//! Value bags: per-call field → raw string lookups
//!
//! A composite only ever asks a bag for one field at a time and never keeps
//! what it gets back, so any map-like structure can serve. Missing values are
//! reported as `None` and read by the composite as `""`.

use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Field → raw string lookup supplied to a validation pass.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use fieldcheck_validator::bag::ValueBag;
///
/// let form = HashMap::from([("name", "Ana")]);
/// assert_eq!(form.value("name").as_deref(), Some("Ana"));
/// assert_eq!(form.value("email"), None);
///
/// let pairs = [("zip", "01310-930")];
/// assert_eq!(pairs.value("zip").as_deref(), Some("01310-930"));
/// ```
pub trait ValueBag {
    /// Raw value for `field`, or `None` when absent.
    fn value(&self, field: &str) -> Option<Cow<'_, str>>;
}

impl<B: ValueBag + ?Sized> ValueBag for &B {
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        (**self).value(field)
    }
}

impl<K, V, S> ValueBag for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

impl<K, V> ValueBag for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

impl<K, V, S> ValueBag for IndexMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

// Pair lists: the first pair with a matching key wins.
impl<K, V> ValueBag for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        self.iter()
            .find(|(k, _)| k.as_ref() == field)
            .map(|(_, v)| Cow::Borrowed(v.as_ref()))
    }
}

impl<K, V, const N: usize> ValueBag for [(K, V); N]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        self.as_slice().value(field)
    }
}

impl<K, V> ValueBag for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        self.as_slice().value(field)
    }
}

// ============================================================================
// JSON
// ============================================================================

fn json_scalar(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        // Nested structures render as compact JSON
        Value::Array(_) | Value::Object(_) => Some(Cow::Owned(value.to_string())),
    }
}

impl ValueBag for Map<String, Value> {
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).and_then(json_scalar)
    }
}

/// Only objects carry fields; any other JSON value is an empty bag.
impl ValueBag for Value {
    fn value(&self, field: &str) -> Option<Cow<'_, str>> {
        self.as_object().and_then(|object| object.value(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps() {
        let hash: HashMap<String, String> = HashMap::from([("a".into(), "1".into())]);
        let btree = BTreeMap::from([("a", String::from("1"))]);
        let index: IndexMap<&str, &str> = IndexMap::from([("a", "1")]);

        for bag in [&hash as &dyn ValueBag, &btree, &index] {
            assert_eq!(bag.value("a").as_deref(), Some("1"));
            assert_eq!(bag.value("b"), None);
        }
    }

    #[test]
    fn test_pairs_first_match_wins() {
        let pairs = vec![("a", "first"), ("a", "second")];
        assert_eq!(pairs.value("a").as_deref(), Some("first"));
    }

    #[test]
    fn test_json_scalars() {
        let body = json!({ "name": "Ana", "age": 31, "admin": false, "note": null, "tags": ["x"] });
        assert_eq!(body.value("name").as_deref(), Some("Ana"));
        assert_eq!(body.value("age").as_deref(), Some("31"));
        assert_eq!(body.value("admin").as_deref(), Some("false"));
        assert_eq!(body.value("note"), None);
        assert_eq!(body.value("tags").as_deref(), Some(r#"["x"]"#));
        assert_eq!(body.value("missing"), None);
    }

    #[test]
    fn test_non_object_json_is_empty() {
        assert_eq!(json!(["name"]).value("name"), None);
    }
}
