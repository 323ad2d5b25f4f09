//! Container coercion for macro-generated code
//!
//! The derive classifies `Option`, `Vec` and map fields syntactically and
//! hands the element coercion back in as a closure, so custom-capability
//! dispatch stays per-concrete-type at every nesting depth. Containers are
//! built aside and swapped in on success; a failed element leaves the field
//! exactly as it was.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::error::CoerceError;

/// Coerce into an `Option<T>` pointee, allocating a zero value on demand.
#[doc(hidden)]
pub fn pointee<T, F>(value: &mut Option<T>, raw: &str, coerce: F) -> anyhow::Result<()>
where
    T: Default,
    F: FnOnce(&mut T, &str) -> anyhow::Result<()>,
{
    coerce(value.get_or_insert_with(T::default), raw)
}

/// Coerce a comma-separated sequence. An empty raw string yields an empty
/// vector; any element failure fails the whole field.
#[doc(hidden)]
pub fn sequence<T, F>(value: &mut Vec<T>, raw: &str, mut coerce: F) -> anyhow::Result<()>
where
    T: Default,
    F: FnMut(&mut T, &str) -> anyhow::Result<()>,
{
    let mut items = Vec::new();
    if !raw.is_empty() {
        for part in raw.split(',') {
            let mut item = T::default();
            coerce(&mut item, part)?;
            items.push(item);
        }
    }
    *value = items;
    Ok(())
}

/// Map-shaped collections the associative rule can build into.
#[doc(hidden)]
pub trait Mapping<K, V>: Default {
    fn insert(&mut self, key: K, value: V);
}

impl<K: Eq + Hash, V> Mapping<K, V> for HashMap<K, V> {
    fn insert(&mut self, key: K, value: V) {
        HashMap::insert(self, key, value);
    }
}

impl<K: Ord, V> Mapping<K, V> for BTreeMap<K, V> {
    fn insert(&mut self, key: K, value: V) {
        BTreeMap::insert(self, key, value);
    }
}

/// Coerce a comma-separated list of `key:value` pairs. A blank raw string
/// (after trimming) yields an empty map; a pair without exactly one `:`
/// fails with [`CoerceError::InvalidMapItem`].
#[doc(hidden)]
pub fn mapping<K, V, M, FK, FV>(
    value: &mut M,
    raw: &str,
    mut coerce_key: FK,
    mut coerce_value: FV,
) -> anyhow::Result<()>
where
    K: Default,
    V: Default,
    M: Mapping<K, V>,
    FK: FnMut(&mut K, &str) -> anyhow::Result<()>,
    FV: FnMut(&mut V, &str) -> anyhow::Result<()>,
{
    let mut entries = M::default();
    if !raw.trim().is_empty() {
        for pair in raw.split(',') {
            let mut sides = pair.split(':');
            let (raw_key, raw_value) = match (sides.next(), sides.next(), sides.next()) {
                (Some(k), Some(v), None) => (k, v),
                _ => {
                    return Err(CoerceError::InvalidMapItem {
                        item: pair.to_string(),
                    }
                    .into())
                }
            };
            let mut key = K::default();
            coerce_key(&mut key, raw_key)?;
            let mut entry = V::default();
            coerce_value(&mut entry, raw_value)?;
            entries.insert(key, entry);
        }
    }
    *value = entries;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EnvValue;

    fn via_env_value<T: EnvValue>(value: &mut T, raw: &str) -> anyhow::Result<()> {
        value.assign(raw)
    }

    #[test]
    fn test_pointee_allocates_on_demand() {
        let mut value: Option<u16> = None;
        pointee(&mut value, "8080", via_env_value).unwrap();
        assert_eq!(value, Some(8080));
    }

    #[test]
    fn test_sequence_splits_on_comma() {
        let mut value: Vec<i32> = Vec::new();
        sequence(&mut value, "5,10,20", via_env_value).unwrap();
        assert_eq!(value, vec![5, 10, 20]);
    }

    #[test]
    fn test_sequence_empty_raw_is_empty_vec() {
        let mut value = vec![1, 2, 3];
        sequence(&mut value, "", via_env_value).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_sequence_element_failure_leaves_field() {
        let mut value = vec![7];
        assert!(sequence(&mut value, "1,nope,3", via_env_value).is_err());
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_mapping_pairs() {
        let mut value: HashMap<String, i32> = HashMap::new();
        mapping(&mut value, "red:1,green:2", via_env_value, via_env_value).unwrap();
        assert_eq!(value.len(), 2);
        assert_eq!(value["red"], 1);
        assert_eq!(value["green"], 2);
    }

    #[test]
    fn test_mapping_blank_is_empty_map() {
        let mut value: HashMap<String, String> =
            HashMap::from([("stale".to_string(), "x".to_string())]);
        mapping(&mut value, "  ", via_env_value, via_env_value).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_mapping_requires_single_separator() {
        let mut value: HashMap<String, i32> = HashMap::new();
        for raw in ["red1", "red:1:2"] {
            let err = mapping(&mut value, raw, via_env_value, via_env_value).unwrap_err();
            let cause = err.downcast_ref::<CoerceError>();
            assert!(
                matches!(cause, Some(CoerceError::InvalidMapItem { .. })),
                "{raw:?}"
            );
        }
        assert!(value.is_empty());
    }

    #[test]
    fn test_mapping_btree() {
        let mut value: BTreeMap<String, u8> = BTreeMap::new();
        mapping(&mut value, "a:1,b:2", via_env_value, via_env_value).unwrap();
        assert_eq!(value.keys().collect::<Vec<_>>(), ["a", "b"]);
    }
}
