//! Shared-genre computation for the similar-bands endpoint.

use std::collections::HashSet;
use std::hash::Hash;

/// Items of `candidate` whose key also appears in `source`, in `candidate`
/// order.
pub fn shared_by_key<T, K, F>(source: &[T], candidate: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let source_keys: HashSet<K> = source.iter().map(&key).collect();
    candidate
        .iter()
        .filter(|item| source_keys.contains(&key(item)))
        .cloned()
        .collect()
}
