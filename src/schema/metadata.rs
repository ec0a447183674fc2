use indexmap::IndexMap;

/// The blanket inheritance rule for metadata across hierarchy levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataInheritance {
    /// Only the declaring level's own entries survive.
    #[default]
    Never,
    /// Entries from every ancestor level are merged in, the child
    /// overriding on key collision.
    Always,
}

/// Removes keys from the final merged metadata regardless of the level
/// that declared them.
#[derive(Debug, Clone, Default)]
pub enum MetadataIgnore {
    #[default]
    None,
    /// An exact set of keys.
    Keys(Vec<String>),
    /// A matching function over the key.
    Predicate(fn(&str) -> bool),
}

impl MetadataIgnore {
    pub(crate) fn matches(&self, key: &str) -> bool {
        match self {
            MetadataIgnore::None => false,
            MetadataIgnore::Keys(keys) => keys.iter().any(|k| k == key),
            MetadataIgnore::Predicate(predicate) => predicate(key),
        }
    }
}

/// How table and member metadata merges across a type hierarchy. Evaluated
/// per key: the blanket rule first, then the always-inherited keys, then
/// the ignore rule over the merged result.
#[derive(Debug, Clone, Default)]
pub struct MetadataPolicy {
    pub(crate) inheritance: MetadataInheritance,
    pub(crate) always_inherit: Vec<String>,
    pub(crate) ignore: MetadataIgnore,
}

impl MetadataPolicy {
    /// The default policy: nothing inherits.
    pub fn never() -> Self {
        MetadataPolicy::default()
    }

    /// Inherit every entry from every ancestor level, child overriding.
    pub fn always() -> Self {
        MetadataPolicy {
            inheritance: MetadataInheritance::Always,
            ..MetadataPolicy::default()
        }
    }

    /// Inherits the key from ancestor levels even under the `Never`
    /// blanket rule.
    pub fn always_inherit(mut self, key: impl Into<String>) -> Self {
        self.always_inherit.push(key.into());
        self
    }

    /// Drops the exact keys from the merged result.
    pub fn ignore_keys(mut self, keys: Vec<String>) -> Self {
        self.ignore = MetadataIgnore::Keys(keys);
        self
    }

    /// Drops every key the function matches from the merged result.
    pub fn ignore_matching(mut self, predicate: fn(&str) -> bool) -> Self {
        self.ignore = MetadataIgnore::Predicate(predicate);
        self
    }
}

/// Merges per-level metadata maps, root level first, into the final map
/// under the given policy.
pub(crate) fn merge_levels(
    levels: &[IndexMap<String, serde_json::Value>],
    policy: &MetadataPolicy,
) -> IndexMap<String, serde_json::Value> {
    let mut merged = IndexMap::new();

    match policy.inheritance {
        MetadataInheritance::Always => {
            for level in levels {
                for (key, value) in level {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        MetadataInheritance::Never => {
            if let Some(leaf) = levels.last() {
                merged = leaf.clone();
            }

            // Listed keys inherit regardless, nearest level wins.
            for key in policy.always_inherit.iter() {
                if merged.contains_key(key) {
                    continue;
                }

                for level in levels.iter().rev() {
                    if let Some(value) = level.get(key) {
                        merged.insert(key.clone(), value.clone());
                        break;
                    }
                }
            }
        }
    }

    merged.retain(|key, _| !policy.ignore.matches(key));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn level(entries: &[(&str, i64)]) -> IndexMap<String, serde_json::Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    #[test]
    fn the_default_policy_keeps_the_leaf_level_only() {
        let levels = vec![level(&[("a", 1), ("b", 1)]), level(&[("b", 2)])];
        let merged = merge_levels(&levels, &MetadataPolicy::never());

        assert_eq!(1, merged.len());
        assert_eq!(json!(2), merged["b"]);
    }

    #[test]
    fn always_merges_every_level_with_the_child_overriding() {
        let levels = vec![level(&[("a", 1), ("b", 1)]), level(&[("b", 2)])];
        let merged = merge_levels(&levels, &MetadataPolicy::always());

        assert_eq!(json!(1), merged["a"]);
        assert_eq!(json!(2), merged["b"]);
    }

    #[test]
    fn listed_keys_inherit_under_the_never_policy() {
        let levels = vec![level(&[("a", 1)]), level(&[("b", 2)])];
        let policy = MetadataPolicy::never().always_inherit("a");
        let merged = merge_levels(&levels, &policy);

        assert_eq!(json!(1), merged["a"]);
        assert_eq!(json!(2), merged["b"]);
    }

    #[test]
    fn ignored_keys_are_dropped_from_every_level() {
        let levels = vec![level(&[("a", 1)]), level(&[("a", 2), ("ab", 3)])];
        let policy = MetadataPolicy::always().ignore_matching(|key| key.starts_with('a'));

        assert!(merge_levels(&levels, &policy).is_empty());
    }

    #[test]
    fn a_key_list_ignores_exact_matches_only() {
        let levels = vec![level(&[("a", 1), ("ab", 2), ("b", 3)])];
        let policy = MetadataPolicy::never().ignore_keys(vec!["a".to_string()]);
        let merged = merge_levels(&levels, &policy);

        assert_eq!(2, merged.len());
        assert_eq!(json!(2), merged["ab"]);
        assert_eq!(json!(3), merged["b"]);
    }

    #[test]
    fn an_ignored_key_is_dropped_even_when_always_inherited() {
        let levels = vec![level(&[("a", 1)]), level(&[("b", 2)])];
        let policy = MetadataPolicy::never()
            .always_inherit("a")
            .ignore_keys(vec!["a".to_string()]);

        let merged = merge_levels(&levels, &policy);

        assert_eq!(1, merged.len());
        assert_eq!(json!(2), merged["b"]);
    }
}
