//! Literal lookup tables that resolve to a default instead of failing

/// A small keyed table with the value used when a key is absent.
///
/// Every enum-driven choice the generator makes goes through one of these,
/// so the fallback for each table sits next to its entries.
pub struct Lookup<K: 'static, V: 'static> {
    entries: &'static [(K, V)],
    fallback: V,
}

impl<K: PartialEq, V: Copy> Lookup<K, V> {
    pub const fn new(entries: &'static [(K, V)], fallback: V) -> Self {
        Self { entries, fallback }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn resolve(&self, key: &K) -> V {
        self.get(key).unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> V {
        self.fallback
    }
}
