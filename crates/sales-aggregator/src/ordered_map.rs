use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// String-keyed map that iterates in first-insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

/// Two-level grouping, e.g. month -> item -> running total
pub type NestedMap<V> = OrderedMap<OrderedMap<V>>;

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.index.get(key).map(|&pos| &mut self.entries[pos].1)
    }

    /// Inserts `value` under `key`. An existing key keeps its position.
    pub fn insert(&mut self, key: &str, value: V) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.to_owned(), self.entries.len());
                self.entries.push((key.to_owned(), value));
            }
        }
    }

    /// Returns the value under `key`, appending `default()` first if absent.
    pub fn entry_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        let pos = match self.index.get(key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(key.to_owned(), pos);
                self.entries.push((key.to_owned(), default()));
                pos
            }
        };

        &mut self.entries[pos].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<V> OrderedMap<V>
where
    V: Default,
{
    pub fn entry_or_default(&mut self, key: &str) -> &mut V {
        self.entry_or_insert_with(key, V::default)
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'a, V> FromIterator<(&'a str, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
