use std::fmt;

use fos_types::Value;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entry::Entry;
use crate::error::{DictError, DictResult};

/// An insertion-ordered mapping from names to entries.
///
/// State dictionaries are small (tens of entries per object), so entries are
/// kept in a `Vec` and looked up linearly; this keeps file output and key
/// listings in the order the entries were first written.
#[derive(Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: Vec<(String, Entry)>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Returns `true` if `key` exists, as either a value or a sub-dictionary.
    pub fn found(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    /// The value stored at `key`.
    ///
    /// Returns `Ok(None)` if the key is absent and `Err` if it holds a
    /// sub-dictionary.
    pub fn value(&self, key: &str) -> DictResult<Option<&Value>> {
        match self.get(key) {
            None => Ok(None),
            Some(Entry::Value(v)) => Ok(Some(v)),
            Some(Entry::Dict(_)) => Err(DictError::NotAValue {
                key: key.to_string(),
            }),
        }
    }

    /// The sub-dictionary stored at `key`.
    ///
    /// Returns `Ok(None)` if the key is absent and `Err` if it holds a value.
    pub fn sub_dict(&self, key: &str) -> DictResult<Option<&Dictionary>> {
        match self.get(key) {
            None => Ok(None),
            Some(Entry::Dict(d)) => Ok(Some(d)),
            Some(Entry::Value(_)) => Err(DictError::NotADictionary {
                key: key.to_string(),
            }),
        }
    }

    /// The sub-dictionary at `key`, created empty (at the end) if absent.
    pub fn sub_dict_or_add(&mut self, key: &str) -> DictResult<&mut Dictionary> {
        let index = match self.position(key) {
            Some(index) => index,
            None => {
                self.entries
                    .push((key.to_string(), Entry::Dict(Dictionary::new())));
                self.entries.len() - 1
            }
        };
        match &mut self.entries[index].1 {
            Entry::Dict(d) => Ok(d),
            Entry::Value(_) => Err(DictError::NotADictionary {
                key: key.to_string(),
            }),
        }
    }

    /// Insert or overwrite `key`, returning the previous entry.
    ///
    /// An overwritten key keeps its original position.
    pub fn set(&mut self, key: &str, entry: impl Into<Entry>) -> Option<Entry> {
        let entry = entry.into();
        match self.position(key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, entry)),
            None => {
                self.entries.push((key.to_string(), entry));
                None
            }
        }
    }

    pub fn set_value(&mut self, key: &str, value: Value) -> Option<Entry> {
        self.set(key, Entry::Value(value))
    }

    /// Remove `key`, returning its entry if it existed.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).1)
    }

    /// All keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Keys that hold values, in insertion order.
    pub fn value_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, e)| !e.is_dict())
            .map(|(k, _)| k.as_str())
    }

    /// Keys that hold sub-dictionaries, in insertion order.
    pub fn dict_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.is_dict())
            .map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Merge `other` into `self`.
    ///
    /// Sub-dictionaries present on both sides are merged recursively; every
    /// other entry in `other` overwrites the one in `self`. Returns `true` if
    /// anything changed.
    pub fn merge(&mut self, other: &Dictionary) -> bool {
        let mut changed = false;
        for (key, incoming) in &other.entries {
            match (self.position(key), incoming) {
                (Some(index), Entry::Dict(theirs)) => {
                    if let Entry::Dict(ours) = &mut self.entries[index].1 {
                        changed |= ours.merge(theirs);
                    } else {
                        self.entries[index].1 = incoming.clone();
                        changed = true;
                    }
                }
                (Some(index), Entry::Value(_)) => {
                    if self.entries[index].1 != *incoming {
                        self.entries[index].1 = incoming.clone();
                        changed = true;
                    }
                }
                (None, _) => {
                    self.entries.push((key.clone(), incoming.clone()));
                    changed = true;
                }
            }
        }
        changed
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for Dictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

struct DictionaryVisitor;

impl<'de> Visitor<'de> for DictionaryVisitor {
    type Value = Dictionary;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of dictionary entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Dictionary, A::Error> {
        let mut dict = Dictionary::new();
        // Later duplicates overwrite earlier ones in place.
        while let Some((key, entry)) = access.next_entry::<String, Entry>()? {
            dict.set(&key, entry);
        }
        Ok(dict)
    }
}

impl<'de> Deserialize<'de> for Dictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DictionaryVisitor)
    }
}
