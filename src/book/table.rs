//! Keyed record tables (units, contributors, references, glossary).

use rustc_hash::FxHashMap;

use crate::data::DataError;

/// A record addressed by a unique string key.
pub trait Keyed {
    /// Table name used in diagnostics (`contributor`, `reference`, ...).
    const TABLE: &'static str;

    fn key(&self) -> &str;
}

/// Read-only table of records, kept in source order with an O(1) key index.
#[derive(Debug, Clone)]
pub struct KeyedTable<T> {
    records: Vec<T>,
    index: FxHashMap<String, usize>,
}

impl<T: Keyed> KeyedTable<T> {
    /// Build a table, rejecting duplicate keys.
    pub fn new(records: Vec<T>) -> Result<Self, DataError> {
        let mut index = FxHashMap::default();
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.key().to_string(), i).is_some() {
                return Err(DataError::DuplicateKey {
                    table: T::TABLE,
                    key: record.key().to_string(),
                });
            }
        }
        Ok(Self { records, index })
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> Default for KeyedTable<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}
