use super::descriptor::Descriptor;
use super::key::ComparisonKey;
use crate::errors::{CompareError, Result};
use crate::model::Strategy;
use std::collections::btree_map::{self, BTreeMap};

/// Mapping from comparison key to descriptor for one document
///
/// Keys are unique: inserting a key twice is an error, never an overwrite.
#[derive(Debug, Clone)]
pub struct RecordIndex<'t> {
    strategy: Strategy,
    records: BTreeMap<ComparisonKey, Descriptor<'t>>,
}

impl<'t> RecordIndex<'t> {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            records: BTreeMap::new(),
        }
    }

    /// Strategy every key in this index was derived with
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Insert a descriptor under its key
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` naming both records if the key is already taken.
    pub fn insert(&mut self, key: ComparisonKey, descriptor: Descriptor<'t>) -> Result<()> {
        match self.records.entry(key) {
            btree_map::Entry::Occupied(existing) => Err(CompareError::DuplicateKey {
                key: existing.key().to_string(),
                first_path: existing.get().display_path().to_string(),
                second_path: descriptor.display_path().to_string(),
            }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(descriptor);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &ComparisonKey) -> Option<&Descriptor<'t>> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &ComparisonKey) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in key order
    pub fn iter(&self) -> impl Iterator<Item = (&ComparisonKey, &Descriptor<'t>)> {
        self.records.iter()
    }
}
