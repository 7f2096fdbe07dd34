//! PartitionedTemplateStore: one independent [`TemplateStore`] per key.
//!
//! The key is whatever the caller uses to split its stream (process name,
//! container id, log source). Records under different keys are never
//! compared, so each lookup only scans the templates of its own partition.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::dump::{IndexDump, PartitionDump};
use super::flat::{InsertOutcome, TemplateMatch, TemplateStore};
use crate::conf::MinerConfig;

#[derive(Debug, Clone)]
pub struct PartitionedTemplateStore<K, T> {
    stores: HashMap<K, TemplateStore<T>>,
    /// Applied to every store created from now on
    config: MinerConfig,
}

impl<K: Eq + Hash, T> PartitionedTemplateStore<K, T> {
    pub fn new() -> Self {
        Self::with_config(MinerConfig::default())
    }

    pub fn with_config(config: MinerConfig) -> Self {
        Self {
            stores: HashMap::new(),
            config,
        }
    }

    /// Store for `key`, if anything was inserted under it.
    pub fn store<Q>(&self, key: &Q) -> Option<&TemplateStore<T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stores.get(key)
    }

    /// Number of partitions
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.stores.keys()
    }

    /// Templates across all partitions
    pub fn template_count(&self) -> usize {
        self.stores.values().map(TemplateStore::len).sum()
    }
}

impl<K: Eq + Hash, T: PartialEq + Clone> PartitionedTemplateStore<K, T> {
    /// Insert `tokens` into the store for `key`, creating the store on first use.
    pub fn insert(&mut self, key: K, tokens: &[T]) -> InsertOutcome {
        let partitions = self.stores.len();
        let store = match self.stores.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!(partitions = partitions + 1, "partition: new store");
                entry.insert(TemplateStore::with_config(self.config))
            }
        };
        store.insert(tokens)
    }

    /// Best template for `tokens` under `key`, with the record's values at
    /// each wildcard slot. Unknown keys never match.
    pub fn find_match<Q>(&self, key: &Q, tokens: &[T]) -> Option<TemplateMatch<'_, T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stores.get(key)?.find_match_with_parameters(tokens)
    }
}

impl<K: Eq + Hash + fmt::Display, T: fmt::Display> PartitionedTemplateStore<K, T> {
    pub fn dump(&self) -> IndexDump {
        IndexDump::sorted(
            self.stores
                .iter()
                .map(|(key, store)| PartitionDump {
                    key: key.to_string(),
                    store: store.dump(),
                })
                .collect(),
        )
    }
}

impl<K: Eq + Hash, T> Default for PartitionedTemplateStore<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
