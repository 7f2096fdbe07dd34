use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use dashmap::DashMap;

use crate::conf::MinerConfig;
use crate::metrics::MinerMetrics;
use crate::store::{
    IndexDump, InsertOutcome, Parameter, PartitionDump, Template, TemplateStore,
};

/// A match copied out of a [`SharedTemplateIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedMatch<T> {
    pub template: Template<T>,
    pub parameters: Vec<Parameter<T>>,
}

/// Thread-safe partitioned template index
///
/// Each partition's store sits behind its DashMap shard lock, so inserts and
/// lookups on the same key serialize while other keys proceed in parallel.
/// Lookups return owned copies; no lock is held once a call returns.
#[derive(Debug)]
pub struct SharedTemplateIndex<K: Eq + Hash, T> {
    stores: DashMap<K, TemplateStore<T>>,
    config: MinerConfig,
    metrics: MinerMetrics,
}

impl<K: Eq + Hash, T> SharedTemplateIndex<K, T> {
    pub fn new() -> Self {
        Self::with_config(MinerConfig::default())
    }

    pub fn with_config(config: MinerConfig) -> Self {
        Self {
            stores: DashMap::new(),
            config,
            metrics: MinerMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &MinerMetrics {
        &self.metrics
    }

    /// Number of partitions
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stores.contains_key(key)
    }

    pub fn template_count(&self) -> usize {
        self.stores.iter().map(|entry| entry.value().len()).sum()
    }
}

impl<K: Eq + Hash, T: PartialEq + Clone> SharedTemplateIndex<K, T> {
    pub fn insert(&self, key: K, tokens: &[T]) -> InsertOutcome {
        let mut new_partition = false;
        let outcome = {
            let mut store = self.stores.entry(key).or_insert_with(|| {
                new_partition = true;
                TemplateStore::with_config(self.config)
            });
            store.insert(tokens)
        };

        if new_partition {
            tracing::debug!(partitions = self.stores.len(), "index: new partition");
        }
        self.metrics.record_insert(&outcome, new_partition);
        outcome
    }

    pub fn find_match<Q>(&self, key: &Q, tokens: &[T]) -> Option<OwnedMatch<T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self.stores.get(key).and_then(|store| {
            let found = store.find_match_with_parameters(tokens)?;
            let owned = OwnedMatch {
                template: found.template.clone(),
                parameters: found.parameters,
            };
            Some(owned)
        });
        self.metrics.record_lookup(found.is_some());
        found
    }

    /// Copy of the whole store for `key`.
    pub fn snapshot<Q>(&self, key: &Q) -> Option<TemplateStore<T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stores.get(key).map(|store| store.value().clone())
    }
}

impl<K: Eq + Hash + fmt::Display, T: fmt::Display> SharedTemplateIndex<K, T> {
    pub fn dump(&self) -> IndexDump {
        IndexDump::sorted(
            self.stores
                .iter()
                .map(|entry| PartitionDump {
                    key: entry.key().to_string(),
                    store: entry.value().dump(),
                })
                .collect(),
        )
    }
}

impl<K: Eq + Hash, T> Default for SharedTemplateIndex<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
