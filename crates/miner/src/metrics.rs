use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

use crate::store::InsertOutcome;

/// Forces the wrapped counters onto their own cache line so writers and
/// readers on different cores do not invalidate each other.
#[repr(align(64))]
#[derive(Debug, Default)]
pub struct CacheAligned<T>(pub T);

/// Insert-side counters
#[derive(Debug, Default)]
pub struct WriteMetrics {
    pub inserts: AtomicU64,
    pub templates_created: AtomicU64,
    pub absorptions: AtomicU64,
    pub partitions_created: AtomicU64,
}

/// Lookup-side counters
#[derive(Debug, Default)]
pub struct ReadMetrics {
    pub lookups: AtomicU64,
    pub hits: AtomicU64,
    pub misses: AtomicU64,
}

/// Counters for a [`crate::SharedTemplateIndex`].
///
/// All operations use `Ordering::Relaxed`; a snapshot is not transactional
/// across fields.
#[derive(Debug, Default)]
pub struct MinerMetrics {
    pub writes: CacheAligned<WriteMetrics>,
    pub reads: CacheAligned<ReadMetrics>,
}

impl MinerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_insert(&self, outcome: &InsertOutcome, new_partition: bool) {
        self.writes.0.inserts.fetch_add(1, Ordering::Relaxed);
        if outcome.created {
            self.writes.0.templates_created.fetch_add(1, Ordering::Relaxed);
        } else {
            self.writes.0.absorptions.fetch_add(1, Ordering::Relaxed);
        }
        if new_partition {
            self.writes.0.partitions_created.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_lookup(&self, hit: bool) {
        self.reads.0.lookups.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.reads.0.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.reads.0.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let lookups = self.reads.0.lookups.load(Ordering::Relaxed);
        let hits = self.reads.0.hits.load(Ordering::Relaxed);

        MetricsSnapshot {
            inserts: self.writes.0.inserts.load(Ordering::Relaxed),
            templates_created: self.writes.0.templates_created.load(Ordering::Relaxed),
            absorptions: self.writes.0.absorptions.load(Ordering::Relaxed),
            partitions_created: self.writes.0.partitions_created.load(Ordering::Relaxed),
            lookups,
            hits,
            misses: self.reads.0.misses.load(Ordering::Relaxed),
            hit_ratio: if lookups > 0 {
                hits as f64 / lookups as f64
            } else {
                0.0
            },
        }
    }
}

/// Point-in-time copy of [`MinerMetrics`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub inserts: u64,
    pub templates_created: u64,
    pub absorptions: u64,
    pub partitions_created: u64,
    pub lookups: u64,
    pub hits: u64,
    pub misses: u64,
    /// hits / lookups, 0.0 before the first lookup
    pub hit_ratio: f64,
}
