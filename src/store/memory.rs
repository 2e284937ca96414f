use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_skiplist::SkipMap;
use parking_lot::RwLock;

use crate::store::{Direction, OrderedStoreClient, PartialFailure, PartitionId, RawEntry, StoreRange};
use crate::util::{Result, Slice};

struct Cell {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Cell {
    fn is_live(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now < deadline,
            None => true,
        }
    }
}

/// Partition rows behind a RwLock. BTreeMap rather than a skip list:
/// the store contract requires reverse iteration at comparable cost.
struct PartitionRows {
    rows: RwLock<BTreeMap<Vec<u8>, Cell>>,
}

impl PartitionRows {
    fn new() -> Self {
        PartitionRows {
            rows: RwLock::new(BTreeMap::new()),
        }
    }
}

/// In-memory ordered wide-row store.
///
/// Reference implementation of [`OrderedStoreClient`] used by tests,
/// benches, and embedded callers. Partitions live in a lock-free skip
/// map so independent partitions never contend; rows within a partition
/// share one RwLock. TTL'd cells are filtered from reads once expired.
pub struct MemoryStore {
    partitions: SkipMap<Vec<u8>, Arc<PartitionRows>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            partitions: SkipMap::new(),
        }
    }

    fn partition(&self, id: &PartitionId) -> Arc<PartitionRows> {
        self.partitions
            .get_or_insert_with(id.as_slice().to_vec(), || Arc::new(PartitionRows::new()))
            .value()
            .clone()
    }

    fn window(range: &StoreRange) -> (Bound<Vec<u8>>, Bound<Vec<u8>>) {
        let lower = match (&range.lower, range.lower_inclusive) {
            (None, _) => Bound::Unbounded,
            (Some(k), true) => Bound::Included(k.to_vec()),
            (Some(k), false) => Bound::Excluded(k.to_vec()),
        };
        let upper = match (&range.upper, range.upper_inclusive) {
            (None, _) => Bound::Unbounded,
            (Some(k), true) => Bound::Included(k.to_vec()),
            (Some(k), false) => Bound::Excluded(k.to_vec()),
        };
        (lower, upper)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedStoreClient for MemoryStore {
    fn fetch_range(
        &self,
        partition: &PartitionId,
        range: &StoreRange,
        direction: Direction,
        max_entries: usize,
    ) -> Result<Vec<RawEntry>> {
        // BTreeMap::range panics on inverted windows; the scanner
        // short-circuits these, but raw clients may not.
        if range.is_empty_window() || max_entries == 0 {
            return Ok(Vec::new());
        }

        let rows = self.partition(partition);
        let guard = rows.rows.read();
        let now = Instant::now();

        let live = |(k, cell): (&Vec<u8>, &Cell)| {
            if cell.is_live(now) {
                Some(RawEntry {
                    key: Slice::from_bytes(k),
                    value: Slice::from_bytes(&cell.value),
                })
            } else {
                None
            }
        };

        let window = guard.range(Self::window(range));
        let entries = match direction {
            Direction::Forward => window.filter_map(live).take(max_entries).collect(),
            Direction::Reverse => window.rev().filter_map(live).take(max_entries).collect(),
        };
        Ok(entries)
    }

    fn put(
        &self,
        partition: &PartitionId,
        key: Slice,
        value: Slice,
        ttl_seconds: Option<u32>,
    ) -> Result<()> {
        let rows = self.partition(partition);
        let expires_at = ttl_seconds.map(|s| Instant::now() + Duration::from_secs(u64::from(s)));
        rows.rows.write().insert(
            key.to_vec(),
            Cell {
                value: value.to_vec(),
                expires_at,
            },
        );
        Ok(())
    }

    fn delete(&self, partition: &PartitionId, key: &Slice) -> Result<()> {
        let rows = self.partition(partition);
        rows.rows.write().remove(key.data());
        Ok(())
    }

    fn delete_range(
        &self,
        partition: &PartitionId,
        range: &StoreRange,
    ) -> std::result::Result<(), PartialFailure> {
        if range.is_empty_window() {
            return Ok(());
        }
        let rows = self.partition(partition);
        let mut guard = rows.rows.write();
        let doomed: Vec<Vec<u8>> = guard
            .range(Self::window(range))
            .map(|(k, _)| k.clone())
            .collect();
        for key in doomed {
            guard.remove(&key);
        }
        Ok(())
    }
}
