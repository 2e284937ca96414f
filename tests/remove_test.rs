use std::sync::Arc;

use widemap::{
    BytesCodec, Direction, MapOptions, MemoryStore, OrderedStoreClient, PartialFailure,
    PartitionId, RawEntry, Result, Slice, StoreRange, WideMap,
};

fn keys_of(map: &WideMap<Slice, BytesCodec>) -> Vec<u64> {
    map.find_first_keys(100)
        .unwrap()
        .into_iter()
        .map(|k| u64::from_be_bytes(k.data().try_into().unwrap()))
        .collect()
}

fn seeded_map(store: Arc<dyn OrderedStoreClient>, n: u64) -> WideMap<Slice, BytesCodec> {
    let options = MapOptions {
        page_size: 2,
        default_ttl: None,
    };
    let map = WideMap::with_options(store, PartitionId::new("jobs"), BytesCodec, options);
    for i in 1..=n {
        map.insert(Slice::from(i), &Slice::from(format!("v{i}")))
            .unwrap();
    }
    map
}

#[test]
fn test_remove_range_inclusive_and_exclusive() {
    let map = seeded_map(Arc::new(MemoryStore::new()), 6);

    let outcome = map
        .remove_range_bounds_exclusive(Slice::from(1u64), Slice::from(4u64))
        .unwrap();
    assert!(outcome.is_complete());
    assert_eq!(keys_of(&map), vec![1, 4, 5, 6]);

    let outcome = map.remove_range(Slice::from(4u64), Slice::from(5u64)).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(keys_of(&map), vec![1, 6]);
}

#[test]
fn test_remove_first_and_last() {
    let map = seeded_map(Arc::new(MemoryStore::new()), 5);

    map.remove_first().unwrap();
    assert_eq!(keys_of(&map), vec![2, 3, 4, 5]);

    map.remove_last().unwrap();
    assert_eq!(keys_of(&map), vec![2, 3, 4]);

    map.remove_last_n(2).unwrap();
    assert_eq!(keys_of(&map), vec![2]);

    // Counts beyond the partition length drain what is there
    map.remove_first_n(10).unwrap();
    assert_eq!(keys_of(&map), Vec::<u64>::new());
}

#[test]
fn test_remove_inverted_range_is_noop() {
    let map = seeded_map(Arc::new(MemoryStore::new()), 4);
    let outcome = map.remove_range(Slice::from(4u64), Slice::from(1u64)).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(keys_of(&map), vec![1, 2, 3, 4]);
}

/// Wrapper that hides the inner store's native range delete, forcing
/// the paged scan-then-delete strategy.
struct NoRangeDelete(MemoryStore);

impl OrderedStoreClient for NoRangeDelete {
    fn fetch_range(
        &self,
        partition: &PartitionId,
        range: &StoreRange,
        direction: Direction,
        max_entries: usize,
    ) -> Result<Vec<RawEntry>> {
        self.0.fetch_range(partition, range, direction, max_entries)
    }
    fn put(&self, partition: &PartitionId, key: Slice, value: Slice, ttl: Option<u32>) -> Result<()> {
        self.0.put(partition, key, value, ttl)
    }
    fn delete(&self, partition: &PartitionId, key: &Slice) -> Result<()> {
        self.0.delete(partition, key)
    }
    fn delete_range(
        &self,
        _: &PartitionId,
        _: &StoreRange,
    ) -> std::result::Result<(), PartialFailure> {
        unreachable!("store advertises no native range delete");
    }
    fn supports_range_delete(&self) -> bool {
        false
    }
}

#[test]
fn test_fallback_strategy_matches_native_semantics() {
    let native = seeded_map(Arc::new(MemoryStore::new()), 8);
    let paged = seeded_map(Arc::new(NoRangeDelete(MemoryStore::new())), 8);

    for map in [&native, &paged] {
        let outcome = map.remove_range(Slice::from(3u64), Slice::from(6u64)).unwrap();
        assert!(outcome.is_complete());
    }
    assert_eq!(keys_of(&native), keys_of(&paged));
    assert_eq!(keys_of(&native), vec![1, 2, 7, 8]);

    // Only the native map issued a range delete
    assert_eq!(native.statistics().num_range_deletes(), 1);
    assert_eq!(paged.statistics().num_range_deletes(), 0);
    assert_eq!(paged.statistics().num_keys_deleted(), 4);
}

/// Store whose native range delete confirms only part of the range.
struct PartialRangeDelete(MemoryStore);

impl OrderedStoreClient for PartialRangeDelete {
    fn fetch_range(
        &self,
        partition: &PartitionId,
        range: &StoreRange,
        direction: Direction,
        max_entries: usize,
    ) -> Result<Vec<RawEntry>> {
        self.0.fetch_range(partition, range, direction, max_entries)
    }
    fn put(&self, partition: &PartitionId, key: Slice, value: Slice, ttl: Option<u32>) -> Result<()> {
        self.0.put(partition, key, value, ttl)
    }
    fn delete(&self, partition: &PartitionId, key: &Slice) -> Result<()> {
        self.0.delete(partition, key)
    }
    fn delete_range(
        &self,
        partition: &PartitionId,
        range: &StoreRange,
    ) -> std::result::Result<(), PartialFailure> {
        // Delete everything the window covers except one straggler
        let survivors = self
            .0
            .fetch_range(partition, range, Direction::Forward, usize::MAX)
            .map_err(|e| PartialFailure {
                failed_keys: Vec::new(),
                message: e.to_string(),
            })?;
        let Some((last, head)) = survivors.split_last() else {
            return Ok(());
        };
        for entry in head {
            let _ = self.0.delete(partition, &entry.key);
        }
        Err(PartialFailure {
            failed_keys: vec![last.key.clone()],
            message: "one replica did not acknowledge".to_string(),
        })
    }
}

#[test]
fn test_partial_failure_reports_unconfirmed_keys() {
    let map = seeded_map(Arc::new(PartialRangeDelete(MemoryStore::new())), 5);

    let outcome = map.remove_range(Slice::from(1u64), Slice::from(3u64)).unwrap();
    assert!(!outcome.is_complete());
    assert_eq!(outcome.failed_keys, vec![Slice::from(3u64)]);

    // Issued deletes stayed deleted; only the unconfirmed key remains
    assert_eq!(keys_of(&map), vec![3, 4, 5]);
}
