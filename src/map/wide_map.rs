use std::marker::PhantomData;
use std::sync::Arc;

use crate::codec::Codec;
use crate::iterator::PagedIterator;
use crate::map::deleter::{RangeDeleter, RemoveOutcome};
use crate::map::{Entry, MapOptions};
use crate::scan::BoundSpec;
use crate::store::{OrderedStoreClient, PartitionId};
use crate::statistics::Statistics;
use crate::util::{Result, Slice};

/// Sorted multi-valued map over one partition of an ordered wide-row
/// store.
///
/// Every read operation is one `BoundSpec` plus a projection (pairs,
/// keys, values); every ranged remove reuses the same spec semantics.
/// `find*` calls drain a [`PagedIterator`] into a list; `iter*` calls
/// return the live iterator instead.
///
/// Naming follows scan order: `find_reverse(start, end, n)` expects
/// `start` to be the logically greater key and returns entries in
/// descending order, while `find_last_n` re-sorts its tail window back
/// to ascending order before returning.
pub struct WideMap<V, C: Codec<V>> {
    store: Arc<dyn OrderedStoreClient>,
    partition: PartitionId,
    codec: Arc<C>,
    options: MapOptions,
    statistics: Arc<Statistics>,
    _marker: PhantomData<fn() -> V>,
}

impl<V, C: Codec<V>> WideMap<V, C> {
    pub fn new(store: Arc<dyn OrderedStoreClient>, partition: PartitionId, codec: C) -> Self {
        Self::with_options(store, partition, codec, MapOptions::default())
    }

    pub fn with_options(
        store: Arc<dyn OrderedStoreClient>,
        partition: PartitionId,
        codec: C,
        options: MapOptions,
    ) -> Self {
        WideMap {
            store,
            partition,
            codec: Arc::new(codec),
            options,
            statistics: Arc::new(Statistics::new()),
            _marker: PhantomData,
        }
    }

    pub fn partition(&self) -> &PartitionId {
        &self.partition
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn statistics(&self) -> &Arc<Statistics> {
        &self.statistics
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Insert a value under `key`, overwriting any previous value.
    /// No read-before-write. `MapOptions::default_ttl` applies when set.
    pub fn insert(&self, key: Slice, value: &V) -> Result<()> {
        self.put_internal(key, value, self.options.default_ttl)
    }

    /// Insert with an explicit time-to-live in seconds.
    pub fn insert_with_ttl(&self, key: Slice, value: &V, ttl_seconds: u32) -> Result<()> {
        self.put_internal(key, value, Some(ttl_seconds))
    }

    fn put_internal(&self, key: Slice, value: &V, ttl: Option<u32>) -> Result<()> {
        let raw = self.codec.encode(value)?;
        self.statistics
            .record_write((key.size() + raw.size()) as u64);
        self.store.put(&self.partition, key, raw, ttl)
    }

    // ------------------------------------------------------------------
    // Point read
    // ------------------------------------------------------------------

    /// Fetch the value under `key`. Absence is `Ok(None)`, not an error.
    pub fn get(&self, key: &Slice) -> Result<Option<V>> {
        let mut it = self.scan(BoundSpec::single(key.clone()));
        if it.has_next()? {
            Ok(Some(it.next_value()?))
        } else {
            Ok(None)
        }
    }

    // ------------------------------------------------------------------
    // Finds: key/value pairs
    // ------------------------------------------------------------------

    /// Range of pairs, bounds inclusive, ascending.
    pub fn find(&self, start: Slice, end: Slice, count: usize) -> Result<Vec<Entry<V>>> {
        self.find_range(Some(start), true, Some(end), true, false, count)
    }

    /// Range of pairs, bounds exclusive, ascending.
    pub fn find_bounds_exclusive(
        &self,
        start: Slice,
        end: Slice,
        count: usize,
    ) -> Result<Vec<Entry<V>>> {
        self.find_range(Some(start), false, Some(end), false, false, count)
    }

    /// Range of pairs, bounds inclusive, descending. `start` is the
    /// logically greater key; results stay in descending order.
    pub fn find_reverse(&self, start: Slice, end: Slice, count: usize) -> Result<Vec<Entry<V>>> {
        self.find_range(Some(start), true, Some(end), true, true, count)
    }

    /// Range of pairs, bounds exclusive, descending.
    pub fn find_reverse_bounds_exclusive(
        &self,
        start: Slice,
        end: Slice,
        count: usize,
    ) -> Result<Vec<Entry<V>>> {
        self.find_range(Some(start), false, Some(end), false, true, count)
    }

    /// Canonical find: every other find is sugar over this.
    pub fn find_range(
        &self,
        start: Option<Slice>,
        start_inclusive: bool,
        end: Option<Slice>,
        end_inclusive: bool,
        reverse: bool,
        count: usize,
    ) -> Result<Vec<Entry<V>>> {
        let spec = BoundSpec::normalize(
            start,
            start_inclusive,
            end,
            end_inclusive,
            reverse,
            Some(count),
        )?;
        self.drain_entries(spec)
    }

    /// First pair in key order.
    pub fn find_first(&self) -> Result<Option<Entry<V>>> {
        Ok(self.find_first_n(1)?.pop())
    }

    /// Up to `count` first pairs, ascending.
    pub fn find_first_n(&self, count: usize) -> Result<Vec<Entry<V>>> {
        self.drain_entries(BoundSpec::first_n(count)?)
    }

    /// Last pair in key order.
    pub fn find_last(&self) -> Result<Option<Entry<V>>> {
        Ok(self.find_last_n(1)?.pop())
    }

    /// Up to `count` last pairs, re-sorted back to ascending order.
    pub fn find_last_n(&self, count: usize) -> Result<Vec<Entry<V>>> {
        let mut entries = self.drain_entries(BoundSpec::last_n(count)?)?;
        entries.reverse();
        Ok(entries)
    }

    // ------------------------------------------------------------------
    // Finds: keys only (values never decoded)
    // ------------------------------------------------------------------

    pub fn find_keys(&self, start: Slice, end: Slice, count: usize) -> Result<Vec<Slice>> {
        self.find_keys_range(Some(start), true, Some(end), true, false, count)
    }

    pub fn find_keys_bounds_exclusive(
        &self,
        start: Slice,
        end: Slice,
        count: usize,
    ) -> Result<Vec<Slice>> {
        self.find_keys_range(Some(start), false, Some(end), false, false, count)
    }

    pub fn find_keys_reverse(&self, start: Slice, end: Slice, count: usize) -> Result<Vec<Slice>> {
        self.find_keys_range(Some(start), true, Some(end), true, true, count)
    }

    pub fn find_keys_reverse_bounds_exclusive(
        &self,
        start: Slice,
        end: Slice,
        count: usize,
    ) -> Result<Vec<Slice>> {
        self.find_keys_range(Some(start), false, Some(end), false, true, count)
    }

    pub fn find_keys_range(
        &self,
        start: Option<Slice>,
        start_inclusive: bool,
        end: Option<Slice>,
        end_inclusive: bool,
        reverse: bool,
        count: usize,
    ) -> Result<Vec<Slice>> {
        let spec = BoundSpec::normalize(
            start,
            start_inclusive,
            end,
            end_inclusive,
            reverse,
            Some(count),
        )?;
        self.drain_keys(spec)
    }

    pub fn find_first_key(&self) -> Result<Option<Slice>> {
        Ok(self.find_first_keys(1)?.pop())
    }

    pub fn find_first_keys(&self, count: usize) -> Result<Vec<Slice>> {
        self.drain_keys(BoundSpec::first_n(count)?)
    }

    pub fn find_last_key(&self) -> Result<Option<Slice>> {
        Ok(self.find_last_keys(1)?.pop())
    }

    pub fn find_last_keys(&self, count: usize) -> Result<Vec<Slice>> {
        let mut keys = self.drain_keys(BoundSpec::last_n(count)?)?;
        keys.reverse();
        Ok(keys)
    }

    // ------------------------------------------------------------------
    // Finds: values only
    // ------------------------------------------------------------------

    pub fn find_values(&self, start: Slice, end: Slice, count: usize) -> Result<Vec<V>> {
        self.find_values_range(Some(start), true, Some(end), true, false, count)
    }

    pub fn find_values_bounds_exclusive(
        &self,
        start: Slice,
        end: Slice,
        count: usize,
    ) -> Result<Vec<V>> {
        self.find_values_range(Some(start), false, Some(end), false, false, count)
    }

    pub fn find_values_reverse(&self, start: Slice, end: Slice, count: usize) -> Result<Vec<V>> {
        self.find_values_range(Some(start), true, Some(end), true, true, count)
    }

    pub fn find_values_reverse_bounds_exclusive(
        &self,
        start: Slice,
        end: Slice,
        count: usize,
    ) -> Result<Vec<V>> {
        self.find_values_range(Some(start), false, Some(end), false, true, count)
    }

    pub fn find_values_range(
        &self,
        start: Option<Slice>,
        start_inclusive: bool,
        end: Option<Slice>,
        end_inclusive: bool,
        reverse: bool,
        count: usize,
    ) -> Result<Vec<V>> {
        let spec = BoundSpec::normalize(
            start,
            start_inclusive,
            end,
            end_inclusive,
            reverse,
            Some(count),
        )?;
        self.drain_values(spec)
    }

    pub fn find_first_value(&self) -> Result<Option<V>> {
        Ok(self.find_first_values(1)?.pop())
    }

    pub fn find_first_values(&self, count: usize) -> Result<Vec<V>> {
        self.drain_values(BoundSpec::first_n(count)?)
    }

    pub fn find_last_value(&self) -> Result<Option<V>> {
        Ok(self.find_last_values(1)?.pop())
    }

    pub fn find_last_values(&self, count: usize) -> Result<Vec<V>> {
        let mut values = self.drain_values(BoundSpec::last_n(count)?)?;
        values.reverse();
        Ok(values)
    }

    // ------------------------------------------------------------------
    // Iterators
    // ------------------------------------------------------------------

    /// Pair iterator, bounds inclusive, ascending.
    pub fn iter(&self, start: Slice, end: Slice, count: usize) -> Result<PagedIterator<V, C>> {
        self.iter_range(Some(start), true, Some(end), true, false, count)
    }

    pub fn iter_bounds_exclusive(
        &self,
        start: Slice,
        end: Slice,
        count: usize,
    ) -> Result<PagedIterator<V, C>> {
        self.iter_range(Some(start), false, Some(end), false, false, count)
    }

    pub fn iter_reverse(
        &self,
        start: Slice,
        end: Slice,
        count: usize,
    ) -> Result<PagedIterator<V, C>> {
        self.iter_range(Some(start), true, Some(end), true, true, count)
    }

    pub fn iter_reverse_bounds_exclusive(
        &self,
        start: Slice,
        end: Slice,
        count: usize,
    ) -> Result<PagedIterator<V, C>> {
        self.iter_range(Some(start), false, Some(end), false, true, count)
    }

    /// Canonical iterator constructor.
    pub fn iter_range(
        &self,
        start: Option<Slice>,
        start_inclusive: bool,
        end: Option<Slice>,
        end_inclusive: bool,
        reverse: bool,
        count: usize,
    ) -> Result<PagedIterator<V, C>> {
        let spec = BoundSpec::normalize(
            start,
            start_inclusive,
            end,
            end_inclusive,
            reverse,
            Some(count),
        )?;
        Ok(self.scan(spec))
    }

    /// Unbounded ascending iterator over the whole partition.
    pub fn iter_all(&self) -> Result<PagedIterator<V, C>> {
        let spec = BoundSpec::normalize(None, true, None, true, false, None)?;
        Ok(self.scan(spec))
    }

    // ------------------------------------------------------------------
    // Removes
    // ------------------------------------------------------------------

    /// Remove one key. Removing an absent key is not an error.
    pub fn remove(&self, key: &Slice) -> Result<()> {
        self.store.delete(&self.partition, key)?;
        self.statistics.record_delete();
        Ok(())
    }

    /// Remove a range, bounds inclusive.
    pub fn remove_range(&self, start: Slice, end: Slice) -> Result<RemoveOutcome> {
        self.remove_range_with(Some(start), true, Some(end), true)
    }

    /// Remove a range, bounds exclusive.
    pub fn remove_range_bounds_exclusive(&self, start: Slice, end: Slice) -> Result<RemoveOutcome> {
        self.remove_range_with(Some(start), false, Some(end), false)
    }

    /// Canonical ranged remove (always ascending; a remove has no
    /// observable direction without a count).
    pub fn remove_range_with(
        &self,
        start: Option<Slice>,
        start_inclusive: bool,
        end: Option<Slice>,
        end_inclusive: bool,
    ) -> Result<RemoveOutcome> {
        let spec = BoundSpec::normalize(start, start_inclusive, end, end_inclusive, false, None)?;
        self.deleter().remove_span(&spec)
    }

    pub fn remove_first(&self) -> Result<RemoveOutcome> {
        self.remove_first_n(1)
    }

    /// Remove exactly the `count` first entries (or fewer if the
    /// partition is shorter).
    pub fn remove_first_n(&self, count: usize) -> Result<RemoveOutcome> {
        self.deleter().remove_span(&BoundSpec::first_n(count)?)
    }

    pub fn remove_last(&self) -> Result<RemoveOutcome> {
        self.remove_last_n(1)
    }

    /// Remove exactly the `count` last entries (or fewer).
    pub fn remove_last_n(&self, count: usize) -> Result<RemoveOutcome> {
        self.deleter().remove_span(&BoundSpec::last_n(count)?)
    }

    // ------------------------------------------------------------------
    // Pipeline plumbing
    // ------------------------------------------------------------------

    fn scan(&self, spec: BoundSpec) -> PagedIterator<V, C> {
        self.statistics.record_scan();
        PagedIterator::new(
            self.store.clone(),
            self.partition.clone(),
            self.codec.clone(),
            spec,
            self.options.page_size,
            self.statistics.clone(),
        )
    }

    fn deleter(&self) -> RangeDeleter<'_> {
        RangeDeleter::new(
            &self.store,
            &self.partition,
            self.options.page_size,
            &self.statistics,
        )
    }

    fn drain_entries(&self, spec: BoundSpec) -> Result<Vec<Entry<V>>> {
        let mut it = self.scan(spec);
        let mut out = Vec::new();
        while it.has_next()? {
            out.push(it.next_entry()?);
        }
        Ok(out)
    }

    fn drain_keys(&self, spec: BoundSpec) -> Result<Vec<Slice>> {
        let mut it = self.scan(spec);
        let mut out = Vec::new();
        while it.has_next()? {
            out.push(it.next_key()?);
        }
        Ok(out)
    }

    fn drain_values(&self, spec: BoundSpec) -> Result<Vec<V>> {
        let mut it = self.scan(spec);
        let mut out = Vec::new();
        while it.has_next()? {
            out.push(it.next_value()?);
        }
        Ok(out)
    }
}
