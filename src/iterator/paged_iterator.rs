use std::marker::PhantomData;
use std::sync::Arc;

use crate::codec::Codec;
use crate::map::Entry;
use crate::scan::{BoundSpec, RangeScanner};
use crate::store::{OrderedStoreClient, PartitionId, RawEntry};
use crate::statistics::Statistics;
use crate::util::{Result, Slice, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IterState {
    Fresh,
    InPage,
    Done,
}

/// Lazy paged cursor over one partition.
///
/// Created per call and consumed one entry at a time; each advance may
/// trigger at most one bounded store fetch. Not reusable after
/// exhaustion and deliberately without a reset: a fresh iterator with
/// the same spec replays the same sequence over an unchanged partition.
///
/// Safe to abandon at any point (no open transaction or lock is held);
/// not meant for concurrent advance from multiple threads, though any
/// number of independent iterators may scan the same partition at once.
pub struct PagedIterator<V, C: Codec<V>> {
    store: Arc<dyn OrderedStoreClient>,
    partition: PartitionId,
    codec: Arc<C>,
    spec: BoundSpec,
    page_size: usize,
    buffered: Vec<RawEntry>,
    pos: usize,
    resume: Option<Slice>,
    remaining: Option<usize>,
    state: IterState,
    statistics: Arc<Statistics>,
    _marker: PhantomData<fn() -> V>,
}

impl<V, C: Codec<V>> PagedIterator<V, C> {
    pub(crate) fn new(
        store: Arc<dyn OrderedStoreClient>,
        partition: PartitionId,
        codec: Arc<C>,
        spec: BoundSpec,
        page_size: usize,
        statistics: Arc<Statistics>,
    ) -> Self {
        let remaining = spec.limit();
        PagedIterator {
            store,
            partition,
            codec,
            spec,
            page_size,
            buffered: Vec::new(),
            pos: 0,
            resume: None,
            remaining,
            state: IterState::Fresh,
            statistics,
            _marker: PhantomData,
        }
    }

    /// The spec this iterator was built from.
    pub fn spec(&self) -> &BoundSpec {
        &self.spec
    }

    /// True while the scan has more entries. May fetch a page.
    pub fn has_next(&mut self) -> Result<bool> {
        loop {
            match self.state {
                IterState::Done => return Ok(false),
                IterState::InPage if self.pos < self.buffered.len() => return Ok(true),
                IterState::InPage if self.resume.is_none() => {
                    // Previous page ended the scan at store level
                    self.finish();
                    return Ok(false);
                }
                IterState::Fresh | IterState::InPage => {}
            }

            if self.remaining == Some(0) {
                self.finish();
                return Ok(false);
            }

            let fetch_size = match self.remaining {
                Some(n) => self.page_size.min(n),
                None => self.page_size,
            };
            let cursor = self.resume.take();
            let scanner = RangeScanner::new(self.store.as_ref(), &self.partition);
            let page = scanner.fetch_page(&self.spec, fetch_size, cursor.as_ref())?;
            self.statistics.record_page_fetch(page.len() as u64);

            self.resume = page.resume;
            self.buffered = page.entries;
            self.pos = 0;
            self.state = IterState::InPage;

            if self.buffered.is_empty() && self.resume.is_none() {
                self.finish();
                return Ok(false);
            }
            // An empty page with a live cursor (filtered boundary) loops
            // into the next fetch
        }
    }

    /// Next entry with the value decoded. Fails with `IteratorExhausted`
    /// past the end of the scan.
    pub fn next_entry(&mut self) -> Result<Entry<V>> {
        let raw = self.advance_raw()?;
        let value = self.decode(&raw.value)?;
        Ok(Entry::new(raw.key, value))
    }

    /// Next key only; the stored value is never decoded.
    pub fn next_key(&mut self) -> Result<Slice> {
        Ok(self.advance_raw()?.key)
    }

    /// Next value only.
    pub fn next_value(&mut self) -> Result<V> {
        let raw = self.advance_raw()?;
        self.decode(&raw.value)
    }

    fn advance_raw(&mut self) -> Result<RawEntry> {
        if !self.has_next()? {
            return Err(Status::iterator_exhausted("next() called past end of scan"));
        }
        let entry = self.buffered[self.pos].clone();
        self.pos += 1;
        if let Some(n) = self.remaining.as_mut() {
            *n -= 1;
        }
        self.statistics
            .record_read((entry.key.size() + entry.value.size()) as u64);
        Ok(entry)
    }

    fn decode(&self, raw: &Slice) -> Result<V> {
        self.codec.decode(raw).inspect_err(|_| {
            self.statistics.record_decode_error();
        })
    }

    fn finish(&mut self) {
        self.state = IterState::Done;
        self.buffered = Vec::new();
        self.pos = 0;
    }
}
