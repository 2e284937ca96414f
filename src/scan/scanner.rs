use crate::scan::BoundSpec;
use crate::store::{OrderedStoreClient, PartitionId, RawEntry};
use crate::util::{Result, Slice, Status};

/// One bounded batch of raw entries plus the continuation cursor.
///
/// `resume` is the key of the last entry the store returned, set only
/// when the fetch came back full; `None` means the store has no more
/// entries for this scan. The cursor is computed before any boundary
/// filtering so a filtered entry can never fake exhaustion.
#[derive(Debug, Clone)]
pub struct Page {
    pub entries: Vec<RawEntry>,
    pub resume: Option<Slice>,
}

impl Page {
    fn empty() -> Self {
        Page {
            entries: Vec::new(),
            resume: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Performs one bounded fetch per call against the ordered store.
///
/// Stateless between calls: the continuation cursor travels with the
/// caller (the iterator), not the scanner.
pub struct RangeScanner<'a> {
    store: &'a dyn OrderedStoreClient,
    partition: &'a PartitionId,
}

impl<'a> RangeScanner<'a> {
    pub fn new(store: &'a dyn OrderedStoreClient, partition: &'a PartitionId) -> Self {
        RangeScanner { store, partition }
    }

    /// Fetch the next page of `spec`, at most `page_size` entries.
    ///
    /// Issues exactly one store request, or none when the spec's range
    /// is degenerate. Bound exclusivity is pushed down via the range
    /// flags; entries a store returns on an excluded boundary anyway are
    /// filtered here.
    pub fn fetch_page(
        &self,
        spec: &BoundSpec,
        page_size: usize,
        resume_after: Option<&Slice>,
    ) -> Result<Page> {
        if page_size == 0 {
            return Err(Status::invalid_argument("page size must be positive"));
        }
        if spec.is_empty_range() {
            return Ok(Page::empty());
        }
        let range = spec.to_store_range(resume_after);
        if range.is_empty_window() {
            // Resume cursor moved past the end bound
            return Ok(Page::empty());
        }

        let raw = self
            .store
            .fetch_range(self.partition, &range, spec.direction(), page_size)?;

        let resume = if raw.len() == page_size {
            raw.last().map(|entry| entry.key.clone())
        } else {
            None
        };
        let entries = raw
            .into_iter()
            .filter(|entry| range.admits(&entry.key))
            .collect();

        Ok(Page { entries, resume })
    }
}
