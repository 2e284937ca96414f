use std::sync::Arc;

use crate::scan::{BoundSpec, RangeScanner};
use crate::store::{OrderedStoreClient, PartitionId};
use crate::statistics::Statistics;
use crate::util::{Result, Slice, Status};

/// Result of a ranged remove.
///
/// Deletes already issued are never rolled back; `failed_keys` lists the
/// keys the store did not confirm deleted. An empty list means the whole
/// range was removed.
#[derive(Debug, Clone, Default)]
pub struct RemoveOutcome {
    pub failed_keys: Vec<Slice>,
}

impl RemoveOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_keys.is_empty()
    }
}

/// Executes ranged and first/last removes with the same bound semantics
/// as scans.
///
/// Two strategies: a single native range delete when the store supports
/// it and the spec carries no strict count, otherwise a paged
/// scan-then-delete driven by the same continuation cursor the read
/// path uses.
pub struct RangeDeleter<'a> {
    store: &'a Arc<dyn OrderedStoreClient>,
    partition: &'a PartitionId,
    page_size: usize,
    statistics: &'a Arc<Statistics>,
}

impl<'a> RangeDeleter<'a> {
    pub(crate) fn new(
        store: &'a Arc<dyn OrderedStoreClient>,
        partition: &'a PartitionId,
        page_size: usize,
        statistics: &'a Arc<Statistics>,
    ) -> Self {
        RangeDeleter {
            store,
            partition,
            page_size,
            statistics,
        }
    }

    /// Remove every entry the spec covers.
    ///
    /// Specs with a limit ("remove first/last n") always take the paged
    /// path: a native range delete cannot honor a strict count.
    pub fn remove_span(&self, spec: &BoundSpec) -> Result<RemoveOutcome> {
        if spec.is_empty_range() {
            return Ok(RemoveOutcome::default());
        }
        if spec.limit().is_none() && self.store.supports_range_delete() {
            self.native_delete(spec)
        } else {
            self.scan_then_delete(spec)
        }
    }

    fn native_delete(&self, spec: &BoundSpec) -> Result<RemoveOutcome> {
        let range = spec.to_store_range(None);
        self.statistics.record_range_delete();
        match self.store.delete_range(self.partition, &range) {
            Ok(()) => Ok(RemoveOutcome::default()),
            Err(partial) if !partial.failed_keys.is_empty() => Ok(RemoveOutcome {
                failed_keys: partial.failed_keys,
            }),
            // No key set means the store failed outright, not partially
            Err(partial) => Err(Status::from(partial)),
        }
    }

    fn scan_then_delete(&self, spec: &BoundSpec) -> Result<RemoveOutcome> {
        let scanner = RangeScanner::new(self.store.as_ref(), self.partition);
        let mut outcome = RemoveOutcome::default();
        let mut remaining = spec.limit();
        let mut cursor: Option<Slice> = None;

        loop {
            if remaining == Some(0) {
                break;
            }
            let fetch_size = match remaining {
                Some(n) => self.page_size.min(n),
                None => self.page_size,
            };
            let page = scanner.fetch_page(spec, fetch_size, cursor.as_ref())?;
            self.statistics.record_page_fetch(page.len() as u64);

            for entry in &page.entries {
                match self.store.delete(self.partition, &entry.key) {
                    Ok(()) => self.statistics.record_delete(),
                    Err(_) => outcome.failed_keys.push(entry.key.clone()),
                }
            }
            if let Some(n) = remaining.as_mut() {
                *n -= page.len();
            }

            match page.resume {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(outcome)
    }
}
