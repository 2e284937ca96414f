/// Store module for widemap
///
/// Defines the contract between the wide-map core and the backing
/// wide-row store, plus an in-memory reference implementation.
///
/// The core never talks to a network or a file format itself; it drives
/// an [`OrderedStoreClient`] through bounded, direction-aware range
/// fetches, single-key writes/deletes, and (where supported) native
/// range deletes. Connection management, consistency levels, and write
/// batching live behind this trait, not in this crate.
use std::fmt;

use crate::util::{Result, Slice, Status};

mod memory;

pub use memory::MemoryStore;

/// Identifies one logical partition (one wide row) in the store.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PartitionId(Slice);

impl PartitionId {
    pub fn new(id: impl Into<Slice>) -> Self {
        PartitionId(id.into())
    }

    pub fn as_slice(&self) -> &Slice {
        &self.0
    }
}

impl fmt::Debug for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartitionId({})", self.0)
    }
}

/// One raw stored entry, before value decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub key: Slice,
    pub value: Slice,
}

/// Scan direction relative to the store's key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// A key window in magnitude order: `lower` is always the smaller bound
/// regardless of scan direction. Direction-relative bounds are mapped
/// onto this form by `BoundSpec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRange {
    pub lower: Option<Slice>,
    pub lower_inclusive: bool,
    pub upper: Option<Slice>,
    pub upper_inclusive: bool,
}

impl StoreRange {
    pub fn unbounded() -> Self {
        StoreRange {
            lower: None,
            lower_inclusive: true,
            upper: None,
            upper_inclusive: true,
        }
    }

    /// True when no key can satisfy the window (inverted bounds, or
    /// equal bounds with an exclusive side).
    pub fn is_empty_window(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(lo), Some(hi)) => match lo.compare(hi) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Equal => !(self.lower_inclusive && self.upper_inclusive),
                std::cmp::Ordering::Less => false,
            },
            _ => false,
        }
    }

    /// True when `key` falls inside the window, inclusivity included.
    pub fn admits(&self, key: &Slice) -> bool {
        if let Some(lo) = &self.lower {
            match key.compare(lo) {
                std::cmp::Ordering::Less => return false,
                std::cmp::Ordering::Equal if !self.lower_inclusive => return false,
                _ => {}
            }
        }
        if let Some(hi) = &self.upper {
            match key.compare(hi) {
                std::cmp::Ordering::Greater => return false,
                std::cmp::Ordering::Equal if !self.upper_inclusive => return false,
                _ => {}
            }
        }
        true
    }
}

/// A range delete that could not be fully confirmed. Deletes already
/// issued are not rolled back; `failed_keys` lists what is left.
#[derive(Debug, Clone, Default)]
pub struct PartialFailure {
    pub failed_keys: Vec<Slice>,
    pub message: String,
}

impl fmt::Display for PartialFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} keys unconfirmed)",
            self.message,
            self.failed_keys.len()
        )
    }
}

impl From<PartialFailure> for Status {
    fn from(pf: PartialFailure) -> Self {
        Status::partial_failure(pf.to_string())
    }
}

/// Abstract ordered wide-row store.
///
/// # Contract
///
/// - `fetch_range` returns at most `max_entries` entries inside `range`,
///   ordered by `direction`, honoring the inclusivity flags natively.
///   Implementations that can only express inclusive bounds may return
///   the boundary entries; the scanner filters them out.
/// - `put` overwrites any existing value for the key (no read first).
/// - `delete` of an absent key is not an error.
/// - `delete_range` is atomic at whatever granularity the store offers;
///   stores without native range deletes report
///   `supports_range_delete() == false` and the core falls back to
///   scan-then-delete.
pub trait OrderedStoreClient: Send + Sync {
    fn fetch_range(
        &self,
        partition: &PartitionId,
        range: &StoreRange,
        direction: Direction,
        max_entries: usize,
    ) -> Result<Vec<RawEntry>>;

    fn put(
        &self,
        partition: &PartitionId,
        key: Slice,
        value: Slice,
        ttl_seconds: Option<u32>,
    ) -> Result<()>;

    fn delete(&self, partition: &PartitionId, key: &Slice) -> Result<()>;

    fn delete_range(
        &self,
        partition: &PartitionId,
        range: &StoreRange,
    ) -> std::result::Result<(), PartialFailure>;

    fn supports_range_delete(&self) -> bool {
        true
    }
}
