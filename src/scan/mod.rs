/// Scan module for widemap
///
/// The range-query core. Every read and ranged delete in this crate
/// funnels through one pipeline:
///
/// ```text
/// caller arguments (start, inclusivity, end, inclusivity, reverse, count)
///     ↓ BoundSpec::normalize       — one canonical scan form
///     ↓ RangeScanner::fetch_page   — one bounded store fetch + cursor
///     ↓ PagedIterator              — lazy page-at-a-time consumption
/// ```
///
/// `start`/`end` are always relative to scan order, not key magnitude:
/// a reverse scan's `start` is its logically greater key. `BoundSpec`
/// owns the mapping from scan-order bounds to the store's
/// magnitude-ordered window, including the continuation cursor that
/// makes paging duplicate-free and gap-free.
mod bound;
mod scanner;

pub use bound::BoundSpec;
pub use scanner::{Page, RangeScanner};
