/// Iterator module for widemap
///
/// Provides the lazy, paged cursor over one partition's entries.
///
/// # Architecture
///
/// ```text
/// WideMap::iter*()
///     ↓
/// PagedIterator                — owns the cursor state
///     └─→ RangeScanner         — one bounded store fetch per page
/// ```
///
/// ## Key Design Principles
///
/// 1. **Lazy Paging**: the next page is fetched only when the buffered
///    page is exhausted and the caller asks for more
/// 2. **Bounded Fetches**: no call ever loads more than one page of
///    entries; unbounded scans stay in constant memory
/// 3. **No Gaps, No Duplicates**: pages resume strictly after the last
///    returned key in scan direction
/// 4. **One-Way**: consumption only, no reset; a fresh iterator with the
///    same spec over an unchanged partition replays the same sequence
mod paged_iterator;

pub use paged_iterator::PagedIterator;
