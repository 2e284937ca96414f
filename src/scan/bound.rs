use std::cmp::Ordering;

use crate::store::{Direction, StoreRange};
use crate::util::{Result, Slice, Status};

/// Canonical scan specification.
///
/// Normalized once per call and immutable thereafter. `start` and `end`
/// are in scan order: for an ascending scan `start` is the smaller key,
/// for a descending scan the greater. A missing bound is unbounded on
/// that side.
///
/// A spec whose `start` lies strictly past `end` in scan direction (or
/// equal with an exclusive side) describes an empty range; scans over it
/// return no entries rather than failing. Only a zero `limit` is
/// rejected as `InvalidArgument`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundSpec {
    start: Option<Slice>,
    start_inclusive: bool,
    end: Option<Slice>,
    end_inclusive: bool,
    reverse: bool,
    limit: Option<usize>,
}

impl BoundSpec {
    /// Normalize a raw query shape into a canonical spec.
    pub fn normalize(
        start: Option<Slice>,
        start_inclusive: bool,
        end: Option<Slice>,
        end_inclusive: bool,
        reverse: bool,
        limit: Option<usize>,
    ) -> Result<Self> {
        if limit == Some(0) {
            return Err(Status::invalid_argument("limit must be positive"));
        }
        Ok(BoundSpec {
            start,
            start_inclusive,
            end,
            end_inclusive,
            reverse,
            limit,
        })
    }

    /// Unbounded ascending scan capped at `n` entries ("first n").
    pub fn first_n(n: usize) -> Result<Self> {
        Self::normalize(None, true, None, true, false, Some(n))
    }

    /// Unbounded descending scan capped at `n` entries ("last n").
    pub fn last_n(n: usize) -> Result<Self> {
        Self::normalize(None, true, None, true, true, Some(n))
    }

    /// Point lookup: both bounds on `key`, inclusive, limit 1.
    pub fn single(key: Slice) -> Self {
        BoundSpec {
            start: Some(key.clone()),
            start_inclusive: true,
            end: Some(key),
            end_inclusive: true,
            reverse: false,
            limit: Some(1),
        }
    }

    pub fn start(&self) -> Option<&Slice> {
        self.start.as_ref()
    }

    pub fn start_inclusive(&self) -> bool {
        self.start_inclusive
    }

    pub fn end(&self) -> Option<&Slice> {
        self.end.as_ref()
    }

    pub fn end_inclusive(&self) -> bool {
        self.end_inclusive
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn direction(&self) -> Direction {
        if self.reverse {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// True when no key can fall between the bounds in scan direction.
    pub fn is_empty_range(&self) -> bool {
        let (Some(start), Some(end)) = (&self.start, &self.end) else {
            return false;
        };
        let ordered = match start.compare(end) {
            Ordering::Equal => return !(self.start_inclusive && self.end_inclusive),
            Ordering::Less => !self.reverse,
            Ordering::Greater => self.reverse,
        };
        !ordered
    }

    /// Project this spec onto the store's magnitude-ordered window.
    ///
    /// `resume_after` is the last key returned by the previous page in
    /// this scan's direction; the window then starts strictly after it,
    /// regardless of the original bound's inclusivity. That is what
    /// makes page boundaries duplicate-free and gap-free.
    pub fn to_store_range(&self, resume_after: Option<&Slice>) -> StoreRange {
        let mut range = if self.reverse {
            StoreRange {
                lower: self.end.clone(),
                lower_inclusive: self.end_inclusive,
                upper: self.start.clone(),
                upper_inclusive: self.start_inclusive,
            }
        } else {
            StoreRange {
                lower: self.start.clone(),
                lower_inclusive: self.start_inclusive,
                upper: self.end.clone(),
                upper_inclusive: self.end_inclusive,
            }
        };
        if let Some(cursor) = resume_after {
            if self.reverse {
                range.upper = Some(cursor.clone());
                range.upper_inclusive = false;
            } else {
                range.lower = Some(cursor.clone());
                range.lower_inclusive = false;
            }
        }
        range
    }
}
