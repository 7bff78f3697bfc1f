// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open time period implementation.
//!
//! This module provides:
//! - [`Period`]: a directional `[start, end)` interval over [`Instant`]
//! - [`Split`]: a lazy iterator partitioning a period with a step function

use crate::error::{Error, Result};
use crate::Instant;
use chrono::Duration;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// A directional time interval `[start, end)`.
///
/// A `Period` is defined by a start and an end instant, with `end`
/// strictly after `start` — zero-length and inverted intervals are
/// rejected at construction. Instants in `[start, end)` belong to the
/// period. Periods are immutable once constructed.
///
/// Empty periods (`start == end`) cannot be built through [`Period::new`];
/// they only arise as the result of [`Period::clamp`] when there is no
/// overlap, and are detected with [`Period::is_empty`].
///
/// # Examples
///
/// ```
/// use chronoline::Period;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
/// let january = Period::new(start, end).unwrap();
///
/// assert_eq!(january.duration(), chrono::Duration::days(31));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: Instant,
    end: Instant,
}

impl Period {
    /// Creates a new period between two instants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when `end <= start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronoline::Period;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();
    /// let end = Utc.with_ymd_and_hms(2024, 8, 31, 0, 0, 0).unwrap();
    ///
    /// assert!(Period::new(start, end).is_ok());
    /// assert!(Period::new(end, start).is_err());
    /// ```
    pub fn new(start: Instant, end: Instant) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Internal constructor for bounds already known to satisfy
    /// `start < end` (breakpoint pairs, window extension).
    pub(crate) fn from_ordered(start: Instant, end: Instant) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    /// The start of the period (inclusive).
    #[inline]
    pub fn start(&self) -> Instant {
        self.start
    }

    /// The end of the period (exclusive).
    #[inline]
    pub fn end(&self) -> Instant {
        self.end
    }

    /// Returns the duration of the period as `end - start`.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True iff the period has zero length (`start == end`).
    ///
    /// Only [`Period::clamp`] produces such periods.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Checks whether an instant falls within the period.
    ///
    /// This predicate is inclusive at **both** ends (`start <= t <= end`),
    /// which deviates from the half-open construction rule at the exact
    /// `end` instant. The behavior is kept for compatibility with existing
    /// callers; [`Period::intersects`] and friends use the consistent
    /// half-open rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronoline::calendar;
    ///
    /// let august = calendar::month(2024, 8).unwrap();
    /// assert!(august.contains(august.start()));
    /// assert!(august.contains(august.end()));
    /// ```
    pub fn contains(&self, instant: Instant) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Checks whether `other` is fully nested within this period.
    pub fn contains_period(&self, other: &Period) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Checks whether two periods overlap.
    ///
    /// Periods are half-open: two periods sharing only a boundary instant
    /// do **not** intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronoline::calendar;
    ///
    /// let january = calendar::month(2024, 1).unwrap();
    /// let february = calendar::month(2024, 2).unwrap();
    ///
    /// assert!(!january.intersects(&february));
    /// ```
    pub fn intersects(&self, other: &Period) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// True iff the two periods touch at a boundary without overlapping.
    pub fn is_contiguous(&self, other: &Period) -> bool {
        self.end == other.start || other.end == self.start
    }

    /// True iff this period ends before (or exactly when) `other` starts.
    pub fn before(&self, other: &Period) -> bool {
        self.end <= other.start
    }

    /// True iff this period starts after (or exactly when) `other` ends.
    pub fn after(&self, other: &Period) -> bool {
        self.start >= other.end
    }

    /// Returns the overlapping sub-period between `self` and `other`.
    ///
    /// Half-open semantics: if one period ends exactly when the other
    /// starts, the intersection is empty and `None` is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let overlap = self.clamp(other);
        if overlap.is_empty() {
            None
        } else {
            Some(overlap)
        }
    }

    /// Trims this period to the part overlapping `limit`.
    ///
    /// Unlike [`Period::intersection`] this is a total function: when there
    /// is no overlap the result is an empty period (`is_empty()` is true)
    /// rather than `None`, which is the expected, recoverable case inside
    /// the aggregation loop.
    pub fn clamp(&self, limit: &Period) -> Period {
        let start = self.start.max(limit.start);
        let end = self.end.min(limit.end);
        if start < end {
            Period { start, end }
        } else {
            Period { start, end: start }
        }
    }

    /// Partitions `[start, end)` lazily using a step function.
    ///
    /// Starting at `start`, `step` is applied repeatedly to obtain each
    /// boundary, and the sub-period `[current, step(current))` is yielded
    /// while `current < end`. The step function must be strictly
    /// increasing. When the step does not divide the period evenly, the
    /// final sub-period overshoots `end` rather than being truncated.
    ///
    /// The returned iterator is finite, pulls one sub-period at a time,
    /// and may be abandoned early at no cost.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronoline::calendar;
    ///
    /// let january = calendar::month(2024, 1).unwrap();
    /// let weeks: Vec<_> = january
    ///     .split(|current| current + chrono::Duration::weeks(1))
    ///     .collect();
    ///
    /// assert_eq!(weeks.len(), 5);
    /// assert_eq!(weeks[0].duration(), chrono::Duration::weeks(1));
    /// ```
    pub fn split<F>(&self, step: F) -> Split<F>
    where
        F: FnMut(Instant) -> Instant,
    {
        Split {
            current: self.start,
            end: self.end,
            step,
        }
    }

    /// Splits the period into calendar days.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronoline::calendar;
    ///
    /// let january = calendar::month(2024, 1).unwrap();
    /// assert_eq!(january.split_by_days().count(), 31);
    /// ```
    pub fn split_by_days(&self) -> Split<fn(Instant) -> Instant> {
        self.split(crate::calendar::step_days)
    }

    /// Splits the period into calendar months.
    pub fn split_by_months(&self) -> Split<fn(Instant) -> Instant> {
        self.split(crate::calendar::step_months)
    }

    /// Extends the period's end to `end` if it reaches further.
    ///
    /// Used by the aggregation loop to grow the reconciliation window over
    /// an incoming entry.
    pub(crate) fn extend_to(&self, end: Instant) -> Period {
        Period {
            start: self.start,
            end: self.end.max(end),
        }
    }
}

// Display implementation
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Lazy sub-period iterator returned by [`Period::split`].
///
/// Yields consecutive `[current, step(current))` pieces; see
/// [`Period::split`] for the exact boundary rules.
#[derive(Debug, Clone)]
pub struct Split<F> {
    current: Instant,
    end: Instant,
    step: F,
}

impl<F> Iterator for Split<F>
where
    F: FnMut(Instant) -> Instant,
{
    type Item = Period;

    fn next(&mut self) -> Option<Period> {
        if self.current >= self.end {
            return None;
        }
        let next = (self.step)(self.current);
        debug_assert!(next > self.current, "split step must advance the instant");
        let piece = Period {
            start: self.current,
            end: next,
        };
        self.current = next;
        Some(piece)
    }
}

// Serde support for Period.
//
// Serialization writes plain `start` / `end` fields; deserialization
// re-validates through `Period::new`, so the `end > start` invariant
// also holds for periods read back from external data.
#[cfg(feature = "serde")]
impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Period", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: Instant,
            end: Instant,
        }

        let raw = Raw::deserialize(deserializer)?;
        Period::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}
