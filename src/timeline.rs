// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ordered collection of period-bound values.
//!
//! This module provides:
//! - [`Timeline<T>`]: entries sorted by period start, overlap allowed
//! - [`Timeline::aggregate`]: overlap resolution into a canonical,
//!   non-overlapping timeline
//! - [`Timeline::merge`]: coalescing of adjacent equal-valued entries

use crate::error::{Error, Result};
use crate::{Period, PeriodValue};
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered collection of [`PeriodValue`]s for one logical series.
///
/// The container maintains one invariant: entries are always sorted
/// ascending by period start after any mutating operation. It does **not**
/// guarantee non-overlap — raw timelines may carry overlapping entries, and
/// resolving overlap is a deliberate, explicit operation
/// ([`Timeline::aggregate`]), not an insertion-time side effect.
///
/// A timeline exclusively owns its entries; it is created empty, grown
/// through [`Timeline::add`], and transformed only by producing new
/// timelines ([`Timeline::aggregate`] and [`Timeline::merge`] never mutate
/// their input). It is not internally synchronized: concurrent `add` on one
/// instance must be serialized by the caller.
///
/// # Examples
///
/// ```
/// use chronoline::{calendar, Timeline};
///
/// let mut budget = Timeline::new();
/// budget.add(calendar::month(2024, 1).unwrap(), 1000.0);
/// budget.add(calendar::day(2024, 1, 15).unwrap(), 80.0);
///
/// let canonical = budget.aggregate(|_, a, b| a + b).unwrap();
/// assert_eq!(canonical.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timeline<T> {
    items: Vec<PeriodValue<T>>,
}

impl<T> Timeline<T> {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a new entry and restores the start-ordering invariant.
    ///
    /// The sort is stable: entries sharing a start instant keep their
    /// insertion order. No overlap checking or rejection occurs here.
    pub fn add(&mut self, period: Period, value: T) {
        self.items.push(PeriodValue::new(period, value));
        self.items.sort_by_key(|pv| pv.period().start());
    }

    /// All entries, in ascending start order.
    #[inline]
    pub fn get_all(&self) -> &[PeriodValue<T>] {
        &self.items
    }

    /// Iterates over the entries in ascending start order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, PeriodValue<T>> {
        self.items.iter()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True iff the timeline has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns every entry whose period intersects `query`, in start order.
    ///
    /// Entries are scanned in ascending start order and the scan stops as
    /// soon as an entry starts strictly after `query`'s end — sorted order
    /// guarantees no later entry can intersect. The early exit is an
    /// optimization over filtering every entry and additionally relies on
    /// entries being roughly end-ordered, which holds for calendar-shaped
    /// timelines.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronoline::{calendar, Timeline};
    ///
    /// let mut timeline = Timeline::new();
    /// timeline.add(calendar::month(2024, 1).unwrap(), 100);
    /// timeline.add(calendar::month(2024, 2).unwrap(), 200);
    ///
    /// let hits = timeline.find_intersects(&calendar::day(2024, 2, 5).unwrap());
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!(*hits[0].value(), 200);
    /// ```
    pub fn find_intersects(&self, query: &Period) -> Vec<&PeriodValue<T>> {
        let mut found = Vec::new();

        for current in &self.items {
            if current.period().start() > query.end() {
                break;
            }
            if current.period().intersects(query) {
                found.push(current);
            }
        }

        found
    }

    /// Resolves overlapping entries into a canonical, non-overlapping
    /// timeline.
    ///
    /// The output entries are pairwise non-overlapping and collectively
    /// cover exactly the union of the input periods. Each output entry
    /// carries the fold of `combine(sub_period, entry_value, accumulator)`
    /// over every input entry touching that sub-period, with the
    /// accumulator starting at `T::default()` and entries visited in start
    /// order.
    ///
    /// The pass maintains a *window* (the span currently being reconciled)
    /// and a *buffer* of entries touching it. An entry starting at or after
    /// the window's end closes the window: the buffered entries are cut at
    /// every distinct period boundary and one folded entry is emitted per
    /// resulting sub-period.
    ///
    /// `aggregate` is pure — it returns a new timeline and leaves the input
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsortedInput`] when the entries are not sorted
    /// ascending by period start. Timelines grown exclusively through
    /// [`Timeline::add`] are always sorted; adopted sequences
    /// (`Timeline::from`) may not be.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronoline::{calendar, Timeline};
    ///
    /// let mut budget = Timeline::new();
    /// budget.add(calendar::month(2024, 1).unwrap(), 100);
    /// budget.add(calendar::month(2024, 2).unwrap(), 200);
    /// budget.add(calendar::day(2024, 1, 15).unwrap(), 80);
    ///
    /// let canonical = budget.aggregate(|_, a, b| a + b).unwrap();
    /// let values: Vec<i32> = canonical.iter().map(|pv| *pv.value()).collect();
    /// assert_eq!(values, [100, 180, 100, 200]);
    /// ```
    pub fn aggregate<F>(&self, combine: F) -> Result<Timeline<T>>
    where
        T: Clone + Default,
        F: Fn(&Period, &T, &T) -> T,
    {
        if self.items.is_empty() {
            return Ok(Timeline::new());
        }

        let mut items = Vec::new();
        let mut window = self.items[0].period();
        let mut buffer = vec![self.items[0].clone()];

        for (index, next) in self.items.iter().enumerate().skip(1) {
            if next.period().before(&window) {
                return Err(Error::UnsortedInput { index });
            }

            if next.period().after(&window) {
                // The window is closed: emit its breakpoint partition, then
                // trim the buffer to what survives into the new window.
                flush_window(&mut items, &buffer, &combine);
                window = next.period();
                buffer = clamp_buffer(&buffer, &window);
                buffer.push(next.clone());
                continue;
            }

            // Overlapping or touching entry: the window grows to cover it.
            window = window.extend_to(next.period().end());
            buffer.push(next.clone());
        }

        flush_window(&mut items, &buffer, &combine);

        Ok(Timeline { items })
    }

    /// Coalesces adjacent equal-valued entries into single spanning
    /// entries.
    ///
    /// Consecutive entries are combined when their periods touch
    /// ([`Period::is_contiguous`]) and `equals` holds between their values;
    /// the combined entry spans from the earlier start to the later end and
    /// carries the shared value. Anything else passes through unchanged.
    ///
    /// The input is assumed to be non-overlapping (typically the output of
    /// [`Timeline::aggregate`]); `merge` does not itself resolve overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronoline::{calendar, Timeline};
    ///
    /// let mut budget = Timeline::new();
    /// budget.add(calendar::month(2024, 1).unwrap(), 100);
    /// budget.add(calendar::month(2024, 2).unwrap(), 100);
    /// budget.add(calendar::month(2024, 3).unwrap(), 100);
    ///
    /// let merged = budget.merge(|a, b| a == b);
    /// assert_eq!(merged.len(), 1);
    /// assert_eq!(merged.get_all()[0].period(), chronoline::Period::new(
    ///     calendar::month(2024, 1).unwrap().start(),
    ///     calendar::month(2024, 3).unwrap().end(),
    /// ).unwrap());
    /// ```
    pub fn merge<F>(&self, equals: F) -> Timeline<T>
    where
        T: Clone,
        F: Fn(&T, &T) -> bool,
    {
        let mut items: Vec<PeriodValue<T>> = Vec::new();

        for entry in &self.items {
            if let Some(last) = items.last_mut() {
                if last.period().is_contiguous(&entry.period())
                    && equals(last.value(), entry.value())
                {
                    *last = PeriodValue::new(
                        Period::from_ordered(last.period().start(), entry.period().end()),
                        entry.value().clone(),
                    );
                    continue;
                }
            }
            items.push(entry.clone());
        }

        Timeline { items }
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Adopts an externally supplied sequence verbatim.
///
/// The entries are **not** re-sorted: the caller's order is trusted. If the
/// trust was misplaced, [`Timeline::aggregate`] reports
/// [`Error::UnsortedInput`].
impl<T> From<Vec<PeriodValue<T>>> for Timeline<T> {
    fn from(items: Vec<PeriodValue<T>>) -> Self {
        Self { items }
    }
}

impl<'a, T> IntoIterator for &'a Timeline<T> {
    type Item = &'a PeriodValue<T>;
    type IntoIter = std::slice::Iter<'a, PeriodValue<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Emits the breakpoint partition of `buffer` into `items`.
///
/// The distinct start/end instants across the buffer are collected in
/// ascending order and every adjacent pair becomes one sub-period, whose
/// value is the fold of `combine` over the buffered entries intersecting
/// it, starting from `T::default()`.
fn flush_window<T, F>(items: &mut Vec<PeriodValue<T>>, buffer: &[PeriodValue<T>], combine: &F)
where
    T: Clone + Default,
    F: Fn(&Period, &T, &T) -> T,
{
    for piece in breakpoints(buffer) {
        let mut folded = T::default();
        for candidate in buffer {
            if candidate.period().intersects(&piece) {
                folded = combine(&piece, candidate.value(), &folded);
            }
        }
        items.push(PeriodValue::new(piece, folded));
    }
}

/// Sorted sub-periods formed by every adjacent pair of distinct boundary
/// instants across the buffer.
fn breakpoints<T>(buffer: &[PeriodValue<T>]) -> Vec<Period> {
    let mut bounds = BTreeSet::new();
    for pv in buffer {
        bounds.insert(pv.period().start());
        bounds.insert(pv.period().end());
    }

    bounds
        .iter()
        .zip(bounds.iter().skip(1))
        .map(|(&start, &end)| Period::from_ordered(start, end))
        .collect()
}

/// Trims every buffered entry to `limit`, dropping the ones left empty.
fn clamp_buffer<T: Clone>(buffer: &[PeriodValue<T>], limit: &Period) -> Vec<PeriodValue<T>> {
    buffer
        .iter()
        .map(|pv| pv.clamp(limit))
        .filter(|pv| !pv.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calendar, Instant};
    use chrono::{TimeZone, Utc};

    fn utc(year: i32, month: u32, day: u32) -> Instant {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn span(start: Instant, end: Instant) -> Period {
        Period::new(start, end).unwrap()
    }

    #[test]
    fn test_add_keeps_entries_sorted_by_start() {
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 3).unwrap(), 300);
        timeline.add(calendar::month(2024, 1).unwrap(), 100);
        timeline.add(calendar::month(2024, 2).unwrap(), 200);

        let values: Vec<i32> = timeline.iter().map(|pv| *pv.value()).collect();
        assert_eq!(values, [100, 200, 300]);
    }

    #[test]
    fn test_add_is_stable_for_equal_starts() {
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 1).unwrap(), "first");
        timeline.add(span(utc(2024, 1, 1), utc(2024, 1, 10)), "second");
        timeline.add(span(utc(2024, 1, 1), utc(2024, 3, 1)), "third");

        let values: Vec<&str> = timeline.iter().map(|pv| *pv.value()).collect();
        assert_eq!(values, ["first", "second", "third"]);
    }

    #[test]
    fn test_add_accepts_overlapping_periods() {
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 1).unwrap(), 1000.0);
        timeline.add(calendar::month(2024, 2).unwrap(), 1200.0);
        timeline.add(span(utc(2024, 1, 15), utc(2024, 2, 5)), 900.0);

        assert_eq!(timeline.len(), 3);
        let values: Vec<f64> = timeline.iter().map(|pv| *pv.value()).collect();
        assert_eq!(values, [1000.0, 900.0, 1200.0]);
    }

    #[test]
    fn test_find_intersects_single_hit() {
        let mut timeline = Timeline::new();
        for (m, v) in [(1, 123), (2, 456), (3, 69), (4, 987)] {
            timeline.add(calendar::month(2024, m).unwrap(), v);
        }

        let hits = timeline.find_intersects(&calendar::day(2024, 2, 5).unwrap());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].period(), calendar::month(2024, 2).unwrap());
    }

    #[test]
    fn test_find_intersects_two_hits_in_start_order() {
        let mut timeline = Timeline::new();
        for (m, v) in [(1, 123), (2, 456), (3, 69), (4, 987)] {
            timeline.add(calendar::month(2024, m).unwrap(), v);
        }

        let query = span(utc(2024, 2, 15), utc(2024, 3, 20));
        let hits = timeline.find_intersects(&query);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].period(), calendar::month(2024, 2).unwrap());
        assert_eq!(hits[1].period(), calendar::month(2024, 3).unwrap());
    }

    #[test]
    fn test_find_intersects_no_hit() {
        let mut timeline = Timeline::new();
        for (m, v) in [(1, 123), (2, 456), (3, 69), (4, 987)] {
            timeline.add(calendar::month(2024, m).unwrap(), v);
        }

        let hits = timeline.find_intersects(&calendar::day(2024, 7, 14).unwrap());
        assert!(hits.is_empty());
    }

    #[test]
    fn test_aggregate_empty_timeline() {
        let timeline: Timeline<i32> = Timeline::new();
        let result = timeline.aggregate(|_, a, b| a + b).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_aggregate_slices_overlapping_entry() {
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 1).unwrap(), 100);
        timeline.add(calendar::month(2024, 2).unwrap(), 200);
        timeline.add(calendar::month(2024, 3).unwrap(), 300);
        timeline.add(calendar::day(2024, 1, 15).unwrap(), 80);

        let result = timeline.aggregate(|_, a, b| a + b).unwrap();

        let expected = [
            (span(utc(2024, 1, 1), utc(2024, 1, 15)), 100),
            (span(utc(2024, 1, 15), utc(2024, 1, 16)), 180),
            (span(utc(2024, 1, 16), utc(2024, 2, 1)), 100),
            (span(utc(2024, 2, 1), utc(2024, 3, 1)), 200),
            (span(utc(2024, 3, 1), utc(2024, 4, 1)), 300),
        ];
        assert_eq!(result.len(), expected.len());
        for (entry, (period, value)) in result.iter().zip(expected) {
            assert_eq!(entry.period(), period);
            assert_eq!(*entry.value(), value);
        }
    }

    #[test]
    fn test_aggregate_window_covers_entry_extending_past_it() {
        // The second entry reaches beyond the first; the window must grow to
        // its full end so the third entry still lands in the same window.
        let mut timeline = Timeline::new();
        timeline.add(span(utc(2024, 1, 1), utc(2024, 1, 10)), 1);
        timeline.add(span(utc(2024, 1, 5), utc(2024, 1, 20)), 10);
        timeline.add(span(utc(2024, 1, 12), utc(2024, 1, 15)), 100);

        let result = timeline.aggregate(|_, a, b| a + b).unwrap();

        let expected = [
            (span(utc(2024, 1, 1), utc(2024, 1, 5)), 1),
            (span(utc(2024, 1, 5), utc(2024, 1, 10)), 11),
            (span(utc(2024, 1, 10), utc(2024, 1, 12)), 10),
            (span(utc(2024, 1, 12), utc(2024, 1, 15)), 110),
            (span(utc(2024, 1, 15), utc(2024, 1, 20)), 10),
        ];
        assert_eq!(result.len(), expected.len());
        for (entry, (period, value)) in result.iter().zip(expected) {
            assert_eq!(entry.period(), period);
            assert_eq!(*entry.value(), value);
        }
    }

    #[test]
    fn test_aggregate_final_window_is_resolved_too() {
        // Overlap sitting in the very last window must still be sliced.
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 1).unwrap(), 100);
        timeline.add(calendar::day(2024, 1, 15).unwrap(), 80);

        let result = timeline.aggregate(|_, a, b| a + b).unwrap();

        let values: Vec<i32> = result.iter().map(|pv| *pv.value()).collect();
        assert_eq!(values, [100, 180, 100]);
    }

    #[test]
    fn test_aggregate_rejects_unsorted_input() {
        let timeline = Timeline::from(vec![
            PeriodValue::new(calendar::month(2024, 2).unwrap(), 200),
            PeriodValue::new(calendar::month(2024, 1).unwrap(), 100),
        ]);

        let err = timeline.aggregate(|_, a, b| a + b).unwrap_err();
        assert_eq!(err, Error::UnsortedInput { index: 1 });
    }

    #[test]
    fn test_aggregate_fold_receives_sub_period() {
        // Weight each entry by the sliced sub-period length in days.
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 1).unwrap(), 31);
        timeline.add(calendar::day(2024, 1, 15).unwrap(), 0);

        let result = timeline
            .aggregate(|p, _, acc| acc + p.duration().num_days())
            .unwrap();

        let days: Vec<i64> = result.iter().map(|pv| *pv.value()).collect();
        // [Jan 1, Jan 15) -> 14, [Jan 15, Jan 16) -> 1 + 1, [Jan 16, Feb 1) -> 16
        assert_eq!(days, [14, 2, 16]);
    }

    #[test]
    fn test_merge_collapses_contiguous_equal_values() {
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 1).unwrap(), 100);
        timeline.add(calendar::month(2024, 2).unwrap(), 100);
        timeline.add(calendar::month(2024, 3).unwrap(), 100);

        let merged = timeline.merge(|a, b| a == b);
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged.get_all()[0].period(),
            span(utc(2024, 1, 1), utc(2024, 4, 1))
        );
        assert_eq!(*merged.get_all()[0].value(), 100);
    }

    #[test]
    fn test_merge_keeps_distinct_values_apart() {
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 1).unwrap(), 100);
        timeline.add(calendar::month(2024, 2).unwrap(), 200);
        timeline.add(calendar::month(2024, 3).unwrap(), 300);

        let merged = timeline.merge(|a, b| a == b);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_skips_gap_between_equal_values() {
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 1).unwrap(), 100);
        timeline.add(calendar::month(2024, 3).unwrap(), 100);

        let merged = timeline.merge(|a, b| a == b);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_coalesces_runs_separately() {
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 1).unwrap(), 100);
        timeline.add(calendar::month(2024, 2).unwrap(), 100);
        timeline.add(calendar::month(2024, 3).unwrap(), 200);
        timeline.add(calendar::month(2024, 4).unwrap(), 200);

        let merged = timeline.merge(|a, b| a == b);
        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged.get_all()[0].period(),
            span(utc(2024, 1, 1), utc(2024, 3, 1))
        );
        assert_eq!(
            merged.get_all()[1].period(),
            span(utc(2024, 3, 1), utc(2024, 5, 1))
        );
    }

    #[test]
    fn test_merge_does_not_mutate_input() {
        let mut timeline = Timeline::new();
        timeline.add(calendar::month(2024, 1).unwrap(), 100);
        timeline.add(calendar::month(2024, 2).unwrap(), 100);

        let before = timeline.clone();
        let _ = timeline.merge(|a, b| a == b);
        assert_eq!(timeline, before);
    }
}
