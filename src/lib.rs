// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Temporal Interval Algebra
//!
//! This crate represents values that hold over time spans and provides
//! deterministic operations to insert, query, and reconcile overlapping
//! spans into a canonical, non-overlapping timeline.
//!
//! # Core types
//!
//! - [`Instant`] — a point on the global timeline (`chrono::DateTime<Utc>`).
//! - [`Period`] — half-open time interval `[start, end)`.
//! - [`PeriodValue<T>`] — a value bound to a period.
//! - [`Timeline<T>`] — an ordered collection of period-bound values, with
//!   overlap resolution ([`Timeline::aggregate`]) and coalescing
//!   ([`Timeline::merge`]).
//! - [`calendar`] — factories for canonical day/month/year periods and the
//!   stepping functions behind [`Period::split_by_days`] /
//!   [`Period::split_by_months`].
//!
//! # Overlap resolution
//!
//! Raw timelines may hold overlapping entries; resolving them is an
//! explicit operation, not an insertion-time side effect:
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`Timeline::add`] | entries sorted by start, overlap kept |
//! | [`Timeline::aggregate`] | non-overlapping partition, values folded |
//! | [`Timeline::merge`] | adjacent equal-valued entries coalesced |
//!
//! ```
//! use chronoline::{calendar, Timeline};
//!
//! let mut budget = Timeline::new();
//! budget.add(calendar::month(2024, 1).unwrap(), 1000.0);
//! budget.add(calendar::month(2024, 2).unwrap(), 1200.0);
//! budget.add(calendar::day(2024, 1, 15).unwrap(), 80.0);
//!
//! let canonical = budget.aggregate(|_, a, b| a + b).unwrap();
//!
//! // January is sliced around the mid-month adjustment.
//! let values: Vec<f64> = canonical.iter().map(|pv| *pv.value()).collect();
//! assert_eq!(values, [1000.0, 1080.0, 1000.0, 1200.0]);
//! ```
//!
//! All operations are synchronous, CPU-bound, and pure where documented;
//! nothing in the crate spawns background work or blocks.

pub mod calendar;
mod error;
mod period;
mod period_value;
mod timeline;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{day, month, year};
pub use error::{Error, Result};
pub use period::{Period, Split};
pub use period_value::PeriodValue;
pub use timeline::Timeline;

/// A single, totally-ordered point on the global timeline.
///
/// Instants are treated as already-normalized, comparable points; the
/// crate performs no time-zone conversion of its own.
pub type Instant = chrono::DateTime<chrono::Utc>;
