// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Typed failures exposed by the crate.
//!
//! All errors are deterministic logic errors returned to the immediate
//! caller; there is no retry or recovery layer inside the crate.

use crate::Instant;
use thiserror::Error;

/// Errors reported by period construction and timeline aggregation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// [`Period::new`](crate::Period::new) was given `end <= start`.
    ///
    /// A period is half-open and must be strictly positive in length; no
    /// partially-valid period is ever produced.
    #[error("period end {end} must be strictly after start {start}")]
    InvalidRange { start: Instant, end: Instant },

    /// A calendar factory was given a date that does not exist
    /// (e.g. month 13, February 30, or a year outside the representable
    /// range).
    #[error("no such calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// [`Timeline::aggregate`](crate::Timeline::aggregate) was invoked on
    /// entries that are not sorted ascending by period start.
    ///
    /// Cannot occur for timelines grown exclusively through
    /// [`Timeline::add`](crate::Timeline::add); it is reachable when a
    /// timeline is adopted from an externally supplied sequence.
    #[error("timeline entries must be sorted ascending by period start (entry {index} is out of order)")]
    UnsortedInput { index: usize },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
