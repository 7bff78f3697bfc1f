// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! A value bound to a period.

use crate::error::Result;
use crate::{Instant, Period};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Associates a value with the period throughout which it holds.
///
/// `T` is an arbitrary caller-supplied type; nothing is required of it
/// beyond what a specific timeline algorithm asks for (see
/// [`Timeline::aggregate`](crate::Timeline::aggregate) and
/// [`Timeline::merge`](crate::Timeline::merge)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeriodValue<T> {
    period: Period,
    value: T,
}

impl<T> PeriodValue<T> {
    /// Binds `value` to `period`.
    pub fn new(period: Period, value: T) -> Self {
        Self { period, value }
    }

    /// Builds the period from raw bounds, propagating
    /// [`Error::InvalidRange`](crate::Error::InvalidRange).
    pub fn from_instants(start: Instant, end: Instant, value: T) -> Result<Self> {
        Ok(Self::new(Period::new(start, end)?, value))
    }

    /// The period throughout which the value holds.
    #[inline]
    pub fn period(&self) -> Period {
        self.period
    }

    /// The bound value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the pair, returning the value.
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    /// True iff the underlying period is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.period.is_empty()
    }

    /// Trims the period to `limit`, keeping the value.
    ///
    /// The result may be empty (see [`Period::clamp`]); the aggregation
    /// buffer drops such entries.
    pub fn clamp(&self, limit: &Period) -> PeriodValue<T>
    where
        T: Clone,
    {
        PeriodValue {
            period: self.period.clamp(limit),
            value: self.value.clone(),
        }
    }
}
