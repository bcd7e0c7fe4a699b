// Copyright (c) 2025 the lesson-alloc authors.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Time Slots
//!
//! A [`TimeSlot`] is the named, parseable slice of a day the rest of the
//! engine works with: a half-open `[beginning, ending)` span that never
//! crosses midnight. Construction fails fast when the end precedes the
//! beginning; the wrap-capable representation lives in
//! [`TimeOfDayInterval`](crate::time::TimeOfDayInterval).
//!
//! Slots parse from and format to `"HH:MM - HH:MM"` and carry the small
//! algebra the allocator needs: `merge`, `subtract` (yielding zero, one or
//! two remainder pieces), `pretruncate` (advance the front) and `trim_to`
//! (keep the front).

use crate::{
    err::{InvalidSlotError, SlotParseError},
    time::{Minutes, TimeOfDay, TimeOfDayInterval},
};
use std::{cmp::Ordering, fmt::Display};

/// A half-open, forward `[beginning, ending)` slice of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSlot {
    body: TimeOfDayInterval,
}

impl TimeSlot {
    /// Creates a slot, erroring when `ending` precedes `beginning`.
    ///
    /// A zero-duration slot (`beginning == ending`) is permitted; the set
    /// operations treat it as empty.
    #[inline]
    pub fn new(beginning: TimeOfDay, ending: TimeOfDay) -> Result<Self, InvalidSlotError> {
        if ending < beginning {
            return Err(InvalidSlotError::new(beginning, ending));
        }
        Ok(Self {
            body: TimeOfDayInterval::new(beginning, ending),
        })
    }

    /// Parses a `"HH:MM - HH:MM"` string.
    pub fn parse(input: &str) -> Result<Self, SlotParseError> {
        let (lhs, rhs) = input
            .split_once('-')
            .ok_or_else(|| SlotParseError::MissingSeparator(input.to_owned()))?;
        let beginning = TimeOfDay::parse(lhs)?;
        let ending = TimeOfDay::parse(rhs)?;
        Ok(Self::new(beginning, ending)?)
    }

    #[inline]
    pub fn beginning(&self) -> TimeOfDay {
        self.body.beginning()
    }

    #[inline]
    pub fn ending(&self) -> TimeOfDay {
        self.body.ending()
    }

    #[inline]
    pub fn interval(&self) -> &TimeOfDayInterval {
        &self.body
    }

    /// Duration of the slot.
    #[inline]
    pub fn minutes(&self) -> Minutes {
        self.ending() - self.beginning()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[inline]
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.body.overlaps(&other.body)
    }

    #[inline]
    pub fn abuts(&self, other: &TimeSlot) -> bool {
        self.body.abuts(&other.body)
    }

    #[inline]
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.body.contains(time)
    }

    #[inline]
    pub fn encloses(&self, other: &TimeSlot) -> bool {
        self.body.encloses(&other.body)
    }

    /// Smallest slot covering both `self` and `other`.
    ///
    /// Intended for slots that overlap or abut; for disjoint slots the
    /// result also covers the gap between them.
    #[inline]
    pub fn merge(&self, other: &TimeSlot) -> TimeSlot {
        let beginning = self.beginning().min(other.beginning());
        let ending = self.ending().max(other.ending());
        TimeSlot {
            body: TimeOfDayInterval::new(beginning, ending),
        }
    }

    /// Removes `other` from `self`, returning the non-overlapping remainder.
    ///
    /// A slot wholly inside the subtrahend yields nothing; a partial overlap
    /// yields one piece; a subtrahend strictly inside yields two.
    pub fn subtract(&self, other: &TimeSlot) -> SlotRemainder {
        if other.is_empty() || !self.overlaps(other) {
            return SlotRemainder::one(*self);
        }

        let left = if self.beginning() < other.beginning() {
            // Unwrap is fine: beginning < other.beginning <= some ending.
            Some(TimeSlot::new(self.beginning(), other.beginning()).unwrap())
        } else {
            None
        };
        let right = if other.ending() < self.ending() {
            Some(TimeSlot::new(other.ending(), self.ending()).unwrap())
        } else {
            None
        };

        match (left, right) {
            (None, None) => SlotRemainder::none(),
            (Some(a), None) | (None, Some(a)) => SlotRemainder::one(a),
            (Some(a), Some(b)) => SlotRemainder::two(a, b),
        }
    }

    /// Advances the front of the slot past `duration`.
    ///
    /// Returns `None` when the slot is exhausted (`duration` covers it
    /// entirely).
    ///
    /// # Panics
    ///
    /// Panics on a negative `duration` (contract violation).
    pub fn pretruncate(&self, duration: Minutes) -> Option<TimeSlot> {
        assert!(
            !duration.is_negative(),
            "pretruncate with negative duration"
        );
        if duration >= self.minutes() {
            return None;
        }
        let beginning = self
            .beginning()
            .offset(duration)
            .expect("pretruncate stays within the day");
        Some(TimeSlot {
            body: TimeOfDayInterval::new(beginning, self.ending()),
        })
    }

    /// Keeps only the first `duration` minutes of the slot.
    ///
    /// A `duration` longer than the slot yields the slot unchanged.
    ///
    /// # Panics
    ///
    /// Panics on a negative `duration` (contract violation).
    pub fn trim_to(&self, duration: Minutes) -> TimeSlot {
        assert!(!duration.is_negative(), "trim_to with negative duration");
        if duration >= self.minutes() {
            return *self;
        }
        let ending = self
            .beginning()
            .offset(duration)
            .expect("trim_to stays within the day");
        TimeSlot {
            body: TimeOfDayInterval::new(self.beginning(), ending),
        }
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.beginning(), self.ending())
    }
}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.beginning(), self.ending()).cmp(&(other.beginning(), other.ending()))
    }
}

/// Result of [`TimeSlot::subtract`]: zero, one or two remainder pieces,
/// in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotRemainder {
    pieces: [Option<TimeSlot>; 2],
}

impl SlotRemainder {
    #[inline]
    pub fn none() -> Self {
        Self { pieces: [None; 2] }
    }

    #[inline]
    pub fn one(slot: TimeSlot) -> Self {
        Self {
            pieces: [Some(slot), None],
        }
    }

    #[inline]
    pub fn two(first: TimeSlot, second: TimeSlot) -> Self {
        debug_assert!(first.ending() <= second.beginning());
        Self {
            pieces: [Some(first), Some(second)],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces[0].is_none()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.iter().flatten().count()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        self.pieces.iter().copied().flatten()
    }
}

impl IntoIterator for SlotRemainder {
    type Item = TimeSlot;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<TimeSlot>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.into_iter().flatten()
    }
}
