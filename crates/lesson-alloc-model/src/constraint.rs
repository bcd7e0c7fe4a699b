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

//! # Hard Placement Constraints
//!
//! Three structures bound where a lesson may land at all:
//!
//! - [`AvailabilityCalendar`]: the staff member's recurring weekly working
//!   windows. Placements happen only inside these.
//! - [`OtherEngagements`]: dated, immovable commitments of the staff member
//!   (meetings, cover, absence) that carve time out of the windows.
//! - [`OtherAllocations`]: lessons other staff have already booked with the
//!   same pupils. A pupil cannot be in two lessons at once, so these are
//!   hard blocks on the pupil side.
//!
//! All three answer per-date queries with a [`TimeSlotSet`].

use crate::id::PupilId;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use lesson_alloc_core::{TimeOfDay, TimeSlot, TimeSlotSet};
use std::collections::HashMap;

static EMPTY: TimeSlotSet = TimeSlotSet::new();

/// The staff member's recurring weekly availability windows.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityCalendar {
    // Indexed by weekday.num_days_from_sunday().
    by_weekday: [TimeSlotSet; 7],
}

impl AvailabilityCalendar {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recurring window; overlapping or touching windows coalesce.
    pub fn add_window(&mut self, weekday: chrono::Weekday, window: TimeSlot) {
        self.by_weekday[weekday.num_days_from_sunday() as usize].insert(window);
    }

    /// The windows in force on `date` (by its weekday).
    #[inline]
    pub fn windows_on(&self, date: NaiveDate) -> &TimeSlotSet {
        &self.by_weekday[date.weekday().num_days_from_sunday() as usize]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_weekday.iter().all(TimeSlotSet::is_empty)
    }
}

/// Splits a concrete `[start, end)` booking into per-date slots.
///
/// A booking spanning midnight contributes a tail slot to its first day and
/// a head slot to each later day. A day fully covered contributes its whole
/// span; the last minute of a day cannot be represented, so full-day tails
/// close at 23:59.
fn day_slots(start: NaiveDateTime, end: NaiveDateTime) -> Vec<(NaiveDate, TimeSlot)> {
    if end <= start {
        return Vec::new();
    }
    let end_of_day = TimeOfDay::from_hm(23, 59);
    let mut out = Vec::new();
    let mut date = start.date();
    while date <= end.date() {
        let from = if date == start.date() {
            TimeOfDay::from_hm(start.hour() as u16, start.minute() as u16)
        } else {
            TimeOfDay::midnight()
        };
        let to = if date == end.date() {
            TimeOfDay::from_hm(end.hour() as u16, end.minute() as u16)
        } else {
            end_of_day
        };
        if from < to {
            // Bounds are ordered by construction.
            out.push((date, TimeSlot::new(from, to).expect("ordered day slot")));
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    out
}

/// Dated, immovable commitments of the staff member.
#[derive(Debug, Clone, Default)]
pub struct OtherEngagements {
    by_date: HashMap<NaiveDate, TimeSlotSet>,
}

impl OtherEngagements {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a concrete engagement, split per day when it spans midnight.
    pub fn add(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        for (date, slot) in day_slots(start, end) {
            self.by_date.entry(date).or_default().insert(slot);
        }
    }

    /// Time the staff member is engaged on `date`.
    #[inline]
    pub fn engaged_on(&self, date: NaiveDate) -> &TimeSlotSet {
        self.by_date.get(&date).unwrap_or(&EMPTY)
    }
}

/// Lessons other staff members have already booked with the same pupils.
#[derive(Debug, Clone, Default)]
pub struct OtherAllocations {
    by_pupil: HashMap<PupilId, HashMap<NaiveDate, TimeSlotSet>>,
}

impl OtherAllocations {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records another staff member's booking of `pupil`.
    pub fn add(&mut self, pupil: PupilId, start: NaiveDateTime, end: NaiveDateTime) {
        let days = self.by_pupil.entry(pupil).or_default();
        for (date, slot) in day_slots(start, end) {
            days.entry(date).or_default().insert(slot);
        }
    }

    /// Time `pupil` is already booked elsewhere on `date`.
    pub fn busy_on(&self, pupil: PupilId, date: NaiveDate) -> &TimeSlotSet {
        self.by_pupil
            .get(&pupil)
            .and_then(|days| days.get(&date))
            .unwrap_or(&EMPTY)
    }

    /// Returns `true` if placing `pupil` in `slot` on `date` would
    /// double-book them.
    #[inline]
    pub fn clashes(&self, pupil: PupilId, date: NaiveDate, slot: &TimeSlot) -> bool {
        self.busy_on(pupil, date).overlaps(slot)
    }
}
