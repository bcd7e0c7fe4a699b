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

//! # Academic Timetables and Week Letters
//!
//! Each pupil follows a recurring two-week timetable: a list of lessons per
//! weekday, keyed by the week letter (A or B) of the date in question. The
//! [`WeekLetterResolver`] trait maps a concrete date to its letter;
//! [`AlternatingWeeks`] is the standard strict A/B alternation and
//! [`WeekLetterCache`] memoizes any resolver for the duration of one
//! allocation run.

use crate::id::{PupilId, SubjectId};
use chrono::NaiveDate;
use lesson_alloc_core::TimeSlot;
use std::{cell::RefCell, collections::HashMap, fmt::Display};

/// The letter of a timetable week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekLetter {
    A,
    B,
}

impl WeekLetter {
    #[inline]
    pub const fn other(self) -> WeekLetter {
        match self {
            WeekLetter::A => WeekLetter::B,
            WeekLetter::B => WeekLetter::A,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            WeekLetter::A => 0,
            WeekLetter::B => 1,
        }
    }
}

impl Display for WeekLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekLetter::A => write!(f, "A"),
            WeekLetter::B => write!(f, "B"),
        }
    }
}

/// One recurring academic lesson in a pupil's timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimetableEntry {
    slot: TimeSlot,
    subject: SubjectId,
    missable: bool,
}

impl TimetableEntry {
    #[inline]
    pub fn new(slot: TimeSlot, subject: SubjectId, missable: bool) -> Self {
        Self {
            slot,
            subject,
            missable,
        }
    }

    #[inline]
    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    #[inline]
    pub fn subject(&self) -> SubjectId {
        self.subject
    }

    /// A missable lesson (registration, private study) never costs anything
    /// to overlap, regardless of the pupil's flexibility.
    #[inline]
    pub fn is_missable(&self) -> bool {
        self.missable
    }
}

/// One pupil's lessons, per week letter and weekday.
#[derive(Debug, Clone, Default)]
struct PupilTimetable {
    // Indexed by [WeekLetter::index()][weekday.num_days_from_sunday()].
    days: [[Vec<TimetableEntry>; 7]; 2],
}

impl PupilTimetable {
    fn add(&mut self, letter: WeekLetter, weekday: chrono::Weekday, entry: TimetableEntry) {
        let day = &mut self.days[letter.index()][weekday.num_days_from_sunday() as usize];
        let at = day
            .iter()
            .position(|e| entry.slot() < e.slot())
            .unwrap_or(day.len());
        day.insert(at, entry);
    }

    fn lessons(&self, letter: WeekLetter, weekday: chrono::Weekday) -> &[TimetableEntry] {
        &self.days[letter.index()][weekday.num_days_from_sunday() as usize]
    }
}

/// The recurring academic schedules of every pupil.
#[derive(Debug, Clone, Default)]
pub struct AcademicTimetables {
    by_pupil: HashMap<PupilId, PupilTimetable>,
}

impl AcademicTimetables {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a recurring lesson, keeping each day's list ordered by slot
    /// beginning.
    pub fn add_entry(
        &mut self,
        pupil: PupilId,
        letter: WeekLetter,
        weekday: chrono::Weekday,
        entry: TimetableEntry,
    ) {
        self.by_pupil
            .entry(pupil)
            .or_default()
            .add(letter, weekday, entry);
    }

    /// The pupil's lessons on the given letter-weekday, in slot order.
    /// Unknown pupils simply have no lessons.
    pub fn lessons_for(
        &self,
        pupil: PupilId,
        letter: WeekLetter,
        weekday: chrono::Weekday,
    ) -> &[TimetableEntry] {
        const NO_LESSONS: &[TimetableEntry] = &[];
        self.by_pupil
            .get(&pupil)
            .map(|t| t.lessons(letter, weekday))
            .unwrap_or(NO_LESSONS)
    }

    #[inline]
    pub fn num_pupils(&self) -> usize {
        self.by_pupil.len()
    }
}

/// Maps a calendar date to the timetable week letter in force on it.
pub trait WeekLetterResolver {
    fn week_letter_for(&self, date: NaiveDate) -> WeekLetter;
}

/// Strict A/B alternation of Sunday-aligned weeks.
///
/// `reference_sunday` anchors the parity: its week carries `first`, the next
/// week the other letter, and so on in both directions.
#[derive(Debug, Clone, Copy)]
pub struct AlternatingWeeks {
    reference_sunday: NaiveDate,
    first: WeekLetter,
}

impl AlternatingWeeks {
    pub fn new(reference: NaiveDate, first: WeekLetter) -> Self {
        Self {
            reference_sunday: lesson_alloc_core::date::week_start(reference),
            first,
        }
    }
}

impl WeekLetterResolver for AlternatingWeeks {
    fn week_letter_for(&self, date: NaiveDate) -> WeekLetter {
        let sunday = lesson_alloc_core::date::week_start(date);
        let weeks = (sunday - self.reference_sunday).num_days() / 7;
        if weeks.rem_euclid(2) == 0 {
            self.first
        } else {
            self.first.other()
        }
    }
}

/// Read-through memoization of a [`WeekLetterResolver`].
///
/// The letter for a date is fixed for the lifetime of one allocation run, so
/// the cache is never invalidated.
#[derive(Debug)]
pub struct WeekLetterCache<R: WeekLetterResolver> {
    inner: R,
    cache: RefCell<HashMap<NaiveDate, WeekLetter>>,
}

impl<R: WeekLetterResolver> WeekLetterCache<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<R: WeekLetterResolver> WeekLetterResolver for WeekLetterCache<R> {
    fn week_letter_for(&self, date: NaiveDate) -> WeekLetter {
        if let Some(&letter) = self.cache.borrow().get(&date) {
            return letter;
        }
        let letter = self.inner.week_letter_for(date);
        self.cache.borrow_mut().insert(date, letter);
        letter
    }
}
