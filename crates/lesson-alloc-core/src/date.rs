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

//! # Calendar-Date Ranges and Cycle Weeks
//!
//! [`DateRange`] mirrors the half-open interval semantics of the time-of-day
//! types over calendar dates, with overlap/containment/intersection and a
//! finite, restartable day iterator.
//!
//! The cycle-week helpers bucket dates into Sunday-aligned 7-day weeks
//! relative to a cycle start: week 0 is the Sunday-aligned week containing
//! the cycle's first day, whatever weekday that is.

use chrono::{Datelike, Days, NaiveDate};
use std::fmt::Display;
use std::iter::FusedIterator;
use std::ops::BitAnd;

/// A half-open `[start, end)` range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range from two dates, ordering the bounds.
    #[inline]
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    /// Single-day range.
    #[inline]
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date.succ_opt().expect("date overflow"),
        }
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The exclusive end date.
    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Two ranges do not overlap iff one starts at or after the other ends.
    #[inline]
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    #[inline]
    pub fn abuts(&self, other: &DateRange) -> bool {
        !self.overlaps(other) && (self.end == other.start || other.end == self.start)
    }

    /// Overlapping portion of two ranges, or `None` when disjoint.
    pub fn intersection(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(DateRange { start, end })
        } else {
            None
        }
    }

    /// Iterates every date in the range, in order. Restartable: each call
    /// yields a fresh iterator.
    #[inline]
    pub fn days(&self) -> DaysIter {
        DaysIter {
            next: self.start,
            end: self.end,
        }
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl BitAnd for &DateRange {
    type Output = Option<DateRange>;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

/// Finite day iterator over a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DaysIter {
    next: NaiveDate,
    end: NaiveDate,
}

impl Iterator for DaysIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.next >= self.end {
            return None;
        }
        let current = self.next;
        self.next = current.succ_opt().expect("date overflow");
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next).num_days().max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DaysIter {}
impl FusedIterator for DaysIter {}

/// The Sunday on or before `date`.
#[inline]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(back))
        .expect("date underflow")
}

/// Index of the Sunday-aligned cycle week containing `date`.
///
/// Week 0 is the week containing `cycle_start`; dates before that week get
/// negative indexes.
#[inline]
pub fn cycle_week_of(cycle_start: NaiveDate, date: NaiveDate) -> i64 {
    let delta = (week_start(date) - week_start(cycle_start)).num_days();
    delta.div_euclid(7)
}

/// The 7-day date range of cycle week `week`.
#[inline]
pub fn cycle_week_range(cycle_start: NaiveDate, week: i64) -> DateRange {
    let base = week_start(cycle_start);
    let start = base + chrono::Duration::days(week * 7);
    DateRange::new(start, start + chrono::Duration::days(7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_orders_bounds() {
        let r = DateRange::new(d(2025, 3, 10), d(2025, 3, 3));
        assert_eq!(r.start(), d(2025, 3, 3));
        assert_eq!(r.end(), d(2025, 3, 10));
    }

    #[test]
    fn test_contains_half_open() {
        let r = DateRange::new(d(2025, 3, 3), d(2025, 3, 10));
        assert!(r.contains(d(2025, 3, 3)));
        assert!(r.contains(d(2025, 3, 9)));
        assert!(!r.contains(d(2025, 3, 10))); // exclusive end
    }

    #[test]
    fn test_overlap_symmetry_and_touching() {
        let a = DateRange::new(d(2025, 3, 3), d(2025, 3, 10));
        let b = DateRange::new(d(2025, 3, 7), d(2025, 3, 14));
        let c = DateRange::new(d(2025, 3, 10), d(2025, 3, 17));
        assert!(a.overlaps(&b) && b.overlaps(&a));
        assert!(!a.overlaps(&c) && !c.overlaps(&a)); // touching only
        assert!(a.abuts(&c));
    }

    #[test]
    fn test_intersection_contained_in_both() {
        let a = DateRange::new(d(2025, 3, 3), d(2025, 3, 10));
        let b = DateRange::new(d(2025, 3, 7), d(2025, 3, 14));
        let i = (&a & &b).unwrap();
        assert_eq!(i, DateRange::new(d(2025, 3, 7), d(2025, 3, 10)));
        for day in i.days() {
            assert!(a.contains(day) && b.contains(day));
        }
        let c = DateRange::new(d(2025, 4, 1), d(2025, 4, 2));
        assert!((&a & &c).is_none());
    }

    #[test]
    fn test_days_iterator_is_finite_and_restartable() {
        let r = DateRange::new(d(2025, 3, 3), d(2025, 3, 6));
        let first: Vec<_> = r.days().collect();
        assert_eq!(
            first,
            vec![d(2025, 3, 3), d(2025, 3, 4), d(2025, 3, 5)]
        );
        // Restart yields the same sequence.
        assert_eq!(r.days().collect::<Vec<_>>(), first);
        assert_eq!(r.days().len(), 3);
    }

    #[test]
    fn test_week_start_is_previous_or_equal_sunday() {
        // 2025-03-05 is a Wednesday.
        assert_eq!(d(2025, 3, 5).weekday(), Weekday::Wed);
        assert_eq!(week_start(d(2025, 3, 5)), d(2025, 3, 2));
        // Sundays map to themselves.
        assert_eq!(week_start(d(2025, 3, 2)), d(2025, 3, 2));
    }

    #[test]
    fn test_cycle_week_of_is_sunday_aligned() {
        // Cycle starts mid-week on Wednesday 2025-03-05.
        let cycle_start = d(2025, 3, 5);
        assert_eq!(cycle_week_of(cycle_start, d(2025, 3, 5)), 0);
        // The Saturday of the same Sunday-aligned week is still week 0...
        assert_eq!(cycle_week_of(cycle_start, d(2025, 3, 8)), 0);
        // ...and the next Sunday begins week 1.
        assert_eq!(cycle_week_of(cycle_start, d(2025, 3, 9)), 1);
        assert_eq!(cycle_week_of(cycle_start, d(2025, 3, 15)), 1);
        assert_eq!(cycle_week_of(cycle_start, d(2025, 3, 16)), 2);
    }

    #[test]
    fn test_cycle_week_range_covers_its_week() {
        let cycle_start = d(2025, 3, 5);
        let week0 = cycle_week_range(cycle_start, 0);
        assert_eq!(week0, DateRange::new(d(2025, 3, 2), d(2025, 3, 9)));
        for day in week0.days() {
            assert_eq!(cycle_week_of(cycle_start, day), 0);
        }
        let week2 = cycle_week_range(cycle_start, 2);
        assert_eq!(week2.start(), d(2025, 3, 16));
        assert_eq!(week2.num_days(), 7);
    }
}
