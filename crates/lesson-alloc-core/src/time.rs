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

//! # Time-of-Day Primitives
//!
//! This module provides the minute-precision time axis of the engine:
//!
//! - [`TimeOfDay`]: a point within one day, stored as a minute-of-day.
//! - [`Minutes`]: a signed duration between two such points.
//! - [`TimeOfDayInterval`]: a half-open `[beginning, ending)` interval of
//!   times of day that may cross midnight. Construction always normalizes to
//!   the representation with a forward inner span and remembers whether that
//!   required inverting the bounds; the set predicates (`overlaps`,
//!   `contains`, `abuts`) are correct for every combination of polarities.
//!
//! The use of distinct newtypes enforces correctness at compile time — for
//! example, preventing the addition of two `TimeOfDay`s. Arithmetic is
//! checked and panics on overflow rather than wrapping silently.

use crate::err::TimeParseError;
use chrono::{NaiveTime, Timelike};
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// Number of minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// A signed duration in whole minutes.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Minutes(i64);

impl Minutes {
    #[inline]
    pub const fn new(value: i64) -> Self {
        Minutes(value)
    }

    #[inline]
    pub const fn zero() -> Self {
        Minutes(0)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Minutes) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Minutes)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Minutes) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Minutes)
    }
}

impl Display for Minutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Minutes({})", self.0)
    }
}

impl From<i64> for Minutes {
    #[inline]
    fn from(value: i64) -> Self {
        Minutes(value)
    }
}

impl Add for Minutes {
    type Output = Minutes;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Minutes(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in Minutes + Minutes"),
        )
    }
}

impl AddAssign for Minutes {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_add(rhs.0)
            .expect("overflow in Minutes += Minutes");
    }
}

impl Sub for Minutes {
    type Output = Minutes;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Minutes(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in Minutes - Minutes"),
        )
    }
}

impl SubAssign for Minutes {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_sub(rhs.0)
            .expect("underflow in Minutes -= Minutes");
    }
}

impl Neg for Minutes {
    type Output = Minutes;

    fn neg(self) -> Self::Output {
        Minutes(self.0.checked_neg().expect("overflow in -Minutes"))
    }
}

impl Sum for Minutes {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Minutes::zero(), |acc, x| acc + x)
    }
}

/// A point within one day, at minute precision.
///
/// Stored as a minute-of-day in `0..1440`; the type cannot represent an
/// out-of-day instant.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Creates a time of day from a minute-of-day.
    ///
    /// # Panics
    ///
    /// Panics when `minute_of_day` is not below [`MINUTES_PER_DAY`].
    #[inline]
    pub const fn new(minute_of_day: u16) -> Self {
        assert!(
            (minute_of_day as i64) < MINUTES_PER_DAY,
            "minute-of-day out of range"
        );
        TimeOfDay(minute_of_day)
    }

    /// Creates a time of day from an hour and a minute.
    ///
    /// # Panics
    ///
    /// Panics when `hour >= 24` or `minute >= 60`.
    #[inline]
    pub const fn from_hm(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "hour or minute out of range");
        TimeOfDay(hour * 60 + minute)
    }

    #[inline]
    pub const fn midnight() -> Self {
        TimeOfDay(0)
    }

    #[inline]
    pub const fn minute_of_day(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    #[inline]
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Parses a `HH:MM` string.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let t = NaiveTime::parse_from_str(input.trim(), "%H:%M")
            .map_err(|_| TimeParseError::new(input))?;
        Ok(TimeOfDay((t.hour() * 60 + t.minute()) as u16))
    }

    /// Shifts this time of day by `delta`, returning `None` when the result
    /// leaves the day.
    #[inline]
    pub fn offset(self, delta: Minutes) -> Option<TimeOfDay> {
        let shifted = i64::from(self.0) + delta.value();
        if (0..MINUTES_PER_DAY).contains(&shifted) {
            Some(TimeOfDay(shifted as u16))
        } else {
            None
        }
    }

    /// Forward (wrap-aware) distance from `self` to `other`.
    ///
    /// Always non-negative and below one day; the distance from 23:00 to
    /// 01:00 is 120 minutes.
    #[inline]
    pub fn forward_to(self, other: TimeOfDay) -> Minutes {
        let diff = i64::from(other.0) - i64::from(self.0);
        Minutes::new(diff.rem_euclid(MINUTES_PER_DAY))
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Signed difference between two times of day, ignoring midnight wrap.
impl Sub for TimeOfDay {
    type Output = Minutes;

    #[inline]
    fn sub(self, rhs: TimeOfDay) -> Self::Output {
        Minutes::new(i64::from(self.0) - i64::from(rhs.0))
    }
}

/// Inner linear segment of an interval, in minutes since midnight.
type Segment = (i64, i64);

/// A half-open `[beginning, ending)` interval of times of day.
///
/// The interval may represent a span crossing midnight: construction keeps
/// whichever of the direct or midnight-wrapping reading yields a forward
/// inner span and records the choice in the `inverted` flag. A span of
/// 22:00 → 02:00 is therefore four hours long, not minus twenty.
///
/// All predicates decompose the interval into at most two forward segments
/// within the day and apply the half-open overlap rule per segment pair, so
/// `overlaps`, `contains` and `abuts` are correct for every combination of
/// polarities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDayInterval {
    beginning: TimeOfDay,
    ending: TimeOfDay,
    inverted: bool,
}

impl TimeOfDayInterval {
    #[inline]
    pub fn new(beginning: TimeOfDay, ending: TimeOfDay) -> Self {
        Self {
            beginning,
            ending,
            inverted: ending < beginning,
        }
    }

    #[inline]
    pub fn beginning(&self) -> TimeOfDay {
        self.beginning
    }

    #[inline]
    pub fn ending(&self) -> TimeOfDay {
        self.ending
    }

    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.inverted && self.beginning == self.ending
    }

    /// Length of the inner span.
    #[inline]
    pub fn duration(&self) -> Minutes {
        self.beginning.forward_to(self.ending)
    }

    /// The interval's forward segments within the day. The second segment is
    /// empty unless the interval crosses midnight.
    #[inline]
    fn segments(&self) -> [Segment; 2] {
        let b = i64::from(self.beginning.minute_of_day());
        let e = i64::from(self.ending.minute_of_day());
        if self.inverted {
            [(b, MINUTES_PER_DAY), (0, e)]
        } else {
            [(b, e), (0, 0)]
        }
    }

    /// Returns `true` if the two intervals share at least one minute.
    ///
    /// Two forward segments do *not* overlap iff `a.start >= b.end` or
    /// `b.start >= a.end`; an interval overlaps another iff any pair of
    /// their segments does.
    pub fn overlaps(&self, other: &TimeOfDayInterval) -> bool {
        for (s0, s1) in self.segments() {
            if s0 >= s1 {
                continue;
            }
            for (o0, o1) in other.segments() {
                if o0 >= o1 {
                    continue;
                }
                if s0 < o1 && o0 < s1 {
                    return true;
                }
            }
        }
        false
    }

    /// Returns `true` if `time` falls within the interval.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        let t = i64::from(time.minute_of_day());
        self.segments().iter().any(|&(s0, s1)| s0 <= t && t < s1)
    }

    /// Returns `true` if every minute of `other` falls within `self`.
    pub fn encloses(&self, other: &TimeOfDayInterval) -> bool {
        let own = self.segments();
        other.segments().iter().all(|&(o0, o1)| {
            o0 >= o1 || own.iter().any(|&(s0, s1)| s0 <= o0 && o1 <= s1)
        })
    }

    /// Returns `true` if the intervals touch end-to-start without sharing a
    /// minute of inner span.
    pub fn abuts(&self, other: &TimeOfDayInterval) -> bool {
        !self.overlaps(other)
            && (self.ending == other.beginning || other.ending == self.beginning)
    }
}

impl Display for TimeOfDayInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.beginning, self.ending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tod(h: u16, m: u16) -> TimeOfDay {
        TimeOfDay::from_hm(h, m)
    }

    fn iv(b: (u16, u16), e: (u16, u16)) -> TimeOfDayInterval {
        TimeOfDayInterval::new(tod(b.0, b.1), tod(e.0, e.1))
    }

    #[test]
    fn test_time_of_day_parse_and_display() {
        let t = TimeOfDay::parse("09:30").unwrap();
        assert_eq!(t, tod(9, 30));
        assert_eq!(format!("{t}"), "09:30");
        assert!(TimeOfDay::parse("25:00").is_err());
        assert!(TimeOfDay::parse("not a time").is_err());
    }

    #[test]
    fn test_time_of_day_offset() {
        assert_eq!(tod(9, 0).offset(Minutes::new(30)), Some(tod(9, 30)));
        assert_eq!(tod(23, 30).offset(Minutes::new(60)), None);
        assert_eq!(tod(0, 30).offset(Minutes::new(-31)), None);
    }

    #[test]
    fn test_forward_to_wraps() {
        assert_eq!(tod(23, 0).forward_to(tod(1, 0)), Minutes::new(120));
        assert_eq!(tod(9, 0).forward_to(tod(10, 0)), Minutes::new(60));
        assert_eq!(tod(9, 0).forward_to(tod(9, 0)), Minutes::new(0));
    }

    #[test]
    fn test_minutes_arithmetic() {
        assert_eq!(Minutes::new(30) + Minutes::new(15), Minutes::new(45));
        assert_eq!(Minutes::new(30) - Minutes::new(45), Minutes::new(-15));
        assert_eq!(-Minutes::new(10), Minutes::new(-10));
        assert!(Minutes::new(-1).is_negative());
    }

    #[test]
    fn test_interval_polarity_and_duration() {
        let direct = iv((9, 0), (10, 0));
        assert!(!direct.is_inverted());
        assert_eq!(direct.duration(), Minutes::new(60));

        let wrapped = iv((22, 0), (2, 0));
        assert!(wrapped.is_inverted());
        assert_eq!(wrapped.duration(), Minutes::new(240));
    }

    #[test]
    fn test_overlaps_direct_direct() {
        let a = iv((9, 0), (10, 0));
        assert!(a.overlaps(&iv((9, 30), (11, 0))));
        assert!(!a.overlaps(&iv((10, 0), (11, 0)))); // touching only
        assert!(!a.overlaps(&iv((7, 0), (9, 0))));
    }

    #[test]
    fn test_overlaps_wrapped_cases() {
        let night = iv((22, 0), (2, 0));
        assert!(night.overlaps(&iv((23, 0), (23, 30))));
        assert!(night.overlaps(&iv((1, 0), (3, 0))));
        assert!(!night.overlaps(&iv((2, 0), (22, 0)))); // the exact complement
        assert!(night.overlaps(&iv((21, 0), (1, 0))));
        let other_night = iv((23, 0), (5, 0));
        assert!(night.overlaps(&other_night));
        assert!(other_night.overlaps(&night));
    }

    #[test]
    fn test_overlap_symmetry() {
        let cases = [
            (iv((9, 0), (10, 0)), iv((9, 30), (11, 0))),
            (iv((22, 0), (2, 0)), iv((1, 0), (3, 0))),
            (iv((22, 0), (2, 0)), iv((23, 0), (5, 0))),
            (iv((9, 0), (10, 0)), iv((10, 0), (11, 0))),
        ];
        for (a, b) in cases {
            assert_eq!(a.overlaps(&b), b.overlaps(&a), "{a} vs {b}");
        }
    }

    #[test]
    fn test_contains_time() {
        let night = iv((22, 0), (2, 0));
        assert!(night.contains(tod(23, 0)));
        assert!(night.contains(tod(1, 59)));
        assert!(night.contains(tod(22, 0)));
        assert!(!night.contains(tod(2, 0))); // exclusive end
        assert!(!night.contains(tod(12, 0)));
    }

    #[test]
    fn test_encloses() {
        let day = iv((8, 0), (18, 0));
        assert!(day.encloses(&iv((9, 0), (10, 0))));
        assert!(!day.encloses(&iv((17, 0), (19, 0))));

        let night = iv((22, 0), (4, 0));
        assert!(night.encloses(&iv((23, 0), (1, 0))));
        assert!(!night.encloses(&iv((3, 0), (5, 0))));
    }

    #[test]
    fn test_abuts() {
        let a = iv((9, 0), (10, 0));
        let b = iv((10, 0), (11, 0));
        assert!(a.abuts(&b));
        assert!(b.abuts(&a));
        assert!(!a.abuts(&iv((9, 30), (11, 0)))); // overlapping, not abutting

        // Wrap polarity: [23:00, 01:00) abuts [01:00, 02:00).
        let night = iv((23, 0), (1, 0));
        assert!(night.abuts(&iv((1, 0), (2, 0))));
        assert!(night.abuts(&iv((22, 0), (23, 0))));
    }

    #[test]
    fn test_empty_interval() {
        let empty = iv((9, 0), (9, 0));
        assert!(empty.is_empty());
        assert_eq!(empty.duration(), Minutes::zero());
        assert!(!empty.overlaps(&iv((8, 0), (10, 0))));
    }
}
