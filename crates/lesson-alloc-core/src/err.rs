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

//! Errors raised by the core interval primitives.
//!
//! Contract violations (a slot whose end precedes its beginning, a malformed
//! time string) fail fast at construction; nothing in this module is
//! recoverable-by-retry.

use crate::time::TimeOfDay;
use std::fmt::Display;

/// A [`TimeSlot`](crate::slot::TimeSlot) was constructed with its end before
/// its beginning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidSlotError {
    beginning: TimeOfDay,
    ending: TimeOfDay,
}

impl InvalidSlotError {
    #[inline]
    pub fn new(beginning: TimeOfDay, ending: TimeOfDay) -> Self {
        Self { beginning, ending }
    }

    #[inline]
    pub fn beginning(&self) -> TimeOfDay {
        self.beginning
    }

    #[inline]
    pub fn ending(&self) -> TimeOfDay {
        self.ending
    }
}

impl Display for InvalidSlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot ends before it begins: {} < {}",
            self.ending, self.beginning
        )
    }
}

impl std::error::Error for InvalidSlotError {}

/// A `HH:MM` time-of-day string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeParseError {
    input: String,
}

impl TimeParseError {
    #[inline]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for TimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Not a HH:MM time of day: {:?}", self.input)
    }
}

impl std::error::Error for TimeParseError {}

/// A `"HH:MM - HH:MM"` slot string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotParseError {
    /// The string lacks the `-` separator between the two times.
    MissingSeparator(String),
    /// One of the two halves is not a valid time of day.
    BadTime(TimeParseError),
    /// Both times parsed but the end precedes the beginning.
    Inverted(InvalidSlotError),
}

impl Display for SlotParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotParseError::MissingSeparator(s) => {
                write!(f, "Not a \"HH:MM - HH:MM\" slot: {s:?}")
            }
            SlotParseError::BadTime(e) => write!(f, "{e}"),
            SlotParseError::Inverted(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SlotParseError {}

impl From<TimeParseError> for SlotParseError {
    fn from(value: TimeParseError) -> Self {
        SlotParseError::BadTime(value)
    }
}

impl From<InvalidSlotError> for SlotParseError {
    fn from(value: InvalidSlotError) -> Self {
        SlotParseError::Inverted(value)
    }
}
