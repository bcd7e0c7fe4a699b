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

//! Errors raised while assembling the input snapshot.
//!
//! Only structural problems that make the whole snapshot unusable are
//! errors; a single malformed row in the raw input is dropped with a debug
//! log instead.

use crate::id::CourseId;
use chrono::NaiveDateTime;
use lesson_alloc_core::Minutes;
use std::fmt::Display;

/// A course was declared with a zero or negative session duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonPositiveDurationError {
    course_id: CourseId,
    duration: Minutes,
}

impl NonPositiveDurationError {
    #[inline]
    pub fn new(course_id: CourseId, duration: Minutes) -> Self {
        Self {
            course_id,
            duration,
        }
    }

    #[inline]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[inline]
    pub fn duration(&self) -> Minutes {
        self.duration
    }
}

impl Display for NonPositiveDurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Course {} has non-positive duration {}",
            self.course_id, self.duration
        )
    }
}

impl std::error::Error for NonPositiveDurationError {}

/// An allocation instance was constructed with impossible bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidAllocationError {
    /// The end instant precedes the start instant.
    Backwards {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Start and end fall on different calendar dates.
    CrossesMidnight {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl Display for InvalidAllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidAllocationError::Backwards { start, end } => {
                write!(f, "Allocation ends before it starts: {end} < {start}")
            }
            InvalidAllocationError::CrossesMidnight { start, end } => {
                write!(f, "Allocation crosses midnight: {start} to {end}")
            }
        }
    }
}

impl std::error::Error for InvalidAllocationError {}

/// The input snapshot is structurally unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotBuildError {
    /// The allocation cycle contains no days.
    EmptyCycle,
    /// A cycle boundary date could not be parsed.
    BadCycleDate(String),
    /// Two courses carry the same identifier.
    DuplicateCourseId(CourseId),
}

impl Display for SnapshotBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotBuildError::EmptyCycle => write!(f, "Allocation cycle contains no days"),
            SnapshotBuildError::BadCycleDate(s) => {
                write!(f, "Not a YYYY-MM-DD cycle date: {s:?}")
            }
            SnapshotBuildError::DuplicateCourseId(id) => {
                write!(f, "Duplicate course identifier {id}")
            }
        }
    }
}

impl std::error::Error for SnapshotBuildError {}
