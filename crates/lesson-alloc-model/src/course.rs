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

//! One recurring teaching obligation: a pupil who must receive a session of
//! a fixed duration once per week.

use crate::{
    err::NonPositiveDurationError,
    id::{CourseId, PupilId},
};
use lesson_alloc_core::Minutes;
use std::fmt::Display;

/// A pupil's weekly session requirement.
///
/// `can_miss` marks a flexible pupil: one whose own academic lessons may be
/// overlapped at a tallied cost. An inflexible pupil's protected lessons may
/// only be overlapped at [`Cost::PROTECTED_CLASH`](lesson_alloc_core::Cost).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PupilCourse {
    course_id: CourseId,
    pupil_id: PupilId,
    duration: Minutes,
    can_miss: bool,
    display_name: String,
}

impl PupilCourse {
    /// Creates a course, erroring on a zero or negative duration.
    pub fn new(
        course_id: CourseId,
        pupil_id: PupilId,
        duration: Minutes,
        can_miss: bool,
        display_name: impl Into<String>,
    ) -> Result<Self, NonPositiveDurationError> {
        if !duration.is_positive() {
            return Err(NonPositiveDurationError::new(course_id, duration));
        }
        Ok(Self {
            course_id,
            pupil_id,
            duration,
            can_miss,
            display_name: display_name.into(),
        })
    }

    #[inline]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[inline]
    pub fn pupil_id(&self) -> PupilId {
        self.pupil_id
    }

    #[inline]
    pub fn duration(&self) -> Minutes {
        self.duration
    }

    #[inline]
    pub fn can_miss(&self) -> bool {
        self.can_miss
    }

    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Display for PupilCourse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {} min, {})",
            self.display_name,
            self.course_id,
            self.duration.value(),
            if self.can_miss { "flexible" } else { "inflexible" }
        )
    }
}
