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

//! # Lesson Allocation Model (`lesson-alloc-model`)
//!
//! High-level data model for the lesson allocation problem, built on the
//! interval primitives of `lesson-alloc-core`.
//!
//! ## Key Data Structures
//!
//! - **`PupilCourse`**: one required recurring teaching session for one
//!   pupil, with a duration and a flexibility flag.
//! - **`AcademicTimetables`**: each pupil's recurring lesson schedule per
//!   week letter and weekday, with the `WeekLetterResolver` collaborator
//!   (and its request-scoped cache) that maps dates to week letters.
//! - **`AvailabilityCalendar`**, **`OtherEngagements`**,
//!   **`OtherAllocations`**: the staff member's recurring availability and
//!   the externally fixed, immovable commitments of the staff member and
//!   the pupils.
//! - **`AllocationSet`** / **`AllocationInstance`**: the placements made for
//!   one staff member, indexed by date and by Sunday-aligned cycle week.
//! - **`AllocationInput`**: the single validated input snapshot the engine
//!   consumes, with `RawSnapshot` as its serde boundary form.
//!
//! The engine itself lives in `lesson-alloc-engine`; this crate owns only
//! the read-only inputs and the growing result container.

pub mod allocation;
pub mod constraint;
pub mod course;
pub mod err;
pub mod generator;
pub mod id;
pub mod snapshot;
pub mod timetable;

pub mod prelude {
    pub use crate::allocation::{AllocationInstance, AllocationSet};
    pub use crate::constraint::{AvailabilityCalendar, OtherAllocations, OtherEngagements};
    pub use crate::course::PupilCourse;
    pub use crate::generator::{GeneratorConfig, InstanceGenerator};
    pub use crate::id::{CourseId, PupilId, SubjectId};
    pub use crate::snapshot::{AllocationInput, AllocationInputBuilder, RawSnapshot};
    pub use crate::timetable::{
        AcademicTimetables, AlternatingWeeks, TimetableEntry, WeekLetter, WeekLetterCache,
        WeekLetterResolver,
    };
}
