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

//! # Lesson Allocation Engine (`lesson-alloc-engine`)
//!
//! The placement algorithm proper: given the validated
//! [`AllocationInput`](lesson_alloc_model::snapshot::AllocationInput), find
//! a conflict-free placement of every pupil-course into the staff member's
//! free time, week by week, minimizing disruption to the pupils' academic
//! timetables and prioritizing pupils with fewer options.
//!
//! ## Pipeline
//!
//! 1. [`tally`]: running per-pupil, per-subject clash counts — the memory
//!    that makes repeated clashes with the same subject progressively more
//!    expensive.
//! 2. [`cost`]: the disruption cost of one concrete placement, and the
//!    enumeration of every viable candidate ([`PotentialTable`]).
//! 3. [`select`]: at most one winner per slot, by best-option, opportunity
//!    cost and scarcity filters.
//! 4. [`driver`]: the per-week restart-on-placement loop and the full-cycle
//!    batch entry point.
//!
//! The engine is single-threaded and does no I/O; a run is a deterministic
//! function of its input snapshot.
//!
//! [`PotentialTable`]: potential::PotentialTable

pub mod cost;
pub mod driver;
pub mod potential;
pub mod select;
pub mod tally;

pub mod prelude {
    pub use crate::cost::LoadCostEngine;
    pub use crate::driver::{AllocationDriver, AllocationOutcome};
    pub use crate::potential::{CoursePotentials, Potential, PotentialTable};
    pub use crate::select::select_for_slot;
    pub use crate::tally::LoadingTally;
}
