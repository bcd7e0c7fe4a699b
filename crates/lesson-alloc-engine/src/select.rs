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

//! # Slot Winner Selection
//!
//! Given one date and one target slot, [`select_for_slot`] chooses at most
//! one pupil-course:
//!
//! 1. pool: courses not yet allocated in the cycle week containing the date;
//! 2. drop courses longer than the slot;
//! 3. drop courses whose pupil is immovably booked there;
//! 4. keep only courses for whom this slot matches their current best cost;
//! 5. keep the subset with the highest cost of missing this slot;
//! 6. keep the subset with the lowest cost here;
//! 7. scarcity tie-break: fewest remaining lowest-cost candidates wins, but
//!    an inflexible incumbent yields only to a scarcer inflexible rival,
//!    never to a flexible one.

use crate::{cost::LoadCostEngine, potential::PotentialTable};
use chrono::NaiveDate;
use lesson_alloc_core::{Cost, TimeSlot};
use lesson_alloc_model::{allocation::AllocationSet, course::PupilCourse, id::CourseId};

struct Candidate<'a> {
    course: &'a PupilCourse,
    cost_here: Cost,
    // None means no alternative anywhere: maximal opportunity cost.
    cost_of_missing: Option<Cost>,
    scarcity: usize,
}

// None outranks every finite opportunity cost.
fn missing_rank(cost_of_missing: Option<Cost>) -> (bool, i64) {
    match cost_of_missing {
        None => (true, 0),
        Some(c) => (false, c.value()),
    }
}

/// Chooses at most one course for `slot` on `date`.
pub fn select_for_slot(
    engine: &LoadCostEngine<'_>,
    potentials: &PotentialTable,
    allocations: &AllocationSet,
    date: NaiveDate,
    slot: &TimeSlot,
) -> Option<CourseId> {
    let week = allocations.week_of(date);
    let mut survivors: Vec<Candidate<'_>> = Vec::new();

    for course in engine.input().courses() {
        if allocations.is_allocated_in_week(course.course_id(), week) {
            continue;
        }
        if course.duration() > slot.minutes() {
            continue;
        }
        let candidate_slot = slot.trim_to(course.duration());
        if engine.has_external_clash(course, date, &candidate_slot) {
            continue;
        }
        let course_potentials = match potentials.for_course(course.course_id()) {
            Some(p) => p,
            None => continue,
        };
        let cost_here = engine.cost_for(course, date, slot);
        // An inflexible pupil is never pulled out of a protected lesson;
        // such a course stays unallocated rather than placed at 1000.
        if !course.can_miss() && cost_here >= Cost::PROTECTED_CLASH {
            continue;
        }
        // Only courses for whom this is individually their best option stay
        // in the running.
        if course_potentials.best_cost() != Some(cost_here) {
            continue;
        }
        survivors.push(Candidate {
            course,
            cost_here,
            cost_of_missing: course_potentials.cost_of_missing(cost_here),
            scarcity: course_potentials.lowest_cost_count(),
        });
    }

    if survivors.is_empty() {
        return None;
    }

    let top_missing = survivors
        .iter()
        .map(|c| missing_rank(c.cost_of_missing))
        .max()
        .expect("non-empty survivors");
    survivors.retain(|c| missing_rank(c.cost_of_missing) == top_missing);

    let lowest_cost = survivors
        .iter()
        .map(|c| c.cost_here)
        .min()
        .expect("non-empty survivors");
    survivors.retain(|c| c.cost_here == lowest_cost);

    let mut incumbent: Option<&Candidate<'_>> = None;
    for candidate in &survivors {
        let displaces = match incumbent {
            None => true,
            Some(held) => {
                if held.course.can_miss() {
                    candidate.scarcity < held.scarcity
                } else {
                    // Inflexible incumbents yield only to scarcer inflexible
                    // rivals.
                    !candidate.course.can_miss() && candidate.scarcity < held.scarcity
                }
            }
        };
        if displaces {
            incumbent = Some(candidate);
        }
    }

    incumbent.map(|c| c.course.course_id())
}
