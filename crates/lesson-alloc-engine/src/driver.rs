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

//! # Week-by-Week Placement Driver
//!
//! [`AllocationDriver`] owns the run state: the growing allocation set, the
//! loading tally and the enumeration step. One call places a single week
//! (interactive partial run) or the whole cycle (batch run).
//!
//! The per-week loop is restart-on-placement: potentials are recomputed,
//! every free slot is walked in step increments running selection, and the
//! first accepted placement invalidates the pass, so the week restarts with
//! fresh state. A week finishes when a full pass places nothing or every
//! course is placed. Courses that fit nowhere are left unallocated; the
//! caller compares placed against requested.

use crate::{
    cost::{modal_duration, LoadCostEngine},
    select::select_for_slot,
    tally::LoadingTally,
};
use chrono::NaiveTime;
use lesson_alloc_core::{date, Minutes};
use lesson_alloc_model::{
    allocation::{AllocationInstance, AllocationSet},
    snapshot::AllocationInput,
};

/// Result of a full-cycle run.
#[derive(Debug)]
pub struct AllocationOutcome {
    allocations: AllocationSet,
    tally: LoadingTally,
    requested: usize,
    placed: usize,
}

impl AllocationOutcome {
    #[inline]
    pub fn allocations(&self) -> &AllocationSet {
        &self.allocations
    }

    #[inline]
    pub fn tally(&self) -> &LoadingTally {
        &self.tally
    }

    /// Course-week pairs the cycle asked for.
    #[inline]
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Course-week pairs actually covered by a placement.
    #[inline]
    pub fn placed(&self) -> usize {
        self.placed
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.placed == self.requested
    }

    pub fn into_allocations(self) -> AllocationSet {
        self.allocations
    }
}

/// Orchestrates one allocation run over a validated input snapshot.
#[derive(Debug)]
pub struct AllocationDriver<'a> {
    input: &'a AllocationInput,
    allocations: AllocationSet,
    tally: LoadingTally,
    step: Minutes,
}

impl<'a> AllocationDriver<'a> {
    /// Builds a driver seeded with the snapshot's existing allocations. The
    /// enumeration step defaults to the modal course duration.
    pub fn new(input: &'a AllocationInput) -> Self {
        let mut allocations = input.starting_allocations().clone();
        let mut tally = LoadingTally::new();
        tally.rebuild(&mut allocations, input);
        Self {
            input,
            allocations,
            tally,
            step: modal_duration(input.courses()),
        }
    }

    /// Overrides the enumeration step, trading CPU for start-offset
    /// coverage.
    ///
    /// # Panics
    ///
    /// Panics on a non-positive step (contract violation).
    pub fn with_step(mut self, step: Minutes) -> Self {
        assert!(step.is_positive(), "non-positive enumeration step");
        self.step = step;
        self
    }

    #[inline]
    pub fn step(&self) -> Minutes {
        self.step
    }

    #[inline]
    pub fn allocations(&self) -> &AllocationSet {
        &self.allocations
    }

    #[inline]
    pub fn tally(&self) -> &LoadingTally {
        &self.tally
    }

    /// Index of the last cycle week.
    fn last_week(&self) -> i64 {
        let cycle = self.input.cycle();
        let last_day = cycle.end().pred_opt().expect("date underflow");
        date::cycle_week_of(cycle.start(), last_day)
    }

    /// Runs the placement loop for one cycle week, returning the number of
    /// placements made.
    pub fn allocate_week(&mut self, week: i64) -> usize {
        let week_days = match date::cycle_week_range(self.input.cycle().start(), week)
            .intersection(self.input.cycle())
        {
            Some(range) => range,
            None => return 0,
        };

        let mut placed = 0usize;
        loop {
            if self
                .input
                .courses()
                .iter()
                .all(|c| self.allocations.is_allocated_in_week(c.course_id(), week))
            {
                break;
            }

            let engine = LoadCostEngine::new(self.input, &self.tally);
            let potentials = engine.calculate_potentials(&week_days, self.step, &self.allocations);

            let mut accepted = None;
            'scan: for day in week_days.days() {
                let free = engine.free_time_on(day, &self.allocations);
                for slot in &free {
                    let mut position = Some(*slot);
                    while let Some(current) = position {
                        let winner = select_for_slot(
                            &engine,
                            &potentials,
                            &self.allocations,
                            day,
                            &current,
                        );
                        if let Some(course_id) = winner {
                            accepted = Some((course_id, day, current));
                            break 'scan;
                        }
                        position = current.pretruncate(self.step);
                    }
                }
            }

            let (course_id, day, slot) = match accepted {
                Some(found) => found,
                // A full pass placed nothing; the week is done.
                None => break,
            };

            let course = self
                .input
                .course(course_id)
                .expect("selection returns known courses");
            let placement = slot.trim_to(course.duration());
            let start = day.and_time(to_naive_time(placement.beginning()));
            let end = day.and_time(to_naive_time(placement.ending()));
            let instance = AllocationInstance::new(course_id, start, end)
                .expect("placement lies within one day");
            tracing::debug!(
                course = %course.display_name(),
                %day,
                slot = %placement,
                "accepted placement"
            );
            self.allocations.add(instance);
            self.tally
                .rebuild_for_pupil(course.pupil_id(), &mut self.allocations, self.input);
            placed += 1;
        }

        tracing::debug!(week, placed, "week finished");
        placed
    }

    /// Runs every cycle week, oldest first, and hands back the final state.
    pub fn allocate_cycle(mut self) -> AllocationOutcome {
        let weeks = 0..=self.last_week();
        for week in weeks.clone() {
            self.allocate_week(week);
        }

        let requested = self.input.courses().len() * weeks.clone().count();
        let mut placed = 0usize;
        for week in weeks {
            placed += self
                .input
                .courses()
                .iter()
                .filter(|c| self.allocations.is_allocated_in_week(c.course_id(), week))
                .count();
        }

        tracing::info!(requested, placed, "allocation cycle finished");
        AllocationOutcome {
            allocations: self.allocations,
            tally: self.tally,
            requested,
            placed,
        }
    }
}

fn to_naive_time(time: lesson_alloc_core::TimeOfDay) -> NaiveTime {
    NaiveTime::from_hms_opt(u32::from(time.hour()), u32::from(time.minute()), 0)
        .expect("time of day within bounds")
}
