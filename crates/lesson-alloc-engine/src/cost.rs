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

//! # Disruption Cost and Candidate Enumeration
//!
//! [`LoadCostEngine`] prices one concrete placement and enumerates every
//! viable candidate over a date range.
//!
//! The price of placing a course is the disruption to its pupil's academic
//! timetable: overlapping a missable lesson is free; overlapping a protected
//! lesson of an inflexible pupil costs [`Cost::PROTECTED_CLASH`]; a flexible
//! pupil pays the running clash tally for the overlapped subject plus one,
//! so repeated pulls from the same subject escalate while one-off misses
//! spread across subjects stay cheap.

use crate::{
    potential::{Potential, PotentialTable},
    tally::LoadingTally,
};
use chrono::{Datelike, NaiveDate};
use lesson_alloc_core::{Cost, DateRange, Minutes, TimeSlot, TimeSlotSet};
use lesson_alloc_model::{
    allocation::AllocationSet, course::PupilCourse, snapshot::AllocationInput,
};

/// Prices placements against one input snapshot and tally state.
///
/// Borrowing both immutably keeps a pricing pass free of hidden state: the
/// same engine produces the same numbers until a placement is accepted and
/// a new engine is built over the refreshed tally.
#[derive(Debug, Clone, Copy)]
pub struct LoadCostEngine<'a> {
    input: &'a AllocationInput,
    tally: &'a LoadingTally,
}

impl<'a> LoadCostEngine<'a> {
    #[inline]
    pub fn new(input: &'a AllocationInput, tally: &'a LoadingTally) -> Self {
        Self { input, tally }
    }

    #[inline]
    pub fn input(&self) -> &'a AllocationInput {
        self.input
    }

    /// Disruption cost of placing `course` at the front of `target_slot` on
    /// `date`.
    ///
    /// Only the first `course.duration()` minutes of the slot are priced;
    /// the remainder of a longer slot is irrelevant to this placement.
    pub fn cost_for(&self, course: &PupilCourse, date: NaiveDate, target_slot: &TimeSlot) -> Cost {
        let slot = target_slot.trim_to(course.duration());
        let letter = self.input.week_letter_for(date);
        let lessons = self
            .input
            .timetables()
            .lessons_for(course.pupil_id(), letter, date.weekday());

        let mut cost = Cost::zero();
        for lesson in lessons {
            if !lesson.slot().overlaps(&slot) || lesson.is_missable() {
                continue;
            }
            if !course.can_miss() {
                cost += Cost::PROTECTED_CLASH;
            } else {
                let tallied = self.tally.count(course.pupil_id(), lesson.subject());
                cost += Cost::new(i64::from(tallied) + 1);
            }
        }
        cost
    }

    /// The staff member's free time on `date`: availability windows minus
    /// their own placements minus fixed engagements.
    pub fn free_time_on(&self, date: NaiveDate, allocations: &AllocationSet) -> TimeSlotSet {
        let windows = self.input.windows_on(date);
        let booked = allocations.slots_on(date);
        let engaged = self.input.engagements().engaged_on(date);
        &(windows - &booked) - engaged
    }

    /// Returns `true` if the pupil of `course` is immovably booked over
    /// `slot` on `date`.
    #[inline]
    pub fn has_external_clash(
        &self,
        course: &PupilCourse,
        date: NaiveDate,
        slot: &TimeSlot,
    ) -> bool {
        self.input
            .other_allocations()
            .clashes(course.pupil_id(), date, slot)
    }

    /// Enumerates every viable candidate placement in `range`.
    ///
    /// Each free slot is considered at full length, then repeatedly
    /// front-truncated by `step` until exhausted; at every position, every
    /// course still unallocated in that date's cycle week whose duration
    /// fits and whose pupil has no fixed clash gets a priced [`Potential`].
    /// Identical inputs yield an identical table.
    ///
    /// # Panics
    ///
    /// Panics on a non-positive `step` (contract violation).
    pub fn calculate_potentials(
        &self,
        range: &DateRange,
        step: Minutes,
        allocations: &AllocationSet,
    ) -> PotentialTable {
        assert!(step.is_positive(), "non-positive potential step");
        let mut table = PotentialTable::new();
        for date in range.days() {
            let week = allocations.week_of(date);
            let free = self.free_time_on(date, allocations);
            for slot in &free {
                let mut position = Some(*slot);
                while let Some(current) = position {
                    for course in self.input.courses() {
                        if allocations.is_allocated_in_week(course.course_id(), week) {
                            continue;
                        }
                        if course.duration() > current.minutes() {
                            continue;
                        }
                        let candidate = current.trim_to(course.duration());
                        if self.has_external_clash(course, date, &candidate) {
                            continue;
                        }
                        let cost = self.cost_for(course, date, &current);
                        table.insert(course.course_id(), Potential::new(date, candidate, cost));
                    }
                    position = current.pretruncate(step);
                }
            }
        }
        table
    }
}

/// The modal course duration, smallest among ties; the default enumeration
/// step.
pub fn modal_duration(courses: &[PupilCourse]) -> Minutes {
    const FALLBACK: Minutes = Minutes::new(30);
    let mut counts: std::collections::BTreeMap<Minutes, usize> = std::collections::BTreeMap::new();
    for course in courses {
        *counts.entry(course.duration()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by_key(|&(duration, count)| (count, std::cmp::Reverse(duration)))
        .map(|(duration, _)| duration)
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};
    use lesson_alloc_core::TimeOfDay;
    use lesson_alloc_model::{
        allocation::AllocationInstance,
        id::{CourseId, PupilId, SubjectId},
        snapshot::AllocationInputBuilder,
        timetable::{TimetableEntry, WeekLetter},
    };

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn slot(b: (u16, u16), e: (u16, u16)) -> TimeSlot {
        TimeSlot::new(TimeOfDay::from_hm(b.0, b.1), TimeOfDay::from_hm(e.0, e.1)).unwrap()
    }

    fn course(id: u64, pupil: u64, minutes: i64, can_miss: bool) -> PupilCourse {
        PupilCourse::new(
            CourseId::new(id),
            PupilId::new(pupil),
            Minutes::new(minutes),
            can_miss,
            format!("Course {id}"),
        )
        .unwrap()
    }

    // Cycle 2025-03-02 (Sunday) for two weeks, availability Mon 09:00-11:00.
    fn base_builder() -> AllocationInputBuilder {
        let mut builder = AllocationInputBuilder::new()
            .cycle(DateRange::new(d(2), d(16)))
            .first_week_letter(WeekLetter::A);
        builder.add_window(Weekday::Mon, slot((9, 0), (11, 0)));
        builder
    }

    #[test]
    fn test_cost_zero_without_timetable_overlap() {
        let input = base_builder().course(course(1, 10, 30, true)).build().unwrap();
        let tally = LoadingTally::new();
        let engine = LoadCostEngine::new(&input, &tally);
        let c = engine.cost_for(&input.courses()[0], d(3), &slot((9, 0), (10, 0)));
        assert_eq!(c, Cost::zero());
    }

    #[test]
    fn test_cost_missable_lesson_is_free() {
        let mut builder = base_builder().course(course(1, 10, 30, true));
        builder.add_timetable_entry(
            PupilId::new(10),
            WeekLetter::A,
            Weekday::Mon,
            TimetableEntry::new(slot((9, 0), (10, 0)), SubjectId::new(1), true),
        );
        let input = builder.build().unwrap();
        let tally = LoadingTally::new();
        let engine = LoadCostEngine::new(&input, &tally);
        assert_eq!(
            engine.cost_for(&input.courses()[0], d(3), &slot((9, 0), (10, 0))),
            Cost::zero()
        );
    }

    #[test]
    fn test_cost_inflexible_pupil_pays_protected_clash() {
        let mut builder = base_builder().course(course(1, 10, 30, false));
        builder.add_timetable_entry(
            PupilId::new(10),
            WeekLetter::A,
            Weekday::Mon,
            TimetableEntry::new(slot((9, 0), (10, 0)), SubjectId::new(1), false),
        );
        let input = builder.build().unwrap();
        let tally = LoadingTally::new();
        let engine = LoadCostEngine::new(&input, &tally);
        assert_eq!(
            engine.cost_for(&input.courses()[0], d(3), &slot((9, 0), (10, 0))),
            Cost::PROTECTED_CLASH
        );
    }

    #[test]
    fn test_cost_flexible_pupil_escalates_with_tally() {
        let mut builder = base_builder().course(course(1, 10, 30, true));
        builder.add_timetable_entry(
            PupilId::new(10),
            WeekLetter::A,
            Weekday::Mon,
            TimetableEntry::new(slot((9, 0), (10, 0)), SubjectId::new(1), false),
        );
        let input = builder.build().unwrap();

        let mut tally = LoadingTally::new();
        let engine = LoadCostEngine::new(&input, &tally);
        assert_eq!(
            engine.cost_for(&input.courses()[0], d(3), &slot((9, 0), (10, 0))),
            Cost::new(1)
        );

        tally.record(PupilId::new(10), SubjectId::new(1));
        let engine = LoadCostEngine::new(&input, &tally);
        assert_eq!(
            engine.cost_for(&input.courses()[0], d(3), &slot((9, 0), (10, 0))),
            Cost::new(2)
        );
    }

    #[test]
    fn test_cost_only_prices_the_trimmed_front() {
        // Lesson at 10:00 does not overlap the first 30 minutes of the slot.
        let mut builder = base_builder().course(course(1, 10, 30, true));
        builder.add_timetable_entry(
            PupilId::new(10),
            WeekLetter::A,
            Weekday::Mon,
            TimetableEntry::new(slot((10, 0), (11, 0)), SubjectId::new(1), false),
        );
        let input = builder.build().unwrap();
        let tally = LoadingTally::new();
        let engine = LoadCostEngine::new(&input, &tally);
        assert_eq!(
            engine.cost_for(&input.courses()[0], d(3), &slot((9, 0), (11, 0))),
            Cost::zero()
        );
    }

    #[test]
    fn test_cost_monotone_in_protected_overlaps() {
        // One protected lesson, then two back to back; cost must not
        // decrease.
        let mut builder = base_builder().course(course(1, 10, 60, true));
        builder.add_timetable_entry(
            PupilId::new(10),
            WeekLetter::A,
            Weekday::Mon,
            TimetableEntry::new(slot((9, 0), (9, 30)), SubjectId::new(1), false),
        );
        let one = builder.build().unwrap();

        let mut builder = base_builder().course(course(1, 10, 60, true));
        builder.add_timetable_entry(
            PupilId::new(10),
            WeekLetter::A,
            Weekday::Mon,
            TimetableEntry::new(slot((9, 0), (9, 30)), SubjectId::new(1), false),
        );
        builder.add_timetable_entry(
            PupilId::new(10),
            WeekLetter::A,
            Weekday::Mon,
            TimetableEntry::new(slot((9, 30), (10, 0)), SubjectId::new(2), false),
        );
        let two = builder.build().unwrap();

        let tally = LoadingTally::new();
        let target = slot((9, 0), (10, 0));
        let cost_one =
            LoadCostEngine::new(&one, &tally).cost_for(&one.courses()[0], d(3), &target);
        let cost_two =
            LoadCostEngine::new(&two, &tally).cost_for(&two.courses()[0], d(3), &target);
        assert!(cost_two >= cost_one);
    }

    #[test]
    fn test_free_time_subtracts_bookings_and_engagements() {
        let input = base_builder().course(course(1, 10, 30, true)).build().unwrap();
        let mut allocations = AllocationSet::new(d(2));
        allocations.add(
            AllocationInstance::new(
                CourseId::new(1),
                d(3).and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
                d(3).and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
            )
            .unwrap(),
        );
        let tally = LoadingTally::new();
        let engine = LoadCostEngine::new(&input, &tally);
        let free = engine.free_time_on(d(3), &allocations);
        assert_eq!(free.as_slice(), &[slot((9, 30), (11, 0))]);
    }

    #[test]
    fn test_potentials_skip_external_clashes() {
        let mut builder = base_builder().course(course(1, 10, 30, true));
        // Pupil is booked elsewhere over the whole window.
        builder.add_other_allocation(
            PupilId::new(10),
            d(3).and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
            d(3).and_time(NaiveTime::from_hms_opt(11, 0, 0).unwrap()),
        );
        let input = builder.build().unwrap();
        let tally = LoadingTally::new();
        let engine = LoadCostEngine::new(&input, &tally);
        let allocations = AllocationSet::new(d(2));
        let table = engine.calculate_potentials(
            &DateRange::new(d(2), d(9)),
            Minutes::new(30),
            &allocations,
        );
        assert!(table.for_course(CourseId::new(1)).is_none());
    }

    #[test]
    fn test_potentials_walk_in_steps() {
        let input = base_builder().course(course(1, 10, 30, true)).build().unwrap();
        let tally = LoadingTally::new();
        let engine = LoadCostEngine::new(&input, &tally);
        let allocations = AllocationSet::new(d(2));
        let table = engine.calculate_potentials(
            &DateRange::new(d(2), d(9)),
            Minutes::new(30),
            &allocations,
        );
        // 09:00, 09:30, 10:00, 10:30 starts within the two-hour window.
        let candidates = table.for_course(CourseId::new(1)).unwrap();
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates.iter().next().unwrap().slot(), &slot((9, 0), (9, 30)));
    }

    #[test]
    fn test_potentials_deterministic_without_state_change() {
        let input = base_builder()
            .course(course(1, 10, 30, true))
            .course(course(2, 11, 45, false))
            .build()
            .unwrap();
        let tally = LoadingTally::new();
        let engine = LoadCostEngine::new(&input, &tally);
        let allocations = AllocationSet::new(d(2));
        let range = DateRange::new(d(2), d(9));
        let first = engine.calculate_potentials(&range, Minutes::new(15), &allocations);
        let second = engine.calculate_potentials(&range, Minutes::new(15), &allocations);
        assert_eq!(first, second);
    }

    #[test]
    fn test_modal_duration_smallest_among_ties() {
        let courses = vec![
            course(1, 1, 30, true),
            course(2, 2, 45, true),
            course(3, 3, 45, true),
            course(4, 4, 30, true),
        ];
        assert_eq!(modal_duration(&courses), Minutes::new(30));
        assert_eq!(modal_duration(&[]), Minutes::new(30));
        let courses = vec![course(1, 1, 60, true), course(2, 2, 60, true), course(3, 3, 45, true)];
        assert_eq!(modal_duration(&courses), Minutes::new(60));
    }
}
