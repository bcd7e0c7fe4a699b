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

//! Per-pupil, per-subject clash tallies.
//!
//! Every accepted placement that overlaps a protected academic lesson is
//! remembered here, so the next clash with the same subject costs more than
//! spreading misses across different subjects. The tally is derived state:
//! it is recomputed in full from the allocation set, and refreshed for a
//! single pupil after each accepted placement.

use chrono::Datelike;
use lesson_alloc_model::{
    allocation::AllocationSet,
    id::{PupilId, SubjectId},
    snapshot::AllocationInput,
};
use std::collections::{BTreeSet, HashMap};

/// Running count of placed clashes, keyed by pupil and subject.
///
/// Absent keys read as zero; there is no shared default entry to mutate by
/// accident.
#[derive(Debug, Clone, Default)]
pub struct LoadingTally {
    by_pupil: HashMap<PupilId, HashMap<SubjectId, u32>>,
}

impl LoadingTally {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clash count for `pupil` against `subject`; zero when never recorded.
    pub fn count(&self, pupil: PupilId, subject: SubjectId) -> u32 {
        self.by_pupil
            .get(&pupil)
            .and_then(|subjects| subjects.get(&subject))
            .copied()
            .unwrap_or(0)
    }

    pub fn record(&mut self, pupil: PupilId, subject: SubjectId) {
        *self
            .by_pupil
            .entry(pupil)
            .or_default()
            .entry(subject)
            .or_insert(0) += 1;
    }

    /// Full recompute from the allocation set.
    ///
    /// Also refreshes every instance's recorded clashing subjects, since the
    /// two are views of the same derivation.
    pub fn rebuild(&mut self, allocations: &mut AllocationSet, input: &AllocationInput) {
        self.by_pupil.clear();
        self.rebuild_instances(allocations, input, None);
    }

    /// Targeted recompute of one pupil's tallies after an accepted
    /// placement.
    pub fn rebuild_for_pupil(
        &mut self,
        pupil: PupilId,
        allocations: &mut AllocationSet,
        input: &AllocationInput,
    ) {
        self.by_pupil.remove(&pupil);
        self.rebuild_instances(allocations, input, Some(pupil));
    }

    fn rebuild_instances(
        &mut self,
        allocations: &mut AllocationSet,
        input: &AllocationInput,
        only_pupil: Option<PupilId>,
    ) {
        for idx in 0..allocations.len() {
            let (course_id, date, slot) = {
                let instance = allocations.get(idx).expect("index within allocation set");
                (instance.course_id(), instance.date(), *instance.slot())
            };
            // Instances for courses no longer in the input carry no pupil to
            // tally against.
            let course = match input.course(course_id) {
                Some(course) => course,
                None => continue,
            };
            if only_pupil.is_some_and(|wanted| wanted != course.pupil_id()) {
                continue;
            }
            let letter = input.week_letter_for(date);
            let lessons = input
                .timetables()
                .lessons_for(course.pupil_id(), letter, date.weekday());

            let mut clashing = BTreeSet::new();
            for lesson in lessons {
                if lesson.is_missable() || !lesson.slot().overlaps(&slot) {
                    continue;
                }
                self.record(course.pupil_id(), lesson.subject());
                clashing.insert(lesson.subject());
            }
            allocations
                .instance_mut(idx)
                .set_clashing_subjects(clashing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Weekday};
    use lesson_alloc_core::{DateRange, Minutes, TimeOfDay, TimeSlot};
    use lesson_alloc_model::{
        allocation::AllocationInstance,
        course::PupilCourse,
        id::CourseId,
        snapshot::AllocationInputBuilder,
        timetable::{TimetableEntry, WeekLetter},
    };

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn slot(b: (u16, u16), e: (u16, u16)) -> TimeSlot {
        TimeSlot::new(TimeOfDay::from_hm(b.0, b.1), TimeOfDay::from_hm(e.0, e.1)).unwrap()
    }

    fn input_with_lessons() -> AllocationInput {
        let mut builder = AllocationInputBuilder::new()
            .cycle(DateRange::new(d(2025, 3, 2), d(2025, 3, 16)))
            .course(
                PupilCourse::new(
                    CourseId::new(1),
                    PupilId::new(10),
                    Minutes::new(30),
                    true,
                    "Violin",
                )
                .unwrap(),
            );
        // Monday of week A: maths 09:00-10:00 (protected), break 10:00-10:30
        // (missable).
        builder.add_timetable_entry(
            PupilId::new(10),
            WeekLetter::A,
            Weekday::Mon,
            TimetableEntry::new(slot((9, 0), (10, 0)), SubjectId::new(7), false),
        );
        builder.add_timetable_entry(
            PupilId::new(10),
            WeekLetter::A,
            Weekday::Mon,
            TimetableEntry::new(slot((10, 0), (10, 30)), SubjectId::new(8), true),
        );
        builder.build().unwrap()
    }

    fn placed(course: u64, date: NaiveDate, from: (u32, u32), to: (u32, u32)) -> AllocationInstance {
        AllocationInstance::new(
            CourseId::new(course),
            date.and_time(NaiveTime::from_hms_opt(from.0, from.1, 0).unwrap()),
            date.and_time(NaiveTime::from_hms_opt(to.0, to.1, 0).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_count_is_zero_for_unknown_keys() {
        let tally = LoadingTally::new();
        assert_eq!(tally.count(PupilId::new(1), SubjectId::new(1)), 0);
    }

    #[test]
    fn test_record_accumulates() {
        let mut tally = LoadingTally::new();
        tally.record(PupilId::new(1), SubjectId::new(7));
        tally.record(PupilId::new(1), SubjectId::new(7));
        tally.record(PupilId::new(1), SubjectId::new(8));
        assert_eq!(tally.count(PupilId::new(1), SubjectId::new(7)), 2);
        assert_eq!(tally.count(PupilId::new(1), SubjectId::new(8)), 1);
        assert_eq!(tally.count(PupilId::new(2), SubjectId::new(7)), 0);
    }

    #[test]
    fn test_rebuild_counts_protected_clashes_only() {
        let input = input_with_lessons();
        // 2025-03-03 is the Monday of week A.
        let mut allocations = AllocationSet::new(d(2025, 3, 2));
        allocations.add(placed(1, d(2025, 3, 3), (9, 30), (10, 0))); // clashes maths
        allocations.add(placed(1, d(2025, 3, 3), (10, 0), (10, 30))); // missable break

        let mut tally = LoadingTally::new();
        tally.rebuild(&mut allocations, &input);

        assert_eq!(tally.count(PupilId::new(10), SubjectId::new(7)), 1);
        assert_eq!(tally.count(PupilId::new(10), SubjectId::new(8)), 0);

        // The clashing instance remembers its subject, the other does not.
        let clashes: Vec<_> = allocations
            .iter()
            .map(|i| i.clashing_subjects().len())
            .collect();
        assert_eq!(clashes, vec![1, 0]);
    }

    #[test]
    fn test_rebuild_for_pupil_resets_before_recounting() {
        let input = input_with_lessons();
        let mut allocations = AllocationSet::new(d(2025, 3, 2));
        allocations.add(placed(1, d(2025, 3, 3), (9, 0), (9, 30)));

        let mut tally = LoadingTally::new();
        tally.rebuild(&mut allocations, &input);
        assert_eq!(tally.count(PupilId::new(10), SubjectId::new(7)), 1);

        // A second targeted rebuild must not double-count.
        tally.rebuild_for_pupil(PupilId::new(10), &mut allocations, &input);
        assert_eq!(tally.count(PupilId::new(10), SubjectId::new(7)), 1);
    }
}
