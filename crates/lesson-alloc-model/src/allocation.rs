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

//! # Allocation Results
//!
//! [`AllocationInstance`] is one concrete placed lesson; [`AllocationSet`]
//! is the growing collection of this staff member's placements, indexed by
//! date and by Sunday-aligned cycle week so the engine's per-week queries
//! stay cheap.

use crate::{
    err::InvalidAllocationError,
    id::{CourseId, SubjectId},
    snapshot::RawAllocation,
};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use lesson_alloc_core::{date, TimeOfDay, TimeSlot, TimeSlotSet};
use std::collections::{BTreeSet, HashMap};

/// Wire format for allocation instants.
pub const INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One placed lesson: a course occupying a concrete slot on a concrete date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationInstance {
    course_id: CourseId,
    start: NaiveDateTime,
    end: NaiveDateTime,
    slot: TimeSlot,
    // Subjects of the academic lessons this placement overlaps, recorded at
    // placement time so later tally queries need no re-evaluation.
    clashing_subjects: BTreeSet<SubjectId>,
}

impl AllocationInstance {
    /// Creates an instance, erroring on backwards bounds or a span crossing
    /// midnight.
    pub fn new(
        course_id: CourseId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, InvalidAllocationError> {
        if end < start {
            return Err(InvalidAllocationError::Backwards { start, end });
        }
        if start.date() != end.date() {
            return Err(InvalidAllocationError::CrossesMidnight { start, end });
        }
        let beginning = TimeOfDay::from_hm(start.hour() as u16, start.minute() as u16);
        let ending = TimeOfDay::from_hm(end.hour() as u16, end.minute() as u16);
        let slot = TimeSlot::new(beginning, ending).expect("same-day ordered bounds");
        Ok(Self {
            course_id,
            start,
            end,
            slot,
            clashing_subjects: BTreeSet::new(),
        })
    }

    #[inline]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    #[inline]
    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    /// Subjects whose academic lessons this placement overlaps.
    #[inline]
    pub fn clashing_subjects(&self) -> &BTreeSet<SubjectId> {
        &self.clashing_subjects
    }

    pub fn record_clash(&mut self, subject: SubjectId) {
        self.clashing_subjects.insert(subject);
    }

    pub fn set_clashing_subjects(&mut self, subjects: BTreeSet<SubjectId>) {
        self.clashing_subjects = subjects;
    }

    pub fn to_raw(&self) -> RawAllocation {
        RawAllocation {
            course_id: self.course_id.value(),
            start: self.start.format(INSTANT_FORMAT).to_string(),
            end: self.end.format(INSTANT_FORMAT).to_string(),
        }
    }
}

/// All placements made for one staff member in one cycle.
#[derive(Debug, Clone)]
pub struct AllocationSet {
    cycle_start: NaiveDate,
    instances: Vec<AllocationInstance>,
    by_date: HashMap<NaiveDate, Vec<usize>>,
    by_week: HashMap<i64, Vec<usize>>,
}

impl AllocationSet {
    pub fn new(cycle_start: NaiveDate) -> Self {
        Self {
            cycle_start,
            instances: Vec::new(),
            by_date: HashMap::new(),
            by_week: HashMap::new(),
        }
    }

    /// Rebuilds a set from its wire form.
    ///
    /// Rows that fail to parse are dropped with a debug log rather than
    /// failing the whole load; a stale or hand-edited row must not wedge
    /// the run.
    pub fn from_raw(cycle_start: NaiveDate, raw: &[RawAllocation]) -> Self {
        let mut set = Self::new(cycle_start);
        for row in raw {
            let start = NaiveDateTime::parse_from_str(&row.start, INSTANT_FORMAT);
            let end = NaiveDateTime::parse_from_str(&row.end, INSTANT_FORMAT);
            let (start, end) = match (start, end) {
                (Ok(s), Ok(e)) => (s, e),
                _ => {
                    tracing::debug!(
                        course_id = row.course_id,
                        start = %row.start,
                        end = %row.end,
                        "dropping unparseable allocation row"
                    );
                    continue;
                }
            };
            match AllocationInstance::new(CourseId::new(row.course_id), start, end) {
                Ok(instance) => set.add(instance),
                Err(err) => {
                    tracing::debug!(
                        course_id = row.course_id,
                        %err,
                        "dropping invalid allocation row"
                    );
                }
            }
        }
        set
    }

    #[inline]
    pub fn cycle_start(&self) -> NaiveDate {
        self.cycle_start
    }

    /// Sunday-aligned cycle week index of `date`.
    #[inline]
    pub fn week_of(&self, date: NaiveDate) -> i64 {
        date::cycle_week_of(self.cycle_start, date)
    }

    pub fn add(&mut self, instance: AllocationInstance) {
        let idx = self.instances.len();
        let date = instance.date();
        self.by_date.entry(date).or_default().push(idx);
        self.by_week
            .entry(self.week_of(date))
            .or_default()
            .push(idx);
        self.instances.push(instance);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, AllocationInstance> {
        self.instances.iter()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&AllocationInstance> {
        self.instances.get(idx)
    }

    /// Mutable access by index, for refreshing derived clash data. The
    /// indexes stay valid: the instance API cannot change date or course.
    #[inline]
    pub fn instance_mut(&mut self, idx: usize) -> &mut AllocationInstance {
        &mut self.instances[idx]
    }

    pub fn allocations_on(&self, date: NaiveDate) -> impl Iterator<Item = &AllocationInstance> {
        self.by_date
            .get(&date)
            .into_iter()
            .flatten()
            .map(|&idx| &self.instances[idx])
    }

    pub fn allocations_in_week(&self, week: i64) -> impl Iterator<Item = &AllocationInstance> {
        self.by_week
            .get(&week)
            .into_iter()
            .flatten()
            .map(|&idx| &self.instances[idx])
    }

    /// All placements made for one pupil-course, in insertion order.
    pub fn for_pupil_course(
        &self,
        course_id: CourseId,
    ) -> impl Iterator<Item = &AllocationInstance> {
        self.instances
            .iter()
            .filter(move |i| i.course_id() == course_id)
    }

    /// Returns `true` if `course_id` already has a placement in cycle week
    /// `week`.
    pub fn is_allocated_in_week(&self, course_id: CourseId, week: i64) -> bool {
        self.allocations_in_week(week)
            .any(|i| i.course_id() == course_id)
    }

    /// The staff member's own booked time on `date`.
    pub fn slots_on(&self, date: NaiveDate) -> TimeSlotSet {
        self.allocations_on(date).map(|i| *i.slot()).collect()
    }

    pub fn to_raw(&self) -> Vec<RawAllocation> {
        self.instances.iter().map(AllocationInstance::to_raw).collect()
    }
}

impl<'a> IntoIterator for &'a AllocationSet {
    type Item = &'a AllocationInstance;
    type IntoIter = std::slice::Iter<'a, AllocationInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use lesson_alloc_core::Minutes;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dt(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn instance(course: u64, date: NaiveDate, from: (u32, u32), to: (u32, u32)) -> AllocationInstance {
        AllocationInstance::new(
            CourseId::new(course),
            dt(date, from.0, from.1),
            dt(date, to.0, to.1),
        )
        .unwrap()
    }

    #[test]
    fn test_instance_rejects_backwards_and_cross_midnight() {
        let date = d(2025, 3, 5);
        assert!(matches!(
            AllocationInstance::new(CourseId::new(1), dt(date, 10, 0), dt(date, 9, 0)),
            Err(InvalidAllocationError::Backwards { .. })
        ));
        assert!(matches!(
            AllocationInstance::new(
                CourseId::new(1),
                dt(date, 23, 0),
                dt(d(2025, 3, 6), 1, 0)
            ),
            Err(InvalidAllocationError::CrossesMidnight { .. })
        ));
    }

    #[test]
    fn test_instance_derives_slot() {
        let i = instance(1, d(2025, 3, 5), (9, 0), (9, 45));
        assert_eq!(i.slot().minutes(), Minutes::new(45));
        assert_eq!(i.date(), d(2025, 3, 5));
    }

    #[test]
    fn test_set_indexes_by_date_and_week() {
        // Cycle starts Wednesday 2025-03-05; its week 0 runs Sun 03-02 to
        // Sat 03-08.
        let mut set = AllocationSet::new(d(2025, 3, 5));
        set.add(instance(1, d(2025, 3, 5), (9, 0), (9, 45)));
        set.add(instance(2, d(2025, 3, 5), (10, 0), (10, 30)));
        set.add(instance(1, d(2025, 3, 12), (9, 0), (9, 45)));

        assert_eq!(set.allocations_on(d(2025, 3, 5)).count(), 2);
        assert_eq!(set.allocations_on(d(2025, 3, 6)).count(), 0);
        assert_eq!(set.allocations_in_week(0).count(), 2);
        assert_eq!(set.allocations_in_week(1).count(), 1);
        assert!(set.is_allocated_in_week(CourseId::new(1), 0));
        assert!(set.is_allocated_in_week(CourseId::new(1), 1));
        assert!(!set.is_allocated_in_week(CourseId::new(2), 1));
        assert_eq!(set.for_pupil_course(CourseId::new(1)).count(), 2);
        assert!(set.for_pupil_course(CourseId::new(9)).next().is_none());
    }

    #[test]
    fn test_slots_on_collects_busy_time() {
        let mut set = AllocationSet::new(d(2025, 3, 5));
        set.add(instance(1, d(2025, 3, 5), (9, 0), (10, 0)));
        set.add(instance(2, d(2025, 3, 5), (10, 0), (10, 30)));
        // Abutting placements coalesce in the busy set.
        let busy = set.slots_on(d(2025, 3, 5));
        assert_eq!(busy.len(), 1);
        assert_eq!(busy.total_minutes(), Minutes::new(90));
    }

    #[test]
    fn test_raw_round_trip_drops_bad_rows() {
        let mut set = AllocationSet::new(d(2025, 3, 5));
        set.add(instance(7, d(2025, 3, 5), (9, 0), (9, 45)));
        let mut raw = set.to_raw();
        assert_eq!(raw[0].start, "2025-03-05 09:00");
        raw.push(RawAllocation {
            course_id: 8,
            start: "not a date".to_owned(),
            end: "2025-03-05 10:00".to_owned(),
        });
        raw.push(RawAllocation {
            course_id: 9,
            start: "2025-03-05 23:00".to_owned(),
            end: "2025-03-06 01:00".to_owned(), // crosses midnight
        });

        let reloaded = AllocationSet::from_raw(d(2025, 3, 5), &raw);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(
            reloaded.iter().next().unwrap().course_id(),
            CourseId::new(7)
        );
    }
}
