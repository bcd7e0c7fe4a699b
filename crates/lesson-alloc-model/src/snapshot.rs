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

//! # Input Snapshot
//!
//! [`RawSnapshot`] is the serde wire form of one allocation problem;
//! [`AllocationInput`] is the validated, indexed form the engine consumes.
//!
//! Loading is deliberately lenient: a malformed row (bad time string,
//! unknown weekday, zero-duration course) is dropped with a debug log, on
//! the grounds that one stale row must not block the whole run. Only
//! structural problems are fatal: unparseable cycle bounds, an empty cycle,
//! or two courses sharing an identifier.

use crate::{
    allocation::{AllocationSet, INSTANT_FORMAT},
    constraint::{AvailabilityCalendar, OtherAllocations, OtherEngagements},
    course::PupilCourse,
    err::SnapshotBuildError,
    id::{CourseId, PupilId, SubjectId},
    timetable::{
        AcademicTimetables, AlternatingWeeks, TimetableEntry, WeekLetter, WeekLetterCache,
        WeekLetterResolver,
    },
};
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use lesson_alloc_core::{DateRange, Minutes, TimeSlot, TimeSlotSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One placed lesson in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAllocation {
    pub course_id: u64,
    /// `YYYY-MM-DD HH:MM`.
    pub start: String,
    /// `YYYY-MM-DD HH:MM`.
    pub end: String,
}

/// One recurring availability window in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWindow {
    /// Weekday name, e.g. `"Mon"`.
    pub weekday: String,
    /// `"HH:MM - HH:MM"`.
    pub slot: String,
}

/// One course requirement in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPupilCourse {
    pub course_id: u64,
    pub pupil_id: u64,
    pub duration_minutes: i64,
    pub can_miss: bool,
    pub display_name: String,
}

/// One recurring academic lesson in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTimetableEntry {
    pub pupil_id: u64,
    /// `"A"` or `"B"`.
    pub week: String,
    pub weekday: String,
    /// `"HH:MM - HH:MM"`.
    pub slot: String,
    pub subject_id: u64,
    pub missable: bool,
}

/// Another staff member's booking of a pupil, in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOtherAllocation {
    pub pupil_id: u64,
    pub start: String,
    pub end: String,
}

/// A fixed engagement of the staff member, in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEngagement {
    pub start: String,
    pub end: String,
}

/// One complete allocation problem in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSnapshot {
    /// First day of the cycle, `YYYY-MM-DD`.
    pub cycle_start: String,
    /// Exclusive end day of the cycle, `YYYY-MM-DD`.
    pub cycle_end: String,
    /// Letter of the week containing `cycle_start`.
    #[serde(default = "default_week_letter")]
    pub first_week_letter: String,
    pub availability: Vec<RawWindow>,
    pub courses: Vec<RawPupilCourse>,
    #[serde(default)]
    pub timetable: Vec<RawTimetableEntry>,
    #[serde(default)]
    pub other_allocations: Vec<RawOtherAllocation>,
    #[serde(default)]
    pub engagements: Vec<RawEngagement>,
    #[serde(default)]
    pub existing_allocations: Vec<RawAllocation>,
}

fn default_week_letter() -> String {
    "A".to_owned()
}

/// The validated input to one allocation run.
#[derive(Debug)]
pub struct AllocationInput {
    cycle: DateRange,
    availability: AvailabilityCalendar,
    courses: Vec<PupilCourse>,
    course_index: HashMap<CourseId, usize>,
    timetables: AcademicTimetables,
    week_letters: WeekLetterCache<AlternatingWeeks>,
    other_allocations: OtherAllocations,
    engagements: OtherEngagements,
    starting_allocations: AllocationSet,
}

impl AllocationInput {
    #[inline]
    pub fn builder() -> AllocationInputBuilder {
        AllocationInputBuilder::new()
    }

    /// Builds the validated input from its wire form.
    pub fn from_raw(raw: &RawSnapshot) -> Result<Self, SnapshotBuildError> {
        let cycle_start = parse_date(&raw.cycle_start)?;
        let cycle_end = parse_date(&raw.cycle_end)?;
        if cycle_end <= cycle_start {
            return Err(SnapshotBuildError::EmptyCycle);
        }

        let mut builder = AllocationInputBuilder::new()
            .cycle(DateRange::new(cycle_start, cycle_end))
            .first_week_letter(parse_week_letter(&raw.first_week_letter));

        for window in &raw.availability {
            match (window.weekday.parse::<Weekday>(), TimeSlot::parse(&window.slot)) {
                (Ok(weekday), Ok(slot)) => builder.add_window(weekday, slot),
                _ => {
                    tracing::debug!(
                        weekday = %window.weekday,
                        slot = %window.slot,
                        "dropping unparseable availability window"
                    );
                }
            }
        }

        for course in &raw.courses {
            match PupilCourse::new(
                CourseId::new(course.course_id),
                PupilId::new(course.pupil_id),
                Minutes::new(course.duration_minutes),
                course.can_miss,
                course.display_name.clone(),
            ) {
                Ok(course) => builder.push_course(course),
                Err(err) => {
                    tracing::debug!(%err, "dropping invalid course row");
                }
            }
        }

        for entry in &raw.timetable {
            match (entry.weekday.parse::<Weekday>(), TimeSlot::parse(&entry.slot)) {
                (Ok(weekday), Ok(slot)) => builder.add_timetable_entry(
                    PupilId::new(entry.pupil_id),
                    parse_week_letter(&entry.week),
                    weekday,
                    TimetableEntry::new(slot, SubjectId::new(entry.subject_id), entry.missable),
                ),
                _ => {
                    tracing::debug!(
                        pupil_id = entry.pupil_id,
                        weekday = %entry.weekday,
                        slot = %entry.slot,
                        "dropping unparseable timetable row"
                    );
                }
            }
        }

        for booking in &raw.other_allocations {
            match (parse_instant(&booking.start), parse_instant(&booking.end)) {
                (Some(start), Some(end)) => {
                    builder.add_other_allocation(PupilId::new(booking.pupil_id), start, end);
                }
                _ => {
                    tracing::debug!(
                        pupil_id = booking.pupil_id,
                        start = %booking.start,
                        end = %booking.end,
                        "dropping unparseable pupil booking"
                    );
                }
            }
        }

        for engagement in &raw.engagements {
            match (parse_instant(&engagement.start), parse_instant(&engagement.end)) {
                (Some(start), Some(end)) => builder.add_engagement(start, end),
                _ => {
                    tracing::debug!(
                        start = %engagement.start,
                        end = %engagement.end,
                        "dropping unparseable engagement"
                    );
                }
            }
        }

        builder = builder.starting_allocations(AllocationSet::from_raw(
            cycle_start,
            &raw.existing_allocations,
        ));

        builder.build()
    }

    #[inline]
    pub fn cycle(&self) -> &DateRange {
        &self.cycle
    }

    #[inline]
    pub fn availability(&self) -> &AvailabilityCalendar {
        &self.availability
    }

    /// The staff member's windows on `date`.
    #[inline]
    pub fn windows_on(&self, date: NaiveDate) -> &TimeSlotSet {
        self.availability.windows_on(date)
    }

    #[inline]
    pub fn courses(&self) -> &[PupilCourse] {
        &self.courses
    }

    pub fn course(&self, course_id: CourseId) -> Option<&PupilCourse> {
        self.course_index.get(&course_id).map(|&i| &self.courses[i])
    }

    #[inline]
    pub fn timetables(&self) -> &AcademicTimetables {
        &self.timetables
    }

    /// The timetable week letter in force on `date`, memoized per run.
    #[inline]
    pub fn week_letter_for(&self, date: NaiveDate) -> WeekLetter {
        self.week_letters.week_letter_for(date)
    }

    #[inline]
    pub fn other_allocations(&self) -> &OtherAllocations {
        &self.other_allocations
    }

    #[inline]
    pub fn engagements(&self) -> &OtherEngagements {
        &self.engagements
    }

    /// Allocations already on the books when the run starts.
    #[inline]
    pub fn starting_allocations(&self) -> &AllocationSet {
        &self.starting_allocations
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, SnapshotBuildError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| SnapshotBuildError::BadCycleDate(input.to_owned()))
}

fn parse_instant(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), INSTANT_FORMAT).ok()
}

fn parse_week_letter(input: &str) -> WeekLetter {
    match input.trim() {
        "B" | "b" => WeekLetter::B,
        _ => WeekLetter::A,
    }
}

/// Builder for [`AllocationInput`].
#[derive(Debug, Default)]
pub struct AllocationInputBuilder {
    cycle: Option<DateRange>,
    first_week_letter: Option<WeekLetter>,
    availability: AvailabilityCalendar,
    courses: Vec<PupilCourse>,
    timetables: AcademicTimetables,
    other_allocations: OtherAllocations,
    engagements: OtherEngagements,
    starting_allocations: Option<AllocationSet>,
}

impl AllocationInputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cycle(mut self, cycle: DateRange) -> Self {
        self.cycle = Some(cycle);
        self
    }

    pub fn first_week_letter(mut self, letter: WeekLetter) -> Self {
        self.first_week_letter = Some(letter);
        self
    }

    pub fn add_window(&mut self, weekday: Weekday, window: TimeSlot) {
        self.availability.add_window(weekday, window);
    }

    pub fn push_course(&mut self, course: PupilCourse) {
        self.courses.push(course);
    }

    pub fn course(mut self, course: PupilCourse) -> Self {
        self.push_course(course);
        self
    }

    pub fn add_timetable_entry(
        &mut self,
        pupil: PupilId,
        letter: WeekLetter,
        weekday: Weekday,
        entry: TimetableEntry,
    ) {
        self.timetables.add_entry(pupil, letter, weekday, entry);
    }

    pub fn add_other_allocation(
        &mut self,
        pupil: PupilId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) {
        self.other_allocations.add(pupil, start, end);
    }

    pub fn add_engagement(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.engagements.add(start, end);
    }

    pub fn starting_allocations(mut self, allocations: AllocationSet) -> Self {
        self.starting_allocations = Some(allocations);
        self
    }

    pub fn build(self) -> Result<AllocationInput, SnapshotBuildError> {
        let cycle = self.cycle.ok_or(SnapshotBuildError::EmptyCycle)?;
        if cycle.is_empty() {
            return Err(SnapshotBuildError::EmptyCycle);
        }

        let mut course_index = HashMap::with_capacity(self.courses.len());
        for (i, course) in self.courses.iter().enumerate() {
            if course_index.insert(course.course_id(), i).is_some() {
                return Err(SnapshotBuildError::DuplicateCourseId(course.course_id()));
            }
        }

        let first = self.first_week_letter.unwrap_or(WeekLetter::A);
        let week_letters = WeekLetterCache::new(AlternatingWeeks::new(cycle.start(), first));
        let starting_allocations = self
            .starting_allocations
            .unwrap_or_else(|| AllocationSet::new(cycle.start()));

        Ok(AllocationInput {
            cycle,
            availability: self.availability,
            courses: self.courses,
            course_index,
            timetables: self.timetables,
            week_letters,
            other_allocations: self.other_allocations,
            engagements: self.engagements,
            starting_allocations,
        })
    }
}
