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

//! Deterministic random instance generation for benchmarks and demos.
//!
//! Instances are reproducible from the seed alone: the same
//! [`GeneratorConfig`] always yields the same [`AllocationInput`].

use crate::{
    course::PupilCourse,
    id::{CourseId, PupilId, SubjectId},
    snapshot::{AllocationInput, AllocationInputBuilder},
    timetable::{TimetableEntry, WeekLetter},
};
use chrono::{Duration, NaiveDate, Weekday};
use lesson_alloc_core::{DateRange, Minutes, TimeOfDay, TimeSlot};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const TEACHING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

// Morning and afternoon blocks, as (start hour, end hour).
const TEACHING_BLOCKS: [(u16, u16); 2] = [(9, 12), (13, 16)];

/// Parameters of a generated allocation instance.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub cycle_start: NaiveDate,
    pub weeks: u32,
    pub num_pupils: u32,
    /// Session durations to sample from, in minutes.
    pub durations: Vec<i64>,
    /// Probability that a pupil is flexible.
    pub can_miss_probability: f64,
    /// Probability that an academic lesson is missable.
    pub missable_probability: f64,
    /// Probability that a teaching hour holds an academic lesson.
    pub lesson_density: f64,
    pub num_subjects: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            cycle_start: NaiveDate::from_ymd_opt(2025, 3, 5).expect("valid default date"),
            weeks: 6,
            num_pupils: 20,
            durations: vec![30, 45, 60],
            can_miss_probability: 0.7,
            missable_probability: 0.3,
            lesson_density: 0.8,
            num_subjects: 10,
        }
    }
}

/// Seeded generator of random but well-formed allocation inputs.
#[derive(Debug)]
pub struct InstanceGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl InstanceGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Generates one instance. Each call advances the stream, so repeated
    /// calls on one generator yield distinct instances.
    pub fn generate(&mut self) -> AllocationInput {
        let cycle_end = self.config.cycle_start + Duration::weeks(i64::from(self.config.weeks));
        let mut builder = AllocationInputBuilder::new()
            .cycle(DateRange::new(self.config.cycle_start, cycle_end))
            .first_week_letter(WeekLetter::A);

        for weekday in TEACHING_DAYS {
            for (from, to) in TEACHING_BLOCKS {
                let window = TimeSlot::new(TimeOfDay::from_hm(from, 0), TimeOfDay::from_hm(to, 0))
                    .expect("forward teaching block");
                builder.add_window(weekday, window);
            }
        }

        for pupil_no in 1..=u64::from(self.config.num_pupils) {
            let pupil = PupilId::new(pupil_no);
            let duration = *self
                .config
                .durations
                .choose(&mut self.rng)
                .expect("non-empty duration menu");
            let can_miss = self.rng.gen_bool(self.config.can_miss_probability);
            builder.push_course(
                PupilCourse::new(
                    CourseId::new(pupil_no),
                    pupil,
                    Minutes::new(duration),
                    can_miss,
                    format!("Pupil {pupil_no}"),
                )
                .expect("positive generated duration"),
            );

            for letter in [WeekLetter::A, WeekLetter::B] {
                for weekday in TEACHING_DAYS {
                    for (from, to) in TEACHING_BLOCKS {
                        for hour in from..to {
                            if !self.rng.gen_bool(self.config.lesson_density) {
                                continue;
                            }
                            let slot = TimeSlot::new(
                                TimeOfDay::from_hm(hour, 0),
                                TimeOfDay::from_hm(hour + 1, 0),
                            )
                            .expect("forward lesson hour");
                            let subject =
                                SubjectId::new(self.rng.gen_range(1..=self.config.num_subjects));
                            let missable = self.rng.gen_bool(self.config.missable_probability);
                            builder.add_timetable_entry(
                                pupil,
                                letter,
                                weekday,
                                TimetableEntry::new(slot, subject, missable),
                            );
                        }
                    }
                }
            }
        }

        builder.build().expect("generated input is structurally valid")
    }
}
