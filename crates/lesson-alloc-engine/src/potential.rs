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

//! Candidate placements and their per-course aggregation.
//!
//! A [`Potential`] is one viable placement (date, slot, cost) discovered
//! during the enumeration pass; [`CoursePotentials`] aggregates a course's
//! candidates with a cached lowest cost, and [`PotentialTable`] maps each
//! course to its aggregation with deterministic iteration order.

use chrono::NaiveDate;
use lesson_alloc_core::{Cost, TimeSlot};
use lesson_alloc_model::id::CourseId;
use std::collections::BTreeMap;

/// One viable candidate placement for a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Potential {
    date: NaiveDate,
    slot: TimeSlot,
    cost: Cost,
}

impl Potential {
    #[inline]
    pub fn new(date: NaiveDate, slot: TimeSlot, cost: Cost) -> Self {
        Self { date, slot, cost }
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }
}

/// All candidates for one course, with the lowest cost cached.
#[derive(Debug, Clone, Default)]
pub struct CoursePotentials {
    potentials: Vec<Potential>,
    best: Option<Cost>,
}

impl CoursePotentials {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, potential: Potential) {
        self.best = Some(match self.best {
            Some(best) => best.min(potential.cost()),
            None => potential.cost(),
        });
        self.potentials.push(potential);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.potentials.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.potentials.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Potential> {
        self.potentials.iter()
    }

    /// Lowest cost among the candidates; `None` when there are none.
    #[inline]
    pub fn best_cost(&self) -> Option<Cost> {
        self.best
    }

    /// Number of candidates sharing the lowest cost: the course's room to
    /// maneuver. Fewer means scarcer.
    pub fn lowest_cost_count(&self) -> usize {
        match self.best {
            Some(best) => self
                .potentials
                .iter()
                .filter(|p| p.cost() == best)
                .count(),
            None => 0,
        }
    }

    /// Opportunity cost of losing one candidate priced at `score`: the
    /// next-best remaining cost minus `score`.
    ///
    /// `None` means there is no alternative at all, which outranks every
    /// finite difference.
    pub fn cost_of_missing(&self, score: Cost) -> Option<Cost> {
        let mut skipped_self = false;
        let mut next_best: Option<Cost> = None;
        for p in &self.potentials {
            if !skipped_self && p.cost() == score {
                skipped_self = true;
                continue;
            }
            next_best = Some(match next_best {
                Some(best) => best.min(p.cost()),
                None => p.cost(),
            });
        }
        next_best.map(|c| c.saturating_sub(score))
    }
}

/// Candidates for every course, in deterministic course order.
#[derive(Debug, Clone, Default)]
pub struct PotentialTable {
    by_course: BTreeMap<CourseId, CoursePotentials>,
}

impl PotentialTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, course: CourseId, potential: Potential) {
        self.by_course.entry(course).or_default().push(potential);
    }

    #[inline]
    pub fn for_course(&self, course: CourseId) -> Option<&CoursePotentials> {
        self.by_course.get(&course)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (CourseId, &CoursePotentials)> {
        self.by_course.iter().map(|(&id, p)| (id, p))
    }

    #[inline]
    pub fn num_courses(&self) -> usize {
        self.by_course.len()
    }

    pub fn num_candidates(&self) -> usize {
        self.by_course.values().map(CoursePotentials::len).sum()
    }
}

impl PartialEq for PotentialTable {
    fn eq(&self, other: &Self) -> bool {
        if self.by_course.len() != other.by_course.len() {
            return false;
        }
        self.by_course.iter().zip(other.by_course.iter()).all(
            |((id_a, a), (id_b, b))| id_a == id_b && a.potentials == b.potentials,
        )
    }
}

impl Eq for PotentialTable {}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_alloc_core::TimeOfDay;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn slot(b: (u16, u16), e: (u16, u16)) -> TimeSlot {
        TimeSlot::new(TimeOfDay::from_hm(b.0, b.1), TimeOfDay::from_hm(e.0, e.1)).unwrap()
    }

    fn p(day: u32, cost: i64) -> Potential {
        Potential::new(d(day), slot((9, 0), (9, 30)), Cost::new(cost))
    }

    #[test]
    fn test_best_cost_tracks_minimum() {
        let mut c = CoursePotentials::new();
        assert_eq!(c.best_cost(), None);
        c.push(p(3, 5));
        c.push(p(4, 2));
        c.push(p(5, 7));
        assert_eq!(c.best_cost(), Some(Cost::new(2)));
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_lowest_cost_count() {
        let mut c = CoursePotentials::new();
        c.push(p(3, 2));
        c.push(p(4, 2));
        c.push(p(5, 7));
        assert_eq!(c.lowest_cost_count(), 2);
        assert_eq!(CoursePotentials::new().lowest_cost_count(), 0);
    }

    #[test]
    fn test_cost_of_missing_skips_one_candidate_at_score() {
        let mut c = CoursePotentials::new();
        c.push(p(3, 0));
        c.push(p(4, 0));
        c.push(p(5, 3));
        // Losing one zero-cost candidate still leaves another at zero.
        assert_eq!(c.cost_of_missing(Cost::zero()), Some(Cost::zero()));

        let mut c = CoursePotentials::new();
        c.push(p(3, 0));
        c.push(p(5, 3));
        assert_eq!(c.cost_of_missing(Cost::zero()), Some(Cost::new(3)));
    }

    #[test]
    fn test_cost_of_missing_none_when_no_alternative() {
        let mut c = CoursePotentials::new();
        c.push(p(3, 1));
        assert_eq!(c.cost_of_missing(Cost::new(1)), None);
    }

    #[test]
    fn test_table_deterministic_order_and_equality() {
        let mut a = PotentialTable::new();
        a.insert(CourseId::new(2), p(3, 1));
        a.insert(CourseId::new(1), p(3, 0));

        let mut b = PotentialTable::new();
        b.insert(CourseId::new(1), p(3, 0));
        b.insert(CourseId::new(2), p(3, 1));

        assert_eq!(a, b);
        let order: Vec<_> = a.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![CourseId::new(1), CourseId::new(2)]);
        assert_eq!(a.num_candidates(), 2);
    }
}
