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

//! TimeSlotSet: sorted, disjoint, non-abutting collection of [`TimeSlot`]s.
//!
//! Invariants (always held):
//!    - slots are sorted by beginning
//!    - no two slots overlap or touch (touching slots are merged)
//!    - semantics are half-open `[beginning, ending)`
//!    - no empty slot is retained
//!
//! The set supports the algebra the allocator is built on: `|` (union),
//! `&` (intersection), `-` / `remove` (subtraction) and the `at_least`
//! minimum-duration filter.

use crate::{
    slot::TimeSlot,
    time::{Minutes, TimeOfDay},
};
use std::fmt::Display;
use std::ops::{BitAnd, BitOr, Deref, Sub};

/// A collection of sorted, disjoint, non-abutting `[beginning, ending)`
/// time slots.
///
/// Members are automatically sorted and merged on insertion, so the set's
/// invariants hold regardless of insertion order: `[09:00, 10:00)` followed
/// by `[10:00, 10:30)` collapses into `[09:00, 10:30)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeSlotSet {
    slots: Vec<TimeSlot>,
}

impl TimeSlotSet {
    /// Creates a new, empty set.
    #[inline]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Builds a set from arbitrary slots, sorting and coalescing in place.
    #[inline]
    pub fn from_vec(mut slots: Vec<TimeSlot>) -> Self {
        Self::coalesce_unsorted_in_place(&mut slots);
        Self { slots }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Total covered duration across all members.
    #[inline]
    pub fn total_minutes(&self) -> Minutes {
        self.slots.iter().map(TimeSlot::minutes).sum()
    }

    /// Inserts a slot, merging with members it overlaps or abuts.
    pub fn insert(&mut self, slot: TimeSlot) {
        if slot.is_empty() {
            return;
        }
        // Sorted insertion with neighbor coalescing; mirrors re-tidying the
        // whole vector but only touches the affected run.
        let start = self
            .slots
            .partition_point(|s| s.ending() < slot.beginning());
        let mut merged = slot;
        let mut scan = start;
        while scan < self.slots.len() && self.slots[scan].beginning() <= merged.ending() {
            merged = merged.merge(&self.slots[scan]);
            scan += 1;
        }
        self.slots.splice(start..scan, std::iter::once(merged));
        debug_assert!(self.invariants_held());
    }

    /// Returns `true` if any member overlaps `slot`.
    pub fn overlaps(&self, slot: &TimeSlot) -> bool {
        self.slots.iter().any(|s| s.overlaps(slot))
    }

    /// Returns `true` if `time` falls within a member.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.slots.iter().any(|s| s.contains(time))
    }

    /// Returns `true` if some member entirely covers `slot`.
    pub fn covers(&self, slot: &TimeSlot) -> bool {
        slot.is_empty() || self.slots.iter().any(|s| s.encloses(slot))
    }

    /// Union of two sets.
    pub fn union(&self, other: &TimeSlotSet) -> TimeSlotSet {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut all: Vec<TimeSlot> = Vec::with_capacity(self.len() + other.len());
        all.extend_from_slice(&self.slots);
        all.extend_from_slice(&other.slots);
        Self::from_vec(all)
    }

    /// Intersection of two sets; empty if either operand is empty.
    pub fn intersection(&self, other: &TimeSlotSet) -> TimeSlotSet {
        let mut out = Vec::new();
        let (mut i, mut j) = (0usize, 0usize);
        while i < self.slots.len() && j < other.slots.len() {
            let a = self.slots[i];
            let b = other.slots[j];
            let beginning = a.beginning().max(b.beginning());
            let ending = a.ending().min(b.ending());
            if beginning < ending {
                out.push(TimeSlot::new(beginning, ending).expect("ordered intersection bounds"));
            }
            // Advance whichever member finishes first.
            if a.ending() < b.ending() {
                i += 1;
            } else {
                j += 1;
            }
        }
        let set = TimeSlotSet { slots: out };
        debug_assert!(set.invariants_held());
        set
    }

    /// Removes a single slot from every member it overlaps.
    ///
    /// Non-overlapping members are untouched; overlapping members are
    /// replaced by their [`TimeSlot::subtract`] remainder. A zero-duration
    /// subtrahend is a no-op: it has no defined split point, so "cutting"
    /// with it would be ambiguous.
    pub fn remove(&mut self, slot: &TimeSlot) {
        if slot.is_empty() || self.is_empty() {
            return;
        }
        let mut out = Vec::with_capacity(self.slots.len() + 1);
        for member in &self.slots {
            if member.overlaps(slot) {
                out.extend(member.subtract(slot).iter());
            } else {
                out.push(*member);
            }
        }
        self.slots = out;
        debug_assert!(self.invariants_held());
    }

    /// Set subtraction: every part of `self` not covered by `other`.
    pub fn subtract(&self, other: &TimeSlotSet) -> TimeSlotSet {
        let mut result = self.clone();
        for slot in &other.slots {
            result.remove(slot);
        }
        result
    }

    /// Keeps only members at least `minimum` long.
    pub fn at_least(&self, minimum: Minutes) -> TimeSlotSet {
        TimeSlotSet {
            slots: self
                .slots
                .iter()
                .filter(|s| s.minutes() >= minimum)
                .copied()
                .collect(),
        }
    }

    /// Sorts and merges a vector of arbitrary slots in place so it satisfies
    /// the set invariants.
    fn coalesce_unsorted_in_place(slots: &mut Vec<TimeSlot>) {
        slots.retain(|s| !s.is_empty());
        if slots.len() < 2 {
            return;
        }
        slots.sort_unstable();

        let mut write = 0;
        for read in 1..slots.len() {
            // Overlapping or touching runs collapse into the accumulator;
            // anything else flushes it.
            if slots[write].ending() >= slots[read].beginning() {
                slots[write] = slots[write].merge(&slots[read]);
            } else {
                write += 1;
                slots[write] = slots[read];
            }
        }
        slots.truncate(write + 1);
    }

    #[cfg(debug_assertions)]
    fn invariants_held(&self) -> bool {
        self.slots.iter().all(|s| !s.is_empty())
            && self
                .slots
                .windows(2)
                .all(|w| w[0].ending() < w[1].beginning())
    }

    #[cfg(not(debug_assertions))]
    fn invariants_held(&self) -> bool {
        true
    }
}

impl From<Vec<TimeSlot>> for TimeSlotSet {
    #[inline]
    fn from(slots: Vec<TimeSlot>) -> Self {
        Self::from_vec(slots)
    }
}

impl FromIterator<TimeSlot> for TimeSlotSet {
    fn from_iter<I: IntoIterator<Item = TimeSlot>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl Deref for TimeSlotSet {
    type Target = [TimeSlot];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.slots
    }
}

impl<'a> IntoIterator for &'a TimeSlotSet {
    type Item = &'a TimeSlot;
    type IntoIter = std::slice::Iter<'a, TimeSlot>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl BitOr for &TimeSlotSet {
    type Output = TimeSlotSet;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitAnd for &TimeSlotSet {
    type Output = TimeSlotSet;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl Sub for &TimeSlotSet {
    type Output = TimeSlotSet;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

impl Display for TimeSlotSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{slot}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(b: (u16, u16), e: (u16, u16)) -> TimeSlot {
        TimeSlot::new(TimeOfDay::from_hm(b.0, b.1), TimeOfDay::from_hm(e.0, e.1)).unwrap()
    }

    fn assert_invariants(set: &TimeSlotSet) {
        for w in set.as_slice().windows(2) {
            assert!(
                w[0].ending() < w[1].beginning(),
                "members overlap or abut: {} then {}",
                w[0],
                w[1]
            );
        }
        for s in set.as_slice() {
            assert!(!s.is_empty(), "empty member retained: {s}");
        }
    }

    #[test]
    fn test_from_vec_sorts_merges_and_drops_empties() {
        let set = TimeSlotSet::from_vec(vec![
            slot((11, 0), (12, 0)),
            slot((9, 0), (10, 0)),
            slot((10, 0), (10, 30)), // abuts the 09:00 slot
            slot((9, 30), (9, 45)),  // inside it
            slot((14, 0), (14, 0)),  // empty
        ]);
        assert_eq!(
            set.as_slice(),
            &[slot((9, 0), (10, 30)), slot((11, 0), (12, 0))]
        );
        assert_invariants(&set);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let slots = [
            slot((9, 0), (9, 30)),
            slot((9, 30), (10, 0)),
            slot((13, 0), (14, 0)),
            slot((9, 15), (9, 45)),
        ];
        let forward: TimeSlotSet = slots.iter().copied().collect();
        let mut backward = TimeSlotSet::new();
        for s in slots.iter().rev() {
            backward.insert(*s);
        }
        assert_eq!(forward, backward);
        assert_invariants(&forward);
    }

    #[test]
    fn test_union() {
        let a = TimeSlotSet::from_vec(vec![slot((9, 0), (10, 0)), slot((13, 0), (14, 0))]);
        let b = TimeSlotSet::from_vec(vec![slot((9, 30), (11, 0)), slot((14, 0), (15, 0))]);
        let u = &a | &b;
        assert_eq!(
            u.as_slice(),
            &[slot((9, 0), (11, 0)), slot((13, 0), (15, 0))]
        );
        assert_invariants(&u);
    }

    #[test]
    fn test_intersection() {
        let a = TimeSlotSet::from_vec(vec![slot((9, 0), (11, 0)), slot((13, 0), (15, 0))]);
        let b = TimeSlotSet::from_vec(vec![slot((10, 0), (14, 0))]);
        let i = &a & &b;
        assert_eq!(
            i.as_slice(),
            &[slot((10, 0), (11, 0)), slot((13, 0), (14, 0))]
        );
        assert_invariants(&i);
    }

    #[test]
    fn test_intersection_with_empty_is_empty() {
        let a = TimeSlotSet::from_vec(vec![slot((9, 0), (11, 0))]);
        let empty = TimeSlotSet::new();
        assert!((&a & &empty).is_empty());
        assert!((&empty & &a).is_empty());
    }

    #[test]
    fn test_touching_sets_do_not_intersect() {
        let a = TimeSlotSet::from_vec(vec![slot((9, 0), (10, 0))]);
        let b = TimeSlotSet::from_vec(vec![slot((10, 0), (11, 0))]);
        assert!((&a & &b).is_empty());
    }

    #[test]
    fn test_remove_splits_members() {
        let mut set = TimeSlotSet::from_vec(vec![slot((9, 0), (12, 0))]);
        set.remove(&slot((10, 0), (11, 0)));
        assert_eq!(
            set.as_slice(),
            &[slot((9, 0), (10, 0)), slot((11, 0), (12, 0))]
        );
        assert_invariants(&set);
    }

    #[test]
    fn test_remove_zero_duration_is_noop() {
        let mut set = TimeSlotSet::from_vec(vec![slot((9, 0), (12, 0))]);
        set.remove(&slot((10, 0), (10, 0)));
        assert_eq!(set.as_slice(), &[slot((9, 0), (12, 0))]);
    }

    #[test]
    fn test_remove_leaves_disjoint_members() {
        let mut set = TimeSlotSet::from_vec(vec![slot((9, 0), (10, 0)), slot((13, 0), (14, 0))]);
        set.remove(&slot((9, 30), (9, 45)));
        assert_eq!(
            set.as_slice(),
            &[
                slot((9, 0), (9, 30)),
                slot((9, 45), (10, 0)),
                slot((13, 0), (14, 0))
            ]
        );
    }

    #[test]
    fn test_subtract_sets() {
        let a = TimeSlotSet::from_vec(vec![slot((9, 0), (12, 0)), slot((13, 0), (15, 0))]);
        let b = TimeSlotSet::from_vec(vec![slot((10, 0), (13, 30)), slot((14, 30), (16, 0))]);
        let d = &a - &b;
        assert_eq!(
            d.as_slice(),
            &[slot((9, 0), (10, 0)), slot((13, 30), (14, 30))]
        );
        assert_invariants(&d);
    }

    #[test]
    fn test_subtract_full_cover_yields_empty() {
        let a = TimeSlotSet::from_vec(vec![slot((9, 0), (10, 0))]);
        let b = TimeSlotSet::from_vec(vec![slot((8, 0), (11, 0))]);
        assert!((&a - &b).is_empty());
    }

    #[test]
    fn test_at_least_filter() {
        let set = TimeSlotSet::from_vec(vec![
            slot((9, 0), (9, 20)),
            slot((10, 0), (11, 0)),
            slot((12, 0), (12, 45)),
        ]);
        let kept = set.at_least(Minutes::new(30));
        assert_eq!(
            kept.as_slice(),
            &[slot((10, 0), (11, 0)), slot((12, 0), (12, 45))]
        );
    }

    #[test]
    fn test_total_minutes() {
        let set = TimeSlotSet::from_vec(vec![slot((9, 0), (9, 30)), slot((10, 0), (11, 0))]);
        assert_eq!(set.total_minutes(), Minutes::new(90));
    }

    #[test]
    fn test_covers() {
        let set = TimeSlotSet::from_vec(vec![slot((9, 0), (11, 0))]);
        assert!(set.covers(&slot((9, 30), (10, 30))));
        assert!(!set.covers(&slot((10, 30), (11, 30))));
        assert!(set.covers(&slot((12, 0), (12, 0)))); // empty requirement
    }
}
