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

//! Disruption cost scalar for the allocation engine.
//!
//! Costs accumulate per candidate placement: each protected academic lesson
//! a flexible pupil would miss adds its running clash tally plus one, while
//! a single protected clash for an inflexible pupil adds
//! [`Cost::PROTECTED_CLASH`], which dominates any realistic flexible total.

use num_traits::{CheckedAdd, SaturatingAdd, SaturatingSub, Zero};
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cost(i64);

impl Cost {
    /// Penalty for overlapping a protected lesson of an inflexible pupil.
    /// Effectively forbids the placement unless no alternative exists.
    pub const PROTECTED_CLASH: Cost = Cost(1000);

    #[inline]
    pub const fn new(value: i64) -> Self {
        Cost(value)
    }

    #[inline]
    pub const fn zero() -> Self {
        Cost(0)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Cost) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Cost)
    }

    #[inline]
    pub fn saturating_add(self, rhs: Cost) -> Self {
        Cost(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn saturating_sub(self, rhs: Cost) -> Self {
        Cost(self.0.saturating_sub(rhs.0))
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

impl From<i64> for Cost {
    #[inline]
    fn from(value: i64) -> Self {
        Cost(value)
    }
}

impl Add for Cost {
    type Output = Cost;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Cost(self.0.checked_add(rhs.0).expect("overflow in Cost + Cost"))
    }
}

impl AddAssign for Cost {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.checked_add(rhs.0).expect("overflow in Cost += Cost");
    }
}

impl Sub for Cost {
    type Output = Cost;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Cost(self.0.checked_sub(rhs.0).expect("underflow in Cost - Cost"))
    }
}

impl CheckedAdd for Cost {
    #[inline]
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Cost)
    }
}

impl SaturatingAdd for Cost {
    #[inline]
    fn saturating_add(&self, rhs: &Self) -> Self {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl SaturatingSub for Cost {
    #[inline]
    fn saturating_sub(&self, rhs: &Self) -> Self {
        Cost(self.0.saturating_sub(rhs.0))
    }
}

impl Zero for Cost {
    #[inline]
    fn zero() -> Self {
        Cost(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Cost::zero(), |a, b| a + b)
    }
}
