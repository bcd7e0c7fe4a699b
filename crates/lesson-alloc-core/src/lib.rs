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

//! # Lesson Allocation Core Primitives
//!
//! Foundational, type-safe building blocks for the lesson allocation engine:
//!
//! - **Time of day**: [`time::TimeOfDay`] (minute-of-day point),
//!   [`time::Minutes`] (signed duration) and [`time::TimeOfDayInterval`]
//!   (wrap-safe half-open interval that may cross midnight).
//! - **Slots**: [`slot::TimeSlot`], a named, parseable `[start, end)` span
//!   within one day, and [`slotset::TimeSlotSet`], a sorted, disjoint,
//!   auto-merging collection of slots with full set algebra.
//! - **Dates**: [`date::DateRange`], a half-open calendar-date range, plus
//!   the Sunday-aligned cycle-week arithmetic.
//! - **Cost**: [`cost::Cost`], the engine's checked cost scalar.
//!
//! All interval types use half-open `[start, end)` semantics throughout, so
//! a slot ending at 10:00 never overlaps one beginning at 10:00.

pub mod cost;
pub mod date;
pub mod err;
pub mod slot;
pub mod slotset;
pub mod time;

pub use cost::Cost;
pub use date::DateRange;
pub use slot::TimeSlot;
pub use slotset::TimeSlotSet;
pub use time::{Minutes, TimeOfDay, TimeOfDayInterval};
