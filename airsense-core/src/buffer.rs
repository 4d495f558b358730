//! Fixed-size trend buffer with "no data" slots
//!
//! ## Overview
//!
//! A [`TrendBuffer`] holds one resolution tier of one parameter's
//! history as a sliding window of fixed-point values. Unlike a
//! grow-until-full ring, the buffer is *always* logically full: every
//! slot exists from the start, initialized to the "no data" sentinel,
//! and each push discards the oldest slot. This matches how a chart
//! consumes it (one slot per point position, sentinel slots rendered
//! as gaps) and keeps temporal alignment exact even when readings are
//! rejected.
//!
//! ## Memory layout
//!
//! Physically a ring; logically a window with the newest value in the
//! last slot:
//!
//! ```text
//! Physical array:  [D, E, ·, A, B, C]   (head = 2, · = sentinel)
//!                   0  1  2  3  4  5
//!
//! Logical window:  [·, A, B, C, D, E]   (oldest → newest)
//!                   0  1  2  3  4  5
//!
//! push(F) writes at head, then advances it:
//! Physical array:  [D, E, F, A, B, C]   (head = 3)
//! Logical window:  [A, B, C, D, E, F]
//! ```
//!
//! Storage is `[Option<i32>; N]`: `None` is the sentinel, `Some(v)` a
//! valid fixed-point value. Push and the newest-slot read are O(1);
//! scans (range calculation, chart redraw) are O(N) over exactly N
//! slots with no allocation anywhere.

/// Sliding window of fixed-point trend values
///
/// `N` is the slot count, constant across all resolution tiers of a
/// parameter. The buffer never grows or shrinks; pushing discards the
/// oldest slot and [`TrendBuffer::clear`] rewinds every slot to the
/// sentinel.
#[derive(Debug, Clone)]
pub struct TrendBuffer<const N: usize> {
    /// Ring storage; `None` marks a slot with no valid data
    slots: [Option<i32>; N],

    /// Physical index of the oldest slot (and the next write position)
    head: usize,
}

impl<const N: usize> TrendBuffer<N> {
    /// Create a buffer with every slot set to the sentinel
    pub const fn new() -> Self {
        Self {
            slots: [None; N],
            head: 0,
        }
    }

    /// Slot count, identical to the const parameter
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Append a slot value, discarding the oldest slot
    ///
    /// `None` records "no data at this position": the slot is consumed
    /// so the window keeps sliding at sample cadence.
    pub fn push(&mut self, value: Option<i32>) {
        self.slots[self.head] = value;
        self.head = (self.head + 1) % N;
    }

    /// Value of the newest slot (`None` if it holds the sentinel)
    pub fn newest(&self) -> Option<i32> {
        self.slots[(self.head + N - 1) % N]
    }

    /// Number of slots currently holding valid data
    pub fn valid_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when every slot is the sentinel
    pub fn is_blank(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Reset every slot to the sentinel
    pub fn clear(&mut self) {
        self.slots = [None; N];
        self.head = 0;
    }

    /// Iterate over all N slots from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = Option<i32>> + '_ {
        (0..N).map(move |i| self.slots[(self.head + i) % N])
    }

    /// Minimum and maximum over the valid slots, if any exist
    pub fn min_max(&self) -> Option<(i32, i32)> {
        let mut bounds: Option<(i32, i32)> = None;
        for value in self.iter().flatten() {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
                None => (value, value),
            });
        }
        bounds
    }
}

impl<const N: usize> Default for TrendBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
