//! Lock-free bounded mailbox for sample delivery
#![allow(unsafe_code)] // Required for lock-free atomic operations
//!
//! ## Overview
//!
//! A [`Mailbox`] is a bounded ring buffer of [`Message`]s connecting
//! one producer to one consumer without locks. The distribution hub
//! keeps one mailbox per subscriber plus one for ingress, so a stalled
//! consumer can never block the producer or another consumer.
//!
//! ## Backpressure
//!
//! The mailbox never blocks and never evicts: when full, the *newest*
//! message is rejected and counted. Older queued messages stay put, so
//! what the consumer eventually reads is a contiguous, in-order prefix
//! of what was sent. A reader catching up after a stall sees history as
//! it happened, then a gap, never a shuffled mix.
//!
//! ## Algorithm
//!
//! Ring buffer with atomic head/tail, one slot sacrificed to tell full
//! from empty:
//!
//! ```text
//! ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//! │  0  │  1  │  2  │  3  │  4  │  5  │  6  │  7  │
//! └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//!          ↑                       ↑
//!        tail                    head
//!        (next read)          (next write)
//! ```
//!
//! Producer: load head, check `next_head != tail`, write the slot, then
//! publish head with Release. Consumer: load tail, check against head
//! with Acquire, read the slot, then publish tail with Release. The
//! Acquire/Release pair makes the slot write visible before the index
//! that announces it.
//!
//! Capacity must be a power of two so the index wrap is a mask.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::sample::Message;

/// Bounded lock-free SPSC mailbox
///
/// Usable capacity is `N - 1`; one slot distinguishes full from empty.
pub struct Mailbox<const N: usize> {
    /// Ring storage, interior-mutable behind the atomic indices
    slots: UnsafeCell<[MaybeUninit<Message>; N]>,

    /// Next write position (producer owned)
    head: AtomicUsize,

    /// Next read position (consumer owned)
    tail: AtomicUsize,

    /// Delivery counters
    stats: MailboxStats,
}

/// Mailbox delivery counters
///
/// Tracked with relaxed atomics; informational only
#[derive(Debug)]
pub struct MailboxStats {
    /// Messages accepted by the mailbox
    pub delivered: AtomicU32,
    /// Messages removed by the consumer
    pub consumed: AtomicU32,
    /// Messages rejected because the mailbox was full
    pub dropped: AtomicU32,
}

impl MailboxStats {
    const fn new() -> Self {
        Self {
            delivered: AtomicU32::new(0),
            consumed: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }
}

impl<const N: usize> Mailbox<N> {
    const CAPACITY_CHECK: () = assert!(
        N.is_power_of_two() && N >= 2,
        "mailbox capacity must be a power of two"
    );

    /// Create an empty mailbox
    ///
    /// Usable in static context.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::CAPACITY_CHECK;
        Self {
            slots: UnsafeCell::new(unsafe { MaybeUninit::uninit().assume_init() }),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            stats: MailboxStats::new(),
        }
    }

    /// Offer a message (single producer)
    ///
    /// Returns `false` and counts a drop when the mailbox is full; the
    /// queued messages are untouched.
    pub fn try_send(&self, message: Message) -> bool {
        let head = self.head.load(Ordering::Acquire);
        let next_head = (head + 1) & (N - 1);

        if next_head == self.tail.load(Ordering::Acquire) {
            self.stats.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // Sole producer: the slot between tail and head is ours.
        unsafe {
            let slots = &mut *self.slots.get();
            slots[head].write(message);
        }

        // Publish the slot write before the new head.
        self.head.store(next_head, Ordering::Release);
        self.stats.delivered.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Take the oldest message (single consumer)
    pub fn try_recv(&self) -> Option<Message> {
        let tail = self.tail.load(Ordering::Acquire);
        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }

        // Sole consumer: the slot at tail is initialized and ours.
        let message = unsafe {
            let slots = &*self.slots.get();
            slots[tail].assume_init_read()
        };

        self.tail.store((tail + 1) & (N - 1), Ordering::Release);
        self.stats.consumed.fetch_add(1, Ordering::Relaxed);
        Some(message)
    }

    /// Messages currently queued
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        (head.wrapping_sub(tail)) & (N - 1)
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    /// True when the next send would be rejected
    pub fn is_full(&self) -> bool {
        let head = self.head.load(Ordering::Acquire);
        ((head + 1) & (N - 1)) == self.tail.load(Ordering::Acquire)
    }

    /// Discard everything queued (consumer side)
    pub fn purge(&self) {
        while self.try_recv().is_some() {}
    }

    /// Delivery counters
    pub fn stats(&self) -> &MailboxStats {
        &self.stats
    }
}

impl<const N: usize> Default for Mailbox<N> {
    fn default() -> Self {
        Self::new()
    }
}

// Message is Copy and the indices synchronize slot access.
unsafe impl<const N: usize> Send for Mailbox<N> {}
unsafe impl<const N: usize> Sync for Mailbox<N> {}
