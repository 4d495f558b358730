//! Sample distribution hub
//!
//! ## Overview
//!
//! The hub decouples the single measurement producer from a small set
//! of consumers (display, serial logger, network uplink). The producer
//! publishes into an ingress mailbox; a dispatch step fans each message
//! out into one bounded [`Mailbox`] per subscriber; consumers drain
//! their own mailbox at their own cadence.
//!
//! ```text
//! Producer ──publish──→ [ingress] ──dispatch──→ [mailbox 0] → consumer 0
//!                                            ├→ [mailbox 1] → consumer 1
//!                                            └→ [mailbox 2] → consumer 2
//! ```
//!
//! No stage ever blocks. A full ingress mailbox rejects the publish; a
//! full subscriber mailbox loses that one message for that subscriber
//! only, counted in the fan-out report. Within one mailbox delivery is
//! FIFO, so every subscriber that keeps up observes the samples in
//! producer order.
//!
//! ## Subscription slots
//!
//! Subscriptions live in a fixed table of [`MAX_SUBSCRIBERS`] slots.
//! Each slot carries an atomic state:
//!
//! ```text
//! Free ──claim──→ Claimed ──publish id──→ Active
//!   ↑                                       │
//!   └────────────── unsubscribe ────────────┘
//! ```
//!
//! Fan-out only touches Active slots, so a slot being set up or torn
//! down never receives a half-initialized delivery. Mailboxes are
//! embedded in the table and reused across subscriptions; unsubscribe
//! drains the mailbox and bumps the slot generation before the slot
//! returns to Free, so handles from an earlier subscription stay dead
//! even when the same consumer takes the slot again.
//!
//! Subscribe and unsubscribe are expected from a single control
//! context. Publish, dispatch and recv may run concurrently with each
//! other and with subscription changes for *other* consumers. A
//! consumer must stop calling `recv` on its handle before its own
//! unsubscribe runs: the unsubscribe drain reads from the same
//! single-consumer ring, and the two must not overlap.

use core::fmt;
use core::sync::atomic::{AtomicU8, AtomicU16, AtomicU32, Ordering};

use crate::constants::{MAILBOX_CAPACITY, MAX_SUBSCRIBERS};
use crate::errors::HubError;
use crate::mailbox::Mailbox;
use crate::sample::{Message, Sample};
use crate::time::TimeSource;

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Identity of a consumer, stable across resubscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumerId(pub u16);

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "consumer-{}", self.0)
    }
}

/// Proof of an active subscription, returned by [`DistributionHub::subscribe`]
///
/// Receiving requires the handle, which ties each mailbox to the one
/// consumer that subscribed it. The handle is stamped with the slot's
/// generation at subscribe time, so a handle kept across unsubscribe
/// is dead even if the slot is later reused, including by the same
/// consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberHandle {
    consumer: ConsumerId,
    slot: usize,
    generation: u32,
}

impl SubscriberHandle {
    /// Consumer this handle belongs to
    pub fn consumer(&self) -> ConsumerId {
        self.consumer
    }
}

/// Outcome of one fan-out step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FanoutReport {
    /// Subscribers whose mailbox accepted the message
    pub delivered: u8,
    /// Subscribers whose mailbox was full
    pub dropped: u8,
}

/// Slot lifecycle states
const SLOT_FREE: u8 = 0;
const SLOT_CLAIMED: u8 = 1;
const SLOT_ACTIVE: u8 = 2;

struct SubscriberSlot {
    state: AtomicU8,
    consumer: AtomicU16,
    /// Bumped on every unsubscribe; invalidates outstanding handles
    generation: AtomicU32,
    mailbox: Mailbox<MAILBOX_CAPACITY>,
}

impl SubscriberSlot {
    const fn new() -> Self {
        Self {
            state: AtomicU8::new(SLOT_FREE),
            consumer: AtomicU16::new(0),
            generation: AtomicU32::new(0),
            mailbox: Mailbox::new(),
        }
    }

    fn is_active_for(&self, consumer: ConsumerId) -> bool {
        self.state.load(Ordering::Acquire) == SLOT_ACTIVE
            && self.consumer.load(Ordering::Relaxed) == consumer.0
    }

    fn accepts(&self, handle: &SubscriberHandle) -> bool {
        self.is_active_for(handle.consumer)
            && self.generation.load(Ordering::Relaxed) == handle.generation
    }
}

/// Publish/subscribe fan-out of measurement samples
///
/// Generic over the [`TimeSource`] that stamps published messages, so
/// tests can drive time explicitly.
pub struct DistributionHub<T: TimeSource> {
    clock: T,
    ingress: Mailbox<MAILBOX_CAPACITY>,
    slots: [SubscriberSlot; MAX_SUBSCRIBERS],
}

impl<T: TimeSource> DistributionHub<T> {
    /// Create a hub with no subscribers
    pub const fn new(clock: T) -> Self {
        Self {
            clock,
            ingress: Mailbox::new(),
            slots: [
                SubscriberSlot::new(),
                SubscriberSlot::new(),
                SubscriberSlot::new(),
                SubscriberSlot::new(),
                SubscriberSlot::new(),
            ],
        }
    }

    /// Clock stamping published messages
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Register a consumer, reserving a mailbox for it
    ///
    /// Fails with [`HubError::AlreadySubscribed`] if the consumer holds
    /// an active subscription and [`HubError::NoFreeSlot`] when the
    /// table is exhausted.
    pub fn subscribe(&self, consumer: ConsumerId) -> Result<SubscriberHandle, HubError> {
        if self.slots.iter().any(|slot| slot.is_active_for(consumer)) {
            return Err(HubError::AlreadySubscribed);
        }

        for (index, slot) in self.slots.iter().enumerate() {
            if slot
                .state
                .compare_exchange(
                    SLOT_FREE,
                    SLOT_CLAIMED,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_err()
            {
                continue;
            }

            // Claimed: fan-out skips the slot while we set it up.
            slot.mailbox.purge();
            slot.consumer.store(consumer.0, Ordering::Relaxed);
            let generation = slot.generation.load(Ordering::Relaxed);
            slot.state.store(SLOT_ACTIVE, Ordering::Release);

            return Ok(SubscriberHandle {
                consumer,
                slot: index,
                generation,
            });
        }

        Err(HubError::NoFreeSlot)
    }

    /// Remove a consumer's subscription and drain its mailbox
    ///
    /// The slot becomes eligible for reuse; any handle the consumer
    /// kept stops receiving with [`HubError::Inactive`].
    pub fn unsubscribe(&self, consumer: ConsumerId) -> Result<(), HubError> {
        for slot in &self.slots {
            if slot.consumer.load(Ordering::Relaxed) != consumer.0 {
                continue;
            }
            if slot
                .state
                .compare_exchange(
                    SLOT_ACTIVE,
                    SLOT_CLAIMED,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_ok()
            {
                slot.mailbox.purge();
                // Kill outstanding handles before the slot is reusable.
                slot.generation.fetch_add(1, Ordering::Relaxed);
                slot.state.store(SLOT_FREE, Ordering::Release);
                return Ok(());
            }
        }
        Err(HubError::Inactive)
    }

    /// Number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state.load(Ordering::Acquire) == SLOT_ACTIVE)
            .count()
    }

    /// Stamp a sample and offer it to the ingress mailbox
    ///
    /// Never blocks: a full ingress mailbox rejects the sample with
    /// [`HubError::QueueFull`] and the producer moves on.
    pub fn publish(&self, sample: &Sample) -> Result<(), HubError> {
        let message = Message {
            sample: *sample,
            timestamp: self.clock.now(),
        };
        if self.ingress.try_send(message) {
            Ok(())
        } else {
            log_warn!("ingress mailbox full, sample dropped");
            Err(HubError::QueueFull)
        }
    }

    /// Fan one ingress message out to every active subscriber
    ///
    /// Returns `None` when the ingress mailbox is empty. A full
    /// subscriber mailbox costs that subscriber the message but never
    /// delays the others; there is no retry.
    pub fn dispatch(&self) -> Option<FanoutReport> {
        let message = self.ingress.try_recv()?;
        let mut report = FanoutReport::default();

        for slot in &self.slots {
            if slot.state.load(Ordering::Acquire) != SLOT_ACTIVE {
                continue;
            }
            if slot.mailbox.try_send(message) {
                report.delivered += 1;
            } else {
                report.dropped += 1;
                log_warn!(
                    "mailbox full for {}, message dropped",
                    ConsumerId(slot.consumer.load(Ordering::Relaxed))
                );
            }
        }

        Some(report)
    }

    /// Drain the ingress mailbox, fanning out every queued message
    pub fn dispatch_all(&self) -> FanoutReport {
        let mut total = FanoutReport::default();
        while let Some(report) = self.dispatch() {
            total.delivered += report.delivered;
            total.dropped += report.dropped;
        }
        total
    }

    /// Take the oldest message from a subscriber's mailbox
    ///
    /// Non-blocking: `WouldBlock` when the mailbox is empty, so the
    /// consumer re-polls on its own cadence. [`HubError::Inactive`]
    /// when the handle's subscription was removed.
    pub fn recv(&self, handle: &SubscriberHandle) -> nb::Result<Message, HubError> {
        let slot = &self.slots[handle.slot];
        if !slot.accepts(handle) {
            return Err(nb::Error::Other(HubError::Inactive));
        }
        match slot.mailbox.try_recv() {
            Some(message) => Ok(message),
            None => Err(nb::Error::WouldBlock),
        }
    }

    /// Messages waiting in a subscriber's mailbox
    pub fn pending(&self, handle: &SubscriberHandle) -> usize {
        let slot = &self.slots[handle.slot];
        if slot.accepts(handle) {
            slot.mailbox.len()
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedTime;

    fn hub() -> DistributionHub<FixedTime> {
        DistributionHub::new(FixedTime::new(1_000))
    }

    fn sample(ticks: u32) -> Sample {
        Sample {
            runtime_ticks: ticks,
            ..Sample::default()
        }
    }

    #[test]
    fn publish_dispatch_recv_round_trip() {
        let hub = hub();
        let handle = hub.subscribe(ConsumerId(1)).unwrap();

        hub.publish(&sample(5)).unwrap();
        assert_eq!(
            hub.dispatch(),
            Some(FanoutReport {
                delivered: 1,
                dropped: 0
            })
        );

        let message = hub.recv(&handle).unwrap();
        assert_eq!(message.sample.runtime_ticks, 5);
        assert_eq!(message.timestamp, 1_000);
        assert_eq!(hub.recv(&handle), Err(nb::Error::WouldBlock));
    }

    #[test]
    fn publish_stamps_current_time() {
        let hub = hub();
        let handle = hub.subscribe(ConsumerId(1)).unwrap();

        hub.publish(&sample(1)).unwrap();
        hub.clock().advance(250);
        hub.publish(&sample(2)).unwrap();
        hub.dispatch_all();

        assert_eq!(hub.recv(&handle).unwrap().timestamp, 1_000);
        assert_eq!(hub.recv(&handle).unwrap().timestamp, 1_250);
    }

    #[test]
    fn table_capacity_is_enforced() {
        let hub = hub();
        for id in 0..MAX_SUBSCRIBERS as u16 {
            hub.subscribe(ConsumerId(id)).unwrap();
        }
        assert_eq!(hub.subscriber_count(), MAX_SUBSCRIBERS);
        assert_eq!(hub.subscribe(ConsumerId(99)), Err(HubError::NoFreeSlot));
    }

    #[test]
    fn duplicate_subscription_is_rejected() {
        let hub = hub();
        hub.subscribe(ConsumerId(7)).unwrap();
        assert_eq!(hub.subscribe(ConsumerId(7)), Err(HubError::AlreadySubscribed));
    }

    #[test]
    fn unsubscribe_frees_the_slot() {
        let hub = hub();
        for id in 0..MAX_SUBSCRIBERS as u16 {
            hub.subscribe(ConsumerId(id)).unwrap();
        }
        hub.unsubscribe(ConsumerId(2)).unwrap();
        assert_eq!(hub.subscriber_count(), MAX_SUBSCRIBERS - 1);

        // The freed slot is reusable, including by the same consumer.
        hub.subscribe(ConsumerId(2)).unwrap();
        assert_eq!(hub.subscriber_count(), MAX_SUBSCRIBERS);
    }

    #[test]
    fn unsubscribe_without_subscription_fails() {
        let hub = hub();
        assert_eq!(hub.unsubscribe(ConsumerId(3)), Err(HubError::Inactive));
    }

    #[test]
    fn stale_handle_stops_receiving() {
        let hub = hub();
        let handle = hub.subscribe(ConsumerId(1)).unwrap();
        hub.publish(&sample(1)).unwrap();
        hub.dispatch_all();

        hub.unsubscribe(ConsumerId(1)).unwrap();
        assert_eq!(
            hub.recv(&handle),
            Err(nb::Error::Other(HubError::Inactive))
        );
    }

    #[test]
    fn old_handle_is_dead_after_same_consumer_resubscribes() {
        let hub = hub();
        let old = hub.subscribe(ConsumerId(1)).unwrap();
        hub.unsubscribe(ConsumerId(1)).unwrap();
        let new = hub.subscribe(ConsumerId(1)).unwrap();

        hub.publish(&sample(1)).unwrap();
        hub.dispatch_all();

        // Same consumer, same slot: only the new handle may drain it.
        assert_eq!(hub.recv(&old), Err(nb::Error::Other(HubError::Inactive)));
        assert_eq!(hub.pending(&old), 0);
        assert_eq!(hub.recv(&new).unwrap().sample.runtime_ticks, 1);
    }

    #[test]
    fn reused_slot_starts_with_an_empty_mailbox() {
        let hub = hub();
        let first = hub.subscribe(ConsumerId(1)).unwrap();
        hub.publish(&sample(1)).unwrap();
        hub.dispatch_all();
        assert_eq!(hub.pending(&first), 1);

        hub.unsubscribe(ConsumerId(1)).unwrap();
        let second = hub.subscribe(ConsumerId(2)).unwrap();

        // Undelivered messages of the old subscription are gone.
        assert_eq!(hub.pending(&second), 0);
        assert_eq!(hub.recv(&second), Err(nb::Error::WouldBlock));
    }

    #[test]
    fn full_subscriber_mailbox_drops_only_its_own_messages() {
        let hub = hub();
        let slow = hub.subscribe(ConsumerId(1)).unwrap();
        let fast = hub.subscribe(ConsumerId(2)).unwrap();

        // Keep the fast consumer drained while the slow one stalls.
        let mut fast_seen = 0u32;
        let mut published = 0u32;
        for ticks in 1..=(MAILBOX_CAPACITY as u32 + 4) {
            hub.publish(&sample(ticks)).unwrap();
            hub.dispatch_all();
            while hub.recv(&fast).is_ok() {
                fast_seen += 1;
            }
            published += 1;
        }

        // Fast consumer saw everything.
        assert_eq!(fast_seen, published);

        // Slow consumer kept the oldest contiguous prefix in order.
        let mut expected = 1u32;
        while let Ok(message) = hub.recv(&slow) {
            assert_eq!(message.sample.runtime_ticks, expected);
            expected += 1;
        }
        assert_eq!(expected - 1, MAILBOX_CAPACITY as u32 - 1);
    }

    #[test]
    fn ingress_overflow_rejects_the_publish() {
        let hub = hub();
        let mut accepted = 0;
        let mut rejected = 0;
        for ticks in 0..MAILBOX_CAPACITY as u32 + 4 {
            match hub.publish(&sample(ticks)) {
                Ok(()) => accepted += 1,
                Err(HubError::QueueFull) => rejected += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(accepted, MAILBOX_CAPACITY - 1);
        assert_eq!(rejected, 5);
    }

    #[test]
    fn dispatch_without_ingress_is_a_no_op() {
        let hub = hub();
        hub.subscribe(ConsumerId(1)).unwrap();
        assert_eq!(hub.dispatch(), None);
    }

    #[test]
    fn dispatch_with_no_subscribers_consumes_the_message() {
        let hub = hub();
        hub.publish(&sample(1)).unwrap();
        assert_eq!(hub.dispatch(), Some(FanoutReport::default()));
        assert_eq!(hub.dispatch(), None);
    }
}
