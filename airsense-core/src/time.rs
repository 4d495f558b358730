//! Time sources for message stamping
//!
//! The hub stamps every published sample with a millisecond timestamp.
//! Where that timestamp comes from differs per platform:
//! - a scheduler tick counter on the device
//! - the system clock on a host build
//! - a hand-advanced fake in tests
//!
//! All sources use interior mutability so the hub can stamp through a
//! shared reference.

use core::sync::atomic::{AtomicU64, Ordering};

/// Timestamp in milliseconds since device boot (or epoch for wall clocks)
pub type Timestamp = u64;

/// Source of time for message stamping
pub trait TimeSource {
    /// Get the current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Tick-counter time source for schedulers without a wall clock
///
/// Call [`TickTime::tick`] once per scheduler tick; `now()` reports
/// elapsed ticks times the tick period.
pub struct TickTime {
    ticks: AtomicU64,
    period_ms: u32,
}

impl TickTime {
    /// Create a source counting ticks of `period_ms` milliseconds
    pub const fn new(period_ms: u32) -> Self {
        Self {
            ticks: AtomicU64::new(0),
            period_ms,
        }
    }

    /// Record one elapsed tick
    pub fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }
}

impl TimeSource for TickTime {
    fn now(&self) -> Timestamp {
        self.ticks.load(Ordering::Relaxed) * self.period_ms as u64
    }
}

/// System clock source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Hand-advanced time source for tests
pub struct FixedTime {
    timestamp: AtomicU64,
}

impl FixedTime {
    /// Create a source frozen at `timestamp`
    pub const fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp: AtomicU64::new(timestamp),
        }
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, timestamp: Timestamp) {
        self.timestamp.store(timestamp, Ordering::Relaxed);
    }

    /// Advance by `ms` milliseconds
    pub fn advance(&self, ms: u64) {
        self.timestamp.fetch_add(ms, Ordering::Relaxed);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp.load(Ordering::Relaxed)
    }
}
