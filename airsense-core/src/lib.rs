//! Telemetry core for an indoor air quality monitor
//!
//! Moves measurement samples from one producer to several consumers
//! and keeps multi-resolution trend history per parameter, in fixed
//! memory with no allocation.
//!
//! Key constraints:
//! - No heap allocation anywhere
//! - Producer and consumers never block on each other
//! - Fixed-point values end to end after validation
//!
//! ```
//! use airsense_core::{ConsumerId, DistributionHub, FixedTime, Sample, TrendSet};
//!
//! let hub = DistributionHub::new(FixedTime::new(0));
//! let handle = hub.subscribe(ConsumerId(1)).unwrap();
//!
//! let sample = Sample { pm2_5: 7.5, runtime_ticks: 1, ..Sample::default() };
//! hub.publish(&sample).unwrap();
//! hub.dispatch_all();
//!
//! let mut trends = TrendSet::new();
//! while let Ok(message) = hub.recv(&handle) {
//!     trends.ingest(&message.sample);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod constants;
pub mod errors;
pub mod hub;
pub mod mailbox;
pub mod params;
pub mod range;
pub mod report;
pub mod sample;
pub mod time;
pub mod trend;
pub mod validate;

// Public API
pub use errors::{HubError, ValidationError, ValidationOutcome};
pub use hub::{ConsumerId, DistributionHub, FanoutReport, SubscriberHandle};
pub use params::{IndicatorState, ParameterKind};
pub use sample::{Message, RawSignals, Sample};
pub use time::{FixedTime, TickTime, TimeSource, Timestamp};
pub use trend::{TrendAggregator, TrendSet, TrendTier};
pub use validate::validate;

#[cfg(feature = "std")]
pub use time::SystemTime;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
