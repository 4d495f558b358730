//! Error types for the telemetry core
//!
//! Everything here is a local, recoverable condition returned to the
//! immediate caller. Nothing in this crate panics or unwinds across a
//! task boundary: a validation failure becomes a "no data" slot, a full
//! mailbox drops one message for one destination, and an exhausted
//! subscription table is reported to whoever tried to subscribe. The
//! worst outcome anywhere is stale or sparser data.
//!
//! All variants are `Copy` with inline data only (no heap), so they can
//! be returned from hot paths and stored without allocation.

use thiserror_no_std::Error;

/// Result type for sample validation
pub type ValidationOutcome = Result<i32, ValidationError>;

/// Why a raw reading did not produce a fixed-point value
///
/// Expected and frequent during sensor warm-up; callers map this to the
/// "no data" sentinel rather than treating it as a fault.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Value outside the parameter's absolute bounds
    #[error("value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The reading that failed validation
        value: f32,
        /// Lower validity bound for the parameter
        min: f32,
        /// Upper validity bound for the parameter
        max: f32,
    },

    /// Value is not a usable number (NaN or infinite)
    #[error("invalid value: not a finite number")]
    InvalidValue,
}

/// Distribution hub failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubError {
    /// Subscription table is full
    #[error("no free subscription slot")]
    NoFreeSlot,

    /// The consumer already holds an active subscription
    #[error("consumer is already subscribed")]
    AlreadySubscribed,

    /// Ingress mailbox is full; the sample was dropped
    #[error("ingress mailbox full, sample dropped")]
    QueueFull,

    /// The handle's subscription has been cancelled
    #[error("subscription is no longer active")]
    Inactive,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ValidationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OutOfRange { value, min, max } => {
                defmt::write!(fmt, "value {} outside [{}, {}]", value, min, max)
            }
            Self::InvalidValue => defmt::write!(fmt, "invalid value"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HubError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NoFreeSlot => defmt::write!(fmt, "no free subscription slot"),
            Self::AlreadySubscribed => defmt::write!(fmt, "already subscribed"),
            Self::QueueFull => defmt::write!(fmt, "ingress mailbox full"),
            Self::Inactive => defmt::write!(fmt, "subscription inactive"),
        }
    }
}
