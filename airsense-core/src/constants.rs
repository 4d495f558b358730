//! Constants for the Airsense telemetry core
//!
//! Centralizes every numeric policy used by validation, trend aggregation
//! and the distribution hub. All values are defined here with their unit
//! and source so the rest of the crate never carries magic numbers.
//!
//! Organization:
//! - Validity bounds per parameter (sensor datasheet limits)
//! - Fixed-point display decimals per parameter
//! - Chart defaults (fallback range and minimum axis spread)
//! - Indicator color bands (air-quality guideline values)
//! - Capacities for trend buffers and hub mailboxes

// ===== VALIDITY BOUNDS =====
//
// A raw reading outside these limits is treated as "no data", not as an
// error: the sensor reports out-of-band values during warm-up and after
// a mode change, and both are expected.

/// Minimum valid particulate mass concentration (µg/m³), all size cuts.
pub const PM_MIN_UG_M3: f32 = 0.0;

/// Maximum valid particulate mass concentration (µg/m³), all size cuts.
///
/// Upper limit of the SEN6x mass concentration output range.
pub const PM_MAX_UG_M3: f32 = 6000.0;

/// Minimum valid CO2 concentration (ppm).
pub const CO2_MIN_PPM: f32 = 0.0;

/// Maximum valid CO2 concentration (ppm).
///
/// Photoacoustic CO2 cell saturates at 10000 ppm.
pub const CO2_MAX_PPM: f32 = 10_000.0;

/// Minimum valid VOC index (dimensionless, nominal 100 = average air).
pub const VOC_INDEX_MIN: f32 = 0.0;

/// Maximum valid VOC index.
pub const VOC_INDEX_MAX: f32 = 500.0;

/// Minimum valid NOx index (dimensionless, nominal 1 = clean air).
pub const NOX_INDEX_MIN: f32 = 0.0;

/// Maximum valid NOx index.
pub const NOX_INDEX_MAX: f32 = 500.0;

/// Minimum valid ambient temperature (°C).
///
/// Sensor operating range, not a physical limit.
pub const TEMP_MIN_C: f32 = -40.0;

/// Maximum valid ambient temperature (°C).
pub const TEMP_MAX_C: f32 = 85.0;

/// Minimum valid relative humidity (%).
pub const HUMIDITY_MIN_PCT: f32 = 0.0;

/// Maximum valid relative humidity (%).
pub const HUMIDITY_MAX_PCT: f32 = 100.0;

// ===== DISPLAY DECIMALS =====
//
// Each parameter is stored as a fixed-point integer scaled by
// 10^decimals so charting and range math stay in integer space.

/// Decimal places kept for particulate mass values.
pub const PM_DECIMALS: u8 = 1;

/// Decimal places kept for CO2 (always shown as whole ppm).
pub const CO2_DECIMALS: u8 = 0;

/// Decimal places kept for the VOC index.
pub const VOC_DECIMALS: u8 = 0;

/// Decimal places kept for the NOx index.
pub const NOX_DECIMALS: u8 = 0;

/// Decimal places kept for temperature.
pub const TEMP_DECIMALS: u8 = 1;

/// Decimal places kept for relative humidity.
pub const HUMIDITY_DECIMALS: u8 = 1;

// ===== CHART DEFAULTS =====
//
// Used when a trend buffer holds no valid data yet. Values are in
// display units; `ParameterKind` exposes them pre-scaled.

/// Default PM chart floor (µg/m³)
pub const PM_DEFAULT_MIN: f32 = 0.0;
/// Default PM chart ceiling (µg/m³)
pub const PM_DEFAULT_MAX: f32 = 35.0;
/// Minimum PM chart axis spread (µg/m³)
pub const PM_MIN_SPREAD: f32 = 5.0;

/// Default CO2 chart floor (ppm)
pub const CO2_DEFAULT_MIN: f32 = 400.0;
/// Default CO2 chart ceiling (ppm)
pub const CO2_DEFAULT_MAX: f32 = 1600.0;
/// Minimum CO2 chart axis spread (ppm)
pub const CO2_MIN_SPREAD: f32 = 100.0;

/// Default VOC index chart floor
pub const VOC_DEFAULT_MIN: f32 = 0.0;
/// Default VOC index chart ceiling
pub const VOC_DEFAULT_MAX: f32 = 350.0;
/// Minimum VOC index chart axis spread
pub const VOC_MIN_SPREAD: f32 = 50.0;

/// Default NOx index chart floor
pub const NOX_DEFAULT_MIN: f32 = 0.0;
/// Default NOx index chart ceiling
pub const NOX_DEFAULT_MAX: f32 = 250.0;
/// Minimum NOx index chart axis spread
pub const NOX_MIN_SPREAD: f32 = 50.0;

/// Default temperature chart floor (°C)
pub const TEMP_DEFAULT_MIN: f32 = 15.0;
/// Default temperature chart ceiling (°C)
pub const TEMP_DEFAULT_MAX: f32 = 30.0;
/// Minimum temperature chart axis spread (°C)
pub const TEMP_MIN_SPREAD: f32 = 5.0;

/// Default humidity chart floor (%)
pub const HUMIDITY_DEFAULT_MIN: f32 = 30.0;
/// Default humidity chart ceiling (%)
pub const HUMIDITY_DEFAULT_MAX: f32 = 70.0;
/// Minimum humidity chart axis spread (%)
pub const HUMIDITY_MIN_SPREAD: f32 = 10.0;

// ===== INDICATOR BANDS =====
//
// Tile color thresholds. Bands follow common indoor air-quality
// guidance (Pettenkofer CO2 limit, WHO PM2.5 annual guideline).

/// Temperature below this is "cold" (blue)
pub const TEMP_BLUE_MAX_C: f32 = 10.0;
/// Temperature above this is red
pub const TEMP_GREEN_MAX_C: f32 = 30.0;

/// Lower edge of the humidity comfort band (green)
pub const HUMIDITY_GREEN_MIN_PCT: f32 = 40.0;
/// Upper edge of the humidity comfort band (green)
pub const HUMIDITY_GREEN_MAX_PCT: f32 = 60.0;
/// Lower edge of the tolerable humidity band (orange)
pub const HUMIDITY_ORANGE_MIN_PCT: f32 = 30.0;
/// Upper edge of the tolerable humidity band (orange)
pub const HUMIDITY_ORANGE_MAX_PCT: f32 = 70.0;

/// CO2 below this is outdoor-like air (blue)
pub const CO2_BLUE_MAX_PPM: f32 = 550.0;
/// Upper edge of the CO2 green band (ppm)
pub const CO2_GREEN_MAX_PPM: f32 = 1000.0;
/// Upper edge of the CO2 orange band (ppm), Pettenkofer limit
pub const CO2_ORANGE_MAX_PPM: f32 = 1600.0;

/// Upper edge of the PM green band (µg/m³), WHO PM2.5 annual guideline
pub const PM_GREEN_MAX_UG_M3: f32 = 5.0;
/// Upper edge of the PM orange band (µg/m³)
pub const PM_ORANGE_MAX_UG_M3: f32 = 35.0;

/// VOC index below this indicates improving air (blue)
pub const VOC_BLUE_MAX: f32 = 85.0;
/// Upper edge of the VOC index green band
pub const VOC_GREEN_MAX: f32 = 150.0;
/// Upper edge of the VOC index orange band
pub const VOC_ORANGE_MAX: f32 = 350.0;

/// Upper edge of the NOx index green band
pub const NOX_GREEN_MAX: f32 = 20.0;
/// Upper edge of the NOx index orange band
pub const NOX_ORANGE_MAX: f32 = 250.0;

// ===== CAPACITIES =====

/// Slots per trend buffer, identical for all three resolution tiers.
///
/// Matches the chart point count: one slot per chart pixel column.
pub const TREND_CAPACITY: usize = 150;

/// Fine samples averaged into one medium slot, and medium slots averaged
/// into one coarse slot.
///
/// At 1 Hz sampling the three tiers span 150 s, 60 min and 24 h.
pub const DOWNSAMPLE_FACTOR: u32 = 24;

/// Maximum concurrently subscribed consumers.
pub const MAX_SUBSCRIBERS: usize = 5;

/// Capacity of each subscriber mailbox and of the hub ingress mailbox.
///
/// Must be a power of two (lock-free ring index masking). One slot is
/// sacrificed to distinguish full from empty, so 15 messages fit.
pub const MAILBOX_CAPACITY: usize = 16;
