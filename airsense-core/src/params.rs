//! Physical parameter taxonomy
//!
//! Every value the monitor tracks is tagged with a [`ParameterKind`].
//! The kind carries the full numeric policy for that parameter: validity
//! bounds, fixed-point scaling, chart defaults and indicator bands.
//! Consumers dispatch on the kind with a `match` instead of comparing
//! chart or buffer identities, so adding a parameter means adding one
//! enum variant and its policy arms.
//!
//! The four particulate size cuts are distinct variants (they chart as
//! four series) but share a single bound set and chart policy.

use crate::constants::*;

/// Parameter kind enumeration
///
/// Maps each tracked physical quantity to its validation and display
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ParameterKind {
    /// PM1.0 mass concentration
    Pm1_0 = 0,
    /// PM2.5 mass concentration
    Pm2_5 = 1,
    /// PM4.0 mass concentration
    Pm4_0 = 2,
    /// PM10.0 mass concentration
    Pm10_0 = 3,
    /// CO2 concentration
    Co2 = 4,
    /// VOC index
    VocIndex = 5,
    /// NOx index
    NoxIndex = 6,
    /// Ambient temperature
    Temperature = 7,
    /// Relative humidity
    Humidity = 8,
}

/// Tile indicator state derived from a live value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    /// Below the comfort band (cold air, outdoor-like CO2)
    Blue,
    /// Within guideline values
    Green,
    /// Elevated, tolerable for short periods
    Orange,
    /// Above guideline values
    Red,
}

impl ParameterKind {
    /// Number of tracked parameters
    pub const COUNT: usize = 9;

    /// All kinds in field order, for iterating over a full sample
    pub const ALL: [Self; Self::COUNT] = [
        Self::Pm1_0,
        Self::Pm2_5,
        Self::Pm4_0,
        Self::Pm10_0,
        Self::Co2,
        Self::VocIndex,
        Self::NoxIndex,
        Self::Temperature,
        Self::Humidity,
    ];

    /// The four particulate size cuts, in ascending cut order
    pub const PARTICULATES: [Self; 4] = [Self::Pm1_0, Self::Pm2_5, Self::Pm4_0, Self::Pm10_0];

    /// Dense index for kind-keyed arrays
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pm1_0 => "pm1.0",
            Self::Pm2_5 => "pm2.5",
            Self::Pm4_0 => "pm4.0",
            Self::Pm10_0 => "pm10.0",
            Self::Co2 => "co2",
            Self::VocIndex => "voc",
            Self::NoxIndex => "nox",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
        }
    }

    /// Get unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Pm1_0 | Self::Pm2_5 | Self::Pm4_0 | Self::Pm10_0 => "µg/m³",
            Self::Co2 => "ppm",
            Self::VocIndex | Self::NoxIndex => "",
            Self::Temperature => "°C",
            Self::Humidity => "%",
        }
    }

    /// True for the particulate size cuts sharing the PM chart
    pub const fn is_particulate(self) -> bool {
        matches!(
            self,
            Self::Pm1_0 | Self::Pm2_5 | Self::Pm4_0 | Self::Pm10_0
        )
    }

    /// Absolute validity bounds in sensor units
    pub const fn bounds(self) -> (f32, f32) {
        match self {
            Self::Pm1_0 | Self::Pm2_5 | Self::Pm4_0 | Self::Pm10_0 => (PM_MIN_UG_M3, PM_MAX_UG_M3),
            Self::Co2 => (CO2_MIN_PPM, CO2_MAX_PPM),
            Self::VocIndex => (VOC_INDEX_MIN, VOC_INDEX_MAX),
            Self::NoxIndex => (NOX_INDEX_MIN, NOX_INDEX_MAX),
            Self::Temperature => (TEMP_MIN_C, TEMP_MAX_C),
            Self::Humidity => (HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT),
        }
    }

    /// Decimal places preserved in the fixed-point representation
    pub const fn decimals(self) -> u8 {
        match self {
            Self::Pm1_0 | Self::Pm2_5 | Self::Pm4_0 | Self::Pm10_0 => PM_DECIMALS,
            Self::Co2 => CO2_DECIMALS,
            Self::VocIndex => VOC_DECIMALS,
            Self::NoxIndex => NOX_DECIMALS,
            Self::Temperature => TEMP_DECIMALS,
            Self::Humidity => HUMIDITY_DECIMALS,
        }
    }

    /// Fixed-point scale factor, `10^decimals`
    pub const fn scale(self) -> i32 {
        match self.decimals() {
            0 => 1,
            1 => 10,
            _ => 100,
        }
    }

    /// Convert a display-unit value into the fixed-point domain
    pub fn to_scaled(self, value: f32) -> i32 {
        libm::roundf(value * self.scale() as f32) as i32
    }

    /// Convert a fixed-point value back into display units
    pub fn to_display(self, scaled: i32) -> f32 {
        scaled as f32 / self.scale() as f32
    }

    /// Fallback chart range in the fixed-point domain
    ///
    /// Used whenever a trend buffer holds no valid slot.
    pub fn default_range(self) -> (i32, i32) {
        let (lo, hi) = match self {
            Self::Pm1_0 | Self::Pm2_5 | Self::Pm4_0 | Self::Pm10_0 => {
                (PM_DEFAULT_MIN, PM_DEFAULT_MAX)
            }
            Self::Co2 => (CO2_DEFAULT_MIN, CO2_DEFAULT_MAX),
            Self::VocIndex => (VOC_DEFAULT_MIN, VOC_DEFAULT_MAX),
            Self::NoxIndex => (NOX_DEFAULT_MIN, NOX_DEFAULT_MAX),
            Self::Temperature => (TEMP_DEFAULT_MIN, TEMP_DEFAULT_MAX),
            Self::Humidity => (HUMIDITY_DEFAULT_MIN, HUMIDITY_DEFAULT_MAX),
        };
        (self.to_scaled(lo), self.to_scaled(hi))
    }

    /// Minimum chart axis spread in the fixed-point domain
    pub fn min_spread(self) -> i32 {
        let spread = match self {
            Self::Pm1_0 | Self::Pm2_5 | Self::Pm4_0 | Self::Pm10_0 => PM_MIN_SPREAD,
            Self::Co2 => CO2_MIN_SPREAD,
            Self::VocIndex => VOC_MIN_SPREAD,
            Self::NoxIndex => NOX_MIN_SPREAD,
            Self::Temperature => TEMP_MIN_SPREAD,
            Self::Humidity => HUMIDITY_MIN_SPREAD,
        };
        self.to_scaled(spread)
    }

    /// Whether the chart axis may extend below zero
    ///
    /// Temperature is the only parameter with a meaningful negative
    /// axis; every other chart floor is clamped at zero.
    pub const fn allows_negative_axis(self) -> bool {
        matches!(self, Self::Temperature)
    }

    /// Classify a live value into a tile indicator color
    ///
    /// The classification assumes a value that already passed validity
    /// bounds; out-of-range values should render as "unknown" instead.
    pub fn indicator(self, value: f32) -> IndicatorState {
        match self {
            Self::Pm1_0 | Self::Pm2_5 | Self::Pm4_0 | Self::Pm10_0 => {
                if value < PM_GREEN_MAX_UG_M3 {
                    IndicatorState::Green
                } else if value < PM_ORANGE_MAX_UG_M3 {
                    IndicatorState::Orange
                } else {
                    IndicatorState::Red
                }
            }
            Self::Co2 => {
                if value < CO2_BLUE_MAX_PPM {
                    IndicatorState::Blue
                } else if value < CO2_GREEN_MAX_PPM {
                    IndicatorState::Green
                } else if value < CO2_ORANGE_MAX_PPM {
                    IndicatorState::Orange
                } else {
                    IndicatorState::Red
                }
            }
            Self::VocIndex => {
                if value < VOC_BLUE_MAX {
                    IndicatorState::Blue
                } else if value < VOC_GREEN_MAX {
                    IndicatorState::Green
                } else if value < VOC_ORANGE_MAX {
                    IndicatorState::Orange
                } else {
                    IndicatorState::Red
                }
            }
            Self::NoxIndex => {
                if value <= NOX_GREEN_MAX {
                    IndicatorState::Green
                } else if value <= NOX_ORANGE_MAX {
                    IndicatorState::Orange
                } else {
                    IndicatorState::Red
                }
            }
            Self::Temperature => {
                if value < TEMP_BLUE_MAX_C {
                    IndicatorState::Blue
                } else if value <= TEMP_GREEN_MAX_C {
                    IndicatorState::Green
                } else {
                    IndicatorState::Red
                }
            }
            Self::Humidity => {
                if (HUMIDITY_GREEN_MIN_PCT..=HUMIDITY_GREEN_MAX_PCT).contains(&value) {
                    IndicatorState::Green
                } else if (HUMIDITY_ORANGE_MIN_PCT..=HUMIDITY_ORANGE_MAX_PCT).contains(&value) {
                    IndicatorState::Orange
                } else {
                    IndicatorState::Red
                }
            }
        }
    }
}
