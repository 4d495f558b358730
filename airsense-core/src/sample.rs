//! Sample and message types carried through the distribution hub
//!
//! A [`Sample`] is one complete acquisition tick: every parameter the
//! sensor reports, read in a single transaction. Samples are plain
//! `Copy` values; the hub duplicates them into each subscriber mailbox
//! so no ownership is ever shared between tasks.
//!
//! `runtime_ticks` is the sensor's own acquisition counter. It restarts
//! at 1 whenever continuous measurement is (re)started, e.g. after a
//! forced recalibration. Consumers treat `runtime_ticks == 1` as a
//! discontinuity signal and drop all derived history, because trend
//! data from before a mode change is not comparable.

use crate::params::ParameterKind;
use crate::time::Timestamp;

/// Uninterpolated raw signals reported alongside the compensated values
///
/// Only the log formatter consumes these; aggregation works on the
/// compensated fields.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSignals {
    /// Raw relative humidity, scaled by 100: RH [%] = value / 100
    pub humidity: i16,
    /// Raw temperature, scaled by 200: T [°C] = value / 200
    pub temperature: i16,
    /// Raw VOC ticks, no scale factor
    pub voc: u16,
    /// Raw NOx ticks, no scale factor
    pub nox: u16,
    /// Uninterpolated CO2 concentration [ppm]
    pub co2: u16,
}

impl RawSignals {
    /// Raw humidity in percent
    pub fn humidity_pct(&self) -> f32 {
        self.humidity as f32 / 100.0
    }

    /// Raw temperature in °C
    pub fn temperature_c(&self) -> f32 {
        self.temperature as f32 / 200.0
    }
}

/// One acquisition tick of the multi-parameter sensor
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// PM1.0 concentration in µg/m³
    pub pm1_0: f32,
    /// PM2.5 concentration in µg/m³
    pub pm2_5: f32,
    /// PM4.0 concentration in µg/m³
    pub pm4_0: f32,
    /// PM10.0 concentration in µg/m³
    pub pm10_0: f32,
    /// CO2 concentration in ppm
    pub co2: f32,
    /// VOC index
    pub voc_index: f32,
    /// NOx index
    pub nox_index: f32,
    /// Temperature in °C
    pub temperature: f32,
    /// Relative humidity in %
    pub humidity: f32,
    /// Acquisition counter, restarts at 1 on a measurement (re)start
    pub runtime_ticks: u32,
    /// Raw sensor signals
    pub raw: RawSignals,
}

impl Sample {
    /// Read the field belonging to a parameter kind
    ///
    /// Lets consumers fan a sample out over kind-indexed state with one
    /// loop instead of nine field reads.
    pub fn value(&self, kind: ParameterKind) -> f32 {
        match kind {
            ParameterKind::Pm1_0 => self.pm1_0,
            ParameterKind::Pm2_5 => self.pm2_5,
            ParameterKind::Pm4_0 => self.pm4_0,
            ParameterKind::Pm10_0 => self.pm10_0,
            ParameterKind::Co2 => self.co2,
            ParameterKind::VocIndex => self.voc_index,
            ParameterKind::NoxIndex => self.nox_index,
            ParameterKind::Temperature => self.temperature,
            ParameterKind::Humidity => self.humidity,
        }
    }

    /// True when this sample marks a restart of continuous acquisition
    pub fn is_sequence_start(&self) -> bool {
        self.runtime_ticks == 1
    }
}

/// A sample stamped with its hub enqueue time
///
/// Transferred by value into every subscriber mailbox; hub and
/// subscriber copies never alias.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// The sample as read from the sensor
    pub sample: Sample,
    /// Milliseconds at the time `publish` was called
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_accessor_covers_all_kinds() {
        let sample = Sample {
            pm1_0: 1.0,
            pm2_5: 2.5,
            pm4_0: 4.0,
            pm10_0: 10.0,
            co2: 400.0,
            voc_index: 100.0,
            nox_index: 1.0,
            temperature: 21.5,
            humidity: 45.0,
            runtime_ticks: 7,
            raw: RawSignals::default(),
        };

        assert_eq!(sample.value(ParameterKind::Pm2_5), 2.5);
        assert_eq!(sample.value(ParameterKind::Co2), 400.0);
        assert_eq!(sample.value(ParameterKind::Temperature), 21.5);
        assert_eq!(sample.value(ParameterKind::Humidity), 45.0);
    }

    #[test]
    fn raw_signal_scaling() {
        let raw = RawSignals {
            humidity: 4550,
            temperature: 4300,
            ..RawSignals::default()
        };
        assert_eq!(raw.humidity_pct(), 45.5);
        assert_eq!(raw.temperature_c(), 21.5);
    }

    #[test]
    fn sequence_start_detection() {
        let mut sample = Sample::default();
        assert!(!sample.is_sequence_start());
        sample.runtime_ticks = 1;
        assert!(sample.is_sequence_start());
    }
}
