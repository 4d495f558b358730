//! Shared fixtures for integration tests
//!
//! Sample builders with realistic indoor air readings, so individual
//! tests only spell out the values they actually assert on.

#![allow(dead_code)]

use airsense_core::{RawSignals, Sample};

/// Plausible indoor baseline reading
pub fn baseline_sample(runtime_ticks: u32) -> Sample {
    Sample {
        pm1_0: 3.1,
        pm2_5: 5.4,
        pm4_0: 6.0,
        pm10_0: 6.8,
        co2: 620.0,
        voc_index: 98.0,
        nox_index: 4.0,
        temperature: 21.6,
        humidity: 44.0,
        runtime_ticks,
        raw: RawSignals {
            humidity: 4400,
            temperature: 4320,
            voc: 98,
            nox: 4,
            co2: 620,
        },
    }
}

/// Baseline with one overridden PM2.5 value
pub fn pm25_sample(runtime_ticks: u32, pm2_5: f32) -> Sample {
    Sample {
        pm2_5,
        ..baseline_sample(runtime_ticks)
    }
}

/// Deterministic series of baseline samples with monotonic ticks
pub fn sample_series(start_tick: u32, count: u32) -> impl Iterator<Item = Sample> {
    (0..count).map(move |i| baseline_sample(start_tick + i))
}
