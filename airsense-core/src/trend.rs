//! Multi-resolution trend aggregation
//!
//! ## Overview
//!
//! Each parameter keeps three [`TrendBuffer`]s of equal slot count but
//! different time resolution:
//!
//! - **Fine**: one slot per accepted sample
//! - **Medium**: one slot per block of fine values
//! - **Coarse**: one slot per block of medium values
//!
//! Blocks are averaged with [`DOWNSAMPLE_FACTOR`] values per block, so
//! at a 1 s sample cadence the three tiers cover roughly 2.5 minutes,
//! 1 hour, and 24 hours of history in the same memory footprint.
//!
//! ## Downsampling
//!
//! An accumulator sums valid fixed-point values. When a block closes it
//! emits the rounded average into the next tier and restarts:
//!
//! ```text
//! fine:    v0 v1 v2 ... v23 | v24 ...
//!                     ↓ avg
//! medium:            m0          ...
//! ```
//!
//! Rejected readings become sentinel slots in the fine tier so the
//! window keeps sliding at sample cadence, but they never enter an
//! accumulator: a block is an average of however many samples it took
//! to collect [`DOWNSAMPLE_FACTOR`] valid ones.

use crate::buffer::TrendBuffer;
use crate::constants::{DOWNSAMPLE_FACTOR, TREND_CAPACITY};
use crate::params::ParameterKind;
use crate::range::display_range;
use crate::sample::Sample;
use crate::validate::validate_slot;

/// Resolution tier of a trend history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrendTier {
    /// One slot per sample
    Fine,
    /// One slot per block of fine values
    Medium,
    /// One slot per block of medium values
    Coarse,
}

impl TrendTier {
    /// All tiers, fine to coarse
    pub const ALL: [TrendTier; 3] = [TrendTier::Fine, TrendTier::Medium, TrendTier::Coarse];
}

/// Block accumulator feeding one downsampled tier
#[derive(Debug, Clone, Copy, Default)]
struct BlockAccumulator {
    sum: i64,
    count: u32,
}

impl BlockAccumulator {
    /// Add one value; returns the rounded block average when the block
    /// closes, restarting the accumulator
    fn add(&mut self, value: i32) -> Option<i32> {
        self.sum += i64::from(value);
        self.count += 1;
        if self.count < DOWNSAMPLE_FACTOR - 1 {
            return None;
        }
        let average = rounded_div(self.sum, i64::from(DOWNSAMPLE_FACTOR));
        self.sum = 0;
        self.count = 0;
        Some(average as i32)
    }

    fn reset(&mut self) {
        self.sum = 0;
        self.count = 0;
    }
}

/// Signed integer division rounding half away from zero
fn rounded_div(numerator: i64, denominator: i64) -> i64 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

/// Three-tier trend history for a single parameter
///
/// Owns the fine, medium and coarse buffers plus the two block
/// accumulators between them. Single-owner: mutation goes through
/// `&mut self` from exactly one consumer.
#[derive(Debug, Clone)]
pub struct TrendAggregator {
    kind: ParameterKind,
    fine: TrendBuffer<TREND_CAPACITY>,
    medium: TrendBuffer<TREND_CAPACITY>,
    coarse: TrendBuffer<TREND_CAPACITY>,
    medium_acc: BlockAccumulator,
    coarse_acc: BlockAccumulator,
}

impl TrendAggregator {
    /// Create an empty history for one parameter
    pub const fn new(kind: ParameterKind) -> Self {
        Self {
            kind,
            fine: TrendBuffer::new(),
            medium: TrendBuffer::new(),
            coarse: TrendBuffer::new(),
            medium_acc: BlockAccumulator { sum: 0, count: 0 },
            coarse_acc: BlockAccumulator { sum: 0, count: 0 },
        }
    }

    /// Parameter this history belongs to
    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// Record one raw reading
    ///
    /// A reading outside the parameter's validity bounds consumes a
    /// fine slot as the sentinel and leaves the accumulators untouched.
    pub fn push(&mut self, raw: f32) {
        let slot = validate_slot(self.kind, raw);
        self.fine.push(slot);

        let Some(value) = slot else { return };
        if let Some(medium_avg) = self.medium_acc.add(value) {
            self.medium.push(Some(medium_avg));
            if let Some(coarse_avg) = self.coarse_acc.add(medium_avg) {
                self.coarse.push(Some(coarse_avg));
            }
        }
    }

    /// Buffer of one resolution tier
    pub fn buffer(&self, tier: TrendTier) -> &TrendBuffer<TREND_CAPACITY> {
        match tier {
            TrendTier::Fine => &self.fine,
            TrendTier::Medium => &self.medium,
            TrendTier::Coarse => &self.coarse,
        }
    }

    /// Display range for one tier, fixed-point
    pub fn range(&self, tier: TrendTier) -> (i32, i32) {
        display_range(&[self.buffer(tier)], self.kind)
    }

    /// Clear all tiers and accumulators
    pub fn reset(&mut self) {
        self.fine.clear();
        self.medium.clear();
        self.coarse.clear();
        self.medium_acc.reset();
        self.coarse_acc.reset();
    }
}

/// Trend histories for every parameter, indexed by [`ParameterKind`]
///
/// Owned by one consumer of the distribution hub; [`TrendSet::ingest`]
/// is the single entry point for a received sample.
pub struct TrendSet {
    aggregators: [TrendAggregator; ParameterKind::COUNT],
}

impl TrendSet {
    /// Create empty histories for all parameters
    pub fn new() -> Self {
        Self {
            aggregators: core::array::from_fn(|i| TrendAggregator::new(ParameterKind::ALL[i])),
        }
    }

    /// Record one sample across all parameters
    ///
    /// A sample that starts a new measurement sequence clears every
    /// history first, so stale trends never mix with the new run.
    pub fn ingest(&mut self, sample: &Sample) {
        if sample.is_sequence_start() {
            self.reset();
        }
        for aggregator in &mut self.aggregators {
            aggregator.push(sample.value(aggregator.kind));
        }
    }

    /// History of one parameter
    pub fn aggregator(&self, kind: ParameterKind) -> &TrendAggregator {
        &self.aggregators[kind.index()]
    }

    /// Display range for one parameter and tier
    pub fn range(&self, kind: ParameterKind, tier: TrendTier) -> (i32, i32) {
        self.aggregator(kind).range(tier)
    }

    /// Combined display range across the four PM buffers of one tier
    ///
    /// The PM sizes share a chart, so the axis must cover all of them.
    pub fn pm_range(&self, tier: TrendTier) -> (i32, i32) {
        let buffers: [_; 4] =
            core::array::from_fn(|i| self.aggregator(ParameterKind::PARTICULATES[i]).buffer(tier));
        display_range(&buffers, ParameterKind::Pm2_5)
    }

    /// Clear every history
    pub fn reset(&mut self) {
        for aggregator in &mut self.aggregators {
            aggregator.reset();
        }
    }
}

impl Default for TrendSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fine_tail(agg: &TrendAggregator, n: usize) -> heapless::Vec<Option<i32>, 8> {
        agg.buffer(TrendTier::Fine)
            .iter()
            .skip(TREND_CAPACITY - n)
            .collect()
    }

    #[test]
    fn rounded_div_halves_away_from_zero() {
        assert_eq!(rounded_div(100, 24), 4);
        assert_eq!(rounded_div(108, 24), 5); // 4.5 rounds up
        assert_eq!(rounded_div(-108, 24), -5);
        assert_eq!(rounded_div(-100, 24), -4);
    }

    #[test]
    fn fine_records_every_sample() {
        let mut agg = TrendAggregator::new(ParameterKind::Pm2_5);
        agg.push(5.0);
        agg.push(8.0);
        agg.push(-1.0); // rejected, becomes a gap
        agg.push(12.0);

        assert_eq!(
            fine_tail(&agg, 4)[..],
            [Some(50), Some(80), None, Some(120)]
        );
    }

    #[test]
    fn medium_emits_after_a_block_of_valid_values() {
        let mut agg = TrendAggregator::new(ParameterKind::Co2);
        // One short of a block: nothing emitted yet.
        for _ in 0..(DOWNSAMPLE_FACTOR - 2) {
            agg.push(600.0);
        }
        assert!(agg.buffer(TrendTier::Medium).is_blank());

        agg.push(600.0);
        assert_eq!(agg.buffer(TrendTier::Medium).newest(), Some(575));
    }

    #[test]
    fn rejected_samples_do_not_count_toward_a_block() {
        let mut agg = TrendAggregator::new(ParameterKind::Co2);
        for _ in 0..(DOWNSAMPLE_FACTOR - 2) {
            agg.push(600.0);
        }
        agg.push(-5.0); // rejected
        assert!(agg.buffer(TrendTier::Medium).is_blank());

        agg.push(600.0); // completes the block
        assert!(!agg.buffer(TrendTier::Medium).is_blank());
    }

    #[test]
    fn coarse_emits_after_a_block_of_medium_averages() {
        let mut agg = TrendAggregator::new(ParameterKind::VocIndex);
        let per_coarse = (DOWNSAMPLE_FACTOR - 1) * (DOWNSAMPLE_FACTOR - 1);
        for _ in 0..(per_coarse - 1) {
            agg.push(100.0);
        }
        assert!(agg.buffer(TrendTier::Coarse).is_blank());

        agg.push(100.0);
        let coarse = agg.buffer(TrendTier::Coarse).newest();
        assert!(coarse.is_some());
        // Constant input: every average is sum/M of M-1 equal values.
        let medium = rounded_div(100 * i64::from(DOWNSAMPLE_FACTOR - 1), 24) as i32;
        let expected = rounded_div(
            i64::from(medium) * i64::from(DOWNSAMPLE_FACTOR - 1),
            i64::from(DOWNSAMPLE_FACTOR),
        ) as i32;
        assert_eq!(coarse, Some(expected));
    }

    #[test]
    fn negative_temperature_blocks_average_correctly() {
        let mut agg = TrendAggregator::new(ParameterKind::Temperature);
        for _ in 0..(DOWNSAMPLE_FACTOR - 1) {
            agg.push(-10.0);
        }
        // 23 values of -100 scaled, sum -2300, /24 rounded = -96.
        assert_eq!(agg.buffer(TrendTier::Medium).newest(), Some(-96));
    }

    #[test]
    fn reset_clears_buffers_and_accumulators() {
        let mut agg = TrendAggregator::new(ParameterKind::Humidity);
        for _ in 0..(DOWNSAMPLE_FACTOR - 2) {
            agg.push(50.0);
        }
        agg.reset();
        assert!(agg.buffer(TrendTier::Fine).is_blank());

        // Accumulator restarted: a full block is needed again.
        agg.push(50.0);
        assert!(agg.buffer(TrendTier::Medium).is_blank());
    }

    #[test]
    fn ingest_fans_sample_across_parameters() {
        let mut set = TrendSet::new();
        let sample = Sample {
            pm2_5: 12.5,
            co2: 640.0,
            temperature: 21.4,
            runtime_ticks: 7,
            ..Sample::default()
        };
        set.ingest(&sample);

        assert_eq!(
            set.aggregator(ParameterKind::Pm2_5)
                .buffer(TrendTier::Fine)
                .newest(),
            Some(125)
        );
        assert_eq!(
            set.aggregator(ParameterKind::Co2)
                .buffer(TrendTier::Fine)
                .newest(),
            Some(640)
        );
        assert_eq!(
            set.aggregator(ParameterKind::Temperature)
                .buffer(TrendTier::Fine)
                .newest(),
            Some(214)
        );
    }

    #[test]
    fn sequence_start_resets_before_push() {
        let mut set = TrendSet::new();
        let mut sample = Sample {
            pm2_5: 9.0,
            runtime_ticks: 5,
            ..Sample::default()
        };
        set.ingest(&sample);
        set.ingest(&sample);

        sample.runtime_ticks = 1;
        sample.pm2_5 = 3.0;
        set.ingest(&sample);

        let fine = set.aggregator(ParameterKind::Pm2_5).buffer(TrendTier::Fine);
        // Only the sequence-start sample survives.
        assert_eq!(fine.valid_count(), 1);
        assert_eq!(fine.newest(), Some(30));
    }

    #[test]
    fn pm_range_spans_all_four_sizes() {
        let mut set = TrendSet::new();
        let sample = Sample {
            pm1_0: 2.0,
            pm2_5: 10.0,
            pm4_0: 30.0,
            pm10_0: 90.0,
            runtime_ticks: 2,
            ..Sample::default()
        };
        set.ingest(&sample);

        let (lo, hi) = set.pm_range(TrendTier::Fine);
        assert!(lo <= 20);
        assert!(hi >= 900);
    }
}
