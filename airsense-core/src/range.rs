//! Adaptive display range calculation
//!
//! Chart axes follow the data: the range is rescanned from the visible
//! buffers on every update rather than cached, so it tightens again as
//! outliers scroll out of the window. Three rules shape the result:
//!
//! 1. **No data**: fall back to the parameter's default range.
//! 2. **Flat data**: widen to the parameter's minimum spread, centered
//!    on the data midpoint, so a flat line never fills the chart height
//!    and noise is not magnified into fake trends.
//! 3. **Axis floor**: after centering, a range dipping below zero is
//!    shifted up to start at zero for parameters that cannot be
//!    negative. Temperature keeps its negative bounds.
//!
//! All values are fixed-point integers in the parameter's scale.

use crate::buffer::TrendBuffer;
use crate::params::ParameterKind;

/// Display range covering the valid slots of the given buffers
///
/// Several buffers may share one axis (the four PM sizes on a combined
/// chart); the range covers them all. `kind` supplies the default
/// range, minimum spread and axis-floor policy, so co-displayed buffers
/// must hold parameters with a shared policy.
pub fn display_range<const N: usize>(
    buffers: &[&TrendBuffer<N>],
    kind: ParameterKind,
) -> (i32, i32) {
    let mut bounds: Option<(i32, i32)> = None;
    for buffer in buffers {
        if let Some((lo, hi)) = buffer.min_max() {
            bounds = Some(match bounds {
                Some((acc_lo, acc_hi)) => (acc_lo.min(lo), acc_hi.max(hi)),
                None => (lo, hi),
            });
        }
    }

    let Some((data_min, data_max)) = bounds else {
        return kind.default_range();
    };

    let spread = kind.min_spread();
    if data_max - data_min >= spread {
        return (data_min, data_max);
    }

    // Flat data: center a minimum-spread window on the midpoint.
    let center = data_min + (data_max - data_min) / 2;
    let mut min = center - spread / 2;
    let mut max = min + spread;

    if min < 0 && !kind.allows_negative_axis() {
        min = 0;
        max = spread;
    }

    (min, max)
}

/// Display range of a single buffer
pub fn buffer_range<const N: usize>(buffer: &TrendBuffer<N>, kind: ParameterKind) -> (i32, i32) {
    display_range(&[buffer], kind)
}
