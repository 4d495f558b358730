//! Tab-separated sample reports
//!
//! Formats one sample per line for the serial log, fixed columns in
//! [`LOG_HEADER`] order. Values outside their validity bounds render
//! as `-` so a reader (or a spreadsheet import) sees "unknown" rather
//! than a bogus number. Formatting is allocation-free; the caller owns
//! the I/O.

use core::fmt::Write;

use crate::params::ParameterKind;
use crate::sample::Sample;
use crate::validate::validate_slot;

/// Maximum formatted line length, including the raw-signal columns
pub const LOG_LINE_CAPACITY: usize = 192;

/// Column header matching [`log_line`] output
pub const LOG_HEADER: &str = "ticks\tpm1_0\tpm2_5\tpm4_0\tpm10_0\tco2\tvoc\tnox\ttemp\trh\traw_rh\traw_temp\traw_voc\traw_nox\traw_co2";

/// Render one sample as a tab-separated line, no trailing newline
pub fn log_line(sample: &Sample) -> heapless::String<LOG_LINE_CAPACITY> {
    let mut line = heapless::String::new();

    // Capacity is sized for the worst case; formatting cannot fail.
    let _ = write!(line, "{}", sample.runtime_ticks);
    for kind in ParameterKind::ALL {
        let _ = line.push('\t');
        match validate_slot(kind, sample.value(kind)) {
            Some(scaled) => write_fixed(&mut line, scaled, kind.decimals()),
            None => {
                let _ = line.push('-');
            }
        }
    }

    let raw = &sample.raw;
    let _ = write!(
        line,
        "\t{}\t{}\t{}\t{}\t{}",
        raw.humidity, raw.temperature, raw.voc, raw.nox, raw.co2
    );

    line
}

/// Write a fixed-point value with the given number of decimals
fn write_fixed(line: &mut heapless::String<LOG_LINE_CAPACITY>, scaled: i32, decimals: u8) {
    if decimals == 0 {
        let _ = write!(line, "{scaled}");
        return;
    }
    let scale = 10_i32.pow(u32::from(decimals));
    let whole = scaled / scale;
    let frac = (scaled % scale).unsigned_abs();
    if scaled < 0 && whole == 0 {
        let _ = write!(line, "-0.{frac:0width$}", width = decimals as usize);
    } else {
        let _ = write!(line, "{whole}.{frac:0width$}", width = decimals as usize);
    }
}
