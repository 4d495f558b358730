//! Raw reading validation and fixed-point conversion
//!
//! The single entry point between the floating-point sensor domain and
//! the integer domain the rest of the crate works in. A raw reading
//! either becomes `round(raw * 10^decimals)` as an `i32`, or it is
//! rejected; rejected readings turn into "no data" slots downstream, so
//! charts keep their temporal alignment without inventing values.
//!
//! Validation is a pure function of the parameter kind and the value.
//! There is no history or rate checking here: the sensor module already
//! smooths its outputs, and a value inside the absolute bounds is as
//! trustworthy as this layer can determine.

use crate::errors::{ValidationError, ValidationOutcome};
use crate::params::ParameterKind;

/// Validate a raw reading and convert it to the fixed-point domain
///
/// Returns `round(raw * 10^decimals)` for a finite value within the
/// kind's absolute bounds. Deterministic and side-effect free.
pub fn validate(kind: ParameterKind, raw: f32) -> ValidationOutcome {
    if !raw.is_finite() {
        return Err(ValidationError::InvalidValue);
    }

    let (min, max) = kind.bounds();
    if raw < min || raw > max {
        return Err(ValidationError::OutOfRange {
            value: raw,
            min,
            max,
        });
    }

    Ok(kind.to_scaled(raw))
}

/// Validate a raw reading, mapping failure to the buffer sentinel
///
/// Convenience for callers inserting into a trend buffer, where the
/// reason for rejection does not matter.
pub fn validate_slot(kind: ParameterKind, raw: f32) -> Option<i32> {
    validate(kind, raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_values_are_scaled_and_rounded() {
        assert_eq!(validate(ParameterKind::Pm2_5, 5.0), Ok(50));
        assert_eq!(validate(ParameterKind::Pm2_5, 5.06), Ok(51));
        assert_eq!(validate(ParameterKind::Co2, 412.6), Ok(413));
        assert_eq!(validate(ParameterKind::Temperature, -10.35), Ok(-104));
        assert_eq!(validate(ParameterKind::Humidity, 45.5), Ok(455));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            validate(ParameterKind::Pm2_5, -1.0),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate(ParameterKind::Pm2_5, 6000.1),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate(ParameterKind::Co2, 10_001.0),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate(ParameterKind::Temperature, -40.5),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(validate(ParameterKind::Temperature, -40.0), Ok(-400));
        assert_eq!(validate(ParameterKind::Temperature, 85.0), Ok(850));
        assert_eq!(validate(ParameterKind::Humidity, 0.0), Ok(0));
        assert_eq!(validate(ParameterKind::Humidity, 100.0), Ok(1000));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert_eq!(
            validate(ParameterKind::Pm2_5, f32::NAN),
            Err(ValidationError::InvalidValue)
        );
        assert_eq!(
            validate(ParameterKind::Co2, f32::INFINITY),
            Err(ValidationError::InvalidValue)
        );
    }

    #[test]
    fn slot_form_maps_errors_to_sentinel() {
        assert_eq!(validate_slot(ParameterKind::Pm2_5, 8.0), Some(80));
        assert_eq!(validate_slot(ParameterKind::Pm2_5, -1.0), None);
        assert_eq!(validate_slot(ParameterKind::Pm2_5, f32::NAN), None);
    }
}
