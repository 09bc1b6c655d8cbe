//! Input validation for tracking calls.
//!
//! The type system already guarantees properties are strings and
//! measurements are numbers; what remains to check is numeric sanity.
//! Invalid entries are dropped with a warning rather than failing the
//! tracking call.

use crate::envelope::Measurements;

/// Drops measurements whose value is not a finite number.
///
/// Returns [`None`] when no measurements were supplied, preserving the
/// distinction between "no measurements" and "all measurements invalid"
/// (an empty map) on the wire.
pub(crate) fn validate_measurements(measurements: Option<Measurements>) -> Option<Measurements> {
    let measurements = measurements?;

    let validated = measurements
        .into_iter()
        .filter(|(name, value)| {
            if value.is_finite() {
                true
            } else {
                log::warn!("the value of measurement {name} is not a number");
                false
            }
        })
        .collect();

    Some(validated)
}

/// Rejects negative or non-finite durations.
pub(crate) fn validate_duration(duration: Option<f64>) -> Option<f64> {
    let duration = duration?;

    if !duration.is_finite() || duration < 0.0 {
        log::warn!("the value of the duration parameter must be a positive number");
        return None;
    }

    Some(duration)
}
