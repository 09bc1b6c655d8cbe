//! Time access behind a trait so tests can pin the clock.

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current time.
pub trait Clock: std::fmt::Debug {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Formats an instant the way the envelope schema expects: ISO-8601 in UTC
/// with millisecond precision and a `Z` suffix.
pub(crate) fn to_wire_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn wire_timestamps_carry_millisecond_precision() {
        let instant = Utc
            .with_ymd_and_hms(2024, 3, 7, 14, 30, 5)
            .single()
            .expect("valid timestamp")
            + chrono::Duration::milliseconds(123);

        assert_eq!(to_wire_timestamp(instant), "2024-03-07T14:30:05.123Z");
    }

    #[test]
    fn whole_seconds_still_print_milliseconds() {
        let instant = Utc
            .with_ymd_and_hms(2024, 3, 7, 14, 30, 5)
            .single()
            .expect("valid timestamp");

        assert_eq!(to_wire_timestamp(instant), "2024-03-07T14:30:05.000Z");
    }
}
