use serde::{Serialize, Serializer};

/// Trace-message severity on the wire scale.
///
/// The collection endpoint expects the numeric contract values
/// `Verbose = 0` through `Critical = 4`; [`SeverityLevel`] serializes as
/// that number, not as a string.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SeverityLevel {
    /// Very detailed diagnostic output.
    #[default]
    Verbose,

    /// Useful information.
    Information,

    /// Hazardous situations.
    Warning,

    /// Serious errors.
    Error,

    /// Critical failures.
    Critical,
}

impl SeverityLevel {
    /// The numeric contract value sent on the wire.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Verbose => 0,
            Self::Information => 1,
            Self::Warning => 2,
            Self::Error => 3,
            Self::Critical => 4,
        }
    }

    /// Maps a [`log`] level onto the wire scale.
    ///
    /// `trace` and `debug` both map to [`SeverityLevel::Verbose`]; there is
    /// no log level corresponding to [`SeverityLevel::Critical`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use beacon_telemetry::SeverityLevel;
    ///
    /// assert_eq!(
    ///     SeverityLevel::from_log_level(log::Level::Warn),
    ///     SeverityLevel::Warning,
    /// );
    /// ```
    pub fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Self::Verbose,
            log::Level::Info => Self::Information,
            log::Level::Warn => Self::Warning,
            log::Level::Error => Self::Error,
        }
    }
}

impl Serialize for SeverityLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}
