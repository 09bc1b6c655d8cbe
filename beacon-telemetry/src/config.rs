//! Client configuration.

use std::time::Duration;

use crate::envelope::DeviceContext;

/// The default collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://dc.services.visualstudio.com/v2/track";

/// Settings for a [`TelemetryClient`](crate::TelemetryClient).
///
/// Only the instrumentation key and the application name are required;
/// everything else has a sensible default and can be adjusted through the
/// `with_*` setters.
#[derive(Clone, Debug)]
pub struct Config {
    /// The instrumentation key of the receiving resource.
    pub instrumentation_key: String,

    /// Name used for page views tracked without an explicit name.
    pub application_name: String,

    /// Where envelopes are submitted.
    pub endpoint: String,

    /// Inactivity period after which a new session id is generated.
    pub session_inactivity_timeout: Duration,

    /// When set, every dispatched envelope is also logged as pretty JSON.
    pub developer_mode: bool,

    /// Device context reported with every envelope.
    pub device: DeviceContext,
}

impl Config {
    /// Creates a configuration with the default endpoint and a 30-minute
    /// session inactivity timeout.
    pub fn new(instrumentation_key: impl Into<String>, application_name: impl Into<String>) -> Self {
        Self {
            instrumentation_key: instrumentation_key.into(),
            application_name: application_name.into(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            session_inactivity_timeout: Duration::from_secs(30 * 60),
            developer_mode: false,
            device: DeviceContext::default(),
        }
    }

    /// Overrides the collection endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the session inactivity timeout.
    #[must_use]
    pub fn with_session_inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.session_inactivity_timeout = timeout;
        self
    }

    /// Enables or disables developer mode.
    #[must_use]
    pub fn with_developer_mode(mut self, enabled: bool) -> Self {
        self.developer_mode = enabled;
        self
    }

    /// Overrides the reported device context.
    #[must_use]
    pub fn with_device(mut self, device: DeviceContext) -> Self {
        self.device = device;
        self
    }
}
