//! The telemetry client and its tracking operations.

use beacon_stacktrace::ErrorLike;
use uuid::Uuid;

use crate::config::Config;
use crate::context;
use crate::envelope::{
    Data, DataPoint, Envelope, EventData, ExceptionData, ExceptionDetails, InternalContext,
    Measurements, MessageData, MetricData, OperationContext, PageViewData, Properties,
    SessionContext, TelemetryData, UserContext,
};
use crate::severity::SeverityLevel;
use crate::storage::Storage;
use crate::time::{Clock, SystemClock, to_wire_timestamp};
use crate::transport::Transport;
use crate::validate::{validate_duration, validate_measurements};

/// SDK version reported in every envelope's internal context.
const SDK_VERSION: &str = concat!("rust:", env!("CARGO_PKG_VERSION"));

/// Parameters for [`TelemetryClient::track_page_view`].
///
/// Everything is optional; a page view with no name is reported under the
/// configured application name.
#[derive(Clone, Debug, Default)]
pub struct PageView {
    /// Display name of the page.
    pub name: Option<String>,

    /// Address of the page.
    pub url: Option<String>,

    /// Custom properties.
    pub properties: Option<Properties>,

    /// Custom measurements.
    pub measurements: Option<Measurements>,

    /// View duration in milliseconds.
    pub duration: Option<f64>,
}

/// An exception handed to [`TelemetryClient::track_exception`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CaughtException<'a> {
    /// The exception's type name, e.g. `TypeError`.
    pub type_name: Option<&'a str>,

    /// The error object's fields, as far as they were present.
    pub error: ErrorLike<'a>,
}

/// Assembles telemetry envelopes and hands them to a [`Transport`].
///
/// Tracking calls never fail; invalid inputs are dropped or corrected with
/// a [`log`] warning. The client is cheap to construct and holds no
/// network state of its own.
#[derive(Debug)]
pub struct TelemetryClient {
    config: Config,
    storage: Box<dyn Storage>,
    transport: Box<dyn Transport>,
    clock: Box<dyn Clock>,
    common_properties: Properties,
}

impl TelemetryClient {
    /// Creates a client using the system clock.
    pub fn new(config: Config, storage: Box<dyn Storage>, transport: Box<dyn Transport>) -> Self {
        Self::with_clock(config, storage, transport, Box::new(SystemClock))
    }

    /// Creates a client with an explicit [`Clock`], for tests that need
    /// deterministic timestamps and session rotation.
    pub fn with_clock(
        config: Config,
        storage: Box<dyn Storage>,
        transport: Box<dyn Transport>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            config,
            storage,
            transport,
            clock,
            common_properties: Properties::new(),
        }
    }

    /// Sets properties attached to every subsequent envelope.
    ///
    /// Common properties take precedence over per-call properties with the
    /// same key.
    pub fn set_common_properties(&mut self, properties: Properties) {
        self.common_properties = properties;
    }

    /// Reports a page view.
    ///
    /// A page view without a name is reported under the configured
    /// application name. Negative or non-finite durations are dropped.
    pub fn track_page_view(&self, page_view: PageView) {
        let name = page_view
            .name
            .unwrap_or_else(|| self.config.application_name.clone());

        self.dispatch(TelemetryData::PageView(PageViewData {
            ver: 1,
            url: page_view.url,
            name: Some(name),
            properties: self.merged_properties(page_view.properties),
            measurements: validate_measurements(page_view.measurements),
            duration: validate_duration(page_view.duration),
        }));
    }

    /// Reports a custom event.
    pub fn track_event(
        &self,
        name: &str,
        properties: Option<Properties>,
        measurements: Option<Measurements>,
    ) {
        self.dispatch(TelemetryData::Event(EventData {
            ver: 1,
            name: name.to_owned(),
            properties: self.merged_properties(properties),
            measurements: validate_measurements(measurements),
        }));
    }

    /// Reports a trace message at the given severity.
    ///
    /// Empty messages are rejected: a trace with nothing to say carries no
    /// information worth an envelope.
    pub fn track_trace(
        &self,
        message: &str,
        severity: SeverityLevel,
        properties: Option<Properties>,
    ) {
        if message.is_empty() {
            log::warn!("dropping a trace with an empty message");
            return;
        }

        self.dispatch(TelemetryData::Message(MessageData {
            ver: 1,
            message: message.to_owned(),
            severity_level: severity,
            properties: self.merged_properties(properties),
        }));
    }

    /// Reports a single metric sample.
    pub fn track_metric(&self, name: &str, value: f64, properties: Option<Properties>) {
        self.dispatch(TelemetryData::Metric(MetricData {
            ver: 1,
            metrics: vec![DataPoint {
                name: name.to_owned(),
                value,
            }],
            properties: self.merged_properties(properties),
        }));
    }

    /// Reports an exception.
    ///
    /// The raw stack text is forwarded verbatim; when its format is
    /// recognized, the structured frames are embedded alongside it and the
    /// payload's `hasFullStack` flag is set.
    pub fn track_exception(&self, exception: &CaughtException<'_>) {
        let parsed_stack = beacon_stacktrace::parse(&exception.error);

        self.dispatch(TelemetryData::Exception(ExceptionData {
            ver: 1,
            handled_at: "Unhandled".to_owned(),
            exceptions: vec![ExceptionDetails {
                type_name: exception.type_name.map(str::to_owned),
                message: exception.error.message.map(str::to_owned),
                stack: exception.error.stack.map(str::to_owned),
                has_full_stack: parsed_stack.is_some(),
                parsed_stack,
            }],
        }));
    }

    /// Merges per-call properties with the common properties, the common
    /// ones winning on key collisions. Returns [`None`] when there is
    /// nothing to attach.
    fn merged_properties(&self, properties: Option<Properties>) -> Option<Properties> {
        if self.common_properties.is_empty() {
            return properties;
        }

        let mut merged = properties.unwrap_or_default();
        merged.extend(
            self.common_properties
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Some(merged)
    }

    /// Wraps a payload in an envelope and hands it to the transport.
    fn dispatch(&self, item: TelemetryData) {
        let envelope = Envelope {
            name: item.envelope_name(),
            time: to_wire_timestamp(self.clock.now()),
            ver: 1,
            i_key: self.config.instrumentation_key.clone(),
            user: UserContext {
                id: context::unique_user_id(self.storage.as_ref()),
            },
            session: SessionContext {
                id: context::session_id(
                    self.storage.as_ref(),
                    self.clock.as_ref(),
                    self.config.session_inactivity_timeout,
                ),
            },
            operation: OperationContext {
                id: Uuid::new_v4().to_string(),
            },
            device: self.config.device.clone(),
            internal: InternalContext {
                sdk_version: SDK_VERSION.to_owned(),
            },
            data: Data {
                base_type: item.base_type(),
                item,
            },
        };

        if self.config.developer_mode {
            match serde_json::to_string_pretty(&envelope) {
                Ok(encoded) => log::debug!("dispatching envelope:\n{encoded}"),
                Err(error) => log::warn!("could not encode envelope for logging: {error}"),
            }
        }

        self.transport.send(&envelope);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::MemoryStorage;
    use crate::transport::TestTransport;

    fn client_with_transport() -> (
        TelemetryClient,
        std::sync::Arc<std::sync::Mutex<Vec<Envelope>>>,
    ) {
        let (transport, envelopes) = TestTransport::new();
        let client = TelemetryClient::new(
            Config::new("test-key", "test-app"),
            Box::new(MemoryStorage::default()),
            Box::new(transport),
        );
        (client, envelopes)
    }

    #[test]
    fn common_properties_win_on_collisions() {
        let (mut client, _envelopes) = client_with_transport();
        client.set_common_properties(
            [("env".to_owned(), "prod".to_owned())].into_iter().collect(),
        );

        let merged = client
            .merged_properties(Some(
                [
                    ("env".to_owned(), "dev".to_owned()),
                    ("page".to_owned(), "home".to_owned()),
                ]
                .into_iter()
                .collect(),
            ))
            .expect("properties present");

        assert_eq!(merged.get("env"), Some(&"prod".to_owned()));
        assert_eq!(merged.get("page"), Some(&"home".to_owned()));
    }

    #[test]
    fn no_properties_stays_absent() {
        let (client, _envelopes) = client_with_transport();

        assert_eq!(client.merged_properties(None), None);
    }

    #[test]
    fn empty_trace_messages_are_dropped() {
        let (client, envelopes) = client_with_transport();

        client.track_trace("", SeverityLevel::Warning, None);

        assert_eq!(envelopes.lock().expect("unpoisoned").len(), 0);
    }

    #[test]
    fn unnamed_page_views_use_the_application_name() {
        let (client, envelopes) = client_with_transport();

        client.track_page_view(PageView::default());

        let envelopes = envelopes.lock().expect("unpoisoned");
        let TelemetryData::PageView(payload) = &envelopes[0].data.item else {
            panic!("expected a page view payload");
        };
        assert_eq!(payload.name.as_deref(), Some("test-app"));
    }
}
