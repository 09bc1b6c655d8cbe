//! Wire-schema types for telemetry envelopes.
//!
//! The collection endpoint accepts a fixed JSON schema: an outer envelope
//! with timing, instrumentation key and context blocks, and a
//! `data: { type, item }` payload whose `name`/`type` pair identifies the
//! telemetry kind within the `Microsoft.ApplicationInsights.` namespace.
//! Field names on the wire are camelCase; absent optional fields are
//! omitted, not serialized as null.

use std::collections::BTreeMap;

use beacon_stacktrace::StackFrame;
use serde::Serialize;

use crate::severity::SeverityLevel;

/// String-valued custom properties attached to a payload.
pub type Properties = BTreeMap<String, String>;

/// Numeric custom measurements attached to a payload.
pub type Measurements = BTreeMap<String, f64>;

/// Namespace prefixing every envelope name and payload type on the wire.
pub(crate) const NAMESPACE: &str = "Microsoft.ApplicationInsights.";

/// One complete telemetry submission.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Fully-qualified envelope name, e.g. `Microsoft.ApplicationInsights.Event`.
    pub name: String,

    /// ISO-8601 timestamp with millisecond precision.
    pub time: String,

    /// Envelope schema version, always 1.
    pub ver: u32,

    /// The instrumentation key identifying the receiving resource.
    pub i_key: String,

    /// The anonymous user this submission belongs to.
    pub user: UserContext,

    /// The activity session this submission belongs to.
    pub session: SessionContext,

    /// The single tracked operation; a fresh id per envelope.
    pub operation: OperationContext,

    /// Information about the reporting device.
    pub device: DeviceContext,

    /// SDK-internal metadata.
    pub internal: InternalContext,

    /// The typed payload.
    pub data: Data,
}

/// User context block.
#[derive(Clone, Debug, Serialize)]
pub struct UserContext {
    /// Persistent anonymous user id.
    pub id: String,
}

/// Session context block.
#[derive(Clone, Debug, Serialize)]
pub struct SessionContext {
    /// Current session id; rotates after the inactivity timeout.
    pub id: String,
}

/// Operation context block.
#[derive(Clone, Debug, Serialize)]
pub struct OperationContext {
    /// Unique id for this submission.
    pub id: String,
}

/// Device context block.
#[derive(Clone, Debug, Serialize)]
pub struct DeviceContext {
    /// Device identifier; the schema's fixed client identifier by default.
    pub id: String,

    /// BCP-47 locale of the reporting environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Screen resolution, `WIDTHxHEIGHT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self {
            id: "browser".to_owned(),
            locale: None,
            resolution: None,
        }
    }
}

/// SDK-internal context block.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalContext {
    /// Version of the SDK that produced the envelope, `rust:<version>`.
    pub sdk_version: String,
}

/// The payload carrier: the fully-qualified payload type plus the item
/// itself.
#[derive(Clone, Debug, Serialize)]
pub struct Data {
    /// Fully-qualified payload type, e.g.
    /// `Microsoft.ApplicationInsights.EventData`.
    #[serde(rename = "type")]
    pub base_type: String,

    /// The payload body.
    pub item: TelemetryData,
}

/// The payload kinds the client can submit.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum TelemetryData {
    /// A custom event.
    Event(EventData),

    /// A page view.
    PageView(PageViewData),

    /// A trace (log) message.
    Message(MessageData),

    /// One or more metric samples.
    Metric(MetricData),

    /// An exception report.
    Exception(ExceptionData),
}

impl TelemetryData {
    /// The fixed envelope name for this payload kind.
    pub fn envelope_name(&self) -> String {
        let suffix = match self {
            Self::Event(_) => "Event",
            Self::PageView(_) => "Pageview",
            Self::Message(_) => "Message",
            Self::Metric(_) => "Metric",
            Self::Exception(_) => "Exception",
        };
        format!("{NAMESPACE}{suffix}")
    }

    /// The fixed `data.type` value for this payload kind.
    pub fn base_type(&self) -> String {
        let suffix = match self {
            Self::Event(_) => "EventData",
            Self::PageView(_) => "PageViewData",
            Self::Message(_) => "MessageData",
            Self::Metric(_) => "MetricData",
            Self::Exception(_) => "ExceptionData",
        };
        format!("{NAMESPACE}{suffix}")
    }
}

/// Payload for a custom event.
#[derive(Clone, Debug, Serialize)]
pub struct EventData {
    /// Payload schema version, always 1.
    pub ver: u32,

    /// Event name.
    pub name: String,

    /// Custom properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,

    /// Custom measurements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Measurements>,
}

/// Payload for a page view.
#[derive(Clone, Debug, Serialize)]
pub struct PageViewData {
    /// Payload schema version, always 1.
    pub ver: u32,

    /// Address of the viewed page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Display name of the viewed page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Custom properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,

    /// Custom measurements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Measurements>,

    /// View duration in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Payload for a trace message.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    /// Payload schema version, always 1.
    pub ver: u32,

    /// The message body.
    pub message: String,

    /// Severity on the wire scale (0 = Verbose … 4 = Critical).
    pub severity_level: SeverityLevel,

    /// Custom properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

/// Payload for metric samples.
#[derive(Clone, Debug, Serialize)]
pub struct MetricData {
    /// Payload schema version, always 1.
    pub ver: u32,

    /// The recorded samples.
    pub metrics: Vec<DataPoint>,

    /// Custom properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

/// A single metric sample.
#[derive(Clone, Debug, Serialize)]
pub struct DataPoint {
    /// Metric name.
    pub name: String,

    /// Sampled value.
    pub value: f64,
}

/// Payload for an exception report.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionData {
    /// Payload schema version, always 1.
    pub ver: u32,

    /// How the exception reached the tracker; this client reports
    /// `"Unhandled"`.
    pub handled_at: String,

    /// The reported exceptions; this client always sends exactly one.
    pub exceptions: Vec<ExceptionDetails>,
}

/// Details of one reported exception.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    /// The exception's type name, e.g. `TypeError`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// The exception message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The raw stack text, exactly as the engine produced it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,

    /// Structured frames extracted from the stack text, when the format was
    /// recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_stack: Option<Vec<StackFrame>>,

    /// Whether structured frames could be extracted at all.
    pub has_full_stack: bool,
}
