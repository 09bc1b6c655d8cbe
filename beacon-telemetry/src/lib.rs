//! # `beacon-telemetry`
//!
//! A telemetry client that reports page views, custom events, metrics, trace
//! messages and unhandled exceptions to a remote collection endpoint.
//!
//! Every tracking call assembles a JSON envelope for the fixed
//! `Microsoft.ApplicationInsights.*` wire schema (payload body plus user,
//! session, operation and device context blocks) and hands it to a
//! pluggable [`Transport`](transport::Transport). The anonymous user id and
//! the current session are persisted through an opaque key-value
//! [`Storage`](storage::Storage) layer with a primary/fallback split.
//!
//! Exception telemetry runs the raw stack text through
//! [`beacon_stacktrace::parse`] and embeds the structured frames in the
//! payload; whether parsing succeeded is reported as the payload's
//! `hasFullStack` flag.
//!
//! Tracking operations never return errors: telemetry reporting must not
//! become a source of failures in the application it observes. Anything
//! irregular, such as a non-finite measurement, an unwritable storage
//! backend or a refused HTTP delivery, degrades to a [`log`] warning.
//!
//! ## Basic Usage
//!
//! ```rust
//! use beacon_telemetry::storage::MemoryStorage;
//! use beacon_telemetry::transport::ConsoleJsonTransport;
//! use beacon_telemetry::{Config, TelemetryClient};
//!
//! let client = TelemetryClient::new(
//!     Config::new("00000000-0000-0000-0000-000000000000", "my-app"),
//!     Box::new(MemoryStorage::default()),
//!     Box::new(ConsoleJsonTransport),
//! );
//!
//! client.track_event("checkout-completed", None, None);
//! ```
//!
//! ## Tracking exceptions
//!
//! ```rust
//! use beacon_telemetry::storage::MemoryStorage;
//! use beacon_telemetry::transport::TestTransport;
//! use beacon_telemetry::{CaughtException, Config, ErrorLike, TelemetryClient};
//!
//! let (transport, envelopes) = TestTransport::new();
//! let client = TelemetryClient::new(
//!     Config::new("00000000-0000-0000-0000-000000000000", "my-app"),
//!     Box::new(MemoryStorage::default()),
//!     Box::new(transport),
//! );
//!
//! client.track_exception(&CaughtException {
//!     type_name: Some("TypeError"),
//!     error: ErrorLike {
//!         message: Some("boom"),
//!         stack: Some("TypeError: boom\n    at foo (app.js:10:5)"),
//!         ..ErrorLike::default()
//!     },
//! });
//!
//! assert_eq!(envelopes.lock().unwrap().len(), 1);
//! ```

#![forbid(unsafe_code)]

mod client;
mod config;
mod context;
pub mod envelope;
mod severity;
pub mod storage;
mod time;
pub mod transport;
mod validate;

pub use beacon_stacktrace::{ErrorLike, StackFrame};
pub use client::{CaughtException, PageView, TelemetryClient};
pub use config::{Config, DEFAULT_ENDPOINT};
pub use envelope::{Envelope, Measurements, Properties};
pub use severity::SeverityLevel;
pub use time::{Clock, SystemClock};
