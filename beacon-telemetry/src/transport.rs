//! Delivery of finished envelopes.
//!
//! A [`Transport`] receives fully-assembled envelopes and is responsible
//! for getting them off the process. Delivery is fire-and-forget: a
//! transport must never panic or surface an error to the tracking call,
//! only log what went wrong.

use crate::envelope::Envelope;

/// Sink for finished envelopes.
pub trait Transport: std::fmt::Debug {
    /// Delivers one envelope. Failures are logged, never returned.
    fn send(&self, envelope: &Envelope);
}

/// Transport that POSTs envelopes to the collection endpoint as JSON.
#[derive(Debug)]
pub struct HttpTransport {
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport targeting `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, envelope: &Envelope) {
        let body = match serde_json::to_string(envelope) {
            Ok(body) => body,
            Err(error) => {
                log::warn!("could not encode envelope {}: {error}", envelope.name);
                return;
            }
        };

        let result = ureq::post(&self.endpoint)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .send(body.as_str());

        match result {
            Ok(response) => {
                log::debug!(
                    "delivered envelope {} ({})",
                    envelope.name,
                    response.status()
                );
            }
            Err(error) => {
                log::warn!("could not deliver envelope {}: {error}", envelope.name);
            }
        }
    }
}

/// Transport that prints each envelope to stdout as a single JSON line.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleJsonTransport;

impl Transport for ConsoleJsonTransport {
    fn send(&self, envelope: &Envelope) {
        match serde_json::to_string(envelope) {
            Ok(encoded) => println!("{encoded}"),
            Err(error) => log::warn!("could not encode envelope {}: {error}", envelope.name),
        }
    }
}

/// Transport that collects envelopes for inspection in tests.
#[derive(Debug, Default)]
pub struct TestTransport {
    envelopes: std::sync::Arc<std::sync::Mutex<Vec<Envelope>>>,
}

impl TestTransport {
    /// Creates the transport together with a handle to the envelopes it
    /// will collect.
    pub fn new() -> (Self, std::sync::Arc<std::sync::Mutex<Vec<Envelope>>>) {
        let transport = Self::default();
        let envelopes = std::sync::Arc::clone(&transport.envelopes);
        (transport, envelopes)
    }
}

impl Transport for TestTransport {
    fn send(&self, envelope: &Envelope) {
        self.envelopes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(envelope.clone());
    }
}
