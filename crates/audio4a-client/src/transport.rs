//! Seam to the external RPC-over-websocket transport.
//!
//! The facade never frames, retries, or correlates messages itself: it hands
//! a verb and a JSON payload to [`Connection::call`] and pulls demultiplexed
//! inbound frames back out of [`Connection::next_inbound`]. The embedding
//! application supplies the real transport; tests supply a recording fake.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to establish connection: {0}")]
    Connect(String),

    #[error("failed to submit call: {0}")]
    Submit(String),
}

/// One inbound frame from the service, already split by the transport into
/// the three delivery paths the facade routes.
#[derive(Debug, Clone)]
pub enum Inbound {
    /// Asynchronous reply to an earlier call. No per-verb correlation is
    /// carried; whatever the payload encodes is all a caller gets.
    Reply(Value),
    /// Server-emitted notification, e.g. `"ahl4a/asyncSetSourceState"`.
    Notification { name: String, payload: Value },
    /// The remote closed the connection.
    Hangup,
}

/// Connection factory.
#[async_trait]
pub trait Transport: Send {
    type Connection: Connection;

    async fn connect(&mut self, uri: &str) -> Result<Self::Connection, TransportError>;
}

/// An established session with the service.
#[async_trait]
pub trait Connection: Send {
    /// Submit an asynchronous call. Returning `Ok` means the call was
    /// accepted for transmission; the reply arrives later as
    /// [`Inbound::Reply`].
    async fn call(&mut self, api: &str, verb: &str, args: Value) -> Result<(), TransportError>;

    /// Next inbound frame, or `None` once the underlying stream has ended.
    async fn next_inbound(&mut self) -> Option<Inbound>;
}
