//! Client facade for the ahl4a sound-management service.
//!
//! The facade owns one outbound connection to the service, exposes each
//! remote verb as a typed call, and routes inbound notifications and replies
//! to caller-registered callbacks. The websocket/RPC transport itself is an
//! external collaborator plugged in through the [`Transport`] trait; this
//! crate performs no I/O of its own.
//!
//! Usage pattern:
//! - `SoundManager::new(transport)` then `init(port, token)` — one
//!   connection is opened and the baseline `asyncSetSourceState`
//!   subscription is submitted.
//! - register callbacks, then drive `dispatch_next()` from the application's
//!   event loop to deliver replies and notifications.

mod client;
mod config;
mod error;
mod transport;

pub use client::{
    EventHandler, HangupCallback, NotificationCallback, ReplyCallback, SoundManager,
};
pub use config::Config;
pub use error::ClientError;
pub use transport::{Connection, Inbound, Transport, TransportError};

pub use audio4a_protocol::{EndpointType, EventKind};
