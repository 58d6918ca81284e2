use audio4a_protocol::PayloadError;
use thiserror::Error;

use crate::transport::TransportError;

/// Everything a facade operation can fail with. Each failure is terminal
/// for that one operation; there is no retry and no transient/permanent
/// distinction.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no active connection")]
    NotConnected,

    #[error("unknown verb: {0}")]
    UnknownVerb(String),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
