//! Typed argument builders, one per remote operation.
//!
//! Each builder produces the exact JSON shape the service parses and rejects
//! malformed input up front, so a wrapper can fail before touching the
//! transport.

use serde_json::{json, Value};
use thiserror::Error;

use crate::registry::EndpointType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("audio role must not be empty")]
    EmptyAudioRole,
    #[error("endpoint type must not be empty")]
    EmptyEndpointType,
    #[error("stream state must not be empty")]
    EmptyState,
    #[error("application name must not be empty")]
    EmptyAppName,
    #[error("event name must not be empty")]
    EmptyEventName,
}

/// `stream_open` arguments with a typed endpoint. The endpoint id is
/// optional and omitted from the payload when absent.
pub fn stream_open(
    audio_role: &str,
    endpoint_type: EndpointType,
    endpoint_id: Option<i32>,
) -> Result<Value, PayloadError> {
    if audio_role.is_empty() {
        return Err(PayloadError::EmptyAudioRole);
    }
    let mut args = json!({
        "audio_role": audio_role,
        "endpoint_type": endpoint_type.as_wire(),
    });
    if let Some(id) = endpoint_id {
        args["endpoint_id"] = json!(id);
    }
    Ok(args)
}

/// `stream_open` arguments with a caller-supplied endpoint type string.
/// Unlike [`stream_open`], the endpoint id is always present.
pub fn stream_open_raw(
    audio_role: &str,
    endpoint_type: &str,
    endpoint_id: i32,
) -> Result<Value, PayloadError> {
    if audio_role.is_empty() {
        return Err(PayloadError::EmptyAudioRole);
    }
    if endpoint_type.is_empty() {
        return Err(PayloadError::EmptyEndpointType);
    }
    Ok(json!({
        "audio_role": audio_role,
        "endpoint_type": endpoint_type,
        "endpoint_id": endpoint_id,
    }))
}

/// `stream_close` arguments: the bare stream id is the entire payload.
pub fn stream_close(stream_id: i32) -> Value {
    json!(stream_id)
}

/// `set_stream_state` arguments. `stream_id` targets one stream when given,
/// all of the caller's streams otherwise; `mute` is omitted when absent.
pub fn set_stream_state(
    stream_id: Option<i32>,
    state: &str,
    mute: Option<bool>,
) -> Result<Value, PayloadError> {
    if state.is_empty() {
        return Err(PayloadError::EmptyState);
    }
    let mut args = json!({ "state": state });
    if let Some(id) = stream_id {
        args["stream_id"] = json!(id);
    }
    if let Some(mute) = mute {
        args["mute"] = json!(mute);
    }
    Ok(args)
}

/// `registerSource` arguments: the application name registered for policy
/// management.
pub fn register_source(appname: &str) -> Result<Value, PayloadError> {
    if appname.is_empty() {
        return Err(PayloadError::EmptyAppName);
    }
    Ok(json!({ "appname": appname }))
}

/// `event_subscription` arguments: the target event as a one-element array
/// plus an integer subscribe flag (1 subscribes, 0 unsubscribes).
pub fn event_subscription(event: &str, subscribe: bool) -> Result<Value, PayloadError> {
    if event.is_empty() {
        return Err(PayloadError::EmptyEventName);
    }
    Ok(json!({
        "event": [event],
        "subscribe": if subscribe { 1 } else { 0 },
    }))
}
