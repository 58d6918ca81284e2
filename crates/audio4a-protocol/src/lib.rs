//! Wire-level protocol definitions for the ahl4a sound-management service.
//!
//! The service exposes a fixed set of named verbs and emits a fixed set of
//! named events; both registries live here, together with the typed payload
//! builders for each remote operation. The transport that carries these
//! payloads is supplied by the embedding application.

mod payload;
mod registry;

pub use payload::{
    event_subscription, register_source, set_stream_state, stream_close, stream_open,
    stream_open_raw, PayloadError,
};
pub use registry::{
    classify_event, is_known_event, is_known_verb, EndpointType, EventKind, EVENTS, SERVICE_NAME,
    VERBS, VERB_EVENT_SUBSCRIPTION,
};
