use serde::{Deserialize, Serialize};

/// RPC namespace for all calls, and the substring an incoming notification
/// name must contain to be accepted by a client.
pub const SERVICE_NAME: &str = "ahl4a";

/// Verb used by subscribe/unsubscribe.
pub const VERB_EVENT_SUBSCRIPTION: &str = "event_subscription";

/// Every verb the service accepts. Membership is checked before each call;
/// strings outside this list are never put on the wire.
pub const VERBS: &[&str] = &[
    "stream_open",
    "stream_close",
    "get_endpoints",
    "set_stream_state",
    "get_stream_info",
    "volume",
    "get_endpoint_info",
    "property",
    "event_subscription",
];

/// Every notification the service may emit.
pub const EVENTS: &[&str] = &[
    "asyncSetSourceState",
    "newMainConnection",
    "volumeChanged",
    "removedMainConnection",
    "sinkMuteStateChanged",
    "mainConnectionStateChanged",
    "setRoutingReady",
    "setRoutingRundown",
    "asyncConnect",
];

pub fn is_known_verb(verb: &str) -> bool {
    VERBS.contains(&verb)
}

pub fn is_known_event(event: &str) -> bool {
    EVENTS.contains(&event)
}

/// Endpoint side of a stream, mapped to the exact strings the service
/// expects in `endpoint_type` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointType {
    Sink,
    Source,
}

impl EndpointType {
    pub fn as_wire(self) -> &'static str {
        match self {
            EndpointType::Sink => "sink",
            EndpointType::Source => "source",
        }
    }
}

/// Notification kinds that can carry a dedicated per-kind handler.
///
/// Known gap: only `asyncSetSourceState` is classifiable. The service emits
/// eight other events, but they reach clients solely through the generic
/// notification callback and never through the handler table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    AsyncSetSourceState,
}

/// Classify a raw notification name against the dedicated-handler kinds.
///
/// Matches by substring so that namespaced names such as
/// `"ahl4a/asyncSetSourceState"` resolve. Only the first registry entry is
/// consulted; see [`EventKind`].
pub fn classify_event(name: &str) -> Option<EventKind> {
    if name.contains(EVENTS[0]) {
        Some(EventKind::AsyncSetSourceState)
    } else {
        None
    }
}
