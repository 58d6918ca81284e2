//! The sound-manager facade.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use audio4a_protocol::{self as protocol, EndpointType, EventKind, EVENTS, SERVICE_NAME};

use crate::config::Config;
use crate::error::ClientError;
use crate::transport::{Connection, Inbound, Transport};

/// Generic notification callback: raw event name plus JSON contents.
pub type NotificationCallback = Box<dyn FnMut(&str, &Value) + Send>;
/// Reply callback: every asynchronous reply lands here with its raw JSON
/// payload, regardless of which verb it answers.
pub type ReplyCallback = Box<dyn FnMut(&Value) + Send>;
/// Invoked when the remote closes the connection.
pub type HangupCallback = Box<dyn FnMut() + Send>;
/// Dedicated handler for one classified event kind.
pub type EventHandler = Box<dyn FnMut(&Value) + Send>;

/// Client facade for the ahl4a service.
///
/// Owns at most one connection. Every callback slot holds at most one
/// closure; registering again silently replaces the previous one. All
/// mutation happens through `&mut self`, so the facade is single-task by
/// construction and the driving event loop serializes calls and dispatch.
pub struct SoundManager<T: Transport> {
    transport: T,
    conn: Option<T::Connection>,
    on_notification: Option<NotificationCallback>,
    on_reply: Option<ReplyCallback>,
    on_hangup: Option<HangupCallback>,
    handlers: HashMap<EventKind, EventHandler>,
}

impl<T: Transport> SoundManager<T> {
    /// A facade with no connection. Every remote operation fails with
    /// [`ClientError::NotConnected`] until [`init`](Self::init) succeeds.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            conn: None,
            on_notification: None,
            on_reply: None,
            on_hangup: None,
            handlers: HashMap::new(),
        }
    }

    /// Open the connection and submit the baseline `asyncSetSourceState`
    /// subscription the service requires for sound-right grants.
    ///
    /// On any failure the facade is left exactly as unconnected as before;
    /// no partially-initialized state is observable.
    pub async fn init(&mut self, port: u16, token: &str) -> Result<(), ClientError> {
        let config = Config::new(port, token)?;
        let conn = self.transport.connect(&config.endpoint_uri()).await?;
        self.conn = Some(conn);

        if let Err(err) = self.subscribe(EVENTS[0]).await {
            warn!(error = %err, "baseline subscription failed, dropping connection");
            self.conn = None;
            return Err(err);
        }
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Submit a call to a registry verb.
    ///
    /// `Ok` means the call was accepted for transmission; the reply arrives
    /// later through the reply callback. Verbs outside the fixed registry
    /// are rejected without touching the transport.
    pub async fn invoke(&mut self, verb: &str, args: Value) -> Result<(), ClientError> {
        let conn = self.conn.as_mut().ok_or(ClientError::NotConnected)?;
        if !protocol::is_known_verb(verb) {
            warn!(verb, "rejecting call to unknown verb");
            return Err(ClientError::UnknownVerb(verb.to_string()));
        }
        conn.call(SERVICE_NAME, verb, args).await?;
        Ok(())
    }

    /// Open a stream for an audio role on a typed endpoint. The endpoint id
    /// may be omitted to let the service pick.
    pub async fn stream_open(
        &mut self,
        audio_role: &str,
        endpoint_type: EndpointType,
        endpoint_id: Option<i32>,
    ) -> Result<(), ClientError> {
        self.ensure_connected()?;
        let args = protocol::stream_open(audio_role, endpoint_type, endpoint_id)?;
        self.invoke("stream_open", args).await
    }

    /// Open a stream with a caller-supplied endpoint type string and a
    /// mandatory endpoint id.
    pub async fn stream_open_raw(
        &mut self,
        audio_role: &str,
        endpoint_type: &str,
        endpoint_id: i32,
    ) -> Result<(), ClientError> {
        self.ensure_connected()?;
        let args = protocol::stream_open_raw(audio_role, endpoint_type, endpoint_id)?;
        self.invoke("stream_open", args).await
    }

    pub async fn stream_close(&mut self, stream_id: i32) -> Result<(), ClientError> {
        self.ensure_connected()?;
        let args = protocol::stream_close(stream_id);
        self.invoke("stream_close", args).await
    }

    /// Change stream state, typically in answer to an `asyncSetSourceState`
    /// notification. Without a stream id the change applies to all of this
    /// client's streams.
    pub async fn set_stream_state(
        &mut self,
        stream_id: Option<i32>,
        state: &str,
        mute: Option<bool>,
    ) -> Result<(), ClientError> {
        self.ensure_connected()?;
        let args = protocol::set_stream_state(stream_id, state, mute)?;
        self.invoke("set_stream_state", args).await
    }

    /// Register this application as a source for policy management.
    ///
    /// Known gap: `registerSource` is not in the verb registry, so the call
    /// never reaches the wire and always fails with
    /// [`ClientError::UnknownVerb`].
    pub async fn register_source(&mut self, appname: &str) -> Result<(), ClientError> {
        self.ensure_connected()?;
        let args = protocol::register_source(appname)?;
        self.invoke("registerSource", args).await
    }

    /// Subscribe to a named service event. No local subscription state is
    /// kept; the service is the sole source of truth.
    pub async fn subscribe(&mut self, event: &str) -> Result<(), ClientError> {
        self.ensure_connected()?;
        let args = protocol::event_subscription(event, true)?;
        self.invoke(protocol::VERB_EVENT_SUBSCRIPTION, args).await
    }

    pub async fn unsubscribe(&mut self, event: &str) -> Result<(), ClientError> {
        self.ensure_connected()?;
        let args = protocol::event_subscription(event, false)?;
        self.invoke(protocol::VERB_EVENT_SUBSCRIPTION, args).await
    }

    /// Replaces any previously registered notification callback.
    pub fn set_notification_callback(&mut self, cb: impl FnMut(&str, &Value) + Send + 'static) {
        self.on_notification = Some(Box::new(cb));
    }

    /// Replaces any previously registered reply callback.
    pub fn set_reply_callback(&mut self, cb: impl FnMut(&Value) + Send + 'static) {
        self.on_reply = Some(Box::new(cb));
    }

    /// Replaces any previously registered hangup callback.
    pub fn set_hangup_callback(&mut self, cb: impl FnMut() + Send + 'static) {
        self.on_hangup = Some(Box::new(cb));
    }

    /// Register the dedicated handler for one event kind, replacing any
    /// previous handler for that kind. Fires in addition to the generic
    /// notification callback, never instead of it.
    pub fn set_event_handler(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&Value) + Send + 'static,
    ) {
        self.handlers.insert(kind, Box::new(handler));
    }

    /// Pump one inbound frame and route it. The embedding event loop drives
    /// this; the facade never blocks on replies anywhere else.
    ///
    /// Returns `Ok(true)` while the connection is live and `Ok(false)` once
    /// the remote hung up or the stream ended.
    pub async fn dispatch_next(&mut self) -> Result<bool, ClientError> {
        let conn = self.conn.as_mut().ok_or(ClientError::NotConnected)?;
        match conn.next_inbound().await {
            Some(Inbound::Reply(payload)) => {
                if let Some(cb) = self.on_reply.as_mut() {
                    cb(&payload);
                }
                Ok(true)
            }
            Some(Inbound::Notification { name, payload }) => {
                self.handle_notification(&name, &payload);
                Ok(true)
            }
            Some(Inbound::Hangup) => {
                debug!("remote hung up");
                if let Some(cb) = self.on_hangup.as_mut() {
                    cb();
                }
                Ok(false)
            }
            // A stream that ends without an explicit hangup frame is still a
            // closed connection.
            None => {
                debug!("inbound stream ended");
                if let Some(cb) = self.on_hangup.as_mut() {
                    cb();
                }
                Ok(false)
            }
        }
    }

    /// Drop the connection if one exists. Idempotent, and safe on a facade
    /// that never finished (or never attempted) initialization.
    pub fn close(&mut self) {
        self.conn = None;
    }

    fn ensure_connected(&self) -> Result<(), ClientError> {
        if self.conn.is_some() {
            Ok(())
        } else {
            Err(ClientError::NotConnected)
        }
    }

    fn handle_notification(&mut self, name: &str, payload: &Value) {
        if !name.contains(SERVICE_NAME) {
            debug!(event = name, "dropping notification for another service");
            return;
        }
        if let Some(cb) = self.on_notification.as_mut() {
            cb(name, payload);
        }
        if let Some(kind) = protocol::classify_event(name) {
            if let Some(handler) = self.handlers.get_mut(&kind) {
                handler(payload);
            }
        }
    }
}
