//! End-to-end session flow against a scripted transport.
//!
//! Exercises the full lifecycle the embedding application sees: init with
//! the baseline subscription, a stream-open call, interleaved replies and
//! notifications pumped through `dispatch_next`, and the final hangup.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use audio4a_client::{
    ClientError, Connection, EndpointType, EventKind, Inbound, SoundManager, Transport,
    TransportError,
};

type CallLog = Arc<Mutex<Vec<(String, String, Value)>>>;
type Script = Arc<Mutex<VecDeque<Inbound>>>;

/// Transport double that records every call and plays back a scripted
/// sequence of inbound frames.
#[derive(Default)]
struct ScriptedTransport {
    calls: CallLog,
    script: Script,
    last_uri: Arc<Mutex<Option<String>>>,
}

struct ScriptedConnection {
    calls: CallLog,
    script: Script,
}

#[async_trait]
impl Transport for ScriptedTransport {
    type Connection = ScriptedConnection;

    async fn connect(&mut self, uri: &str) -> Result<ScriptedConnection, TransportError> {
        *self.last_uri.lock().unwrap() = Some(uri.to_string());
        Ok(ScriptedConnection {
            calls: Arc::clone(&self.calls),
            script: Arc::clone(&self.script),
        })
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn call(&mut self, api: &str, verb: &str, args: Value) -> Result<(), TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((api.to_string(), verb.to_string(), args));
        Ok(())
    }

    async fn next_inbound(&mut self) -> Option<Inbound> {
        self.script.lock().unwrap().pop_front()
    }
}

#[tokio::test]
async fn test_full_session_flow() -> Result<()> {
    let transport = ScriptedTransport::default();
    let calls = Arc::clone(&transport.calls);
    let script = Arc::clone(&transport.script);
    let last_uri = Arc::clone(&transport.last_uri);

    let mut client = SoundManager::new(transport);
    client.init(1700, "wstoken").await?;

    assert_eq!(
        last_uri.lock().unwrap().as_deref(),
        Some("ws://localhost:1700/api?token=wstoken")
    );

    // Replies land verbatim in the reply slot, notifications in the
    // notification slot, and the source-state event also reaches its
    // dedicated handler.
    let replies = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&replies);
    client.set_reply_callback(move |payload| {
        sink.lock().unwrap().push(payload.clone());
    });

    let notifications = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notifications);
    client.set_notification_callback(move |name, _| {
        sink.lock().unwrap().push(name.to_string());
    });

    let source_states = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&source_states);
    client.set_event_handler(EventKind::AsyncSetSourceState, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let hangups = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hangups);
    client.set_hangup_callback(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    client
        .stream_open("media", EndpointType::Source, Some(5))
        .await?;

    {
        let mut script = script.lock().unwrap();
        script.push_back(Inbound::Reply(json!({ "stream_id": 9 })));
        script.push_back(Inbound::Notification {
            name: "ahl4a/asyncSetSourceState".into(),
            payload: json!({ "sourceID": 101, "handle": 2, "sourceState": "running" }),
        });
        script.push_back(Inbound::Notification {
            name: "navigation/positionChanged".into(),
            payload: json!({}),
        });
        script.push_back(Inbound::Hangup);
    }

    client.set_stream_state(Some(9), "running", None).await?;

    // Pump the scripted traffic until the hangup.
    while client.dispatch_next().await? {}

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].1, "event_subscription"); // baseline from init
    assert_eq!(calls[0].2["event"], json!(["asyncSetSourceState"]));
    assert_eq!(calls[1].1, "stream_open");
    assert_eq!(calls[1].2["endpoint_type"], "source");
    assert_eq!(calls[2].1, "set_stream_state");
    assert_eq!(calls[2].2["stream_id"], 9);
    assert!(calls.iter().all(|(api, _, _)| api == "ahl4a"));

    assert_eq!(
        replies.lock().unwrap().as_slice(),
        [json!({ "stream_id": 9 })]
    );
    // The foreign notification never surfaced.
    assert_eq!(
        notifications.lock().unwrap().as_slice(),
        ["ahl4a/asyncSetSourceState"]
    );
    assert_eq!(source_states.load(Ordering::SeqCst), 1);
    assert_eq!(hangups.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_operations_after_close_fail_cleanly() -> Result<()> {
    let mut client = SoundManager::new(ScriptedTransport::default());
    client.init(1700, "wstoken").await?;
    assert!(client.is_connected());

    client.close();
    assert!(!client.is_connected());
    assert!(matches!(
        client.stream_close(1).await,
        Err(ClientError::NotConnected)
    ));

    // Closing again is a no-op.
    client.close();
    Ok(())
}
