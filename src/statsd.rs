//! Collector client
//!
//! Minimal datagram client for the local collector agent: events, gauges,
//! and counters over a connected UDP socket, speaking the dogstatsd text
//! protocol. The socket is expected to reach the agent over loopback, so
//! sends never block; an unreachable agent degrades to per-call failures
//! that the owning sink logs and swallows.

use crate::error::SinkError;
use crate::reporter::EventPayload;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::debug;

/// The agent rejects datagrams above this size
const MAX_DATAGRAM_BYTES: usize = 8192;

/// UDP client for the local collector agent
#[derive(Debug)]
pub struct StatsdClient {
    socket: UdpSocket,
}

impl StatsdClient {
    /// Bind an ephemeral local socket and connect it to the collector
    pub async fn connect(addr: SocketAddr) -> Result<Self, SinkError> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| SinkError::Connect(format!("bind failed: {e}")))?;
        socket
            .connect(addr)
            .await
            .map_err(|e| SinkError::Connect(format!("connect to {addr} failed: {e}")))?;
        Ok(Self { socket })
    }

    /// Send an event datagram
    pub async fn event(&self, event: &EventPayload) -> Result<(), SinkError> {
        self.send(&encode_event(event)).await
    }

    /// Send a gauge sample
    pub async fn gauge(&self, name: &str, value: f64, tags: &[String]) -> Result<(), SinkError> {
        self.send(&encode_gauge(name, value, tags)).await
    }

    /// Send a unit counter increment
    pub async fn incr(&self, name: &str, tags: &[String]) -> Result<(), SinkError> {
        self.send(&encode_incr(name, tags)).await
    }

    async fn send(&self, datagram: &str) -> Result<(), SinkError> {
        if datagram.len() > MAX_DATAGRAM_BYTES {
            return Err(SinkError::Send(format!(
                "datagram of {} bytes exceeds collector limit of {MAX_DATAGRAM_BYTES}",
                datagram.len()
            )));
        }
        self.socket
            .send(datagram.as_bytes())
            .await
            .map_err(|e| SinkError::Send(e.to_string()))?;
        Ok(())
    }
}

/// Encode an event: `_e{<title bytes>,<body bytes>}:title|body|...`
///
/// Newlines are escaped before the byte lengths are taken; the agent
/// parses lengths against the escaped text.
fn encode_event(event: &EventPayload) -> String {
    let title = event.title.replace('\n', "\\n");
    let body = event.body.replace('\n', "\\n");
    let mut datagram = format!("_e{{{},{}}}:{}|{}", title.len(), body.len(), title, body);
    for (key, value) in &event.fields {
        match field_prefix(key) {
            Some(prefix) => {
                datagram.push('|');
                datagram.push_str(prefix);
                datagram.push(':');
                datagram.push_str(value);
            }
            None => debug!(field = %key, "Skipping unknown event field"),
        }
    }
    append_tags(&mut datagram, &event.tags);
    datagram
}

fn encode_gauge(name: &str, value: f64, tags: &[String]) -> String {
    let mut datagram = format!("{name}:{value}|g");
    append_tags(&mut datagram, tags);
    datagram
}

fn encode_incr(name: &str, tags: &[String]) -> String {
    let mut datagram = format!("{name}:1|c");
    append_tags(&mut datagram, tags);
    datagram
}

/// Wire prefix for a known event field, `None` for anything else
fn field_prefix(key: &str) -> Option<&'static str> {
    match key {
        "aggregation_key" => Some("k"),
        "priority" => Some("p"),
        "source_type_name" => Some("s"),
        "alert_type" => Some("t"),
        "date_happened" => Some("d"),
        "hostname" => Some("h"),
        _ => None,
    }
}

fn append_tags(datagram: &mut String, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    datagram.push_str("|#");
    datagram.push_str(&tags.join(","));
}
