//! Wire codec for the live-update feed.
//!
//! The feed pushes a two-stage JSON framing: an outer envelope
//! `{"id": ..., "data": ...}` whose `data` field is itself a JSON document
//! encoded as a string, describing the stop snapshot
//! `{"s": ..., "b": [{"l": ..., "m": ...}, ...]}`. The nesting is part of
//! the wire contract (the server encodes the inner document independently,
//! because the same string is also rendered into the scannable code), so
//! the codec never flattens it: decoding is always envelope first, then
//! the inner payload from the envelope's `data` string.
//!
//! Everything here is a pure transformation. No I/O, no rendering state.

// Rust guideline compliant 2026-02

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors produced while decoding an inbound frame.
///
/// Decode failures are non-fatal to the session: the transport logs them
/// and discards the frame, keeping the previous render.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The outer envelope is not well-formed JSON or is missing fields.
    #[error("malformed envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The nested payload is not well-formed JSON, is missing fields, or
    /// carries a minutes value that is not a non-negative integer.
    #[error("malformed stop snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),
}

/// Outer wire message: an opaque identifier plus the still-encoded inner
/// payload. Created once per inbound frame and discarded after
/// reconciliation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SnapshotEnvelope {
    /// Opaque token identifying the currently valid scannable-code
    /// resource. Used only to build the display-image URL; the client
    /// enforces no uniqueness.
    #[serde(deserialize_with = "string_or_int")]
    pub id: String,

    /// The inner stop snapshot, still JSON-encoded. Decoded separately
    /// via [`decode_stop_snapshot`].
    pub data: String,
}

/// The full current arrival list for the monitored stop.
///
/// Ordering is server-defined and preserved as-is; the client never
/// re-sorts or deduplicates.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StopSnapshot {
    /// Stop identifier, as displayed in the header.
    #[serde(rename = "s", deserialize_with = "string_or_int")]
    pub stop_id: String,

    /// Predicted arrivals, in server order.
    #[serde(rename = "b")]
    pub arrivals: Vec<Arrival>,
}

/// One bus line's predicted time-to-arrival at the stop.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Arrival {
    /// Line identifier.
    #[serde(rename = "l")]
    pub line: String,

    /// Minutes until arrival. `0` is a sentinel meaning "imminent/at
    /// stop", not an exact duration. Negative or fractional wire values
    /// are rejected at decode time.
    #[serde(rename = "m")]
    pub minutes: u32,
}

/// Accepts a JSON string or integer and normalizes to `String`.
///
/// The upstream server serializes both the envelope `id` and the stop id
/// as bare numbers; other producers send strings. Both spellings are part
/// of the observed wire format.
fn string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

/// Decode the outer envelope from a raw text frame.
pub fn decode_envelope(raw: &str) -> Result<SnapshotEnvelope, DecodeError> {
    serde_json::from_str(raw).map_err(DecodeError::Envelope)
}

/// Decode a stop snapshot from the envelope's nested `data` string.
pub fn decode_stop_snapshot(raw: &str) -> Result<StopSnapshot, DecodeError> {
    serde_json::from_str(raw).map_err(DecodeError::Snapshot)
}

/// Decode a full frame: envelope first, then the nested payload.
///
/// Returns the envelope identifier together with the decoded snapshot,
/// which is exactly what the reconciler consumes.
pub fn decode_frame(raw: &str) -> Result<(String, StopSnapshot), DecodeError> {
    let envelope = decode_envelope(raw)?;
    let snapshot = decode_stop_snapshot(&envelope.data)?;
    Ok((envelope.id, snapshot))
}

/// Encode a stop snapshot to its inner JSON document.
pub fn encode_stop_snapshot(snapshot: &StopSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}

/// Encode a full frame with the nested-string framing: the snapshot is
/// serialized first, then embedded as the envelope's `data` string.
pub fn encode_frame(id: &str, snapshot: &StopSnapshot) -> Result<String, serde_json::Error> {
    let envelope = SnapshotEnvelope {
        id: id.to_string(),
        data: encode_stop_snapshot(snapshot)?,
    };
    serde_json::to_string(&envelope)
}
