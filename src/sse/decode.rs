//! Decoding SSE data payloads into [`Snapshot`] values.

use crate::models::Snapshot;
use thiserror::Error;

/// Longest payload excerpt attached to a decode error.
pub const PAYLOAD_PREVIEW_LEN: usize = 300;

/// A payload that failed to decode as a snapshot.
///
/// Recoverable by policy: the stream consumer logs it and keeps
/// reading the next event.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to decode snapshot: {message}")]
pub struct SnapshotDecodeError {
    /// The underlying serde_json error, rendered as text
    pub message: String,
    /// Bounded excerpt of the offending payload
    pub payload_preview: String,
}

/// Parse one SSE data payload into a [`Snapshot`].
///
/// Unknown JSON fields are ignored and missing fields take their zero
/// value; only malformed JSON or a type mismatch fails.
pub fn decode_snapshot(payload: &str) -> Result<Snapshot, SnapshotDecodeError> {
    serde_json::from_str(payload).map_err(|err| SnapshotDecodeError {
        message: err.to_string(),
        payload_preview: payload_preview(payload),
    })
}

/// Truncate a payload for diagnostics, marking the cut.
fn payload_preview(payload: &str) -> String {
    if payload.len() <= PAYLOAD_PREVIEW_LEN {
        return payload.to_string();
    }
    let mut cut = PAYLOAD_PREVIEW_LEN;
    while !payload.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &payload[..cut])
}
