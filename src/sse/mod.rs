//! SSE (Server-Sent Events) stream decoding
//!
//! Decodes the SSE framing used by the `/vram/stream` endpoint:
//! - `data: <json>` - snapshot payload line
//! - `event: <type>` / `id: <n>` - metadata (ignored)
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments/keep-alives (ignored)
//!
//! # Module structure
//! - `frame` - byte-to-line buffering, line classification, and
//!   per-event payload assembly
//! - `decode` - data payload to [`crate::models::Snapshot`] decoding

mod decode;
mod frame;

pub use decode::{decode_snapshot, SnapshotDecodeError, PAYLOAD_PREVIEW_LEN};
pub use frame::{classify_line, EventAssembler, LineBuffer, SseLine};
