//! The stream read loop: pulls byte chunks, assembles SSE events,
//! decodes snapshots, and owns termination semantics.

use crate::client::TransportError;
use crate::models::Snapshot;
use crate::sse::{classify_line, decode_snapshot, EventAssembler, LineBuffer};
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Counters owned by a single consumer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub lines_read: u64,
    pub snapshots_decoded: u64,
}

/// How a consumer run ended.
#[derive(Debug)]
pub enum StreamOutcome {
    /// Clean end-of-input after at least one line or snapshot
    ClosedNormally { stats: StreamStats },
    /// Clean end-of-input with zero activity; usually a server that
    /// closed the connection as soon as it was accepted
    ClosedEmpty,
    /// A transport read error other than end-of-input; no retry
    Aborted {
        error: TransportError,
        stats: StreamStats,
    },
    /// Voluntary stop via [`CancelFlag`]
    Cancelled { stats: StreamStats },
}

/// Shared one-directional stop signal.
///
/// Set by the ctrl-c watcher task, observed by the read loop once per
/// iteration. The flag is the only state shared across tasks.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drive the read loop until the stream ends, aborts, or is cancelled.
///
/// `on_snapshot` receives each decoded snapshot together with its
/// 1-based ordinal. A decode failure is logged with a bounded payload
/// preview and the running snapshot count, then the loop continues; a
/// trailing event left unterminated at end-of-input is discarded.
pub async fn consume_stream<S, F>(
    mut bytes: S,
    cancel: &CancelFlag,
    mut on_snapshot: F,
) -> StreamOutcome
where
    S: Stream<Item = Result<Bytes, TransportError>> + Unpin,
    F: FnMut(u64, &Snapshot),
{
    let mut lines = LineBuffer::new();
    let mut assembler = EventAssembler::new();
    let mut stats = StreamStats::default();

    loop {
        if cancel.is_cancelled() {
            return StreamOutcome::Cancelled { stats };
        }

        match bytes.next().await {
            Some(Ok(chunk)) => {
                for line in lines.push_chunk(&chunk) {
                    stats.lines_read += 1;
                    let Some(payload) = assembler.feed(classify_line(&line)) else {
                        continue;
                    };
                    match decode_snapshot(&payload) {
                        Ok(snapshot) => {
                            stats.snapshots_decoded += 1;
                            on_snapshot(stats.snapshots_decoded, &snapshot);
                        }
                        Err(err) => {
                            warn!(
                                snapshots_decoded = stats.snapshots_decoded,
                                payload = %err.payload_preview,
                                "failed to decode snapshot: {}",
                                err.message
                            );
                        }
                    }
                }
            }
            Some(Err(error)) => return StreamOutcome::Aborted { error, stats },
            None => {
                if stats.lines_read == 0 && stats.snapshots_decoded == 0 {
                    return StreamOutcome::ClosedEmpty;
                }
                return StreamOutcome::ClosedNormally { stats };
            }
        }
    }
}
