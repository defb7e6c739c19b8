//! SSE framing: line buffering, line classification, and per-event
//! data payload assembly.

/// A single classified SSE line.
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Comment/keep-alive line (starts with `:`)
    Comment(String),
    /// `event:` or `id:` metadata; carries no decode-relevant state
    Meta(String),
    /// `data: ` payload fragment, prefix stripped and trimmed
    Data(String),
    /// Blank line - event boundary
    Empty,
    /// Anything else; ignored but kept distinguishable for diagnostics
    Unrecognized(String),
}

/// Classify one complete line, after trimming trailing whitespace.
///
/// The data prefix is matched as the exact six characters `data: `.
/// A `data:` with no following space is not a data line; the upstream
/// server always emits the space, and the match is kept strict so a
/// broadening would be a deliberate change.
pub fn classify_line(line: &str) -> SseLine {
    let line = line.trim_end();

    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix(':') {
        return SseLine::Comment(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data: ") {
        return SseLine::Data(rest.trim().to_string());
    }

    if line.starts_with("event:") || line.starts_with("id:") {
        return SseLine::Meta(line.to_string());
    }

    SseLine::Unrecognized(line.to_string())
}

/// Reassembles `\n`-terminated lines from arbitrarily chunked bytes.
///
/// Partial lines are held until their terminating newline arrives, so
/// the emitted line sequence does not depend on where the transport
/// happened to split its chunks. A trailing `\r` is stripped. Each
/// completed line is decoded lossily, which keeps a chunk boundary
/// inside a multi-byte character from corrupting the framing.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every line it completes.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// True if bytes are held that have not yet formed a complete line.
    pub fn has_partial(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Accumulates `data:` fragments and emits one payload per event.
///
/// An event ends at a blank line; a blank line with nothing
/// accumulated emits nothing. Multiple `data:` lines before a
/// boundary are joined with `\n` in arrival order. Dropping the
/// assembler discards an unterminated trailing event: a truncated
/// final event is incomplete by protocol definition.
#[derive(Debug, Default)]
pub struct EventAssembler {
    data: Vec<String>,
}

impl EventAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one classified line, returning a complete data payload
    /// when the line closes an event that accumulated one.
    pub fn feed(&mut self, line: SseLine) -> Option<String> {
        match line {
            SseLine::Data(fragment) => {
                if !fragment.is_empty() {
                    self.data.push(fragment);
                }
                None
            }
            SseLine::Empty => {
                if self.data.is_empty() {
                    None
                } else {
                    let payload = self.data.join("\n");
                    self.data.clear();
                    Some(payload)
                }
            }
            SseLine::Comment(_) | SseLine::Meta(_) | SseLine::Unrecognized(_) => None,
        }
    }
}
