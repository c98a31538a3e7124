//! Ready-made observer that dumps observed chunks through `tracing`.
//!
//! Events go to the `iotap::trace` target at `DEBUG`, so they stay silent
//! unless a filter such as `RUST_LOG=iotap::trace=debug` enables them.

use crate::observer::Observer;
use iotap_core::{DumpConfig, DumpFormat};
use std::fmt;
use tracing::debug;

/// Which side of a stream an observer is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Bytes read from the stream
    Read,
    /// Bytes written to the stream
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => write!(f, "read"),
            Direction::Write => write!(f, "write"),
        }
    }
}

/// Emits one debug event per observed chunk and keeps running totals.
#[derive(Debug, Clone)]
pub struct TraceObserver {
    label: String,
    direction: Direction,
    format: DumpFormat,
    max_bytes: usize,
    ops: u64,
    bytes: u64,
}

impl TraceObserver {
    /// Create an observer labelled `label` for one side of a stream.
    pub fn new(label: impl Into<String>, direction: Direction, config: &DumpConfig) -> Self {
        Self {
            label: label.into(),
            direction,
            format: config.format,
            max_bytes: config.max_bytes,
            ops: 0,
            bytes: 0,
        }
    }

    /// Label attached to every event.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Side of the stream this observer watches.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of operations observed so far.
    pub fn ops(&self) -> u64 {
        self.ops
    }

    /// Number of bytes observed so far.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl Observer for TraceObserver {
    fn observe(&mut self, bytes: &[u8]) {
        self.ops += 1;
        self.bytes += bytes.len() as u64;

        let (data, truncated) = render(bytes, self.format, self.max_bytes);
        debug!(
            target: "iotap::trace",
            label = %self.label,
            direction = %self.direction,
            op = self.ops,
            len = bytes.len(),
            truncated,
            data = %data,
            "chunk"
        );
    }
}

/// Render at most `max_bytes` of `bytes` (0 means all).
///
/// Returns the dump and whether it was cut short.
pub fn render(bytes: &[u8], format: DumpFormat, max_bytes: usize) -> (String, bool) {
    let truncated = max_bytes != 0 && bytes.len() > max_bytes;
    let shown = if truncated { &bytes[..max_bytes] } else { bytes };

    let data = match format {
        DumpFormat::Hex => hex::encode(shown),
        DumpFormat::Text => String::from_utf8_lossy(shown).escape_debug().to_string(),
    };

    (data, truncated)
}
