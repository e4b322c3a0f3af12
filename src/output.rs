//! Result types returned by the render entry points.

use crate::pipeline::sauce::SauceRecord;
use serde::Serialize;

/// What the streamer did with a transcoded stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    /// Bytes written to the sink.
    pub bytes_written: usize,
    /// Chunks written to the sink.
    pub chunks_written: usize,
    /// Whether a delay was inserted after each chunk.
    pub paced: bool,
    /// Delay applied after each chunk, in microseconds (0 when unpaced).
    pub chunk_delay_us: u64,
    /// Wall-clock time spent streaming, in milliseconds.
    pub duration_ms: u64,
}

/// Statistics for a full render: strip, transcode, stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Length of the raw input document.
    pub document_bytes: usize,
    /// Bytes removed as a SAUCE trailer (0 when none was found).
    pub sauce_bytes: usize,
    /// Length of the CP437 payload after stripping.
    pub payload_bytes: usize,
    /// Streaming statistics for the UTF-8 output.
    pub stream: StreamStats,
    /// End-to-end wall-clock time, in milliseconds.
    pub total_duration_ms: u64,
}

/// Structural facts about an art document, without rendering it.
///
/// Only the SAUCE trailer's *size* is reported; its fields are not decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    /// Length of the raw document.
    pub document_bytes: usize,
    /// The trailer, if one was recognised.
    pub sauce: Option<SauceRecord>,
    /// Length of the payload after stripping.
    pub payload_bytes: usize,
    /// Length of the payload once transcoded to UTF-8.
    pub transcoded_bytes: usize,
}
