//! Progress-callback trait for per-chunk streaming events.
//!
//! Inject an [`Arc<dyn StreamProgressCallback>`] via
//! [`crate::config::StreamConfigBuilder::progress_callback`] to observe a
//! render as it is written: a host application can drive a status line,
//! forward events over a channel, or record throughput without the library
//! knowing how it communicates.
//!
//! # Example
//!
//! ```rust
//! use ansicat::{StreamConfig, StreamProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct ByteCounter {
//!     written: AtomicUsize,
//! }
//!
//! impl StreamProgressCallback for ByteCounter {
//!     fn on_chunk_written(&self, _index: usize, _total_chunks: usize, bytes: usize) {
//!         self.written.fetch_add(bytes, Ordering::SeqCst);
//!     }
//! }
//!
//! let counter = Arc::new(ByteCounter { written: AtomicUsize::new(0) });
//!
//! let config = StreamConfig::builder()
//!     .progress_callback(counter as Arc<dyn StreamProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::StreamStats;
use std::sync::Arc;

/// Called by the streamer as it writes each chunk.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait StreamProgressCallback: Send + Sync {
    /// Called once before the first chunk is written.
    ///
    /// # Arguments
    /// * `total_bytes`  — length of the transcoded stream
    /// * `total_chunks` — number of chunks it will be written in
    fn on_stream_start(&self, total_bytes: usize, total_chunks: usize) {
        let _ = (total_bytes, total_chunks);
    }

    /// Called after a chunk has been written and flushed, before any delay.
    ///
    /// # Arguments
    /// * `index`        — 0-indexed chunk number
    /// * `total_chunks` — number of chunks in the stream
    /// * `bytes`        — length of this chunk
    fn on_chunk_written(&self, index: usize, total_chunks: usize, bytes: usize) {
        let _ = (index, total_chunks, bytes);
    }

    /// Called once when every chunk has been written.
    fn on_stream_complete(&self, stats: &StreamStats) {
        let _ = stats;
    }

    /// Called when streaming aborts (write failure or cancellation).
    fn on_stream_error(&self, error: &str) {
        let _ = error;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl StreamProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::StreamConfig`].
pub type ProgressCallback = Arc<dyn StreamProgressCallback>;
