//! Configuration types for rendering an art file.
//!
//! All streaming behaviour is controlled through [`StreamConfig`], built via
//! its [`StreamConfigBuilder`]. The config is passed explicitly into every
//! entry point; the library holds no process-wide state.

use crate::error::AnsicatError;
use crate::progress::ProgressCallback;
use std::fmt;
use tokio::sync::watch;

/// Default pacing target in bytes per second (roughly a 56k modem).
pub const DEFAULT_RATE_LIMIT: u64 = 7000;

/// Default write granularity in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Configuration for streaming a rendered document to a sink.
///
/// # Example
/// ```rust
/// use ansicat::StreamConfig;
///
/// let config = StreamConfig::builder()
///     .rate_limit(2400)
///     .chunk_size(240)
///     .build()
///     .unwrap();
/// assert!(config.is_paced());
/// ```
#[derive(Clone)]
pub struct StreamConfig {
    /// Target throughput in bytes per second. `0` disables pacing. Default: 7000.
    ///
    /// A positive value smaller than [`chunk_size`](Self::chunk_size) also
    /// disables pacing: a chunk is never split to hit the rate.
    pub rate_limit: u64,

    /// Bytes written per chunk; the unit of pacing. Must be ≥ 1. Default: 1024.
    pub chunk_size: usize,

    /// Optional progress hook fired as chunks are written.
    pub progress_callback: Option<ProgressCallback>,

    /// Shutdown signal. When the sender publishes `true` the streamer stops
    /// at the next chunk boundary, including in the middle of a pacing delay.
    pub shutdown: Option<watch::Receiver<bool>>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            rate_limit: DEFAULT_RATE_LIMIT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_callback: None,
            shutdown: None,
        }
    }
}

impl fmt::Debug for StreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamConfig")
            .field("rate_limit", &self.rate_limit)
            .field("chunk_size", &self.chunk_size)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn StreamProgressCallback>"),
            )
            .field("shutdown", &self.shutdown.is_some())
            .finish()
    }
}

impl StreamConfig {
    /// Create a new builder for `StreamConfig`.
    pub fn builder() -> StreamConfigBuilder {
        StreamConfigBuilder {
            config: Self::default(),
        }
    }

    /// A config that writes everything as fast as the sink accepts it.
    pub fn unlimited() -> Self {
        Self {
            rate_limit: 0,
            ..Self::default()
        }
    }

    /// Check the constraints the streamer relies on.
    pub fn validate(&self) -> Result<(), AnsicatError> {
        if self.chunk_size == 0 {
            return Err(AnsicatError::InvalidConfig(
                "Chunk size must be ≥ 1 byte".into(),
            ));
        }
        Ok(())
    }

    /// Whether this config results in a delay between chunks.
    pub fn is_paced(&self) -> bool {
        crate::pipeline::pace::Pacing::from_config(self).is_paced()
    }
}

/// Builder for [`StreamConfig`].
#[derive(Debug)]
pub struct StreamConfigBuilder {
    config: StreamConfig,
}

impl StreamConfigBuilder {
    pub fn rate_limit(mut self, bytes_per_sec: u64) -> Self {
        self.config.rate_limit = bytes_per_sec;
        self
    }

    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.config.chunk_size = bytes;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    pub fn shutdown(mut self, rx: watch::Receiver<bool>) -> Self {
        self.config.shutdown = Some(rx);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<StreamConfig, AnsicatError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
