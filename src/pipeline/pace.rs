//! Pacing policy: how long to wait after each chunk.
//!
//! The delay is the time one chunk would take to arrive at the target rate,
//! `chunk_size / rate_limit` seconds. A rate below the chunk size disables
//! pacing altogether instead of splitting chunks.

use crate::config::StreamConfig;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Delay applied between chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Write as fast as the sink accepts.
    Unlimited,
    /// Wait this long after every chunk.
    PerChunk(Duration),
}

impl Pacing {
    /// Derive the pacing for a rate (bytes/second) and chunk size (bytes).
    pub fn new(rate_limit: u64, chunk_size: usize) -> Self {
        if rate_limit == 0 || chunk_size == 0 || rate_limit < chunk_size as u64 {
            return Pacing::Unlimited;
        }
        let nanos = chunk_size as u128 * NANOS_PER_SEC / rate_limit as u128;
        Pacing::PerChunk(Duration::from_nanos(nanos as u64))
    }

    pub fn from_config(config: &StreamConfig) -> Self {
        Self::new(config.rate_limit, config.chunk_size)
    }

    pub fn is_paced(&self) -> bool {
        matches!(self, Pacing::PerChunk(_))
    }

    /// The per-chunk delay, zero when unpaced.
    pub fn delay(&self) -> Duration {
        match self {
            Pacing::Unlimited => Duration::ZERO,
            Pacing::PerChunk(d) => *d,
        }
    }
}
