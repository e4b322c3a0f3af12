//! Chunked, optionally paced emission of a transcoded document.
//!
//! The stream is cut into fixed-size chunks, independent of content; only
//! the last chunk may be short. When pacing is active, the streamer waits
//! for the per-chunk delay after every chunk, the last one included, so `N`
//! bytes take roughly `N / rate_limit` seconds.
//!
//! The wait is a `tokio::time::sleep` raced against the config's shutdown
//! signal, so a caller can interrupt a slow render between chunks without
//! changing how chunks are cut.

use crate::config::StreamConfig;
use crate::error::AnsicatError;
use crate::output::StreamStats;
use crate::pipeline::pace::Pacing;
use crate::progress::ProgressCallback;
use futures::stream::{self, StreamExt};
use std::ops::Range;
use std::pin::Pin;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_stream::Stream;

/// A boxed stream of chunk payloads, already paced.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Vec<u8>> + Send>>;

/// A window into the transcoded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub offset: usize,
    pub len: usize,
}

impl Chunk {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Number of chunks needed to cover `total_len` bytes.
pub fn chunk_count(total_len: usize, chunk_size: usize) -> usize {
    total_len.div_ceil(chunk_size.max(1))
}

/// Cut `total_len` bytes into consecutive chunks of at most `chunk_size`.
pub fn chunks(total_len: usize, chunk_size: usize) -> impl Iterator<Item = Chunk> {
    let step = chunk_size.max(1);
    (0..total_len).step_by(step).map(move |offset| Chunk {
        offset,
        len: step.min(total_len - offset),
    })
}

/// Turn `data` into a stream of chunks that waits out the pacing delay after
/// each chunk before yielding the next one (or ending).
pub fn paced_stream(data: Vec<u8>, config: &StreamConfig) -> Result<ChunkStream, AnsicatError> {
    config.validate()?;
    let delay = Pacing::from_config(config).delay();
    let cuts = chunks(data.len(), config.chunk_size);

    let s = stream::unfold((data, cuts, false), move |(data, mut cuts, started)| async move {
        if started && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let chunk = cuts.next()?;
        let bytes = data[chunk.range()].to_vec();
        Some((bytes, (data, cuts, true)))
    });

    Ok(Box::pin(s))
}

/// Write `data` to `sink` chunk by chunk, pacing as configured.
///
/// # Errors
/// - [`AnsicatError::InvalidConfig`] before anything is written if the chunk
///   size is zero
/// - [`AnsicatError::WriteFailed`] on the first rejected write or flush; the
///   chunk is not retried
/// - [`AnsicatError::Cancelled`] when the shutdown signal fires
pub async fn stream_to<W>(
    data: Vec<u8>,
    sink: &mut W,
    config: &StreamConfig,
) -> Result<StreamStats, AnsicatError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    config.validate()?;
    let pacing = Pacing::from_config(config);
    let total_bytes = data.len();
    let total_chunks = chunk_count(total_bytes, config.chunk_size);
    let cb = config.progress_callback.as_ref();
    let mut shutdown = config.shutdown.clone();

    if let Some(cb) = cb {
        cb.on_stream_start(total_bytes, total_chunks);
    }

    let start = Instant::now();
    let mut chunks = paced_stream(data, config)?;
    let mut written = 0usize;
    let mut index = 0usize;

    loop {
        let next = tokio::select! {
            biased;
            _ = wait_for_shutdown(shutdown.as_mut()) => {
                return Err(report(cb, AnsicatError::Cancelled { written }));
            }
            next = chunks.next() => next,
        };
        let Some(chunk) = next else { break };

        write_chunk(sink, &chunk, written)
            .await
            .map_err(|e| report(cb, e))?;
        written += chunk.len();

        if let Some(cb) = cb {
            cb.on_chunk_written(index, total_chunks, chunk.len());
        }
        index += 1;
    }

    let stats = StreamStats {
        bytes_written: written,
        chunks_written: index,
        paced: pacing.is_paced(),
        chunk_delay_us: pacing.delay().as_micros() as u64,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    if let Some(cb) = cb {
        cb.on_stream_complete(&stats);
    }
    Ok(stats)
}

async fn write_chunk<W>(sink: &mut W, chunk: &[u8], offset: usize) -> Result<(), AnsicatError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    sink.write_all(chunk)
        .await
        .map_err(|source| AnsicatError::WriteFailed { offset, source })?;
    // Flush so each chunk reaches the terminal before the delay starts.
    sink.flush().await.map_err(|source| AnsicatError::WriteFailed {
        offset: offset + chunk.len(),
        source,
    })
}

/// Resolves once the shutdown signal reads `true`; never resolves without one.
pub(crate) async fn wait_for_shutdown(rx: Option<&mut watch::Receiver<bool>>) {
    let Some(rx) = rx else {
        return std::future::pending().await;
    };
    let sender_gone = rx.wait_for(|stop| *stop).await.is_err();
    if sender_gone {
        std::future::pending::<()>().await;
    }
}

fn report(cb: Option<&ProgressCallback>, err: AnsicatError) -> AnsicatError {
    if let Some(cb) = cb {
        cb.on_stream_error(&err.to_string());
    }
    err
}
