//! Render entry points: strip, transcode, stream.
//!
//! [`render_bytes`] is the core operation over an in-memory document.
//! The other functions resolve the document first ([`render`],
//! [`render_reader`]), skip streaming ([`normalize`], [`inspect`]), or
//! wrap everything for synchronous callers ([`render_sync`]).

use crate::config::StreamConfig;
use crate::error::AnsicatError;
use crate::output::{DocumentInfo, RenderStats};
use crate::pipeline::{cp437, input, sauce};
use crate::stream;
use std::future::Future;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::Instant;
use tracing::{debug, info};

/// Download timeout used by [`inspect`] and [`render_sync`] for URL inputs.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Strip the SAUCE trailer and transcode the payload to UTF-8.
pub fn normalize(raw: &[u8]) -> Result<Vec<u8>, AnsicatError> {
    let payload = sauce::strip(raw)?;
    cp437::transcode(payload)
}

/// Render an in-memory document to `sink`.
///
/// # Errors
/// - `InvalidConfig` if the config is invalid (checked before anything else)
/// - `MetadataSizeOverflow` if the SAUCE trailer is larger than the document
/// - `TranscodingFailed`, `WriteFailed`, `Cancelled` from the later stages
pub async fn render_bytes<W>(
    raw: &[u8],
    sink: &mut W,
    config: &StreamConfig,
) -> Result<RenderStats, AnsicatError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let total_start = Instant::now();
    config.validate()?;

    let payload = sauce::strip(raw)?;
    let sauce_bytes = raw.len() - payload.len();
    if sauce_bytes > 0 {
        debug!("Stripped {} byte SAUCE trailer", sauce_bytes);
    }

    let transcoded = cp437::transcode(payload)?;
    debug!(
        "Transcoded {} CP437 bytes → {} UTF-8 bytes",
        payload.len(),
        transcoded.len()
    );

    let stream_stats = stream::stream_to(transcoded, sink, config).await?;

    let stats = RenderStats {
        document_bytes: raw.len(),
        sauce_bytes,
        payload_bytes: payload.len(),
        stream: stream_stats,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Rendered {} bytes in {} chunks, {}ms",
        stats.stream.bytes_written, stats.stream.chunks_written, stats.total_duration_ms
    );
    Ok(stats)
}

/// Drain `reader` completely, then render it to `sink`.
pub async fn render_reader<R, W>(
    reader: R,
    sink: &mut W,
    config: &StreamConfig,
) -> Result<RenderStats, AnsicatError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
{
    config.validate()?;
    let raw = drain_or_cancel(config, input::read_all(reader, "<reader>")).await?;
    render_bytes(&raw, sink, config).await
}

/// Render a file path, `-` (stdin) or HTTP/HTTPS URL to `sink`.
pub async fn render<W>(
    input_str: impl AsRef<str>,
    sink: &mut W,
    config: &StreamConfig,
    download_timeout_secs: u64,
) -> Result<RenderStats, AnsicatError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let input_str = input_str.as_ref();
    info!("Rendering: {}", input_str);
    config.validate()?;
    let raw = drain_or_cancel(config, input::read_input(input_str, download_timeout_secs)).await?;
    render_bytes(&raw, sink, config).await
}

/// Race an input read against the shutdown signal, so a stalled stdin or a
/// slow download can be interrupted before streaming starts.
async fn drain_or_cancel<F>(config: &StreamConfig, read: F) -> Result<Vec<u8>, AnsicatError>
where
    F: Future<Output = Result<Vec<u8>, AnsicatError>>,
{
    let mut shutdown = config.shutdown.clone();
    tokio::select! {
        biased;
        _ = stream::wait_for_shutdown(shutdown.as_mut()) => {
            Err(AnsicatError::Cancelled { written: 0 })
        }
        raw = read => raw,
    }
}

/// Synchronous wrapper around [`render`] that writes to stdout.
///
/// Creates a temporary tokio runtime internally.
pub fn render_sync(
    input_str: impl AsRef<str>,
    config: &StreamConfig,
) -> Result<RenderStats, AnsicatError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| AnsicatError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(async {
            let mut stdout = tokio::io::stdout();
            render(input_str, &mut stdout, config, DEFAULT_DOWNLOAD_TIMEOUT_SECS).await
        })
}

/// Describe a document's layout without streaming it.
pub async fn inspect(input_str: impl AsRef<str>) -> Result<DocumentInfo, AnsicatError> {
    let raw = input::read_input(input_str.as_ref(), DEFAULT_DOWNLOAD_TIMEOUT_SECS).await?;
    inspect_bytes(&raw)
}

/// [`inspect`] for an in-memory document.
pub fn inspect_bytes(raw: &[u8]) -> Result<DocumentInfo, AnsicatError> {
    let payload = sauce::strip(raw)?;
    let transcoded = cp437::transcode(payload)?;
    Ok(DocumentInfo {
        document_bytes: raw.len(),
        sauce: sauce::detect(raw),
        payload_bytes: payload.len(),
        transcoded_bytes: transcoded.len(),
    })
}
