//! Error types for the ansicat library.
//!
//! Every failure aborts the pipeline at the stage where it happened. The
//! library never prints or logs an error on its own; it hands back an
//! [`AnsicatError`] and lets the caller decide how to present it and which
//! exit code to use. [`AnsicatError::stage`] tells the caller *where* in the
//! pipeline the failure occurred.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the ansicat library.
#[derive(Debug, Error)]
pub enum AnsicatError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Art file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input source could not be fully drained.
    #[error("Failed to read '{input}': {source}")]
    ReadFailed {
        input: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Document errors ───────────────────────────────────────────────────
    /// The SAUCE trailer claims more bytes than the document holds.
    #[error(
        "SAUCE record claims {record_size} bytes but the document is only {document_len} bytes long"
    )]
    MetadataSizeOverflow {
        record_size: usize,
        document_len: usize,
    },

    /// A codepage entry is not a valid Unicode scalar value.
    #[error("Cannot transcode byte 0x{byte:02X}: U+{code_point:04X} is not a valid character")]
    TranscodingFailed { byte: u8, code_point: u32 },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The output sink rejected a chunk.
    #[error("Failed to write output at byte {offset}: {source}")]
    WriteFailed {
        offset: usize,
        #[source]
        source: std::io::Error,
    },

    /// The shutdown signal fired while streaming.
    #[error("Rendering cancelled after {written} bytes")]
    Cancelled { written: usize },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or entry-point validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The pipeline stage an [`AnsicatError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Config,
    Read,
    Strip,
    Transcode,
    Write,
    /// Not tied to a pipeline stage (e.g. the runtime could not start).
    Internal,
}

impl AnsicatError {
    /// Which stage of the pipeline failed.
    pub fn stage(&self) -> Stage {
        match self {
            AnsicatError::FileNotFound { .. }
            | AnsicatError::PermissionDenied { .. }
            | AnsicatError::ReadFailed { .. }
            | AnsicatError::DownloadFailed { .. }
            | AnsicatError::DownloadTimeout { .. } => Stage::Read,
            AnsicatError::MetadataSizeOverflow { .. } => Stage::Strip,
            AnsicatError::TranscodingFailed { .. } => Stage::Transcode,
            AnsicatError::WriteFailed { .. } | AnsicatError::Cancelled { .. } => Stage::Write,
            AnsicatError::InvalidConfig(_) => Stage::Config,
            AnsicatError::Internal(_) => Stage::Internal,
        }
    }
}
