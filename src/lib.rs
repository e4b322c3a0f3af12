//! # ansicat
//!
//! Cat legacy text-mode art (`.ans`, `.asc`, `.nfo` …) to a modern terminal.
//!
//! Art from the BBS era is stored in code page 437 and often ends with a
//! SAUCE metadata trailer. Piping such a file straight to a UTF-8 terminal
//! gives mojibake instead of shading blocks and box drawing, and the trailer
//! shows up as garbage at the bottom. This crate strips the trailer,
//! transcodes every byte to its IBM PC glyph, and writes the result in
//! chunks, optionally paced to look like it is arriving over a modem.
//!
//! ## Pipeline Overview
//!
//! ```text
//! art file
//!  │
//!  ├─ 1. Input   drain a path, stdin (`-`) or URL into memory
//!  ├─ 2. Strip   cut off the SAUCE trailer, if any
//!  ├─ 3. Decode  CP437 → UTF-8, one byte at a time
//!  └─ 4. Stream  fixed-size chunks, with an optional delay after each
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ansicat::{render, StreamConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 2400 baud feel: 240 bytes every 100 ms
//!     let config = StreamConfig::builder()
//!         .rate_limit(2400)
//!         .chunk_size(240)
//!         .build()?;
//!     let mut stdout = tokio::io::stdout();
//!     let stats = render("logo.ans", &mut stdout, &config, 30).await?;
//!     eprintln!("{} bytes in {}ms", stats.stream.bytes_written, stats.total_duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `ansicat` binary (clap + anyhow + serde_json + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod render;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{StreamConfig, StreamConfigBuilder, DEFAULT_CHUNK_SIZE, DEFAULT_RATE_LIMIT};
pub use error::{AnsicatError, Stage};
pub use output::{DocumentInfo, RenderStats, StreamStats};
pub use pipeline::pace::Pacing;
pub use pipeline::sauce::SauceRecord;
pub use progress::{NoopProgressCallback, ProgressCallback, StreamProgressCallback};
pub use render::{
    inspect, inspect_bytes, normalize, render, render_bytes, render_reader, render_sync,
};
pub use stream::{paced_stream, stream_to, Chunk, ChunkStream};
