//! CLI binary for ansicat.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `StreamConfig`, wires Ctrl-C to the shutdown signal, and prints results.

use ansicat::{inspect, render, AnsicatError, StreamConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use tokio::sync::watch;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Show a file at full speed
  ansicat --rate-limit 0 logo.ans

  # Default pacing: 7000 bytes/s in 1024-byte chunks
  ansicat logo.ans

  # 2400 baud feel
  ansicat --rate-limit 240 --chunk-size 24 logo.ans

  # Read from stdin
  cat logo.ans | ansicat -

  # Fetch from an art archive
  ansicat https://16colo.rs/pack/mist1023/raw/LDA-MIST1023.ANS

  # Show the SAUCE trailer size without rendering
  ansicat --inspect-only --json logo.ans

PACING:
  A chunk is written, then the tool waits chunk-size / rate-limit seconds.
  A rate limit smaller than the chunk size turns pacing off.
"#;

/// Display CP437 text-mode art on a UTF-8 terminal.
#[derive(Parser, Debug)]
#[command(
    name = "ansicat",
    version,
    about = "Display CP437 text-mode art on a UTF-8 terminal",
    long_about = "Strip the SAUCE trailer from a legacy art file, transcode it from code page 437 \
to UTF-8 and print it, optionally paced to emulate a slow modem connection.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Art file path, `-` for stdin, or HTTP/HTTPS URL.
    input: String,

    /// Output rate in bytes per second (0 for no limit).
    #[arg(long, env = "ANSICAT_RATE_LIMIT", default_value_t = ansicat::DEFAULT_RATE_LIMIT)]
    rate_limit: u64,

    /// Chunk size in bytes.
    #[arg(long, env = "ANSICAT_CHUNK_SIZE", default_value_t = ansicat::DEFAULT_CHUNK_SIZE as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: u64,

    /// Print document layout only, no rendering.
    #[arg(long)]
    inspect_only: bool,

    /// Emit `--inspect-only` / `--stats` output as JSON.
    #[arg(long, env = "ANSICAT_JSON")]
    json: bool,

    /// Print a summary to stderr after rendering.
    #[arg(long, env = "ANSICAT_STATS")]
    stats: bool,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "ANSICAT_DOWNLOAD_TIMEOUT", default_value_t = 30)]
    download_timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "ANSICAT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "ANSICAT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Logs go to stderr; stdout carries the art.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let info = inspect(&cli.input)
            .await
            .context("Failed to inspect art file")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialize document info")?
            );
        } else {
            println!("File:           {}", cli.input);
            println!("Size:           {} bytes", info.document_bytes);
            match info.sauce {
                Some(record) => {
                    println!("SAUCE:          yes ({} bytes)", record.size);
                    println!("Comment lines:  {}", record.comment_lines);
                }
                None => println!("SAUCE:          no"),
            }
            println!("Payload:        {} bytes", info.payload_bytes);
            println!("UTF-8 output:   {} bytes", info.transcoded_bytes);
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let config = build_config(&cli, shutdown_rx)?;
    debug!("{:?}", config);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    // ── Render ───────────────────────────────────────────────────────────
    let mut stdout = tokio::io::stdout();
    let stats = match render(&cli.input, &mut stdout, &config, cli.download_timeout).await {
        Ok(stats) => stats,
        Err(AnsicatError::Cancelled { written }) => {
            debug!("Interrupted after {} bytes", written);
            // Leave the terminal in a sane state after a half-drawn picture.
            println!("\x1b[0m");
            std::process::exit(130);
        }
        Err(e) => return Err(e).context("Rendering failed"),
    };

    if cli.stats && !cli.quiet {
        if cli.json {
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
            );
        } else {
            eprintln!(
                "{} bytes in, {} SAUCE bytes stripped, {} bytes out in {} chunks, {}ms",
                stats.document_bytes,
                stats.sauce_bytes,
                stats.stream.bytes_written,
                stats.stream.chunks_written,
                stats.total_duration_ms,
            );
        }
    }

    Ok(())
}

/// Map CLI args to `StreamConfig`.
fn build_config(cli: &Cli, shutdown: watch::Receiver<bool>) -> Result<StreamConfig> {
    let chunk_size =
        usize::try_from(cli.chunk_size).context("Chunk size does not fit in memory")?;
    let config = StreamConfig::builder()
        .rate_limit(cli.rate_limit)
        .chunk_size(chunk_size)
        .shutdown(shutdown)
        .build()
        .context("Invalid configuration")?;

    if cli.rate_limit > 0 && !config.is_paced() {
        tracing::warn!(
            "Rate limit {} is below chunk size {}; pacing disabled",
            cli.rate_limit,
            chunk_size
        );
    }

    Ok(config)
}
