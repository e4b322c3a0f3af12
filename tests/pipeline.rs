//! End-to-end tests for the strip → transcode → stream pipeline.
//!
//! Timing tests run on a paused tokio clock, so pacing delays are measured
//! exactly and the suite does not actually sleep.

use ansicat::pipeline::sauce::{COMMENT_COUNT_OFFSET, SAUCE_MARKER, SAUCE_RECORD_LEN};
use ansicat::{
    normalize, render, render_bytes, AnsicatError, Stage, StreamConfig, StreamProgressCallback,
    StreamStats,
};
use std::io::{self, Write};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::AsyncWrite;
use tokio::sync::watch;
use tokio::time::Instant;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Sink that remembers every individual write.
#[derive(Default)]
struct RecordingSink {
    writes: Vec<Vec<u8>>,
}

impl RecordingSink {
    fn bytes(&self) -> Vec<u8> {
        self.writes.concat()
    }

    fn lengths(&self) -> Vec<usize> {
        self.writes.iter().map(Vec::len).collect()
    }
}

impl AsyncWrite for RecordingSink {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.writes.push(buf.to_vec());
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

fn config(rate_limit: u64, chunk_size: usize) -> StreamConfig {
    StreamConfig::builder()
        .rate_limit(rate_limit)
        .chunk_size(chunk_size)
        .build()
        .expect("valid config")
}

/// `payload` followed by a SAUCE trailer with `comments` comment lines.
fn art_with_sauce(payload: &[u8], comments: u8) -> Vec<u8> {
    let mut doc = payload.to_vec();
    doc.push(0x1A);
    doc.extend_from_slice(b"COMNT");
    doc.extend(std::iter::repeat_n(b'#', comments as usize * 64));
    let mut record = vec![0u8; SAUCE_RECORD_LEN];
    record[..5].copy_from_slice(SAUCE_MARKER);
    record[7..7 + 12].copy_from_slice(b"Logo of Doom");
    record[COMMENT_COUNT_OFFSET] = comments;
    doc.extend_from_slice(&record);
    doc
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn plain_document_streams_in_fixed_chunks() {
    let doc: Vec<u8> = (0..200).map(|i| b'a' + (i % 26) as u8).collect();
    let mut sink = RecordingSink::default();
    let start = Instant::now();

    let stats = render_bytes(&doc, &mut sink, &config(0, 64)).await.unwrap();

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(sink.bytes(), doc);
    assert_eq!(sink.lengths(), vec![64, 64, 64, 8]);
    assert_eq!(stats.sauce_bytes, 0);
    assert_eq!(stats.payload_bytes, 200);
    assert_eq!(stats.stream.chunks_written, 4);
    assert!(!stats.stream.paced);
}

#[tokio::test]
async fn sauce_trailer_is_not_rendered() {
    let payload = b"\x1b[0;1;34m\xdb\xdb\xb2\xb1\xb0\x1b[0m\r\n".to_vec();
    for comments in [0u8, 2] {
        let doc = art_with_sauce(&payload, comments);
        let mut sink: Vec<u8> = Vec::new();
        let stats = render_bytes(&doc, &mut sink, &StreamConfig::unlimited())
            .await
            .unwrap();

        assert_eq!(stats.sauce_bytes, 1 + 5 + 64 * comments as usize + 128);
        assert_eq!(stats.payload_bytes, payload.len());
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "\u{1b}[0;1;34m██▓▒░\u{1b}[0m\r\n"
        );
    }
}

#[tokio::test]
async fn document_of_exactly_128_bytes_is_never_stripped() {
    let mut doc = vec![b' '; SAUCE_RECORD_LEN];
    doc[..5].copy_from_slice(SAUCE_MARKER);
    let mut sink: Vec<u8> = Vec::new();
    let stats = render_bytes(&doc, &mut sink, &StreamConfig::unlimited())
        .await
        .unwrap();
    assert_eq!(stats.sauce_bytes, 0);
    assert_eq!(sink, doc);
}

#[tokio::test]
async fn trailer_larger_than_document_is_an_error() {
    // 130 bytes, marker 128 from the end, zero comments: the trailer would be
    // 134 bytes.
    let mut doc = vec![b' '; 130];
    doc[2..7].copy_from_slice(SAUCE_MARKER);
    doc[2 + COMMENT_COUNT_OFFSET] = 0;
    let mut sink: Vec<u8> = Vec::new();

    let err = render_bytes(&doc, &mut sink, &StreamConfig::unlimited())
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Stage::Strip);
    assert!(matches!(
        err,
        AnsicatError::MetadataSizeOverflow {
            record_size: 134,
            document_len: 130
        }
    ));
    assert!(sink.is_empty(), "nothing may be written on a strip failure");
}

#[test]
fn every_byte_has_a_fixed_glyph() {
    let all: Vec<u8> = (0..=255u8).collect();
    let text = String::from_utf8(normalize(&all).unwrap()).unwrap();
    let glyphs: Vec<char> = text.chars().collect();
    assert_eq!(glyphs.len(), 256);
    assert_eq!(glyphs[0x41], 'A');
    assert_eq!(glyphs[0x1B], '\u{1b}');
    assert_eq!(glyphs[0x80], 'Ç');
    assert_eq!(glyphs[0xC9], '╔');
    assert_eq!(glyphs[0xDB], '█');
    assert_eq!(glyphs[0xE1], 'ß');
    assert_eq!(glyphs[0xFE], '■');
}

#[tokio::test(start_paused = true)]
async fn paced_render_takes_bytes_over_rate() {
    let doc = vec![b'#'; 1000];
    let mut sink = RecordingSink::default();
    let start = Instant::now();

    // 100-byte chunks at 500 B/s: 200 ms after each of 10 chunks.
    let stats = render_bytes(&doc, &mut sink, &config(500, 100)).await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(2), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(2100), "{elapsed:?}");
    assert_eq!(stats.stream.chunk_delay_us, 200_000);
    assert_eq!(sink.lengths(), vec![100; 10]);
}

#[tokio::test(start_paused = true)]
async fn rate_below_chunk_size_disables_pacing() {
    let doc = vec![b'#'; 4096];
    let mut sink = RecordingSink::default();
    let start = Instant::now();

    let stats = render_bytes(&doc, &mut sink, &config(100, 1024)).await.unwrap();

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(!stats.stream.paced);
    assert_eq!(sink.lengths(), vec![1024; 4]);
}

#[tokio::test]
async fn write_failure_stops_the_stream() {
    let mut sink = tokio_test::io::Builder::new()
        .write(b"0123")
        .write_error(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        .build();

    let err = render_bytes(b"0123456789", &mut sink, &config(0, 4))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Stage::Write);
    assert!(matches!(err, AnsicatError::WriteFailed { offset: 4, .. }));
}

#[tokio::test(start_paused = true)]
async fn shutdown_interrupts_pacing_delay() {
    let (tx, rx) = watch::channel(false);
    let cfg = StreamConfig::builder()
        .rate_limit(100)
        .chunk_size(100)
        .shutdown(rx)
        .build()
        .unwrap();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        tx.send(true).unwrap();
    });

    let mut sink: Vec<u8> = Vec::new();
    let start = Instant::now();
    let err = render_bytes(&vec![b'x'; 1000], &mut sink, &cfg)
        .await
        .unwrap_err();

    // Chunks go out at 0 s and 1 s; the signal lands during the second delay.
    assert!(matches!(err, AnsicatError::Cancelled { written: 200 }), "{err:?}");
    assert_eq!(sink.len(), 200);
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn progress_events_follow_the_stream() {
    #[derive(Default)]
    struct Log(Mutex<Vec<String>>);

    impl StreamProgressCallback for Log {
        fn on_stream_start(&self, total_bytes: usize, total_chunks: usize) {
            self.0
                .lock()
                .unwrap()
                .push(format!("start {total_bytes}/{total_chunks}"));
        }
        fn on_chunk_written(&self, index: usize, _total_chunks: usize, bytes: usize) {
            self.0.lock().unwrap().push(format!("chunk {index}:{bytes}"));
        }
        fn on_stream_complete(&self, stats: &StreamStats) {
            self.0
                .lock()
                .unwrap()
                .push(format!("done {}", stats.bytes_written));
        }
    }

    let log = Arc::new(Log::default());
    let cfg = StreamConfig::builder()
        .rate_limit(0)
        .chunk_size(4)
        .progress_callback(log.clone())
        .build()
        .unwrap();

    let mut sink: Vec<u8> = Vec::new();
    // 0xB3 expands to 3 UTF-8 bytes: 3 × 3 = 9 bytes out.
    render_bytes(b"\xb3\xb3\xb3", &mut sink, &cfg).await.unwrap();

    let events = log.0.lock().unwrap().clone();
    assert_eq!(
        events,
        vec!["start 9/3", "chunk 0:4", "chunk 1:4", "chunk 2:1", "done 9"]
    );
}

#[tokio::test]
async fn renders_from_a_file_path() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&art_with_sauce(b"\xc9\xcd\xbb\r\n\xc8\xcd\xbc", 1))
        .unwrap();
    let path = tmp.path().to_string_lossy().to_string();

    let mut sink: Vec<u8> = Vec::new();
    let stats = render(&path, &mut sink, &StreamConfig::unlimited(), 5)
        .await
        .unwrap();

    assert_eq!(String::from_utf8(sink).unwrap(), "╔═╗\r\n╚═╝");
    assert_eq!(stats.sauce_bytes, 198);
}

#[tokio::test]
async fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone.ans");
    let mut sink: Vec<u8> = Vec::new();
    let err = render(
        path.to_string_lossy(),
        &mut sink,
        &StreamConfig::unlimited(),
        5,
    )
    .await
    .unwrap_err();
    assert_eq!(err.stage(), Stage::Read);
}
