//! SAUCE trailer detection: work out how many bytes to cut off the end.
//!
//! A SAUCE record is an optional block appended to many art files:
//!
//! ```text
//! … payload … | 0x1A | "COMNT" + N × 64-byte lines | "SAUCE" + 123-byte body |
//!               EOF     comment block (N may be 0)   fixed 128-byte record
//! ```
//!
//! Only two fixed positions are ever read: the `"SAUCE"` marker exactly
//! 128 bytes before the end, and the comment-line count 94 bytes past it.
//! The trailer size follows from those alone; the payload is never scanned.
//!
//! The comment block marker is counted (`"COMNT"`, 5 bytes) whether or not
//! it is actually present, so a record with zero comment lines still strips
//! `1 + 5 + 128` bytes.

use crate::error::AnsicatError;
use serde::Serialize;

/// Marker that opens the fixed record.
pub const SAUCE_MARKER: &[u8; 5] = b"SAUCE";

/// Size of the fixed record, marker included.
pub const SAUCE_RECORD_LEN: usize = 128;

/// Offset of the comment-line count, measured from the start of the marker.
pub const COMMENT_COUNT_OFFSET: usize = SAUCE_MARKER.len() + 94;

/// Width of one comment line.
pub const COMMENT_LINE_LEN: usize = 64;

/// Length of the `"COMNT"` comment block marker.
pub const COMMENT_MARKER_LEN: usize = 5;

/// Length of the end-of-file separator (`0x1A`) before the trailer.
pub const EOF_SEPARATOR_LEN: usize = 1;

/// A recognised SAUCE trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SauceRecord {
    /// Declared number of 64-byte comment lines.
    pub comment_lines: u8,
    /// Total bytes the trailer occupies at the end of the document.
    pub size: usize,
}

impl SauceRecord {
    /// Trailer size for a given comment-line count.
    pub fn size_for(comment_lines: u8) -> usize {
        EOF_SEPARATOR_LEN
            + COMMENT_MARKER_LEN
            + comment_lines as usize * COMMENT_LINE_LEN
            + SAUCE_RECORD_LEN
    }
}

/// Look for a SAUCE record at the tail of `doc`.
///
/// Documents of 128 bytes or fewer never match.
pub fn detect(doc: &[u8]) -> Option<SauceRecord> {
    if doc.len() <= SAUCE_RECORD_LEN {
        return None;
    }
    let start = doc.len() - SAUCE_RECORD_LEN;
    if &doc[start..start + SAUCE_MARKER.len()] != SAUCE_MARKER {
        return None;
    }
    let comment_lines = doc[start + COMMENT_COUNT_OFFSET];
    Some(SauceRecord {
        comment_lines,
        size: SauceRecord::size_for(comment_lines),
    })
}

/// Number of bytes to trim from the end of `doc` (0 without a record).
///
/// This does not check the size against the document length; see [`strip`].
pub fn trailer_len(doc: &[u8]) -> usize {
    detect(doc).map_or(0, |r| r.size)
}

/// Return `doc` without its SAUCE trailer.
///
/// A trailer whose computed size is at least the document length is rejected
/// rather than truncated to an empty or negative payload.
pub fn strip(doc: &[u8]) -> Result<&[u8], AnsicatError> {
    match detect(doc) {
        None => Ok(doc),
        Some(record) if record.size >= doc.len() => Err(AnsicatError::MetadataSizeOverflow {
            record_size: record.size,
            document_len: doc.len(),
        }),
        Some(record) => Ok(&doc[..doc.len() - record.size]),
    }
}
