//! Pipeline stages for rendering an art file.
//!
//! Each submodule implements exactly one transformation step, so each is
//! independently testable.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ sauce ──▶ cp437 ──▶ pace
//! (drain)   (strip)   (UTF-8)   (delay policy)
//! ```
//!
//! 1. [`input`] — drain a path, `-` (stdin) or URL into memory
//! 2. [`sauce`] — find the optional SAUCE trailer and cut it off
//! 3. [`cp437`] — map every byte through the fixed code page table
//! 4. [`pace`]  — decide the per-chunk delay; the chunk writer itself lives
//!    in [`crate::stream`]
//!
//! `sauce`, `cp437` and `pace` are pure: no I/O, no logging.

pub mod cp437;
pub mod input;
pub mod pace;
pub mod sauce;
