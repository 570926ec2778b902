//! Aria Core
//!
//! Core types and error handling shared by the Aria catalog browser.
//!
//! This crate defines:
//! - **Domain Types**: `Track`, `TrackCondition`, `TrackLyrics`, `TrackIndex`
//! - **Error Handling**: Unified `AriaError` and `Result` types
//!
//! Tracks are immutable records loaded once per process from a generated
//! index document; nothing in this crate mutates them after deserialization.

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{AriaError, Result};
pub use types::{Track, TrackCondition, TrackIndex, TrackLyrics, TrackLyricsSection};
