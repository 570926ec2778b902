//! Domain types

mod track;

pub use track::{Track, TrackCondition, TrackIndex, TrackLyrics, TrackLyricsSection};
