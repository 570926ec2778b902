/// Track domain types
///
/// Mirrors the generated track index document. Field names on the wire are
/// camelCase; the storage-relative file name is serialized as `b2FileName`.
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single generated audio track
///
/// Immutable after load; the catalog never mutates track records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier within the catalog
    pub id: String,

    /// Display title
    pub title: String,

    /// Duration in seconds, when known
    #[serde(default)]
    pub duration_seconds: Option<f64>,

    /// Pre-formatted duration for display ("3:42")
    #[serde(default)]
    pub duration_formatted: Option<String>,

    /// Favorite flag from the source library
    #[serde(default)]
    pub is_favorite: bool,

    /// Display name of the generating model
    #[serde(default)]
    pub model_display_name: Option<String>,

    /// Play count from the source library
    #[serde(default)]
    pub play_count: Option<u64>,

    /// Creation timestamp (RFC 3339) or null
    #[serde(default)]
    pub created_at: Option<String>,

    /// Generation seed
    #[serde(default)]
    pub seed: Option<i64>,

    /// Free-form sound description
    #[serde(default)]
    pub sound: Option<String>,

    /// Generation conditions
    #[serde(default)]
    pub conditions: Vec<TrackCondition>,

    /// Structured lyrics, when present
    #[serde(default)]
    pub lyrics: Option<TrackLyrics>,

    /// Free-form metadata block from the source export
    #[serde(default)]
    pub meta: Map<String, Value>,

    /// Raw API response block from the source export
    #[serde(default)]
    pub api: Map<String, Value>,

    /// Storage-relative file name used to request playback
    #[serde(rename = "b2FileName")]
    pub file_name: String,

    /// Cover image URL, when present
    #[serde(default)]
    pub image_url: Option<String>,

    /// Ordered tag list (may be empty)
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Track {
    /// Parsed creation time in milliseconds since the epoch
    ///
    /// Missing or unparsable dates sort as timestamp 0.
    pub fn created_timestamp_millis(&self) -> i64 {
        self.created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0)
    }
}

/// One generation condition attached to a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackCondition {
    #[serde(default)]
    pub prompt: Option<String>,

    #[serde(default)]
    pub lyrics: Option<String>,

    #[serde(default)]
    pub vibe_input: Option<String>,

    #[serde(default)]
    pub voice_input: Option<String>,

    #[serde(default)]
    pub strength: Option<f64>,

    #[serde(default)]
    pub condition_start: Option<f64>,

    #[serde(default)]
    pub condition_end: Option<f64>,

    #[serde(default)]
    pub t_start: Option<f64>,

    #[serde(default)]
    pub t_end: Option<f64>,
}

/// Structured lyrics for a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackLyrics {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub vocal_type: Option<String>,

    #[serde(default)]
    pub timbre: Option<String>,

    #[serde(default)]
    pub age_profile: Option<String>,

    #[serde(default)]
    pub emotion_profile: Option<String>,

    #[serde(default)]
    pub style: Option<Map<String, Value>>,

    #[serde(default)]
    pub sections: Vec<TrackLyricsSection>,
}

/// A titled lyrics section with its content lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackLyricsSection {
    pub section: String,

    #[serde(default)]
    pub content: Vec<String>,
}

/// The on-disk track index document
///
/// Loaded once at process start and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackIndex {
    /// When the index was generated (RFC 3339)
    pub generated_at: String,

    /// Number of tracks in the index
    pub track_count: usize,

    /// Track records
    pub tracks: Vec<Track>,
}
