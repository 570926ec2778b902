/// Catalog loading and lookups
use crate::view::{build_view, SortOrder};
use aria_core::{AriaError, Result, Track, TrackIndex};
use std::path::Path;

/// The full, immutable set of playable tracks
///
/// Loaded once at process start from the generated JSON index document.
#[derive(Debug, Clone)]
pub struct Catalog {
    generated_at: String,
    tracks: Vec<Track>,
}

impl Catalog {
    /// Load the catalog from a track index file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AriaError::index(format!("cannot read index at {}: {e}", path.display()))
        })?;
        let index: TrackIndex = serde_json::from_str(&raw)
            .map_err(|e| AriaError::index(format!("cannot parse index: {e}")))?;

        tracing::debug!(
            tracks = index.tracks.len(),
            declared = index.track_count,
            "catalog index loaded"
        );
        if index.tracks.len() != index.track_count {
            tracing::warn!(
                declared = index.track_count,
                actual = index.tracks.len(),
                "index trackCount does not match track list length"
            );
        }

        Ok(Self::from_index(index))
    }

    /// Build a catalog from an already-parsed index document
    pub fn from_index(index: TrackIndex) -> Self {
        Self {
            generated_at: index.generated_at,
            tracks: index.tracks,
        }
    }

    /// When the index was generated (RFC 3339)
    pub fn generated_at(&self) -> &str {
        &self.generated_at
    }

    /// All tracks in index order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog holds no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Look up a track by id
    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Filtered, date-sorted view over the catalog
    pub fn filtered(&self, query: &str, order: SortOrder) -> Vec<Track> {
        build_view(&self.tracks, query, order)
    }

    /// Number of tracks flagged as favorites
    pub fn favorite_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_favorite).count()
    }

    /// Sorted unique model display names
    pub fn models(&self) -> Vec<String> {
        let mut models: Vec<String> = self
            .tracks
            .iter()
            .filter_map(|t| t.model_display_name.clone())
            .collect();
        models.sort();
        models.dedup();
        models
    }
}
