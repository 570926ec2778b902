//! Filtered view builder
//!
//! A view is a derived ordering of catalog tracks: a case-insensitive
//! substring filter followed by a stable date sort. Pure function of its
//! inputs.

use aria_core::Track;

/// Date sort order for views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first
    #[default]
    Desc,

    /// Oldest first
    Asc,
}

impl SortOrder {
    /// Parse from a query-string value; unknown values fall back to `Desc`
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Build a filtered, date-sorted view over `tracks`
///
/// An empty query matches every track. Otherwise the query is lower-cased
/// and matched as a substring against the lower-cased concatenation of
/// title, model name, sound description and tags; absent fields contribute
/// nothing. The sort is stable, by parsed `createdAt` with missing or
/// unparsable dates treated as timestamp 0.
pub fn build_view(tracks: &[Track], query: &str, order: SortOrder) -> Vec<Track> {
    let needle = query.trim().to_lowercase();

    let mut view: Vec<Track> = tracks
        .iter()
        .filter(|track| needle.is_empty() || haystack(track).contains(&needle))
        .cloned()
        .collect();

    view.sort_by_key(|track| {
        let ts = track.created_timestamp_millis();
        match order {
            SortOrder::Desc => -ts,
            SortOrder::Asc => ts,
        }
    });

    view
}

/// Lower-cased searchable text for a track
fn haystack(track: &Track) -> String {
    let mut parts: Vec<&str> = vec![track.title.as_str()];
    if let Some(model) = track.model_display_name.as_deref() {
        parts.push(model);
    }
    if let Some(sound) = track.sound.as_deref() {
        parts.push(sound);
    }
    for tag in &track.tags {
        parts.push(tag.as_str());
    }
    parts.join(" ").to_lowercase()
}
